//! Shader embedding
//!
//! One call compiles one shader, turns the compiled bytes into a header and
//! removes the compiled file again:
//!
//! 1. derive the artifact name from the source file name
//! 2. compile `<dir>/<source>` into `<dir>/<name>.spv`
//! 3. read the intermediate as raw bytes
//! 4. render `<name>.gen.h`
//! 5. delete the intermediate
//!
//! Every failure is fatal for the calling build. No header is written unless
//! compilation succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::CompilerInvoker;
use crate::error::{EmbedError, FsAction, Result};
use crate::fragment::EmbeddedFragment;
use crate::naming::ArtifactName;
use crate::transcode::DEFAULT_TOKENS_PER_LINE;

/// Per-build embedding options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Where headers go; `None` writes next to the source
    pub output_dir: Option<PathBuf>,
    /// Initializer tokens per line; zero keeps the list on one line
    pub tokens_per_line: usize,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            tokens_per_line: DEFAULT_TOKENS_PER_LINE,
        }
    }
}

/// Compiled intermediate owned by a single embed call.
///
/// Dropping the guard removes the file; [`IntermediateArtifact::remove`]
/// does the same but reports failure.
#[derive(Debug)]
pub struct IntermediateArtifact {
    path: PathBuf,
    removed: bool,
}

impl IntermediateArtifact {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| EmbedError::filesystem(&self.path, FsAction::ReadIntermediate, e))
    }

    /// Delete the intermediate from disk.
    pub fn remove(mut self) -> Result<()> {
        self.removed = true;
        fs::remove_file(&self.path)
            .map_err(|e| EmbedError::filesystem(&self.path, FsAction::RemoveIntermediate, e))
    }
}

impl Drop for IntermediateArtifact {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed intermediate {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove intermediate {}: {}", self.path.display(), e),
        }
    }
}

/// Compile `source_path` with `compiler` and write the embedded header.
pub fn embed<C: CompilerInvoker + ?Sized>(
    source_path: &Path,
    compiler: &C,
    options: &EmbedOptions,
) -> Result<EmbeddedFragment> {
    let name = ArtifactName::from_source(source_path)?;
    check_source(source_path)?;

    let intermediate_path = name.intermediate_path(source_dir(source_path));
    let fragment_path = fragment_path_for(&name, source_path, options);

    log::debug!(
        "Embedding {} as {} ({})",
        source_path.display(),
        name,
        name.identifier()
    );

    // The guard is created before compiling so a partially written
    // intermediate is removed even when the compiler fails.
    let intermediate = IntermediateArtifact::new(intermediate_path);
    compiler.compile(source_path, intermediate.path())?;

    let bytecode = intermediate.read()?;
    let fragment = EmbeddedFragment::render(
        fragment_path,
        name.identifier(),
        &bytecode,
        options.tokens_per_line,
    );
    fragment.write()?;
    intermediate.remove()?;

    log::info!(
        "Embedded {} -> {} ({} bytes)",
        source_path.display(),
        fragment.path().display(),
        bytecode.len()
    );
    Ok(fragment)
}

fn source_dir(source_path: &Path) -> &Path {
    source_path.parent().unwrap_or_else(|| Path::new(""))
}

fn fragment_path_for(name: &ArtifactName, source_path: &Path, options: &EmbedOptions) -> PathBuf {
    let dir = options
        .output_dir
        .as_deref()
        .unwrap_or_else(|| source_dir(source_path));
    name.fragment_path(dir)
}

/// Header path `embed` would write for `source_path`, without touching disk.
pub fn fragment_path(source_path: &Path, options: &EmbedOptions) -> Result<PathBuf> {
    let name = ArtifactName::from_source(source_path)?;
    Ok(fragment_path_for(&name, source_path, options))
}

fn check_source(source_path: &Path) -> Result<()> {
    let metadata = fs::metadata(source_path).map_err(|e| EmbedError::MissingInput {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_file() {
        return Err(EmbedError::MissingInput {
            path: source_path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    // Open once so permission problems surface before the compiler runs
    fs::File::open(source_path).map_err(|e| EmbedError::MissingInput {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
