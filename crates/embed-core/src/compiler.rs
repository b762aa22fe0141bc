//! External shader compiler invocation

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{EmbedError, Result};

/// Default executable for GLSL to SPIR-V compilation
pub const DEFAULT_COMPILER: &str = "glslangValidator";

/// Runs a shader compiler that writes a binary intermediate.
///
/// Implementations block until the compiler exits. A non-zero exit is
/// reported as [`EmbedError::CompilerFailure`].
pub trait CompilerInvoker {
    fn compile(&self, source: &Path, output: &Path) -> Result<()>;
}

impl<T: CompilerInvoker + ?Sized> CompilerInvoker for &T {
    fn compile(&self, source: &Path, output: &Path) -> Result<()> {
        (**self).compile(source, output)
    }
}

impl<T: CompilerInvoker + ?Sized> CompilerInvoker for Box<T> {
    fn compile(&self, source: &Path, output: &Path) -> Result<()> {
        (**self).compile(source, output)
    }
}

/// Compiler run as a child process:
/// `<executable> <args...> <source> -o <output>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCompiler {
    executable: PathBuf,
    args: Vec<String>,
}

impl ExternalCompiler {
    /// glslangValidator-style compiler producing Vulkan SPIR-V (`-V`)
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: vec!["-V".to_string()],
        }
    }

    /// Replace the flags placed before the source path
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, source: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command.args(&self.args).arg(source).arg("-o").arg(output);
        command
    }
}

impl Default for ExternalCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

impl CompilerInvoker for ExternalCompiler {
    fn compile(&self, source: &Path, output: &Path) -> Result<()> {
        let mut command = self.command(source, output);
        log::debug!("Running {:?}", command);

        let result = command.output().map_err(|e| EmbedError::CompilerFailure {
            source_path: source.to_path_buf(),
            status: None,
            stderr: format!("failed to run {}: {}", self.executable.display(), e),
        })?;

        if !result.status.success() {
            // glslangValidator reports errors on stdout
            let mut diagnostics = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&result.stdout);
            if !stdout.trim().is_empty() {
                if !diagnostics.is_empty() {
                    diagnostics.push('\n');
                }
                diagnostics.push_str(stdout.trim());
            }

            return Err(EmbedError::CompilerFailure {
                source_path: source.to_path_buf(),
                status: result.status.code(),
                stderr: diagnostics,
            });
        }

        log::debug!("Compiled {} -> {}", source.display(), output.display());
        Ok(())
    }
}
