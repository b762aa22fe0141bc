//! Build driver
//!
//! Fans the embedder out over every shader the caller names. Sources are
//! processed one at a time and the first failure stops the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use embed_config::{Config, ConfigError};
use embed_core::{CompilerInvoker, EmbedError, EmbedOptions, EmbeddedFragment};

use crate::discovery::detect_files;
use crate::messages::BuildMessages;

/// Exit status for unreadable or malformed configuration (`EX_CONFIG`)
pub const EXIT_CONFIG_FAILURE: i32 = 78;
/// Exit status for any other failure
pub const EXIT_FAILURE: i32 = 1;

/// Expand the command line inputs into shader source files.
///
/// Files are taken as given. Directories are searched recursively with the
/// configured extensions and excludes. The result is sorted and free of
/// duplicates.
pub fn collect_sources(inputs: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>, EmbedError> {
    let mut sources = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = detect_files(input, &config.sources.excludes, &config.sources.extensions);
            log::debug!("Found {} shader(s) under {}", found.len(), input.display());
            sources.extend(found);
        } else if input.exists() {
            sources.push(input.clone());
        } else {
            return Err(EmbedError::MissingInput {
                path: input.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }
    }

    sources.sort();
    sources.dedup();
    Ok(sources)
}

/// Embedding options taken from the `[output]` config section
pub fn embed_options(config: &Config) -> EmbedOptions {
    EmbedOptions {
        output_dir: config.output.directory().map(Path::to_path_buf),
        tokens_per_line: config.output.bytes_per_line,
    }
}

/// Fail when two sources would write the same header.
///
/// Runs before anything is compiled so a clash leaves the tree untouched.
pub fn check_output_collisions(sources: &[PathBuf], options: &EmbedOptions) -> Result<(), EmbedError> {
    let mut owners: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(sources.len());

    for source in sources {
        let fragment = embed_core::fragment_path(source, options)?;
        if let Some(first) = owners.get(&fragment) {
            return Err(EmbedError::OutputCollision {
                fragment,
                first: first.to_path_buf(),
                second: source.clone(),
            });
        }
        owners.insert(fragment, source);
    }

    Ok(())
}

/// Embed each source in order, stopping at the first failure.
pub fn run_embed<C: CompilerInvoker + ?Sized>(
    sources: &[PathBuf],
    compiler: &C,
    options: &EmbedOptions,
    messages: &BuildMessages,
) -> Result<Vec<EmbeddedFragment>, EmbedError> {
    check_output_collisions(sources, options)?;

    let mut fragments = Vec::with_capacity(sources.len());

    for source in sources {
        println!("{}", messages.compiling(source));
        match embed_core::embed(source, compiler, options) {
            Ok(fragment) => {
                println!("{}", messages.generated(fragment.path()));
                fragments.push(fragment);
            }
            Err(e) => {
                println!("{}", messages.failed(source));
                return Err(e);
            }
        }
    }

    Ok(fragments)
}

/// Process exit status for an error that reached `main`.
pub fn exit_status(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<EmbedError>() {
        return e.exit_code();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return EXIT_CONFIG_FAILURE;
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_status_for_compiler_failure() {
        let err = anyhow::Error::new(EmbedError::CompilerFailure {
            source_path: "a.vert".into(),
            status: Some(1),
            stderr: String::new(),
        });
        assert_eq!(exit_status(&err), 126);
    }

    #[test]
    fn test_exit_status_survives_context() {
        let result: Result<(), ConfigError> = Err(ConfigError::NoHomeDirectory);
        let err = result.context("loading configuration").unwrap_err();
        assert_eq!(exit_status(&err), EXIT_CONFIG_FAILURE);
    }

    #[test]
    fn test_exit_status_other() {
        assert_eq!(exit_status(&anyhow::anyhow!("boom")), EXIT_FAILURE);
    }

    #[test]
    fn test_embed_options_from_config() {
        let mut config = Config::default();
        assert_eq!(embed_options(&config).output_dir, None);

        config.output.directory = PathBuf::from("gen");
        config.output.bytes_per_line = 0;
        let options = embed_options(&config);
        assert_eq!(options.output_dir, Some(PathBuf::from("gen")));
        assert_eq!(options.tokens_per_line, 0);
    }

    #[test]
    fn test_same_base_name_collides_in_shared_output_dir() {
        let sources = [PathBuf::from("shaders/a/foo.vert"), PathBuf::from("shaders/b/foo.vert")];
        assert!(check_output_collisions(&sources, &EmbedOptions::default()).is_ok());

        let shared = EmbedOptions {
            output_dir: Some(PathBuf::from("gen")),
            ..EmbedOptions::default()
        };
        match check_output_collisions(&sources, &shared).unwrap_err() {
            EmbedError::OutputCollision { fragment, first, second } => {
                assert_eq!(fragment, PathBuf::from("gen/shader_foo_vert.gen.h"));
                assert_eq!(first, sources[0]);
                assert_eq!(second, sources[1]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dotted_and_underscored_names_collide() {
        let sources = [PathBuf::from("shaders/sky.vert"), PathBuf::from("shaders/sky_vert")];
        let err = check_output_collisions(&sources, &EmbedOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), embed_core::EXIT_OUTPUT_COLLISION);
    }

    #[test]
    fn test_collect_sources_rejects_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_sources(&[dir.path().join("missing.vert")], &Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), embed_core::EXIT_MISSING_INPUT);
    }
}
