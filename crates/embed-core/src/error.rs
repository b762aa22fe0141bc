//! Error types for shader embedding.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status used when the external shader compiler rejects a source.
pub const EXIT_COMPILER_FAILURE: i32 = 126;
/// Exit status for a missing or unreadable shader source (`EX_NOINPUT`).
pub const EXIT_MISSING_INPUT: i32 = 66;
/// Exit status for failed writes or deletes in the build tree (`EX_IOERR`).
pub const EXIT_FILESYSTEM_FAILURE: i32 = 74;
/// Exit status when two sources would write the same header (`EX_CANTCREAT`).
pub const EXIT_OUTPUT_COLLISION: i32 = 73;

/// Filesystem step that failed while embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsAction {
    ReadIntermediate,
    WriteFragment,
    CreateOutputDir,
    RemoveIntermediate,
}

impl std::fmt::Display for FsAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            FsAction::ReadIntermediate => "read compiled intermediate",
            FsAction::WriteFragment => "write generated fragment",
            FsAction::CreateOutputDir => "create output directory",
            FsAction::RemoveIntermediate => "remove compiled intermediate",
        };
        f.write_str(action)
    }
}

/// Fatal errors raised by a single embed invocation.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Shader source {path:?} is missing or unreadable: {source}")]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader source {path:?} is not a file name")]
    InvalidSourceName { path: PathBuf },

    #[error("Error during shader compilation of {source_path:?} ({}): {stderr}", describe_status(.status))]
    CompilerFailure {
        source_path: PathBuf,
        /// `None` when the compiler could not be spawned or was killed by a signal
        status: Option<i32>,
        stderr: String,
    },

    #[error("Shaders {first:?} and {second:?} would both generate {fragment:?}")]
    OutputCollision {
        fragment: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to {action} {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        action: FsAction,
        #[source]
        source: std::io::Error,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "no exit status".to_string(),
    }
}

impl EmbedError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, action: FsAction, source: std::io::Error) -> Self {
        EmbedError::Filesystem {
            path: path.into(),
            action,
            source,
        }
    }

    /// Process exit status the build driver should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            EmbedError::MissingInput { .. } | EmbedError::InvalidSourceName { .. } => EXIT_MISSING_INPUT,
            EmbedError::CompilerFailure { .. } => EXIT_COMPILER_FAILURE,
            EmbedError::Filesystem { .. } => EXIT_FILESYSTEM_FAILURE,
            EmbedError::OutputCollision { .. } => EXIT_OUTPUT_COLLISION,
        }
    }
}

pub type Result<T> = std::result::Result<T, EmbedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let missing = EmbedError::MissingInput {
            path: "a.vert".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let compiler = EmbedError::CompilerFailure {
            source_path: "a.vert".into(),
            status: Some(2),
            stderr: String::new(),
        };
        let fs = EmbedError::filesystem(
            "a.gen.h",
            FsAction::WriteFragment,
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );

        assert_eq!(missing.exit_code(), EXIT_MISSING_INPUT);
        assert_eq!(compiler.exit_code(), 126);
        let collision = EmbedError::OutputCollision {
            fragment: "gen/shader_a_vert.gen.h".into(),
            first: "x/a.vert".into(),
            second: "y/a.vert".into(),
        };

        assert_eq!(fs.exit_code(), EXIT_FILESYSTEM_FAILURE);
        assert_eq!(collision.exit_code(), EXIT_OUTPUT_COLLISION);
        assert_ne!(collision.exit_code(), fs.exit_code());
        assert_ne!(missing.exit_code(), 0);
    }

    #[test]
    fn test_compiler_failure_message() {
        let err = EmbedError::CompilerFailure {
            source_path: "shaders/a.vert".into(),
            status: Some(1),
            stderr: "ERROR: 0:3: syntax error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit status 1"));
        assert!(msg.contains("syntax error"));

        let spawn = EmbedError::CompilerFailure {
            source_path: "shaders/a.vert".into(),
            status: None,
            stderr: "No such file or directory".to_string(),
        };
        assert!(spawn.to_string().contains("no exit status"));
    }
}
