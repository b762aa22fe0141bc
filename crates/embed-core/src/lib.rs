//! Embed Core - Shader bytecode embedding
//!
//! This crate provides:
//! - Artifact naming and C++ identifier derivation
//! - External shader compiler invocation
//! - Bytecode to decimal initializer transcoding
//! - Generated header rendering and the `embed` pipeline

pub mod compiler;
pub mod embedder;
pub mod error;
pub mod fragment;
pub mod naming;
pub mod transcode;

pub use compiler::{CompilerInvoker, DEFAULT_COMPILER, ExternalCompiler};
pub use embedder::{EmbedOptions, IntermediateArtifact, embed, fragment_path};
pub use error::{
    EXIT_COMPILER_FAILURE, EXIT_FILESYSTEM_FAILURE, EXIT_MISSING_INPUT, EXIT_OUTPUT_COLLISION, EmbedError,
    FsAction, Result,
};
pub use fragment::EmbeddedFragment;
pub use naming::{ArtifactName, class_identifier, is_valid_identifier};
pub use transcode::{ByteLiteral, SENTINEL};
