//! shader-embed - Compile shaders and embed their bytecode in C++ headers
//!
//! The binary is a thin CLI over these modules. The embedding itself lives in:
//! - `embed-core` - naming, compiler invocation, transcoding, header output
//! - `embed-config` - TOML configuration
//!
//! Run it from a project root:
//! ```sh
//! shader-embed embed shaders/
//! shader-embed platforms
//! ```

pub mod discovery;
pub mod driver;
pub mod messages;

pub use discovery::{detect_files, detect_modules, detect_platforms};
pub use driver::{check_output_collisions, collect_sources, embed_options, exit_status, run_embed};
pub use messages::BuildMessages;
