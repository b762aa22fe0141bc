//! Generated header fragment
//!
//! Layout of an emitted header:
//!
//! ```text
//! /* WARNING, THIS FILE WAS GENERATED, DO NOT EDIT */
//! #pragma once
//!
//! class ShaderFooVert {
//! public:
//! 	static const unsigned char code[];
//! 	static const unsigned int code_size = 5;
//! };
//!
//! const unsigned char ShaderFooVert::code[] = {
//! 	1,2,3,4,0
//! };
//! ```
//!
//! The array is declared inside the class and defined out of line so the
//! declaration stays small no matter how large the bytecode is.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EmbedError, FsAction, Result};
use crate::transcode::ByteLiteral;

/// First line of every generated file
pub const GENERATED_BANNER: &str = "/* WARNING, THIS FILE WAS GENERATED, DO NOT EDIT */";

/// Name of the byte array member
pub const CODE_MEMBER: &str = "code";
/// Name of the length constant member
pub const SIZE_MEMBER: &str = "code_size";

const INDENT: &str = "\t";

/// Header text produced by one embed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFragment {
    path: PathBuf,
    identifier: String,
    declared_len: usize,
    contents: String,
}

impl EmbeddedFragment {
    /// Render the header for `identifier` from compiled bytecode.
    pub fn render(path: PathBuf, identifier: &str, bytecode: &[u8], tokens_per_line: usize) -> Self {
        let literal = ByteLiteral::new(bytecode, tokens_per_line, INDENT);
        let declared_len = literal.token_count();

        let contents = format!(
            "{GENERATED_BANNER}\n\
             #pragma once\n\
             \n\
             class {identifier} {{\n\
             public:\n\
             {INDENT}static const unsigned char {CODE_MEMBER}[];\n\
             {INDENT}static const unsigned int {SIZE_MEMBER} = {declared_len};\n\
             }};\n\
             \n\
             const unsigned char {identifier}::{CODE_MEMBER}[] = {{\n\
             {INDENT}{literal}\n\
             }};\n"
        );

        Self {
            path,
            identifier: identifier.to_string(),
            declared_len,
            contents,
        }
    }

    /// Destination of the header
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// C++ class name of the container
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Value of the emitted `code_size` constant
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Full header text
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Write the header, replacing any previous version.
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| EmbedError::filesystem(parent, FsAction::CreateOutputDir, e))?;
        }

        fs::write(&self.path, &self.contents)
            .map_err(|e| EmbedError::filesystem(&self.path, FsAction::WriteFragment, e))?;

        log::debug!(
            "Wrote {} ({} bytes, {} = {})",
            self.path.display(),
            self.contents.len(),
            SIZE_MEMBER,
            self.declared_len
        );
        Ok(())
    }
}
