//! Artifact naming
//!
//! Every embed run derives one name from the shader's base name. That name
//! places the compiled intermediate and the generated header next to each
//! other and seeds the C++ class identifier:
//!
//! ```text
//! shaders/foo.vert -> shader_foo_vert -> shaders/shader_foo_vert.spv
//!                                     -> shaders/shader_foo_vert.gen.h
//!                                     -> class ShaderFooVert
//! ```
//!
//! Identifier mapping, applied to the artifact name:
//!
//! | input character            | identifier output                          |
//! |----------------------------|--------------------------------------------|
//! | ASCII letter               | upper-cased after a separator or digit, else lower-cased |
//! | ASCII digit                | kept; the next letter is upper-cased       |
//! | `.` and `_`                | removed; the next letter is upper-cased    |
//! | anything else (`-`, space, non-ASCII) | removed; the next letter is upper-cased |

use std::path::{Path, PathBuf};

use crate::error::{EmbedError, Result};

/// Prefix shared by all generated artifact names
pub const ARTIFACT_PREFIX: &str = "shader_";
/// Extension of the transient compiled intermediate
pub const INTERMEDIATE_EXTENSION: &str = "spv";
/// Extension of the generated header fragment
pub const FRAGMENT_EXTENSION: &str = "gen.h";

/// Name derived from a shader source path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    name: String,
    identifier: String,
}

impl ArtifactName {
    /// Derive the artifact name from a shader source path.
    ///
    /// Only the final path component takes part; directories are ignored.
    pub fn from_source(source_path: &Path) -> Result<Self> {
        let base_name = source_path
            .file_name()
            .ok_or_else(|| EmbedError::InvalidSourceName {
                path: source_path.to_path_buf(),
            })?
            .to_string_lossy();

        Ok(Self::from_base_name(&base_name))
    }

    /// Derive the artifact name from a bare file name such as `foo.vert`.
    pub fn from_base_name(base_name: &str) -> Self {
        let name = format!("{ARTIFACT_PREFIX}{}", base_name.replace('.', "_"));
        let identifier = class_identifier(&name);
        Self { name, identifier }
    }

    /// `shader_<base name with dots replaced>`
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Title-cased C++ class name without separators
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Path of the compiled intermediate inside `dir`
    pub fn intermediate_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{INTERMEDIATE_EXTENSION}", self.name))
    }

    /// Path of the generated header inside `dir`
    pub fn fragment_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{FRAGMENT_EXTENSION}", self.name))
    }
}

impl std::fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Convert an artifact name into a C++ class identifier.
///
/// Title-casing follows word boundaries: a letter starts a new word when the
/// previous character is not a letter. Characters outside `[A-Za-z0-9]` are
/// dropped. A leading digit gets an `S` prefix so the result always parses as
/// an identifier, although names built by [`ArtifactName`] never hit it.
pub fn class_identifier(name: &str) -> String {
    let mut identifier = String::with_capacity(name.len());
    let mut previous_is_letter = false;

    for c in name.chars() {
        if c.is_ascii_alphabetic() {
            if previous_is_letter {
                identifier.push(c.to_ascii_lowercase());
            } else {
                identifier.push(c.to_ascii_uppercase());
            }
            previous_is_letter = true;
        } else {
            if c.is_ascii_digit() {
                identifier.push(c);
            }
            previous_is_letter = false;
        }
    }

    if identifier.is_empty() || identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, 'S');
    }

    identifier
}

/// True when `identifier` is a valid C/C++ identifier
pub fn is_valid_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
