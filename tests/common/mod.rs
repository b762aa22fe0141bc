//! Common test utilities and harness
//!
//! Provides reusable utilities for functional testing including:
//! - Project tree setup in a temp directory
//! - In-process fake compilers
//! - Shell-script compilers for exercising the real process path

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use embed_core::{CompilerInvoker, EmbedError};
use tempfile::TempDir;

/// Minimal GLSL body written into every test shader
pub const SHADER_SOURCE: &str = "#version 450\nvoid main() {}\n";

/// Test project rooted in a temporary directory
pub struct TestProject {
    /// Temporary directory for the project tree
    pub temp_dir: TempDir,
}

impl TestProject {
    /// Create a new empty project
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the project root, creating parent directories
    pub fn write_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write a shader source relative to the project root
    pub fn write_shader(&self, relative: &str) -> PathBuf {
        self.write_file(relative, SHADER_SOURCE.as_bytes())
    }

    /// Create a directory relative to the project root
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    /// All files under `relative` with the given extension
    pub fn files_with_extension(&self, relative: &str, extension: &str) -> Vec<PathBuf> {
        let mut found = Vec::new();
        collect(&self.root().join(relative), extension, &mut found);
        found.sort();
        found
    }
}

fn collect(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, extension, found);
        } else if path.to_string_lossy().ends_with(extension) {
            found.push(path);
        }
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// In-process compiler that writes the same bytes for every source
pub struct FakeCompiler {
    output: Vec<u8>,
    /// Sources compiled so far, in call order
    pub compiled: RefCell<Vec<PathBuf>>,
    /// Fail when the source file name equals this
    pub reject: Option<String>,
}

impl FakeCompiler {
    pub fn new(output: &[u8]) -> Self {
        Self {
            output: output.to_vec(),
            compiled: RefCell::new(Vec::new()),
            reject: None,
        }
    }

    pub fn rejecting(output: &[u8], file_name: &str) -> Self {
        Self {
            reject: Some(file_name.to_string()),
            ..Self::new(output)
        }
    }
}

impl CompilerInvoker for FakeCompiler {
    fn compile(&self, source: &Path, output: &Path) -> embed_core::Result<()> {
        self.compiled.borrow_mut().push(source.to_path_buf());

        let name = source.file_name().map(|n| n.to_string_lossy().to_string());
        if name.is_some() && name == self.reject {
            return Err(EmbedError::CompilerFailure {
                source_path: source.to_path_buf(),
                status: Some(1),
                stderr: "ERROR: rejected by test compiler".to_string(),
            });
        }

        fs::write(output, &self.output).expect("Failed to write fake intermediate");
        Ok(())
    }
}

/// Shell script compilers with glslangValidator's `<args> <source> -o <out>` interface
#[cfg(unix)]
pub mod scripts {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn install(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}")).expect("Failed to write compiler script");
        let mut permissions = fs::metadata(&path).expect("Failed to stat script").permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&path, permissions).expect("Failed to make script executable");
        path
    }

    /// Compiler that writes `printf_bytes` (printf escape syntax) to the `-o` path
    pub fn succeeding(dir: &Path, printf_bytes: &str) -> PathBuf {
        install(
            dir,
            "fake-glslang-ok",
            &format!(
                "out=\"\"\n\
                 while [ $# -gt 0 ]; do\n\
                 \x20 if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift; fi\n\
                 \x20 shift\n\
                 done\n\
                 printf '{printf_bytes}' > \"$out\"\n"
            ),
        )
    }

    /// Compiler that prints a diagnostic and exits with `status`
    pub fn failing(dir: &Path, status: i32) -> PathBuf {
        install(
            dir,
            "fake-glslang-err",
            &format!("echo \"ERROR: 0:1: '' : syntax error\" >&2\nexit {status}\n"),
        )
    }
}
