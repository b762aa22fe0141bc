//! Shader Embed Configuration
//!
//! Loads build settings from `shader-embed.toml` in the working directory,
//! falling back to ~/.shader-embed/config.toml and then built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE_NAME: &str = "shader-embed.toml";
/// User configuration directory name
const CONFIG_DIR_NAME: &str = ".shader-embed";
/// User configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// External compiler section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Compiler executable, looked up on PATH when not absolute
    #[serde(default = "default_compiler_path")]
    pub path: PathBuf,

    /// Flags placed before the source path
    #[serde(default = "default_compiler_args")]
    pub args: Vec<String>,
}

fn default_compiler_path() -> PathBuf {
    PathBuf::from("glslangValidator")
}

fn default_compiler_args() -> Vec<String> {
    vec!["-V".to_string()]
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            path: default_compiler_path(),
            args: default_compiler_args(),
        }
    }
}

/// Shader source discovery section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// File extensions (without the dot) treated as shader sources
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Paths containing any of these substrings are skipped
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    ["vert", "frag", "comp", "geom", "tesc", "tese"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_excludes() -> Vec<String> {
    vec![".gen.h".to_string(), ".spv".to_string()]
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excludes: default_excludes(),
        }
    }
}

/// Generated header section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for generated headers; empty writes next to each source
    #[serde(default)]
    pub directory: PathBuf,

    /// Initializer tokens per line; zero keeps the list on one line
    #[serde(default = "default_bytes_per_line")]
    pub bytes_per_line: usize,
}

fn default_bytes_per_line() -> usize {
    16
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            bytes_per_line: default_bytes_per_line(),
        }
    }
}

impl OutputConfig {
    /// Configured output directory, `None` when headers go next to sources
    pub fn directory(&self) -> Option<&Path> {
        if self.directory.as_os_str().is_empty() {
            None
        } else {
            Some(&self.directory)
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Compiler settings
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Source discovery settings
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the first existing default location.
    ///
    /// Search order: ./shader-embed.toml, ~/.shader-embed/config.toml.
    /// Built-in defaults are used when neither exists.
    pub fn load() -> Result<Self, ConfigError> {
        let mut candidates = vec![PathBuf::from(PROJECT_CONFIG_FILE_NAME)];
        match Self::config_file_path() {
            Ok(path) => candidates.push(path),
            Err(e) => log::debug!("Skipping user configuration: {}", e),
        }

        for path in candidates {
            if path.is_file() {
                let config = Self::load_from(&path)?;
                log::info!("Loaded configuration from {:?}", path);
                return Ok(config);
            }
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?;

        Ok(config)
    }

    /// Get the user configuration directory path (~/.shader-embed/)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    /// Get the user configuration file path (~/.shader-embed/config.toml)
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Write the default configuration to `path`, creating parent directories
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDirError(dir.to_path_buf(), e))?;
        }

        let toml_content =
            toml::to_string_pretty(&Config::default()).map_err(ConfigError::SerializeError)?;

        let content = format!(
            "# shader-embed configuration\n\
             #\n\
             # compiler.path may be absolute or a name on PATH.\n\
             # output.directory left empty writes headers next to each shader.\n\
             \n\
             {toml_content}"
        );

        fs::write(path, content).map_err(|e| ConfigError::WriteError(path.to_path_buf(), e))?;

        log::info!("Created default configuration at {:?}", path);
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Home directory not found
    NoHomeDirectory,
    /// Failed to read config file
    ReadError(PathBuf, std::io::Error),
    /// Failed to parse config file
    ParseError(PathBuf, toml::de::Error),
    /// Failed to serialize config
    SerializeError(toml::ser::Error),
    /// Failed to write config file
    WriteError(PathBuf, std::io::Error),
    /// Failed to create directory
    CreateDirError(PathBuf, std::io::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoHomeDirectory => write!(f, "Could not determine home directory"),
            ConfigError::ReadError(path, e) => write!(f, "Failed to read {:?}: {}", path, e),
            ConfigError::ParseError(path, e) => write!(f, "Failed to parse {:?}: {}", path, e),
            ConfigError::SerializeError(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::WriteError(path, e) => write!(f, "Failed to write {:?}: {}", path, e),
            ConfigError::CreateDirError(path, e) => write!(f, "Failed to create {:?}: {}", path, e),
        }
    }
}

impl std::error::Error for ConfigError {}
