//! mylib Project Configuration
//!
//! Handles parsing and management of mylib.toml configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bindgen::DEFAULT_CLASS_NAME;

/// File name searched for by [`MylibConfig::find_and_load`].
pub const CONFIG_FILE_NAME: &str = "mylib.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching mylib.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MylibConfig {
    /// Binding generator defaults
    #[serde(default)]
    pub bindgen: BindgenConfig,

    /// Diagnostics
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Directory holding the loaded mylib.toml; relative paths resolve here
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

impl MylibConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: MylibConfig = toml::from_str(&content)?;
        config.root = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Resolve a path taken from the config file against the file's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Headers from `[bindgen]`, resolved against the config directory.
    pub fn bindgen_headers(&self) -> Vec<PathBuf> {
        self.bindgen
            .headers
            .iter()
            .map(|header| self.resolve_path(header))
            .collect()
    }

    /// Output directory from `[bindgen]`, resolved against the config directory.
    pub fn bindgen_output_dir(&self) -> PathBuf {
        self.resolve_path(&self.bindgen.output_dir)
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        Self::find_and_load(&cwd)
    }

    /// Find and load configuration by searching up from the given directory.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        match Self::find(start_dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Locate the nearest mylib.toml at or above `start_dir`.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Defaults for `bindgen` runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BindgenConfig {
    /// Library name without platform prefix or extension
    #[serde(default = "default_lib_name")]
    pub lib_name: String,

    /// Name of the generated C# class
    #[serde(default = "default_class_name")]
    pub class_name: String,

    /// Headers to read when none are given on the command line
    #[serde(default = "default_headers")]
    pub headers: Vec<PathBuf>,

    /// Directory the .cs file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_lib_name() -> String {
    "mylib".to_string()
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

fn default_headers() -> Vec<PathBuf> {
    vec![PathBuf::from("include/mylib.h")]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BindgenConfig {
    fn default() -> Self {
        Self {
            lib_name: default_lib_name(),
            class_name: default_class_name(),
            headers: default_headers(),
            output_dir: default_output_dir(),
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MylibConfig::default();
        assert_eq!(config.bindgen.lib_name, "mylib");
        assert_eq!(config.bindgen.class_name, "CppNative");
        assert_eq!(config.bindgen.headers, vec![PathBuf::from("include/mylib.h")]);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[bindgen]
lib_name = "calc"
class_name = "CalcNative"
headers = ["native/calc.h", "native/extra.h"]

[logging]
filter = "mylib=debug"
"#;
        let config: MylibConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bindgen.lib_name, "calc");
        assert_eq!(config.bindgen.class_name, "CalcNative");
        assert_eq!(config.bindgen.headers.len(), 2);
        assert_eq!(config.bindgen.output_dir, PathBuf::from("."));
        assert_eq!(config.logging.filter, "mylib=debug");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: MylibConfig = toml::from_str("").unwrap();
        assert_eq!(config, MylibConfig::default());
    }

    #[test]
    fn test_save_and_find() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = MylibConfig::default();
        config.bindgen.class_name = "Saved".to_string();
        config.save(&root.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(
            MylibConfig::find(&nested),
            Some(root.path().join(CONFIG_FILE_NAME))
        );
        let loaded = MylibConfig::find_and_load(&nested).unwrap();
        assert_eq!(loaded.bindgen.class_name, "Saved");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MylibConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        let absolute = root.path().join("shared/extra.h");
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            format!(
                "[bindgen]\nheaders = [\"native/calc.h\", {:?}]\noutput_dir = \"gen\"\n",
                absolute.to_str().unwrap()
            ),
        )
        .unwrap();

        let config = MylibConfig::find_and_load(&nested).unwrap();
        assert_eq!(config.root.as_deref(), Some(root.path()));
        assert_eq!(
            config.bindgen_headers(),
            vec![root.path().join("native/calc.h"), absolute]
        );
        assert_eq!(config.bindgen_output_dir(), root.path().join("gen"));
    }

    #[test]
    fn test_default_config_paths_are_unchanged() {
        let config = MylibConfig::default();
        assert_eq!(config.bindgen_headers(), vec![PathBuf::from("include/mylib.h")]);
        assert_eq!(config.bindgen_output_dir(), PathBuf::from("."));
    }
}
