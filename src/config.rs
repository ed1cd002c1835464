//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::DEFAULT_MODEL;

/// Environment variables checked for the Gemini key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Defaults applied when the matching CLI flag is not given.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Default values from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default model name or alias.
    pub model: String,
    /// Default export destination (file or directory).
    pub output: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { model: DEFAULT_MODEL.to_string(), output: None }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring environment variables.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .or_else(|| self.keys.gemini.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `PIXELSPRITE_CONFIG` environment variable
/// 3. `~/.config/pixelsprite/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("PIXELSPRITE_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/pixelsprite/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/pixelsprite/config.toml")
    } else {
        PathBuf::from("pixelsprite.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.gemini.is_none());
        assert_eq!(config.defaults.model, "nano-banana");
        assert!(config.defaults.output.is_none());
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.defaults.model, "nano-banana");
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("pixelsprite_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
gemini = "test-gemini-key"

[defaults]
model = "nano-banana-pro"
output = "sprites/"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.gemini.as_deref(), Some("test-gemini-key"));
        assert_eq!(config.defaults.model, "nano-banana-pro");
        assert_eq!(config.defaults.output, Some(PathBuf::from("sprites/")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_defaults_section() {
        let config: Config = toml::from_str("[defaults]\noutput = \"out.png\"\n").unwrap();
        assert_eq!(config.defaults.model, "nano-banana");
        assert_eq!(config.defaults.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("pixelsprite_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
