use std::path::{Path, PathBuf};

use crate::ai::{Budget, SearchConfig};
use crate::error::ConfigError;
use crate::game::SUPPORTED_SIZES;

/// Board settings for new games.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { size: 8 }
    }
}

/// Default file locations for save and export commands.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub save_file: PathBuf,
    pub export_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            save_file: PathBuf::from("game.oga"),
            export_file: PathBuf::from("tree.dot"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
    pub paths: PathsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_SIZES.contains(&self.game.size) {
            return Err(ConfigError::UnsupportedSize(self.game.size));
        }
        match self.search.budget {
            Budget::Depth(0) => {
                return Err(ConfigError::Validation(
                    "search.budget depth must be > 0".into(),
                ));
            }
            Budget::Time(0) => {
                return Err(ConfigError::Validation(
                    "search.budget time must be > 0".into(),
                ));
            }
            _ => {}
        }
        if self.paths.save_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "paths.save_file must not be empty".into(),
            ));
        }
        if self.paths.export_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "paths.export_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiMode, Pruning};
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.size, 8);
        assert_eq!(config.paths.save_file, PathBuf::from("game.oga"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[search]
ai = "black"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.ai, AiMode::Black);
        assert_eq!(config.search.pruning, Pruning::On);
        assert_eq!(config.search.budget, Budget::Depth(4));
        assert_eq!(config.game.size, 8);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.game.size, default.game.size);
        assert_eq!(config.search, default.search);
    }

    #[test]
    fn test_validation_rejects_odd_size() {
        let mut config = AppConfig::default();
        config.game.size = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedSize(5))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_budget() {
        let mut config = AppConfig::default();
        config.search.budget = Budget::Depth(0);
        assert!(config.validate().is_err());
        config.search.budget = Budget::Time(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_paths() {
        let mut config = AppConfig::default();
        config.paths.export_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.size, 8);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("othello.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
size = 6

[search]
pruning = "off"
budget = {{ kind = "time", value = 1500 }}
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.size, 6);
        assert_eq!(config.search.pruning, Pruning::Off);
        assert_eq!(config.search.budget, Budget::Time(1500));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("othello.toml");
        std::fs::write(&path, "[game]\nsize = 12\n").unwrap();
        assert!(AppConfig::load(&path).is_err());
        std::fs::write(&path, "[game\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config.search, SearchConfig::default());
    }
}
