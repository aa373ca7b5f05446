use std::{io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings for the interactive console.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Banner shown above the menu.
    pub title: String,

    /// Whether to colour grades and status messages.
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            color: ColorChoice::default(),
        }
    }
}

fn default_title() -> String {
    "Flashcard Final Project".to_string()
}

/// When to emit coloured output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour if stdout supports it.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

/// Errors that can occur when loading a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),
    /// The file is not valid TOML or has unknown keys.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = write_config("");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.title, "Flashcard Final Project");
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn reads_title_and_color() {
        let file = write_config("title = \"Exam Prep\"\ncolor = \"never\"\n");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.title, "Exam Prep");
        assert_eq!(config.color, ColorChoice::Never);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let file = write_config("cards = []\n");
        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Read(_)));
    }
}
