use std::fs;
use std::io;
use std::path::Path;

use clap::ValueEnum;
use lucid_core::SanitizePolicy;
use lucid_renderer::Theme;
use serde::Deserialize;
use tracing::warn;

use crate::error::CliError;

/// Default config file looked up in the working directory.
pub(crate) const DEFAULT_CONFIG: &str = "lucid.toml";

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Format name; unknown names render as markdown.
    pub format: Option<String>,
    pub theme: ThemeChoice,
    pub sanitize: SanitizeChoice,
    pub highlight: bool,
    pub standalone: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ThemeChoice {
    #[default]
    Auto,
    Light,
    Dark,
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Theme::Auto,
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SanitizeChoice {
    #[default]
    Textual,
    Strict,
}

impl From<SanitizeChoice> for SanitizePolicy {
    fn from(choice: SanitizeChoice) -> Self {
        match choice {
            SanitizeChoice::Textual => SanitizePolicy::Textual,
            SanitizeChoice::Strict => SanitizePolicy::Strict,
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if it is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Like [`Config::load`], but a malformed file is an error.
    ///
    /// A missing file still yields defaults.
    pub fn load_strict(path: &Path) -> Result<Self, CliError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(CliError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
