//! Selects which configuration file the program runs with.
//!
//! The environment is read from the `MUSIC_ENV` variable and defaults to
//! `development`; any other name maps to `<name>.yaml` in the configuration
//! folder.
use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{config::Config, Result};

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const ENV_VARIABLE: &str = "MUSIC_ENV";

#[must_use]
pub fn resolve_from_env() -> String {
    std::env::var(ENV_VARIABLE).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    #[serde(rename = "production")]
    Production,
    #[default]
    #[serde(rename = "development")]
    Development,
    #[serde(rename = "test")]
    Test,
    Any(String),
}

impl Environment {
    /// Loads the configuration file of this environment from `config/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing or invalid.
    pub fn load(&self) -> Result<Config> {
        Config::new(self)
    }

    /// Loads the configuration file of this environment from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing or invalid.
    pub fn load_from_folder(&self, path: &Path) -> Result<Config> {
        Config::from_folder(self, path)
    }
}

impl From<String> for Environment {
    fn from(env: String) -> Self {
        Self::from_str(&env).unwrap_or(Self::Any(env))
    }
}

impl FromStr for Environment {
    type Err = &'static str;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            s => Ok(Self::Any(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
            Self::Test => f.write_str("test"),
            Self::Any(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn known_names_round_trip() {
        for name in ["production", "development", "test"] {
            assert_eq!(Environment::from(name.to_string()).to_string(), name);
        }
    }

    #[test]
    fn unknown_names_are_kept() {
        assert_eq!(
            Environment::from("staging".to_string()),
            Environment::Any("staging".to_string())
        );
    }
}
