//! Typed configuration loaded from environment scoped YAML files.
//!
//! Files live in a configuration folder (`config/` by default) and are named
//! after the environment: `development.yaml`, `test.yaml` and so on. A
//! `<env>.local.yaml` file takes precedence when present. Every file is
//! rendered through `tera` first, so values may read environment variables:
//!
//! ```yaml
//! ontology:
//!   path: {{ get_env(name="MUSIC_ONTOLOGY", default="data/my_music_extended.rdf.owl") }}
//! ```
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    environment::Environment, library::schema::DEFAULT_NAMESPACE, logger,
    ontology::OntologyFormat, Error, Result,
};

pub const DEFAULT_FOLDER: &str = "config";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logger: Logger,
    pub ontology: OntologySettings,
    #[serde(default)]
    pub reasoner: ReasonerSettings,
}

/// Logger configuration
///
/// Example (development):
/// ```yaml
/// logger:
///   enable: true
///   level: debug
///   format: compact
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logger {
    /// Enable log write to stderr
    pub enable: bool,

    /// Set the logger level.
    ///
    /// * options: `trace` | `debug` | `info` | `warn` | `error`
    pub level: logger::LogLevel,

    /// Set the logger format.
    ///
    /// * options: `compact` | `pretty` | `json`
    pub format: logger::Format,

    /// Override our custom tracing filter.
    ///
    /// Set this to your own filter if you want to see traces from internal
    /// libraries. See more [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)
    pub override_filter: Option<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            enable: true,
            level: logger::LogLevel::Warn,
            format: logger::Format::Compact,
            override_filter: None,
        }
    }
}

/// Where the ontology document lives and how to read it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OntologySettings {
    pub path: PathBuf,
    /// Namespace holding the music classes and properties.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Overrides format detection from the file extension.
    #[serde(default)]
    pub format: Option<OntologyFormat>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasonerBackend {
    /// Keep asserted memberships only.
    #[default]
    None,
    /// Run an external program speaking N-Triples over stdin/stdout.
    External,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReasonerSettings {
    #[serde(default)]
    pub backend: ReasonerBackend,
    /// Name shown when the reasoner is announced, defaults to the program.
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ReasonerSettings {
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.display_name, self.backend) {
            (Some(name), _) => name.clone(),
            (None, ReasonerBackend::External) => self.program.clone(),
            (None, ReasonerBackend::None) => "none".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration of `env` from the default folder.
    ///
    /// # Errors
    ///
    /// Returns an error when no file matches or the file is invalid.
    pub fn new(env: &Environment) -> Result<Self> {
        Self::from_folder(env, Path::new(DEFAULT_FOLDER))
    }

    /// Loads the configuration of `env` from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when no file matches or the file is invalid.
    pub fn from_folder(env: &Environment, path: &Path) -> Result<Self> {
        let files = [
            path.join(format!("{env}.local.yaml")),
            path.join(format!("{env}.yaml")),
        ];

        let selected_path = files.iter().find(|p| p.exists()).ok_or_else(|| {
            Error::Message(format!(
                "no configuration file found in folder: {}",
                path.display()
            ))
        })?;

        let content = fs::read_to_string(selected_path)?;
        Self::from_yaml(&content)
            .map_err(|err| match err {
                Error::YAML(err) => {
                    Error::YAMLFile(err, selected_path.to_string_lossy().to_string())
                }
                other => other,
            })
    }

    /// Renders and parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error when the template or the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let rendered = render_string(content)?;
        Ok(serde_yaml::from_str(&rendered)?)
    }
}

fn render_string(template: &str) -> Result<String> {
    let mut tera = tera::Tera::default();
    Ok(tera.render_str(template, &tera::Context::new())?)
}
