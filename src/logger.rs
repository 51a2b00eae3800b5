//! Initializes `tracing` from the `logger` configuration section.
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{config, Result};

const MODULE_WHITELIST: &[&str] = &["music_ontology"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LogLevel {
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[default]
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Format {
    #[default]
    #[serde(rename = "compact")]
    Compact,
    #[serde(rename = "pretty")]
    Pretty,
    #[serde(rename = "json")]
    Json,
}

/// Installs the global subscriber.
///
/// Logs are written to stderr so report output on stdout stays clean. The
/// `RUST_LOG` variable wins over the configured level when set.
///
/// # Errors
///
/// Returns an error when the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init(config: &config::Logger) -> Result<()> {
    if !config.enable {
        return Ok(());
    }

    let layers: Vec<Box<dyn Layer<Registry> + Sync + Send>> =
        vec![init_layer(std::io::stderr, config.format, true)];
    let env_filter = init_env_filter(config.override_filter.as_deref(), config.level)?;

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;
    Ok(())
}

fn init_env_filter(override_filter: Option<&str>, level: LogLevel) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = match override_filter {
        Some(filter) => filter.to_string(),
        None => default_directive(level),
    };
    Ok(EnvFilter::try_new(directive)?)
}

fn default_directive(level: LogLevel) -> String {
    MODULE_WHITELIST
        .iter()
        .map(|module| format!("{module}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn init_layer<W>(make_writer: W, format: Format, ansi: bool) -> Box<dyn Layer<Registry> + Sync + Send>
where
    W: for<'writer> MakeWriter<'writer> + Sync + Send + 'static,
{
    match format {
        Format::Compact => tracing_subscriber::fmt::Layer::default()
            .with_ansi(ansi)
            .with_writer(make_writer)
            .compact()
            .boxed(),
        Format::Pretty => tracing_subscriber::fmt::Layer::default()
            .with_ansi(ansi)
            .with_writer(make_writer)
            .pretty()
            .boxed(),
        Format::Json => tracing_subscriber::fmt::Layer::default()
            .with_ansi(ansi)
            .with_writer(make_writer)
            .json()
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::{default_directive, LogLevel};

    #[test]
    fn default_directive_scopes_to_crate() {
        assert_eq!(default_directive(LogLevel::Debug), "music_ontology=debug");
        assert_eq!(default_directive(LogLevel::Off), "music_ontology=off");
    }
}
