//! # Application Error Handling

use crate::{
    library::LibraryError,
    ontology::{IriError, LoadError, OntologyError, ReasonerError},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("cannot parse `{1}`: {0}")]
    YAMLFile(#[source] serde_yaml::Error, String),

    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),

    #[error(transparent)]
    JSON(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Tera(#[from] tera::Error),

    #[error(transparent)]
    LoggerFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    LoggerInit(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Iri(#[from] IriError),

    #[error(transparent)]
    Ontology(#[from] OntologyError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Reasoner(#[from] ReasonerError),

    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl Error {
    pub fn string(s: &str) -> Self {
        Self::Message(s.to_string())
    }
}
