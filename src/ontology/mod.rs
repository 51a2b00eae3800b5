//! In-memory ontology store and its contracts.
//!
//! The module keeps the ontology aggregate free of any music specific
//! knowledge: it loads an RDF document, holds classes, properties,
//! individuals and edges, and hands the whole store to a [`Reasoner`] when
//! class memberships need to be derived.

pub mod entities;
pub mod export;
pub mod loader;
pub mod reasoner;
pub mod value_objects;
pub mod vocab;

pub use entities::{
    Class, Individual, InferenceState, Link, Ontology, OntologyError, Property, PropertyKind,
};
pub use loader::{LoadError, OntologyFormat};
pub use reasoner::{
    ExternalReasoner, InferenceSummary, NoopReasoner, Reasoner, ReasonerCommand, ReasonerError,
};
pub use value_objects::{Iri, IriError};
