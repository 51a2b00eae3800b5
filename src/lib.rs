//! Music library queries over an OWL ontology.
//!
//! The crate loads an ontology of songs, artists, playlists and people,
//! delegates class-membership inference to an external reasoner, renders
//! reports and manages per-person favorites playlists.
#![allow(clippy::module_name_repetitions)]

pub use self::errors::Error;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod console;
pub mod environment;
pub mod errors;
pub mod library;
pub mod logger;
pub mod ontology;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
