#![allow(dead_code)]

use std::path::PathBuf;

use music_ontology::{
    config::OntologySettings,
    library::{MusicLibrary, DEFAULT_NAMESPACE},
    ontology::NoopReasoner,
};

pub const FIXTURE: &str = "data/my_music_extended.rdf.owl";

pub fn settings() -> OntologySettings {
    OntologySettings {
        path: PathBuf::from(FIXTURE),
        namespace: DEFAULT_NAMESPACE.to_string(),
        format: None,
    }
}

/// The bundled ontology, reasoned with the no-op backend.
pub fn library() -> MusicLibrary {
    let mut library = MusicLibrary::load(&settings()).expect("fixture loads");
    library.run_reasoner(&NoopReasoner).expect("noop reasoner");
    library
}
