//! Read-only reports over the library.
//!
//! Each report is a plain serializable value. Its `Display` impl renders the
//! console line; JSON output serializes the value directly.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::MusicLibrary;
use crate::ontology::InferenceState;

const UNKNOWN: &str = "Unknown";
const NO_AWARD: &str = "None";

pub(crate) fn bracketed(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SongRow {
    pub name: String,
    pub artist: Option<String>,
    pub duration: Option<String>,
    pub rating: Option<String>,
    pub play_count: Option<String>,
}

impl fmt::Display for SongRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duration = self
            .duration
            .as_ref()
            .map_or_else(|| UNKNOWN.to_string(), |seconds| format!("{seconds}s"));
        write!(
            f,
            "- {} | Artist: {} | Duration: {} | Rating: {} | Plays: {}",
            self.name,
            self.artist.as_deref().unwrap_or(UNKNOWN),
            duration,
            self.rating.as_deref().unwrap_or(UNKNOWN),
            self.play_count.as_deref().unwrap_or(UNKNOWN),
        )
    }
}

/// One row per `Song` instance, in store order.
#[must_use]
pub fn list_songs(library: &MusicLibrary) -> Vec<SongRow> {
    library
        .songs()
        .map(|song| SongRow {
            name: song.name().to_string(),
            artist: song.artist().map(|artist| artist.name().to_string()),
            duration: song.duration(),
            rating: song.rating(),
            play_count: song.play_count(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArtistRow {
    pub name: String,
    pub awards: Vec<String>,
}

impl fmt::Display for ArtistRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.awards.is_empty() {
            write!(f, "- {} | Award: {NO_AWARD}", self.name)
        } else {
            write!(f, "- {} | Award: {}", self.name, bracketed(&self.awards))
        }
    }
}

#[must_use]
pub fn list_artists(library: &MusicLibrary) -> Vec<ArtistRow> {
    library
        .artists()
        .map(|artist| ArtistRow {
            name: artist.name().to_string(),
            awards: artist.awards(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InferredClass {
    pub label: String,
    pub class: String,
    pub members: Vec<String>,
}

impl fmt::Display for InferredClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.label)?;
        for member in &self.members {
            write!(f, "\n  - {member}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InferredClassReport {
    /// Freshness of the memberships listed below.
    pub state: InferenceState,
    pub classes: Vec<InferredClass>,
}

/// Members of the reasoner-derived song classes.
///
/// Classes the ontology does not declare are left out of the report.
#[must_use]
pub fn list_inferred_classes(library: &MusicLibrary) -> InferredClassReport {
    let ontology = library.ontology();
    let state = ontology.inference_state();
    if state == InferenceState::Stale {
        warn!("inferred_memberships_stale");
    }

    let classes = library
        .schema()
        .inferred_classes()
        .into_iter()
        .filter_map(|(label, class)| {
            if ontology.class(class).is_none() {
                debug!(%class, "inferred_class_missing");
                return None;
            }
            Some(InferredClass {
                label: label.to_string(),
                class: class.to_string(),
                members: ontology
                    .instances_of(class)
                    .map(|individual| individual.name().to_string())
                    .collect(),
            })
        })
        .collect();

    InferredClassReport { state, classes }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistRow {
    pub name: String,
    pub songs: Vec<String>,
}

impl fmt::Display for PlaylistRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}: {}", self.name, bracketed(&self.songs))
    }
}

#[must_use]
pub fn list_playlists(library: &MusicLibrary) -> Vec<PlaylistRow> {
    library
        .playlists()
        .map(|playlist| PlaylistRow {
            name: playlist.name().to_string(),
            songs: playlist
                .songs()
                .iter()
                .map(|song| song.name().to_string())
                .collect(),
        })
        .collect()
}

/// Size of the loaded store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LibrarySummary {
    pub ontology: String,
    pub label: Option<String>,
    pub classes: usize,
    pub properties: usize,
    pub individuals: usize,
    pub links: usize,
    pub axioms: usize,
    pub songs: usize,
    pub artists: usize,
    pub people: usize,
    pub playlists: usize,
    pub inference: InferenceState,
}

impl fmt::Display for LibrarySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => writeln!(f, "Ontology: {} ({label})", self.ontology)?,
            None => writeln!(f, "Ontology: {}", self.ontology)?,
        }
        writeln!(
            f,
            "Classes: {} | Properties: {} | Individuals: {} | Links: {} | Axioms: {}",
            self.classes, self.properties, self.individuals, self.links, self.axioms
        )?;
        writeln!(
            f,
            "Songs: {} | Artists: {} | People: {} | Playlists: {}",
            self.songs, self.artists, self.people, self.playlists
        )?;
        write!(f, "Inference: {}", self.inference)
    }
}

#[must_use]
pub fn summary(library: &MusicLibrary) -> LibrarySummary {
    let ontology = library.ontology();
    LibrarySummary {
        ontology: ontology.id().to_string(),
        label: ontology.label().map(ToString::to_string),
        classes: ontology.classes().len(),
        properties: ontology.properties().len(),
        individuals: ontology.individuals().len(),
        links: ontology.links().len(),
        axioms: ontology.axioms().len(),
        songs: library.songs().count(),
        artists: library.artists().count(),
        people: library.people().count(),
        playlists: library.playlists().count(),
        inference: ontology.inference_state(),
    }
}
