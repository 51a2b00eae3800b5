//! Music domain on top of the generic ontology store.
//!
//! [`MusicLibrary`] is the session object every report and mutation works
//! against. It owns the store, the resolved vocabulary and a name index
//! that stands in for scan-by-name lookups.

pub mod favorites;
mod index;
pub mod recommend;
pub mod reports;
pub mod schema;
mod views;

use thiserror::Error;
use tracing::{debug, info};

pub use self::{
    favorites::{
        add_favorite_to_playlist, show_user_favorites, FavoriteOutcome, FavoriteStatus,
        FavoritesView,
    },
    index::NameIndex,
    recommend::{recommend_songs_for_person, PersonRef, Recommendation},
    schema::{MusicSchema, DEFAULT_NAMESPACE},
    views::{Artist, Person, Playlist, Song},
};
use crate::{
    config::OntologySettings,
    ontology::{
        loader, Individual, InferenceSummary, Iri, IriError, Ontology, OntologyError, Reasoner,
        ReasonerError,
    },
};

/// Errors raised by library operations.
///
/// Lookup failures are expected outcomes that callers report and move on
/// from; the remaining variants mean the store rejected a change.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Person '{0}' not found!")]
    PersonNotFound(String),
    #[error("Song '{0}' not found!")]
    SongNotFound(String),
    #[error(transparent)]
    Iri(#[from] IriError),
    #[error(transparent)]
    Ontology(#[from] OntologyError),
}

impl LibraryError {
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::PersonNotFound(_) | Self::SongNotFound(_))
    }
}

#[derive(Debug)]
pub struct MusicLibrary {
    ontology: Ontology,
    schema: MusicSchema,
    index: NameIndex,
}

impl MusicLibrary {
    #[must_use]
    pub fn new(ontology: Ontology, schema: MusicSchema) -> Self {
        let index = Self::build_index(&ontology, &schema);
        Self {
            ontology,
            schema,
            index,
        }
    }

    /// Loads the configured ontology file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, or when the
    /// namespace is not a valid IRI prefix.
    pub fn load(settings: &OntologySettings) -> crate::Result<Self> {
        let schema = MusicSchema::new(settings.namespace.clone())?;
        let ontology = loader::load_file(&settings.path, settings.format)?;
        Ok(Self::new(ontology, schema))
    }

    fn build_index(ontology: &Ontology, schema: &MusicSchema) -> NameIndex {
        NameIndex::build(
            ontology,
            [
                &schema.song,
                &schema.artist,
                &schema.person,
                &schema.playlist,
            ],
        )
    }

    /// Hands the store to `reasoner` and refreshes the name index, since
    /// new memberships can add members to indexed classes.
    ///
    /// # Errors
    ///
    /// Returns the reasoner failure untouched.
    pub fn run_reasoner(
        &mut self,
        reasoner: &dyn Reasoner,
    ) -> Result<InferenceSummary, ReasonerError> {
        let summary = reasoner.infer(&mut self.ontology)?;
        self.index = Self::build_index(&self.ontology, &self.schema);
        Ok(summary)
    }

    #[must_use]
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    #[must_use]
    pub fn schema(&self) -> &MusicSchema {
        &self.schema
    }

    pub fn songs(&self) -> impl Iterator<Item = Song<'_>> {
        self.ontology
            .instances_of(&self.schema.song)
            .map(move |individual| Song::new(self, individual))
    }

    pub fn artists(&self) -> impl Iterator<Item = Artist<'_>> {
        self.ontology
            .instances_of(&self.schema.artist)
            .map(move |individual| Artist::new(self, individual))
    }

    pub fn people(&self) -> impl Iterator<Item = Person<'_>> {
        self.ontology
            .instances_of(&self.schema.person)
            .map(move |individual| Person::new(self, individual))
    }

    pub fn playlists(&self) -> impl Iterator<Item = Playlist<'_>> {
        self.ontology
            .instances_of(&self.schema.playlist)
            .map(move |individual| Playlist::new(self, individual))
    }

    #[must_use]
    pub fn find_song(&self, name: &str) -> Option<Song<'_>> {
        self.index
            .lookup(&self.schema.song, name)
            .and_then(|id| self.song(id))
    }

    #[must_use]
    pub fn find_person(&self, name: &str) -> Option<Person<'_>> {
        self.index
            .lookup(&self.schema.person, name)
            .and_then(|id| self.person(id))
    }

    #[must_use]
    pub fn find_playlist(&self, name: &str) -> Option<Playlist<'_>> {
        self.index
            .lookup(&self.schema.playlist, name)
            .and_then(|id| self.playlist(id))
    }

    /// The song identified by `id`, if it is an instance of `Song`.
    #[must_use]
    pub fn song(&self, id: &Iri) -> Option<Song<'_>> {
        self.member(id, &self.schema.song)
            .map(|individual| Song::new(self, individual))
    }

    #[must_use]
    pub fn person(&self, id: &Iri) -> Option<Person<'_>> {
        self.member(id, &self.schema.person)
            .map(|individual| Person::new(self, individual))
    }

    #[must_use]
    pub fn playlist(&self, id: &Iri) -> Option<Playlist<'_>> {
        self.member(id, &self.schema.playlist)
            .map(|individual| Playlist::new(self, individual))
    }

    fn member(&self, id: &Iri, class: &Iri) -> Option<&Individual> {
        let individual = self.ontology.individual(id)?;
        self.ontology
            .descendants_of(class)
            .iter()
            .any(|candidate| individual.has_type(candidate))
            .then_some(individual)
    }

    /// Makes `name` a playlist in the library namespace.
    ///
    /// An individual that already carries the identifier is reused and gains
    /// the `Playlist` type. Otherwise a new empty playlist is added.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is not usable in an IRI or the store
    /// does not declare the `Playlist` class.
    pub fn create_playlist(&mut self, name: &str) -> Result<Iri, LibraryError> {
        let id = self.schema.iri(name)?;
        if self.ontology.individual(&id).is_some() {
            if self.ontology.assert_type(&id, &self.schema.playlist)? {
                info!(playlist = %id, "playlist_type_asserted");
            }
        } else {
            let mut individual = Individual::new(id.clone());
            individual.assert_type(self.schema.playlist.clone());
            self.ontology.add_individual(individual)?;
            info!(playlist = %id, "playlist_created");
        }
        if !self.index.insert(&self.schema.playlist, id.clone()) {
            debug!(playlist = %id, "playlist_name_taken");
        }
        Ok(id)
    }

    /// Asserts `subject -property-> object`. Returns `false` when the edge exists.
    pub(crate) fn link(
        &mut self,
        subject: &Iri,
        property: &Iri,
        object: &Iri,
    ) -> Result<bool, LibraryError> {
        Ok(self.ontology.link(subject, property, object)?)
    }
}
