use crate::ontology::{Iri, IriError};

pub const DEFAULT_NAMESPACE: &str = "http://example.org/myMusic#";

/// Identifiers of the music vocabulary resolved against one namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MusicSchema {
    namespace: String,
    pub song: Iri,
    pub artist: Iri,
    pub playlist: Iri,
    pub person: Iri,
    pub popular_song: Iri,
    pub short_song: Iri,
    pub award_winning_song: Iri,
    pub has_artist: Iri,
    pub duration: Iri,
    pub rating: Iri,
    pub play_count: Iri,
    pub has_award: Iri,
    pub in_playlist: Iri,
    pub likes: Iri,
}

impl MusicSchema {
    /// Resolves every class and property name against `namespace`.
    ///
    /// # Errors
    ///
    /// Returns an error when the namespace does not produce valid IRIs.
    pub fn new(namespace: impl Into<String>) -> Result<Self, IriError> {
        let namespace = namespace.into();
        let iri = |local: &str| Iri::new(format!("{namespace}{local}"));
        Ok(Self {
            song: iri("Song")?,
            artist: iri("Artist")?,
            playlist: iri("Playlist")?,
            person: iri("Person")?,
            popular_song: iri("PopularSong")?,
            short_song: iri("ShortSong")?,
            award_winning_song: iri("AwardWinningSong")?,
            has_artist: iri("hasArtist")?,
            duration: iri("duration")?,
            rating: iri("rating")?,
            play_count: iri("playCount")?,
            has_award: iri("hasAward")?,
            in_playlist: iri("inPlaylist")?,
            likes: iri("likes")?,
            namespace,
        })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Builds the identifier of a resource named `local` in the namespace.
    ///
    /// # Errors
    ///
    /// Returns an error when `local` cannot be part of an IRI.
    pub fn iri(&self, local: &str) -> Result<Iri, IriError> {
        Iri::new(format!("{}{local}", self.namespace))
    }

    /// Classes whose members are derived by the reasoner, with their report headings.
    #[must_use]
    pub fn inferred_classes(&self) -> [(&'static str, &Iri); 3] {
        [
            ("Popular Songs", &self.popular_song),
            ("Short Songs", &self.short_song),
            ("Award Winning Songs", &self.award_winning_song),
        ]
    }
}
