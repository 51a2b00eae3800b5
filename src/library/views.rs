//! Borrowed, typed views over store individuals.
//!
//! Optional attributes are exposed as `Option` so callers decide how an
//! unset value is rendered.

use oxrdf::Literal;

use super::MusicLibrary;
use crate::ontology::{Individual, Iri, PropertyKind};

/// Renders the literal values of a data property: a single value as is,
/// several values as a bracketed list.
fn render_values(values: &[Literal]) -> Option<String> {
    match values {
        [] => None,
        [value] => Some(value.value().to_string()),
        values => Some(format!(
            "[{}]",
            values
                .iter()
                .map(Literal::value)
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Song<'a> {
    library: &'a MusicLibrary,
    individual: &'a Individual,
}

impl<'a> Song<'a> {
    pub(crate) fn new(library: &'a MusicLibrary, individual: &'a Individual) -> Self {
        Self {
            library,
            individual,
        }
    }

    #[must_use]
    pub fn id(&self) -> &'a Iri {
        self.individual.id()
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.individual.name()
    }

    /// The first individual linked through `hasArtist`.
    #[must_use]
    pub fn artist(&self) -> Option<Artist<'a>> {
        let library = self.library;
        library
            .ontology()
            .objects(self.id(), &library.schema().has_artist)
            .find_map(|id| library.ontology().individual(id))
            .map(|individual| Artist::new(library, individual))
    }

    #[must_use]
    pub fn duration(&self) -> Option<String> {
        render_values(self.individual.values(&self.library.schema().duration))
    }

    #[must_use]
    pub fn rating(&self) -> Option<String> {
        render_values(self.individual.values(&self.library.schema().rating))
    }

    #[must_use]
    pub fn play_count(&self) -> Option<String> {
        render_values(self.individual.values(&self.library.schema().play_count))
    }

    /// Playlists the song was added to, in assertion order.
    pub fn playlists(&self) -> impl Iterator<Item = &'a Iri> + 'a {
        let library = self.library;
        library
            .ontology()
            .objects(self.individual.id(), &library.schema().in_playlist)
    }

    #[must_use]
    pub fn is_in_playlist(&self, playlist: &Iri) -> bool {
        self.library.ontology().has_link(
            self.id(),
            &self.library.schema().in_playlist,
            playlist,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Artist<'a> {
    library: &'a MusicLibrary,
    individual: &'a Individual,
}

impl<'a> Artist<'a> {
    pub(crate) fn new(library: &'a MusicLibrary, individual: &'a Individual) -> Self {
        Self {
            library,
            individual,
        }
    }

    #[must_use]
    pub fn id(&self) -> &'a Iri {
        self.individual.id()
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.individual.name()
    }

    /// Award labels: literal values of `hasAward` when it is a data property,
    /// names of the linked individuals when it is an object property.
    #[must_use]
    pub fn awards(&self) -> Vec<String> {
        let library = self.library;
        let has_award = &library.schema().has_award;
        match library.ontology().property(has_award).map(|p| p.kind()) {
            Some(PropertyKind::Data) => self
                .individual
                .values(has_award)
                .iter()
                .map(|value| value.value().to_string())
                .collect(),
            Some(PropertyKind::Object) => library
                .ontology()
                .objects(self.id(), has_award)
                .map(|award| award.local_name().to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Person<'a> {
    library: &'a MusicLibrary,
    individual: &'a Individual,
}

impl<'a> Person<'a> {
    pub(crate) fn new(library: &'a MusicLibrary, individual: &'a Individual) -> Self {
        Self {
            library,
            individual,
        }
    }

    #[must_use]
    pub fn id(&self) -> &'a Iri {
        self.individual.id()
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.individual.name()
    }

    /// Liked songs in assertion order.
    pub fn likes(&self) -> impl Iterator<Item = &'a Iri> + 'a {
        let library = self.library;
        library
            .ontology()
            .objects(self.individual.id(), &library.schema().likes)
    }

    #[must_use]
    pub fn likes_song(&self, song: &Iri) -> bool {
        self.library
            .ontology()
            .has_link(self.id(), &self.library.schema().likes, song)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Playlist<'a> {
    library: &'a MusicLibrary,
    individual: &'a Individual,
}

impl<'a> Playlist<'a> {
    pub(crate) fn new(library: &'a MusicLibrary, individual: &'a Individual) -> Self {
        Self {
            library,
            individual,
        }
    }

    #[must_use]
    pub fn id(&self) -> &'a Iri {
        self.individual.id()
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.individual.name()
    }

    /// Member songs in the order they were put in the playlist.
    #[must_use]
    pub fn songs(&self) -> Vec<Song<'a>> {
        let library = self.library;
        library
            .ontology()
            .subjects(&library.schema().in_playlist, self.individual.id())
            .filter_map(|id| library.song(id))
            .collect()
    }
}
