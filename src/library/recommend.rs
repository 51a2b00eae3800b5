use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::{reports::bracketed, LibraryError, MusicLibrary, Person};
use crate::ontology::Iri;

/// Identifies the person to recommend for.
#[derive(Clone, Copy, Debug)]
pub enum PersonRef<'a> {
    /// Resolved through the person name index.
    Name(&'a str),
    /// A known individual identifier.
    Individual(&'a Iri),
}

impl<'a> From<&'a str> for PersonRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a Iri> for PersonRef<'a> {
    fn from(id: &'a Iri) -> Self {
        Self::Individual(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub person: String,
    pub songs: Vec<String>,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recommended songs for {}: {}",
            self.person,
            bracketed(&self.songs)
        )
    }
}

/// Every song the person does not like yet, in store order.
///
/// # Errors
///
/// Returns [`LibraryError::PersonNotFound`] when the reference does not
/// resolve to a person.
pub fn recommend_songs_for_person<'a>(
    library: &MusicLibrary,
    person: impl Into<PersonRef<'a>>,
) -> Result<Recommendation, LibraryError> {
    let person = resolve(library, person.into())?;
    let songs: Vec<String> = library
        .songs()
        .filter(|song| !person.likes_song(song.id()))
        .map(|song| song.name().to_string())
        .collect();
    debug!(person = person.name(), songs = songs.len(), "songs_recommended");
    Ok(Recommendation {
        person: person.name().to_string(),
        songs,
    })
}

fn resolve<'l>(library: &'l MusicLibrary, person: PersonRef<'_>) -> Result<Person<'l>, LibraryError> {
    match person {
        PersonRef::Name(name) => library
            .find_person(name)
            .ok_or_else(|| LibraryError::PersonNotFound(name.to_string())),
        PersonRef::Individual(id) => library
            .person(id)
            .ok_or_else(|| LibraryError::PersonNotFound(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::recommend_songs_for_person;
    use crate::library::{tests::library, LibraryError};

    #[test]
    fn person_without_likes_gets_every_song() {
        let recommendation = recommend_songs_for_person(&library(), "Me").expect("person");
        assert_eq!(
            recommendation.songs,
            vec!["LonelyAtTheTop", "EndOfSummer", "GameOver"]
        );
        assert_eq!(
            recommendation.to_string(),
            "Recommended songs for Me: [LonelyAtTheTop, EndOfSummer, GameOver]"
        );
    }

    #[test]
    fn liked_songs_are_filtered_out() {
        let recommendation = recommend_songs_for_person(&library(), "Mariya").expect("person");
        assert_eq!(recommendation.songs, vec!["LonelyAtTheTop", "GameOver"]);
    }

    #[test]
    fn accepts_individual_reference() {
        let library = library();
        let olivia = library.find_person("Olivia").expect("artist").id().clone();
        let recommendation = recommend_songs_for_person(&library, &olivia).expect("person");
        assert_eq!(recommendation.person, "Olivia");
        assert_eq!(recommendation.songs.len(), 3);
    }

    #[test]
    fn unknown_person_is_a_lookup_failure() {
        let err = recommend_songs_for_person(&library(), "Nobody").expect_err("missing");
        assert!(matches!(err, LibraryError::PersonNotFound(ref name) if name == "Nobody"));
        assert!(err.is_lookup());
        assert_eq!(err.to_string(), "Person 'Nobody' not found!");
    }

    #[test]
    fn song_reference_is_not_a_person() {
        let library = library();
        let song = library.find_song("GameOver").expect("song").id().clone();
        assert!(recommend_songs_for_person(&library, &song).is_err());
    }
}
