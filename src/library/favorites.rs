//! Per-person favorites playlists.
//!
//! A person's favorites live in a playlist named `<person>Favorites`, created
//! on the first addition. Adding a song links it to the playlist and records
//! that the person likes it.

use serde::Serialize;
use tracing::info;

use super::{LibraryError, MusicLibrary};

#[must_use]
pub fn favorites_playlist_name(person: &str) -> String {
    format!("{person}Favorites")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteStatus {
    Added,
    AlreadyPresent,
}

/// Result of a successful [`add_favorite_to_playlist`] call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FavoriteOutcome {
    pub person: String,
    pub song: String,
    pub playlist: String,
    pub playlist_created: bool,
    pub status: FavoriteStatus,
}

/// Adds `song` to the favorites playlist of `person`.
///
/// Repeating a call is a no-op that still succeeds. Lookups run before any
/// change, so a failed lookup leaves the store untouched.
///
/// # Errors
///
/// Returns [`LibraryError::PersonNotFound`] or [`LibraryError::SongNotFound`]
/// when a name does not resolve, or a store error when the change is rejected.
pub fn add_favorite_to_playlist(
    library: &mut MusicLibrary,
    person: &str,
    song: &str,
) -> Result<FavoriteOutcome, LibraryError> {
    let person_id = library
        .find_person(person)
        .ok_or_else(|| LibraryError::PersonNotFound(person.to_string()))?
        .id()
        .clone();
    let song_id = library
        .find_song(song)
        .ok_or_else(|| LibraryError::SongNotFound(song.to_string()))?
        .id()
        .clone();

    let playlist_name = favorites_playlist_name(person);
    let existing = library
        .find_playlist(&playlist_name)
        .map(|playlist| playlist.id().clone());
    let playlist_created = existing.is_none();
    let playlist_id = match existing {
        Some(id) => id,
        None => library.create_playlist(&playlist_name)?,
    };

    let mut outcome = FavoriteOutcome {
        person: person.to_string(),
        song: song.to_string(),
        playlist: playlist_name,
        playlist_created,
        status: FavoriteStatus::AlreadyPresent,
    };

    let schema = library.schema().clone();
    if library.ontology().has_link(&song_id, &schema.in_playlist, &playlist_id) {
        return Ok(outcome);
    }

    library.link(&song_id, &schema.in_playlist, &playlist_id)?;
    library.link(&person_id, &schema.likes, &song_id)?;
    info!(person, song, playlist = %playlist_id, "favorite_added");

    outcome.status = FavoriteStatus::Added;
    Ok(outcome)
}

/// What [`show_user_favorites`] found for a person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FavoritesView {
    /// The person has no favorites playlist yet.
    Missing { person: String },
    Empty { person: String, playlist: String },
    Listed {
        person: String,
        playlist: String,
        songs: Vec<String>,
    },
}

/// Lists the songs of the favorites playlist of `person` in the order they were added.
#[must_use]
pub fn show_user_favorites(library: &MusicLibrary, person: &str) -> FavoritesView {
    let playlist_name = favorites_playlist_name(person);
    let Some(playlist) = library.find_playlist(&playlist_name) else {
        return FavoritesView::Missing {
            person: person.to_string(),
        };
    };

    let songs: Vec<String> = playlist
        .songs()
        .iter()
        .map(|song| song.name().to_string())
        .collect();
    if songs.is_empty() {
        FavoritesView::Empty {
            person: person.to_string(),
            playlist: playlist_name,
        }
    } else {
        FavoritesView::Listed {
            person: person.to_string(),
            playlist: playlist_name,
            songs,
        }
    }
}
