//! Command line entry point.
//!
//! Without a subcommand the binary runs the demo walkthrough: it reasons over
//! the configured ontology, prints every report, adds favorites for three
//! people and recommends songs.

use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::{
    config::{self, Config, ReasonerBackend},
    console::{Console, Indicator, OutputFormat},
    environment::{resolve_from_env, Environment},
    library::{
        add_favorite_to_playlist, recommend_songs_for_person, reports, show_user_favorites,
        FavoriteStatus, FavoritesView, MusicLibrary,
    },
    logger,
    ontology::{reasoner, Reasoner},
    Result,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Specify the environment [default: development]
    #[arg(short, long, global = true)]
    environment: Option<String>,

    /// Folder holding the environment configuration files
    #[arg(long, global = true, default_value = config::DEFAULT_FOLDER)]
    config_folder: PathBuf,

    /// Ontology file to load instead of the configured one
    #[arg(long, global = true)]
    ontology: Option<PathBuf>,

    /// Skip the external reasoner and keep asserted memberships only
    #[arg(long, global = true)]
    no_reasoner: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the full walkthrough (default)
    Demo,
    /// List songs with artist, duration, rating and play count
    Songs,
    /// List artists and their awards
    Artists,
    /// List members of the reasoner-derived song classes
    Inferred,
    /// List playlists and their songs
    Playlists,
    /// Describe the loaded ontology
    Summary,
    /// Recommend the songs a person does not like yet
    Recommend { person: String },
    /// Add songs to a person's favorites playlist
    Favorite {
        person: String,
        #[arg(required = true)]
        songs: Vec<String>,
        /// Show the playlist afterwards
        #[arg(long)]
        show: bool,
    },
    /// Show a person's favorites playlist
    Favorites { person: String },
}

/// People and songs used by the demo walkthrough.
const DEMO_FAVORITES: &[(&str, &str)] = &[
    ("Me", "LonelyAtTheTop"),
    ("Me", "EndOfSummer"),
    ("Me", "LoveMeNot"),
    ("Mariya", "TheManifesto"),
    ("Mariya", "JealousType"),
    ("Miya", "EndOfSummer"),
    ("Miya", "GameOver"),
];
const DEMO_PEOPLE: &[&str] = &["Me", "Mariya", "Miya"];
const DEMO_RECOMMEND_FOR: &str = "Me";

/// Parses the command line and runs the selected command.
///
/// # Errors
///
/// Returns an error when configuration, loading or reasoning fails.
pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let environment: Environment = cli.environment.unwrap_or_else(resolve_from_env).into();
    let mut config = environment.load_from_folder(&cli.config_folder)?;
    if let Some(path) = cli.ontology {
        config.ontology.path = path;
        config.ontology.format = None;
    }
    if cli.no_reasoner {
        config.reasoner.backend = ReasonerBackend::None;
    }
    logger::init(&config.logger)?;
    announce(&environment, &cli.config_folder, &config);

    let mut library = MusicLibrary::load(&config.ontology)?;
    let reasoner = reasoner::from_settings(&config.reasoner);

    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let mut console = Console::new(stdout.lock(), cli.format).with_color(color);
    let command = cli.command.unwrap_or(Commands::Demo);
    run(&command, &mut library, reasoner.as_ref(), &mut console)?;
    console.finish()
}

/// Logs the settings a run starts with. Called once the logger is installed.
fn announce(environment: &Environment, folder: &Path, config: &Config) {
    info!(
        %environment,
        folder = %folder.display(),
        ontology = %config.ontology.path.display(),
        reasoner = %config.reasoner.display_name(),
        "configuration_loaded"
    );
}

/// Reasons over `library` and runs `command` against it.
///
/// # Errors
///
/// Returns an error when the reasoner fails or the store rejects a change.
/// Unknown people and songs are reported on the console instead.
pub fn run<W: Write>(
    command: &Commands,
    library: &mut MusicLibrary,
    reasoner: &dyn Reasoner,
    console: &mut Console<W>,
) -> Result<()> {
    if *command != Commands::Demo {
        library.run_reasoner(reasoner)?;
    }
    match command {
        Commands::Demo => demo(library, reasoner, console),
        Commands::Songs => songs(library, console),
        Commands::Artists => artists(library, console),
        Commands::Inferred => inferred(library, console),
        Commands::Playlists => playlists(library, console),
        Commands::Summary => summary(library, console),
        Commands::Recommend { person } => recommend(library, person, console),
        Commands::Favorite {
            person,
            songs,
            show,
        } => {
            for song in songs {
                favorite(library, person, song, console)?;
            }
            if *show {
                favorites(library, person, console)?;
            }
            Ok(())
        }
        Commands::Favorites { person } => favorites(library, person, console),
    }
}

fn demo<W: Write>(
    library: &mut MusicLibrary,
    reasoner: &dyn Reasoner,
    console: &mut Console<W>,
) -> Result<()> {
    console.notice(
        Indicator::Info,
        format!("Running reasoner ({})...", reasoner.name()),
    )?;
    let inference = library.run_reasoner(reasoner)?;
    console.notice(
        Indicator::Info,
        format!("{} memberships inferred", inference.inferred),
    )?;
    console.record("reasoner", &inference)?;
    console.banner("ONTOLOGY LOADED & REASONED")?;

    songs(library, console)?;
    artists(library, console)?;
    inferred(library, console)?;
    playlists(library, console)?;

    console.divider("Adding favorites to playlists")?;
    for (person, song) in DEMO_FAVORITES {
        favorite(library, person, song, console)?;
    }

    console.divider("User Favorites Playlists")?;
    for person in DEMO_PEOPLE {
        favorites(library, person, console)?;
    }

    recommend(library, DEMO_RECOMMEND_FOR, console)
}

fn songs<W: Write>(library: &MusicLibrary, console: &mut Console<W>) -> Result<()> {
    let rows = reports::list_songs(library);
    console.record("songs", &rows)?;
    console.heading("Songs in ontology")?;
    for row in &rows {
        console.line(row)?;
    }
    Ok(())
}

fn artists<W: Write>(library: &MusicLibrary, console: &mut Console<W>) -> Result<()> {
    let rows = reports::list_artists(library);
    console.record("artists", &rows)?;
    console.heading("Artists in ontology")?;
    for row in &rows {
        console.line(row)?;
    }
    Ok(())
}

fn inferred<W: Write>(library: &MusicLibrary, console: &mut Console<W>) -> Result<()> {
    let report = reports::list_inferred_classes(library);
    console.record("inferred", &report)?;
    console.heading("Inferred classes")?;
    for class in &report.classes {
        console.line(class)?;
    }
    Ok(())
}

fn playlists<W: Write>(library: &MusicLibrary, console: &mut Console<W>) -> Result<()> {
    let rows = reports::list_playlists(library);
    console.record("playlists", &rows)?;
    console.heading("Playlists and songs")?;
    for row in &rows {
        console.line(row)?;
    }
    Ok(())
}

fn summary<W: Write>(library: &MusicLibrary, console: &mut Console<W>) -> Result<()> {
    let summary = reports::summary(library);
    console.record("summary", &summary)?;
    console.line(summary)
}

fn recommend<W: Write>(
    library: &MusicLibrary,
    person: &str,
    console: &mut Console<W>,
) -> Result<()> {
    match recommend_songs_for_person(library, person) {
        Ok(recommendation) => {
            console.record("recommendation", &recommendation)?;
            console.line("")?;
            console.notice(Indicator::Info, recommendation)
        }
        Err(err) if err.is_lookup() => {
            console.record("recommendation", &serde_json::json!({ "error": err.to_string() }))?;
            console.notice(Indicator::Error, format!("Error: {err}"))
        }
        Err(err) => Err(err.into()),
    }
}

fn favorite<W: Write>(
    library: &mut MusicLibrary,
    person: &str,
    song: &str,
    console: &mut Console<W>,
) -> Result<()> {
    let outcome = match add_favorite_to_playlist(library, person, song) {
        Ok(outcome) => outcome,
        Err(err) if err.is_lookup() => {
            console.push(
                "favorites_added",
                &serde_json::json!({ "person": person, "song": song, "error": err.to_string() }),
            )?;
            return console.notice(Indicator::Error, format!("Error: {err}"));
        }
        Err(err) => return Err(err.into()),
    };

    console.push("favorites_added", &outcome)?;
    if outcome.playlist_created {
        console.notice(
            Indicator::Added,
            format!("Created new favorites playlist: {}", outcome.playlist),
        )?;
    } else {
        console.notice(
            Indicator::Info,
            format!("Using existing favorites playlist: {}", outcome.playlist),
        )?;
    }
    match outcome.status {
        FavoriteStatus::Added => console.notice(
            Indicator::Added,
            format!("Added '{song}' to {person}'s favorites playlist"),
        ),
        FavoriteStatus::AlreadyPresent => console.notice(
            Indicator::Present,
            format!("Song '{song}' is already in {person}'s favorites playlist"),
        ),
    }
}

fn favorites<W: Write>(
    library: &MusicLibrary,
    person: &str,
    console: &mut Console<W>,
) -> Result<()> {
    let view = show_user_favorites(library, person);
    console.push("favorites", &view)?;
    match view {
        FavoritesView::Missing { person } => console.notice(
            Indicator::Info,
            format!("{person} doesn't have a favorites playlist yet"),
        ),
        FavoritesView::Empty { person, .. } => console.notice(
            Indicator::Info,
            format!("{person}'s favorites playlist is empty"),
        ),
        FavoritesView::Listed { person, songs, .. } => {
            console.line("")?;
            console.notice(
                Indicator::Info,
                format!("{person}'s Favorites Playlist ({} songs):", songs.len()),
            )?;
            for (position, song) in songs.iter().enumerate() {
                console.line(format!("   {}. {song}", position + 1))?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        path::Path,
        sync::{Arc, Mutex},
    };

    use clap::Parser;
    use tracing_subscriber::fmt::MakeWriter;

    use super::{announce, Cli, Commands};
    use crate::{config::Config, console::OutputFormat, environment::Environment};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn announces_configuration_through_the_installed_logger() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        let config = Config::from_yaml("ontology:\n  path: data/music.ttl\n").expect("config");

        tracing::subscriber::with_default(subscriber, || {
            announce(&Environment::Test, Path::new("config"), &config);
        });

        let logs = String::from_utf8(captured.0.lock().expect("capture lock").clone())
            .expect("utf8");
        assert!(logs.contains("configuration_loaded"));
        assert!(logs.contains("environment=test"));
        assert!(logs.contains("ontology=data/music.ttl"));
    }

    #[test]
    fn defaults_to_demo_with_text_output() {
        let cli = Cli::try_parse_from(["music-ontology"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.config_folder.to_str(), Some("config"));
        assert!(!cli.no_reasoner);
    }

    #[test]
    fn parses_favorite_with_global_flags() {
        let cli = Cli::try_parse_from([
            "music-ontology",
            "favorite",
            "Me",
            "GameOver",
            "EndOfSummer",
            "--show",
            "--no-reasoner",
            "--format",
            "json",
        ])
        .expect("parse");
        assert_eq!(
            cli.command,
            Some(Commands::Favorite {
                person: "Me".to_string(),
                songs: vec!["GameOver".to_string(), "EndOfSummer".to_string()],
                show: true,
            })
        );
        assert!(cli.no_reasoner);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn favorite_requires_a_song() {
        assert!(Cli::try_parse_from(["music-ontology", "favorite", "Me"]).is_err());
    }
}
