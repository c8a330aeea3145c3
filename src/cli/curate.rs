use std::{future::Future, time::Duration};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    cli::login,
    config::ClientConfig,
    info,
    session::{BackendClient, GENRES, PlaybackOutcome, Session},
    spotify::SpotifyClient,
    success,
    types::{RedirectParams, Track},
    utils, warning,
};

/// A track addressed by its 1-based position in the candidate list (`3`) or
/// the kept list (`k3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackRef {
    Candidate(usize),
    Kept(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Genres,
    Genre(String),
    More,
    Keep(usize),
    Skip(usize),
    Remove(usize),
    Play(TrackRef),
    Name(String),
    Save,
    Reset,
    List,
    Help,
    Quit,
}

const HELP: &str = "\
  genres            list genres
  genre <name>      fetch recommendations (repeat for the next page)
  more              next page of the selected genre
  keep <n>          keep candidate n
  skip <n>          drop candidate n
  remove <n>        drop kept track n
  play <n>|k<n>     play or queue a candidate or kept track
  name <text>       set the playlist name
  save              save kept tracks as a playlist
  reset             start over
  list              show candidates and kept tracks
  quit              leave";

/// Parses one line of input.
///
/// # Errors
///
/// Returns a short message for unknown commands and missing or malformed
/// arguments.
pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "genres" => ReplCommand::Genres,
        "genre" | "g" => ReplCommand::Genre(non_empty(rest, "genre")?),
        "more" | "next" => ReplCommand::More,
        "keep" | "k" => ReplCommand::Keep(position(rest)?),
        "skip" | "s" => ReplCommand::Skip(position(rest)?),
        "remove" | "rm" => ReplCommand::Remove(position(rest)?),
        "play" | "p" => ReplCommand::Play(track_ref(rest)?),
        "name" => ReplCommand::Name(non_empty(rest, "playlist name")?),
        "save" => ReplCommand::Save,
        "reset" => ReplCommand::Reset,
        "list" | "ls" => ReplCommand::List,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        "" => return Err("Type `help` for a list of commands.".to_string()),
        other => return Err(format!("Unknown command '{other}'. Type `help`.")),
    };

    Ok(command)
}

fn non_empty(value: &str, what: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("Missing {what}."))
    } else {
        Ok(value.to_string())
    }
}

fn position(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Expected a track number, got '{value}'.")),
    }
}

fn track_ref(value: &str) -> Result<TrackRef, String> {
    match value.strip_prefix(['k', 'K']) {
        Some(n) => position(n).map(TrackRef::Kept),
        None => position(value).map(TrackRef::Candidate),
    }
}

/// Runs the interactive curation session.
///
/// Logs in through the backend unless `access_token` is given, then reads
/// commands from stdin until `quit` or end of input.
pub async fn curate(access_token: Option<String>, open_browser: bool) {
    let config = ClientConfig::from_env();
    let http = Client::new();
    let spotify = SpotifyClient::with_client(http.clone(), config.api_url.clone());
    let backend = BackendClient::new(http, config.backend_url.clone());
    let mut session = Session::new(spotify, backend.clone());

    let params = match access_token {
        Some(token) => Some(RedirectParams {
            access_token: Some(token),
            ..RedirectParams::default()
        }),
        None => login::login(&config, &backend, open_browser).await,
    };

    let Some(params) = params else {
        warning!("Login timed out.");
        return;
    };

    with_spinner("Looking up your profile...", session.authenticate(params)).await;
    report_error(&mut session);

    if !session.is_authenticated() {
        return;
    }

    success!(
        "Logged in as {}",
        session.user_id().unwrap_or("unknown user")
    );
    info!("Type `help` for a list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                warning!("{}", message);
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }

        run_command(&mut session, command).await;
        report_error(&mut session);
    }
}

async fn run_command(session: &mut Session, command: ReplCommand) {
    match command {
        ReplCommand::Genres => print_genres(),
        ReplCommand::Genre(genre) => {
            with_spinner("Fetching tracks...", session.select_genre(&genre)).await;
            print_candidates(session);
        }
        ReplCommand::More => {
            let genre = session.selected_genre().to_string();
            if genre.is_empty() {
                warning!("Select a genre first.");
                return;
            }
            with_spinner("Fetching tracks...", session.fetch_tracks(&genre)).await;
            print_candidates(session);
        }
        ReplCommand::Keep(n) => {
            if let Some(track) = candidate(session, n) {
                info!("Kept {}", describe(&track));
                session.keep_track(track);
            }
        }
        ReplCommand::Skip(n) => {
            if let Some(track) = candidate(session, n) {
                session.remove_track(&track.id);
            }
        }
        ReplCommand::Remove(n) => {
            if let Some(track) = kept(session, n) {
                session.remove_track(&track.id);
            }
        }
        ReplCommand::Play(reference) => {
            let track = match reference {
                TrackRef::Candidate(n) => candidate(session, n),
                TrackRef::Kept(n) => kept(session, n),
            };
            if let Some(track) = track {
                play(session, &track).await;
            }
        }
        ReplCommand::Name(name) => {
            session.set_playlist_name(name);
            info!("Playlist name set to {:?}", session.playlist_name());
        }
        ReplCommand::Save => {
            let saved = with_spinner("Saving playlist...", session.save_playlist()).await;
            if let Some(playlist_id) = saved {
                success!("Playlist created successfully! ({})", playlist_id);
            }
        }
        ReplCommand::Reset => {
            session.reset_selections();
            info!("Starting over.");
        }
        ReplCommand::List => {
            print_candidates(session);
            print_kept(session);
            if let Some(line) = now_playing_line(session) {
                info!("{}", line);
            }
        }
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => {}
    }
}

async fn play(session: &mut Session, track: &Track) {
    let outcome = with_spinner("Contacting your player...", session.play_track(track)).await;
    match outcome {
        PlaybackOutcome::Playing { device } => {
            success!("Now playing {} on {}", describe(track), device)
        }
        PlaybackOutcome::Queued { device } => {
            success!("Queued {} on {}", describe(track), device)
        }
        PlaybackOutcome::NoDevices | PlaybackOutcome::Failed => {}
        PlaybackOutcome::NotAuthenticated => warning!("Log in first."),
    }
}

fn candidate(session: &Session, n: usize) -> Option<Track> {
    let track = session.tracks().get(n - 1).cloned();
    if track.is_none() {
        warning!("No candidate track {}.", n);
    }
    track
}

fn kept(session: &Session, n: usize) -> Option<Track> {
    let track = session.kept().get(n - 1).cloned();
    if track.is_none() {
        warning!("No kept track {}.", n);
    }
    track
}

fn describe(track: &Track) -> String {
    format!("{} by {}", track.name, utils::artist_names(track))
}

fn report_error(session: &mut Session) {
    if let Some(message) = session.error() {
        warning!("{}", message);
    }
    session.clear_error();
}

fn print_genres() {
    for genre in GENRES {
        info!("{}", genre.to_uppercase());
    }
}

fn print_candidates(session: &Session) {
    if session.tracks().is_empty() {
        return;
    }
    println!(
        "Recommended Tracks for {} genre:\n{}",
        session.selected_genre().bold(),
        Table::new(utils::track_rows(session.tracks(), ""))
    );
}

fn print_kept(session: &Session) {
    if session.kept().is_empty() {
        return;
    }
    println!(
        "Kept Tracks:\n{}",
        Table::new(utils::track_rows(session.kept(), "k"))
    );
}

/// Status line for the track last started, independent of the kept list.
pub fn now_playing_line(session: &Session) -> Option<String> {
    session
        .now_playing()
        .map(|track| format!("Now Playing: {}", describe(track)))
}

fn print_prompt() {
    use std::io::Write;

    print!("{} ", ">".cyan().bold());
    let _ = std::io::stdout().flush();
}

async fn with_spinner<F: Future>(message: &'static str, future: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let output = future.await;
    pb.finish_and_clear();
    output
}
