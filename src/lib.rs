//! genrepick library
//!
//! Genre-based Spotify curation: a small backend that performs the OAuth
//! authorization-code exchange and proxies playlist creation, and a client
//! session that browses genre-seeded recommendations, keeps a subset of
//! tracks, controls playback and saves the kept tracks as a playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the backend (`/login`, `/callback`, `/create-playlist`, `/health`)
//! - `cli` - Command-line front ends (`serve`, `curate`, `genres`)
//! - `config` - Environment-backed configuration
//! - `server` - Router assembly and listeners
//! - `session` - Client-side curation state and playback control
//! - `spotify` - Spotify Web API client
//! - `types` - Request and response data structures
//! - `utils` - Formatting and URL helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the top-level glue where errors of different kinds meet and are
/// only reported, never matched on.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Reserved for fatal startup failures such as missing credentials. The
/// process terminates with exit code 1 right after printing.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: failed upstream calls, rejected requests
/// and user-facing errors that leave the session usable.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
