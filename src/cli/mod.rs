//! # CLI Module
//!
//! Command-line front ends of genrepick.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the backend: login redirect, OAuth callback, playlist
//!   proxy and health check.
//! - [`curate`] - Interactive curation session: log in through the backend,
//!   browse genre recommendations, keep or skip tracks, play them on an
//!   active device and save the kept tracks as a playlist.
//! - [`genres`] - Lists the supported genres and the seed each maps to.
//!
//! ## Layering
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Session / Server (State, Routing)
//!     ↓
//! Spotify Layer (HTTP Requests)
//! ```
//!
//! Fatal configuration problems end the process through `error!`. Everything
//! else is reported with `warning!` and the command carries on.
//!
//! ## Usage Patterns
//!
//! ```bash
//! genrepick serve                          # start the backend
//! genrepick curate                         # log in and curate
//! genrepick curate --access-token BQC...   # skip the browser login
//! genrepick genres                         # show genre seeds
//! ```

mod curate;
mod genres;
mod login;
mod serve;

pub use curate::{ReplCommand, TrackRef, curate, now_playing_line, parse_command};
pub use genres::genres;
pub use login::{login, wait_for_redirect};
pub use serve::serve;
