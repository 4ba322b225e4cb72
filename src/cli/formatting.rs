//! Formatting utilities for CLI output.
//!
//! Provides consistent styling for usage text and the track and player
//! listings actions print.

use crate::services::mpris::{Candidate, UNKNOWN_METADATA};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats subheaders with styling
pub fn format_subheader(text: &str) -> String {
    format!(
        "{}{}{}{}",
        Colors::BOLD,
        Colors::YELLOW,
        text,
        Colors::RESET
    )
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats usage examples with styling
pub fn format_usage(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// `"title" on "album" by artist`, with missing parts shown as unknown.
pub fn format_track(title: Option<&str>, album: Option<&str>, artists: &[String]) -> String {
    let artist = if artists.is_empty() {
        UNKNOWN_METADATA.to_string()
    } else {
        artists.join(", ")
    };

    format!(
        "\"{}\" on \"{}\" by {}",
        title.unwrap_or(UNKNOWN_METADATA),
        album.unwrap_or(UNKNOWN_METADATA),
        artist
    )
}

/// The reachable players, one per line.
pub fn format_candidates(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "no player is available".to_string();
    }

    let mut lines = vec!["Available player(s):".to_string()];
    lines.extend(
        candidates
            .iter()
            .map(|candidate| format!("- {} : {}", candidate.id, candidate.identity)),
    );
    lines.join("\n")
}
