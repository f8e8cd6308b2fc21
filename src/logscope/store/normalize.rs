//! Load-time cleanup of raw records.
//!
//! Some recorders wrap shell-magic commands in the interpreter call that ran
//! them, e.g. `get_ipython().run_line_magic('cd', '/tmp')`. The unwrap here is
//! a textual best effort, not a parser: it never fails, and malformed input at
//! worst stays partially wrapped.

use crate::model::LogEntry;

pub const MAGIC_PREFIX: &str = "get_ipython().run_line_magic";

const QUOTES: [char; 6] = ['\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

const PROFILE_CODES: [(&str, &str); 3] =
    [("spockdoor", "1"), ("secondDoor", "2"), ("thirdDoor", "3")];

pub fn normalize_entries(entries: &mut [LogEntry]) {
    for entry in entries.iter_mut() {
        normalize_entry(entry);
    }
}

pub fn normalize_entry(entry: &mut LogEntry) {
    entry.command = normalize_command(&entry.command);
    entry.profile = remap_profile(&entry.profile).to_string();
}

/// Strips the magic-invocation wrapper. Repeats until the text no longer
/// starts with the wrapper, so applying it twice changes nothing.
pub fn normalize_command(command: &str) -> String {
    let mut current = command.to_string();
    while current.starts_with(MAGIC_PREFIX) {
        current = unwrap_magic(&current);
    }
    current
}

fn unwrap_magic(command: &str) -> String {
    command
        .replace(MAGIC_PREFIX, "")
        .trim_matches(|c| c == '(' || c == ')')
        .chars()
        .filter(|c| !QUOTES.contains(c))
        .collect::<String>()
        .replace(", ", " ")
        .replace('%', "")
}

pub fn remap_profile(profile: &str) -> &str {
    PROFILE_CODES
        .iter()
        .find(|(name, _)| *name == profile)
        .map(|(_, code)| *code)
        .unwrap_or(profile)
}
