//! Fallback address for `check`.
//!
//! Priority:
//! 1. `SNOWPLOW_DEFAULT_ADDRESS`
//! 2. a `## Snow Plow` section with a `Default address:` line in the first
//!    readable `TOOLS.md` of [`candidate_paths`]

use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;

pub const DEFAULT_ADDRESS_VAR: &str = "SNOWPLOW_DEFAULT_ADDRESS";
const WORKSPACE_VAR: &str = "CLAWDBOT_WORKSPACE";
const NOTES_FILE: &str = "TOOLS.md";

fn section_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)##\s*Snow\s*Plow.*?Default address:\s*(.+?)(?:\n|$)").unwrap()
    })
}

pub fn default_address() -> Option<String> {
    env::var(DEFAULT_ADDRESS_VAR)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .or_else(|| find_in_files(&candidate_paths()))
}

pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("clawd").join(NOTES_FILE));
    }
    if let Ok(cwd) = env::current_dir() {
        paths.push(cwd.join(NOTES_FILE));
    }
    if let Some(workspace) = env::var_os(WORKSPACE_VAR).filter(|value| !value.is_empty()) {
        paths.push(PathBuf::from(workspace).join(NOTES_FILE));
    }
    paths
}

/// First address found among `paths`. Missing or unreadable files are skipped.
pub fn find_in_files<P: AsRef<Path>>(paths: &[P]) -> Option<String> {
    paths.iter().find_map(|path| {
        let path = path.as_ref();
        let content = fs::read_to_string(path).ok()?;
        let address = parse_default_address(&content);
        if let Some(address) = &address {
            log::debug!("Default address '{address}' from {}.", path.display());
        }
        address
    })
}

pub fn parse_default_address(content: &str) -> Option<String> {
    section_pattern()
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|address| address.as_str().trim().to_owned())
        .filter(|address| !address.is_empty())
}
