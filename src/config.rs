//! Configuration constants and the INI profile for folio
//!
//! A profile file holds one section per profile; the `--profile` flag picks
//! the section. Every key is optional and command line flags win over it.

use crate::github::client::DEFAULT_API_BASE;
use crate::github::DEFAULT_MAX_REPOS;
use crate::modern::DEFAULT_OUTPUT;
use anyhow::{Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};

/// Default profile file path for folio
pub const DEFAULT_PROFILE_PATH: &str = "~/.folio/profile";

/// Overrides the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "FOLIO_PROFILE_PATH";

/// Profile section used when none is named
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Default profile document location
pub const DEFAULT_DATA: &str = "data/site.json";

/// Default state file location
pub const DEFAULT_STATE_PATH: &str = "~/.folio/state.json";

/// Profile file path: `FOLIO_PROFILE_PATH` when set and valid UTF-8, else the default
pub fn get_profile_path() -> String {
    match std::env::var(PROFILE_PATH_ENV_VAR) {
        Ok(path) if !path.is_empty() => path,
        _ => DEFAULT_PROFILE_PATH.to_string(),
    }
}

/// Expand `~` and environment variables; unknown variables leave the text as is
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!("Could not expand '{}': {}", path, e);
            PathBuf::from(path)
        }
    }
}

/// Settings of one profile after defaults are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    /// Profile document, a path or an http(s) URL
    pub data: String,
    /// State file for the skin choice, theme and repository cache
    pub state: PathBuf,
    pub github_api: String,
    /// Where the modern page is written
    pub output: PathBuf,
    pub max_repos: usize,
    pub log_file: Option<PathBuf>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            data: DEFAULT_DATA.to_string(),
            state: expand_path(DEFAULT_STATE_PATH),
            github_api: DEFAULT_API_BASE.to_string(),
            output: expand_path(DEFAULT_OUTPUT),
            max_repos: DEFAULT_MAX_REPOS,
            log_file: None,
        }
    }
}

impl FolioConfig {
    /// Load `profile` from the INI file at `path`
    ///
    /// A missing file or section gives the defaults; an unreadable file or a
    /// malformed value is an error.
    pub fn load(path: &Path, profile: &str) -> Result<Self> {
        let mut config = Self::default();
        if !path.exists() {
            tracing::debug!("No profile file at {}, using defaults", path.display());
            return Ok(config);
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let Some(section) = ini.section(Some(profile)) else {
            tracing::debug!(
                "Profile '{}' not found in {}, using defaults",
                profile,
                path.display()
            );
            return Ok(config);
        };

        if let Some(data) = section.get("data") {
            config.data = if data.contains("://") {
                data.to_string()
            } else {
                expand_path(data).to_string_lossy().into_owned()
            };
        }
        if let Some(state) = section.get("state") {
            config.state = expand_path(state);
        }
        if let Some(api) = section.get("github_api") {
            config.github_api = api.to_string();
        }
        if let Some(output) = section.get("output") {
            config.output = expand_path(output);
        }
        if let Some(max) = section.get("max_repos") {
            config.max_repos = max
                .trim()
                .parse()
                .with_context(|| format!("Invalid max_repos '{max}' in profile '{profile}'"))?;
        }
        if let Some(log_file) = section.get("log_file") {
            config.log_file = Some(expand_path(log_file));
        }

        tracing::debug!("Loaded profile '{}' from {}", profile, path.display());
        Ok(config)
    }

    /// Load the profile from the default location (or `FOLIO_PROFILE_PATH`)
    pub fn load_default(profile: &str) -> Result<Self> {
        Self::load(&expand_path(&get_profile_path()), profile)
    }
}
