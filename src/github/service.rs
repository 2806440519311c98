//! # Repository Service
//!
//! Fetches a user's repositories with a six hour write-through cache in the
//! state store. Ordinary API failures never become errors: the caller always
//! gets a (possibly empty) list and a note it can show in place of data.

use super::client::RepoApi;
use super::{RawRepo, RepoSummary};
use crate::storage::{keys, KeyValueStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Freshness window of cached repository lists
pub const CACHE_TTL_MS: i64 = 6 * 60 * 60 * 1000;

/// Default cap on the number of repositories kept from one listing
pub const DEFAULT_MAX_REPOS: usize = 60;

/// Username shipped in the sample profile document
pub const PLACEHOLDER_USERNAME: &str = "YOUR_GITHUB_USERNAME";

/// Source of the current time, so cache freshness can be tested
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Where a [`RepoFetch`] result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// No usable username configured
    Unconfigured,
    /// Fresh cache entry
    Cache,
    /// Live API call
    Live,
    /// API answered with a non-success status
    ApiError(u16),
    /// API could not be reached
    Unreachable,
    /// Anything else, e.g. a success response that is not JSON
    Failed,
}

/// Repositories plus a human-readable note about how they were obtained
#[derive(Debug, Clone, PartialEq)]
pub struct RepoFetch {
    pub repos: Vec<RepoSummary>,
    pub note: String,
    pub source: FetchSource,
}

impl RepoFetch {
    fn empty(note: impl Into<String>, source: FetchSource) -> Self {
        Self {
            repos: Vec::new(),
            note: note.into(),
            source,
        }
    }

    /// Stand-in result for a fetch that returned an error
    pub fn failed(error: &anyhow::Error) -> Self {
        Self::empty(
            format!("Could not load repositories: {error:#}."),
            FetchSource::Failed,
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Milliseconds since the Unix epoch
    ts: i64,
    repos: Vec<RepoSummary>,
}

/// Cached access to a [`RepoApi`]
pub struct RepoService {
    api: Arc<dyn RepoApi>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl RepoService {
    pub fn new(api: Arc<dyn RepoApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(api, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        api: Arc<dyn RepoApi>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { api, store, clock }
    }

    /// Fetch up to `max` repositories of `username`
    ///
    /// Only an unparseable success body is returned as an error.
    pub async fn fetch(&self, username: Option<&str>, max: usize) -> Result<RepoFetch> {
        let username = match username {
            Some(name) if !name.is_empty() && name != PLACEHOLDER_USERNAME => name,
            _ => {
                tracing::debug!("No GitHub username configured");
                return Ok(RepoFetch::empty(
                    "Set githubUsername in data/site.json.",
                    FetchSource::Unconfigured,
                ));
            }
        };

        let cache_key = keys::repo_cache(username);
        let now_ms = self.clock.now().timestamp_millis();

        if let Some(repos) = self.read_cache(&cache_key, now_ms) {
            tracing::debug!("Using {} cached repositories for {}", repos.len(), username);
            return Ok(RepoFetch {
                repos,
                note: "Loaded from cache.".to_string(),
                source: FetchSource::Cache,
            });
        }

        let response = match self.api.list_user_repos(username).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("GitHub API unreachable: {:#}", e);
                return Ok(RepoFetch::empty(
                    format!("GitHub API unreachable: {e}."),
                    FetchSource::Unreachable,
                ));
            }
        };

        if !response.is_success() {
            let hint = if response.status == 403 {
                " (rate-limited by GitHub, try again later)"
            } else {
                ""
            };
            tracing::warn!("GitHub API error {} for {}", response.status, username);
            return Ok(RepoFetch::empty(
                format!("GitHub API error: {}{}.", response.status, hint),
                FetchSource::ApiError(response.status),
            ));
        }

        let raw: serde_json::Value = serde_json::from_str(&response.body)
            .context("GitHub API returned a body that is not JSON")?;
        let repos = summarize(raw, max);
        self.write_cache(&cache_key, now_ms, &repos);

        tracing::info!("Loaded {} repositories for {}", repos.len(), username);
        Ok(RepoFetch {
            repos,
            note: "Loaded from GitHub API.".to_string(),
            source: FetchSource::Live,
        })
    }

    fn read_cache(&self, key: &str, now_ms: i64) -> Option<Vec<RepoSummary>> {
        let raw = self.store.get(key)?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Ignoring corrupt cache entry {}: {}", key, e);
                return None;
            }
        };

        (now_ms - entry.ts < CACHE_TTL_MS).then_some(entry.repos)
    }

    fn write_cache(&self, key: &str, now_ms: i64, repos: &[RepoSummary]) {
        let entry = CacheEntry {
            ts: now_ms,
            repos: repos.to_vec(),
        };
        match serde_json::to_string(&entry) {
            Ok(json) => self.store.set(key, &json),
            Err(e) => tracing::warn!("Could not serialize repository cache: {}", e),
        }
    }
}

/// Keep JSON objects only, cap at `max`, map to summaries
fn summarize(raw: serde_json::Value, max: usize) -> Vec<RepoSummary> {
    let serde_json::Value::Array(items) = raw else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter(serde_json::Value::is_object)
        .take(max)
        .filter_map(|item| serde_json::from_value::<RawRepo>(item).ok())
        .map(RepoSummary::from)
        .collect()
}
