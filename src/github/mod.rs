//! # GitHub Projects
//!
//! Repository summaries for the "projects" sections of both skins: fetching
//! them from the public API ([`client`]), caching them politely
//! ([`service`]) and choosing which ones to feature.

pub mod client;
pub mod service;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use client::{ApiFuture, ApiResponse, GithubApi, RepoApi};
pub use service::{
    Clock, FetchSource, RepoFetch, RepoService, SystemClock, CACHE_TTL_MS, DEFAULT_MAX_REPOS,
    PLACEHOLDER_USERNAME,
};

/// How many repositories the fallback selection shows
pub const FEATURED_FALLBACK_LIMIT: usize = 8;

/// The parts of a GitHub repository the skins display
///
/// Field names follow the GitHub API so cached entries read naturally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: String,
    pub language: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub updated_at: Option<String>,
    pub homepage: String,
    pub topics: Vec<String>,
    pub archived: bool,
    pub fork: bool,
}

impl RepoSummary {
    fn updated(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

/// A repository entry as the API returns it; anything may be missing or null
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawRepo {
    name: Option<String>,
    full_name: Option<String>,
    html_url: Option<String>,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    updated_at: Option<String>,
    homepage: Option<String>,
    topics: Option<Vec<String>>,
    archived: Option<bool>,
    fork: Option<bool>,
}

impl From<RawRepo> for RepoSummary {
    fn from(raw: RawRepo) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            full_name: raw.full_name.unwrap_or_default(),
            html_url: raw.html_url.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            language: raw.language.unwrap_or_default(),
            stargazers_count: raw.stargazers_count.unwrap_or(0),
            forks_count: raw.forks_count.unwrap_or(0),
            updated_at: raw.updated_at,
            homepage: raw.homepage.unwrap_or_default(),
            topics: raw.topics.unwrap_or_default(),
            archived: raw.archived.unwrap_or(false),
            fork: raw.fork.unwrap_or(false),
        }
    }
}

/// Pick the repositories to show
///
/// Preferred names win, in their given order (case-insensitive; unknown
/// names are skipped). When none of them match, fall back to the most-starred
/// non-fork, non-archived repositories, most recently updated first on ties.
pub fn pick_featured_repos(repos: &[RepoSummary], preferred: &[String]) -> Vec<RepoSummary> {
    let by_name: HashMap<String, &RepoSummary> = repos
        .iter()
        .map(|repo| (repo.name.to_lowercase(), repo))
        .collect();

    let featured: Vec<RepoSummary> = preferred
        .iter()
        .filter_map(|name| by_name.get(&name.to_lowercase()))
        .map(|repo| (*repo).clone())
        .collect();

    if !featured.is_empty() {
        return featured;
    }

    let mut candidates: Vec<&RepoSummary> =
        repos.iter().filter(|r| !r.fork && !r.archived).collect();
    candidates.sort_by(|a, b| {
        b.stargazers_count
            .cmp(&a.stargazers_count)
            .then_with(|| b.updated().cmp(&a.updated()))
    });

    candidates
        .into_iter()
        .take(FEATURED_FALLBACK_LIMIT)
        .cloned()
        .collect()
}
