//! # GitHub API Client
//!
//! The single read-only call folio makes to GitHub, behind a trait so the
//! caching policy can be tested without a network.

use anyhow::{anyhow, Context, Result};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Url;
use std::future::Future;
use std::pin::Pin;

/// Default public API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Future returned by [`RepoApi::list_user_repos`]
pub type ApiFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>>;

/// Raw answer of the repository listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of a user's repository list
///
/// An `Err` means the request could not be made at all (DNS, TLS, connection);
/// HTTP error statuses come back as an `Ok` response.
pub trait RepoApi: Send + Sync {
    fn list_user_repos<'a>(&'a self, username: &'a str) -> ApiFuture<'a>;
}

/// reqwest-backed client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubApi {
    client: reqwest::Client,
    base_url: String,
}

impl GithubApi {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// `{base}/users/{username}/repos?per_page=100&sort=updated`
    pub fn repos_url(&self, username: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid GitHub API base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("GitHub API base URL cannot have a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", "100")
            .append_pair("sort", "updated");
        Ok(url)
    }
}

impl RepoApi for GithubApi {
    fn list_user_repos<'a>(&'a self, username: &'a str) -> ApiFuture<'a> {
        Box::pin(async move {
            let url = self.repos_url(username)?;
            tracing::debug!("GET {}", url);

            let response = self
                .client
                .get(url)
                .header(ACCEPT, "application/vnd.github+json")
                .header(USER_AGENT, concat!("folio/", env!("CARGO_PKG_VERSION")))
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;
            tracing::debug!("GitHub API answered {} ({} bytes)", status, body.len());

            Ok::<_, anyhow::Error>(ApiResponse { status, body })
        })
    }
}
