//! Shared fixtures for the integration tests: a profile document on disk,
//! in-memory state and an opener that records instead of launching.

#![allow(dead_code)]

use folio::github::{ApiFuture, ApiResponse, Clock, RepoApi, RepoService};
use folio::opener::RecordingOpener;
use folio::services::Services;
use folio::storage::{KeyValueStore, MemoryStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PROFILE: &str = r#"{
    "name": "Ada Lovelace",
    "tagline": "Analyst of engines",
    "githubUsername": "ada",
    "links": { "github": "github.com/ada", "cvPdf": "../resume/CV.pdf" },
    "highlights": ["Wrote the first published program"],
    "implementationProjects": { "mode": "github", "featuredRepos": ["engine"] }
}"#;

pub const REPOS: &str = r#"[
    { "name": "engine", "html_url": "https://github.com/ada/engine", "language": "Rust",
      "stargazers_count": 42, "updated_at": "2024-05-01T10:00:00Z", "topics": ["math"] },
    { "name": "notes", "html_url": "https://github.com/ada/notes", "stargazers_count": 3 }
]"#;

/// Answers every listing with the same body and counts the calls
pub struct CountingApi {
    body: String,
    calls: AtomicUsize,
}

impl CountingApi {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RepoApi for CountingApi {
    fn list_user_repos<'a>(&'a self, _username: &'a str) -> ApiFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self.body.clone();
        Box::pin(async move { Ok(ApiResponse { status: 200, body }) })
    }
}

/// A clock the test moves by hand
pub struct ManualClock(Mutex<chrono::DateTime<chrono::Utc>>);

impl ManualClock {
    pub fn at(rfc3339: &str) -> Self {
        let start = chrono::DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&chrono::Utc);
        Self(Mutex::new(start))
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub data: PathBuf,
    pub store: Arc<MemoryStore>,
    pub api: Arc<CountingApi>,
    pub opener: Arc<RecordingOpener>,
}

impl Fixture {
    pub fn new(profile: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data").join("site.json");
        std::fs::create_dir_all(data.parent().unwrap()).unwrap();
        std::fs::write(&data, profile).unwrap();
        Self {
            dir,
            data,
            store: Arc::new(MemoryStore::new()),
            api: Arc::new(CountingApi::new(REPOS)),
            opener: Arc::new(RecordingOpener::new()),
        }
    }

    pub fn services(&self) -> Services {
        let store: Arc<dyn KeyValueStore> = self.store.clone();
        Services {
            data: self.data.to_string_lossy().into_owned(),
            store: store.clone(),
            repos: Arc::new(RepoService::new(self.api.clone(), store)),
            opener: self.opener.clone(),
            max_repos: 60,
        }
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("out").join("modern.html")
    }
}
