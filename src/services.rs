//! Shared collaborators handed to every screen.

use crate::github::RepoService;
use crate::opener::UrlOpener;
use crate::storage::KeyValueStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    /// Location of the profile document (path or URL)
    pub data: String,
    pub store: Arc<dyn KeyValueStore>,
    pub repos: Arc<RepoService>,
    pub opener: Arc<dyn UrlOpener>,
    /// Cap on repositories kept from one listing
    pub max_repos: usize,
}
