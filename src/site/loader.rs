//! # Profile Loader
//!
//! Fetches and parses the profile document from a local path or an http(s) URL.
//! Every failure surfaces as a [`LoadError`] so the caller can show it.

use super::SiteData;
use regex::Regex;
use reqwest::header::{CACHE_CONTROL, USER_AGENT};
use reqwest::Url;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Why the profile document could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file or server could not be reached
    #[error("could not read {location}: {detail}")]
    Unreachable { location: String, detail: String },

    /// The server answered with a non-success status
    #[error("could not load site data: {status} {reason}")]
    Status { status: u16, reason: String },

    /// The document is not valid JSON for a profile
    #[error("site data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Whether `location` should be fetched over HTTP instead of read from disk
pub fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]+:").expect("valid scheme pattern"))
}

/// Resolve a link found in the profile document against the document's own
/// location, the way a browser resolves relative hrefs
///
/// Links with a scheme (`https:`, `mailto:`, ...) and empty links are
/// returned unchanged.
pub fn resolve_link(document: &str, target: &str) -> String {
    if target.is_empty() || scheme_pattern().is_match(target) {
        return target.to_string();
    }
    if is_remote(document) {
        return Url::parse(document)
            .and_then(|base| base.join(target))
            .map(String::from)
            .unwrap_or_else(|_| target.to_string());
    }
    Path::new(document)
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(target)
        .to_string_lossy()
        .into_owned()
}

/// Load and parse the profile document
pub async fn load_site_data(location: &str) -> Result<SiteData, LoadError> {
    tracing::debug!("Loading site data from '{}'", location);

    let body = if is_remote(location) {
        fetch_remote(location).await?
    } else {
        read_local(location).await?
    };

    let site: SiteData = serde_json::from_str(&body)?;
    tracing::info!(
        "Site data loaded for '{}'",
        site.name.as_deref().unwrap_or("<unnamed>")
    );
    Ok(site)
}

async fn read_local(location: &str) -> Result<String, LoadError> {
    tokio::fs::read_to_string(location)
        .await
        .map_err(|e| LoadError::Unreachable {
            location: location.to_string(),
            detail: e.to_string(),
        })
}

async fn fetch_remote(location: &str) -> Result<String, LoadError> {
    let unreachable = |e: reqwest::Error| LoadError::Unreachable {
        location: location.to_string(),
        detail: e.to_string(),
    };

    let response = reqwest::Client::new()
        .get(location)
        .header(CACHE_CONTROL, "no-store")
        .header(USER_AGENT, concat!("folio/", env!("CARGO_PKG_VERSION")))
        .send()
        .await
        .map_err(unreachable)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    response.text().await.map_err(unreachable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and return the base URL
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn is_remote_should_detect_http_urls() {
        assert!(is_remote("https://example.com/site.json"));
        assert!(is_remote("HTTP://example.com/site.json"));
        assert!(!is_remote("data/site.json"));
        assert!(!is_remote("/tmp/https.json"));
    }

    #[test]
    fn resolve_link_should_follow_the_document_location() {
        assert_eq!(
            resolve_link("data/site.json", "../resume/CV.pdf"),
            "data/../resume/CV.pdf"
        );
        assert_eq!(
            resolve_link("https://ada.dev/data/site.json", "../resume/CV.pdf"),
            "https://ada.dev/resume/CV.pdf"
        );
        assert_eq!(resolve_link("site.json", "papers/a.pdf"), "papers/a.pdf");
    }

    #[test]
    fn resolve_link_should_keep_absolute_links() {
        assert_eq!(
            resolve_link("data/site.json", "https://example.com/x"),
            "https://example.com/x"
        );
        assert_eq!(
            resolve_link("data/site.json", "mailto:ada@example.com"),
            "mailto:ada@example.com"
        );
        assert_eq!(resolve_link("data/site.json", ""), "");
    }

    #[tokio::test]
    async fn missing_file_should_be_unreachable() {
        let err = load_site_data("/definitely/not/here/site.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Unreachable { .. }));
        assert!(err.to_string().contains("/definitely/not/here/site.json"));
    }

    #[tokio::test]
    async fn invalid_json_should_be_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_site_data(file.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn local_file_should_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "Ada" }}"#).unwrap();

        let site = load_site_data(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(site.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn non_success_status_should_carry_the_code() {
        let base = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        )
        .await;

        let err = load_site_data(&format!("{base}/site.json"))
            .await
            .unwrap_err();
        match err {
            LoadError::Status { status, reason } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remote_document_should_load() {
        let body = r#"{ "name": "Remote Ada" }"#;
        let base = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ))
        .await;

        let site = load_site_data(&format!("{base}/site.json")).await.unwrap();
        assert_eq!(site.name.as_deref(), Some("Remote Ada"));
    }
}
