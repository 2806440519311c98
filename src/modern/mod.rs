//! # Modern Skin
//!
//! Renders the profile as a single self-contained HTML page, writes it to
//! disk and hands it to the browser. The page is static: the repository
//! fetch, theme and link resolution all happen before it is written.

pub mod page;
pub mod template;
pub mod theme;

pub use page::ModernPage;
pub use template::{render_error_page, render_page};
pub use theme::{resolve_theme, stored_theme, Theme, ThemeSetting};

use crate::github::RepoFetch;
use crate::services::Services;
use crate::site::{load_site_data, loader::is_remote, resolve_link, ProjectsMode};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default location of the generated page
pub const DEFAULT_OUTPUT: &str = "~/.folio/modern.html";

#[derive(Debug, Clone)]
pub struct ModernOptions {
    pub theme: Option<ThemeSetting>,
    pub toggle_theme: bool,
    /// Open the written page with the system handler
    pub open: bool,
}

impl Default for ModernOptions {
    fn default() -> Self {
        Self {
            theme: None,
            toggle_theme: false,
            open: true,
        }
    }
}

/// Base against which relative links of the profile document resolve
fn link_base(data: &str) -> String {
    if is_remote(data) {
        return data.to_string();
    }
    std::path::absolute(data)
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| data.to_string())
}

fn write_page(output: &Path, html: &str) -> Result<PathBuf> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, html).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(output.canonicalize().unwrap_or_else(|_| output.to_path_buf()))
}

fn open_page(services: &Services, path: &Path) {
    if let Err(e) = services.opener.open(&path.to_string_lossy()) {
        tracing::warn!("Could not open {}: {:#}", path.display(), e);
    }
}

/// Build the modern page and write it to `output`
///
/// When the profile cannot be loaded an error page is written (and opened)
/// in its place and the load error is returned.
pub async fn publish(services: &Services, output: &Path, options: &ModernOptions) -> Result<PathBuf> {
    let theme = resolve_theme(services.store.as_ref(), options.theme, options.toggle_theme);

    let site = match load_site_data(&services.data).await {
        Ok(site) => site,
        Err(e) => {
            tracing::error!("Modern UI failed to load: {}", e);
            let path = write_page(output, &render_error_page(&e.to_string())?)?;
            if options.open {
                open_page(services, &path);
            }
            return Err(e).context("Modern UI failed to load");
        }
    };

    let fetch: Option<RepoFetch> = match site.implementation_projects.mode {
        ProjectsMode::Manual => None,
        ProjectsMode::Github => {
            let fetch = services
                .repos
                .fetch(site.github_username.as_deref(), services.max_repos)
                .await
                .unwrap_or_else(|e| RepoFetch::failed(&e));
            Some(fetch)
        }
    };

    let mut page = ModernPage::build(&site, fetch.as_ref());
    let base = link_base(&services.data);
    page.map_links(|href| resolve_link(&base, href));

    let html = render_page(&page, theme)?;
    let path = write_page(output, &html)?;
    tracing::info!("Modern page written to {}", path.display());

    if options.open {
        open_page(services, &path);
    }
    Ok(path)
}
