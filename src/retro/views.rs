//! # Retro Views
//!
//! Pure renderers from the profile document to boxed text plus the ordered
//! link list that `open N` addresses. Nothing here touches the terminal.

use super::layout::boxed;
use crate::github::{pick_featured_repos, RepoFetch};
use crate::site::format::{format_iso_date, join_non_empty, normalize_url, present, tel_url};
use crate::site::{ProjectsMode, SiteData, DATA_FILE_HINT};

/// The retro skin's screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    About,
    Resume,
    Publications,
    Research,
    Projects,
    Contact,
    Help,
}

impl View {
    pub const ALL: [View; 7] = [
        View::About,
        View::Resume,
        View::Publications,
        View::Research,
        View::Projects,
        View::Contact,
        View::Help,
    ];

    /// Views reachable with the digit shortcuts, in menu order
    pub const PRIMARY: [View; 6] = [
        View::About,
        View::Resume,
        View::Publications,
        View::Research,
        View::Projects,
        View::Contact,
    ];

    /// Lowercase view name, as used in fragments
    pub fn name(self) -> &'static str {
        match self {
            View::About => "about",
            View::Resume => "resume",
            View::Publications => "publications",
            View::Research => "research",
            View::Projects => "projects",
            View::Contact => "contact",
            View::Help => "help",
        }
    }

    /// Uppercase label shown in the status line
    pub fn label(self) -> &'static str {
        match self {
            View::About => "ABOUT",
            View::Resume => "RESUME",
            View::Publications => "PUBLICATIONS",
            View::Research => "RESEARCH",
            View::Projects => "PROJECTS",
            View::Contact => "CONTACT",
            View::Help => "HELP",
        }
    }

    /// Short label for the menu bar
    pub fn menu_label(self) -> &'static str {
        match self {
            View::Publications => "PAPERS",
            other => other.label(),
        }
    }

    pub fn from_name(name: &str) -> Option<View> {
        View::ALL
            .into_iter()
            .find(|view| view.name().eq_ignore_ascii_case(name))
    }

    /// Initial view from a fragment such as `#resume`; anything unknown is
    /// the about view
    pub fn from_fragment(fragment: Option<&str>) -> View {
        fragment
            .map(|f| f.trim().trim_start_matches('#').trim())
            .and_then(View::from_name)
            .unwrap_or_default()
    }

    /// Primary view for the 1-based menu position `n`
    pub fn primary(n: usize) -> Option<View> {
        n.checked_sub(1).and_then(|i| View::PRIMARY.get(i).copied())
    }
}

/// Where a link leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// External resource; empty when the profile leaves it unset
    Url(String),
    /// The skin chooser
    Chooser,
}

/// One entry of a view's numbered link list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub target: LinkTarget,
}

impl Link {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: LinkTarget::Url(url.into()),
        }
    }

    /// Text shown after the label in the link list
    pub fn describe(&self) -> &str {
        match &self.target {
            LinkTarget::Url(url) if url.is_empty() => "(no url)",
            LinkTarget::Url(url) => url,
            LinkTarget::Chooser => "(skin chooser)",
        }
    }
}

/// What a view renders to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewContent {
    pub text: String,
    pub links: Vec<Link>,
    /// Status shown once the view is displayed; `READY` when unset
    pub meta: Option<String>,
}

impl ViewContent {
    fn new(text: String, links: Vec<Link>) -> Self {
        Self {
            text,
            links,
            meta: None,
        }
    }

    fn with_meta(mut self, meta: &str) -> Self {
        self.meta = Some(meta.to_string());
        self
    }
}

/// How the projects view gets its entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsSource {
    Manual,
    /// Needs a repository fetch for this username first
    Github { username: Option<String> },
}

pub fn projects_source(site: &SiteData) -> ProjectsSource {
    match site.implementation_projects.mode {
        ProjectsMode::Manual => ProjectsSource::Manual,
        ProjectsMode::Github => ProjectsSource::Github {
            username: present(&site.github_username).map(str::to_string),
        },
    }
}

/// Render any view that needs nothing beyond the profile document
///
/// Returns `None` for the projects view in GitHub mode, which must wait for
/// [`render_projects_github`].
pub fn render(view: View, site: &SiteData) -> Option<ViewContent> {
    let content = match view {
        View::About => render_about(site),
        View::Resume => render_resume(site),
        View::Publications => render_publications(site),
        View::Research => render_research(site),
        View::Projects => match projects_source(site) {
            ProjectsSource::Manual => render_projects_manual(site),
            ProjectsSource::Github { .. } => return None,
        },
        View::Contact => render_contact(site),
        View::Help => render_help(),
    };
    Some(content)
}

const BANNER: [&str; 5] = [
    "     ____      ___     ",
    "    / __/___  / (_)___ ",
    "   / /_/ __ \\/ / / __ \\",
    "  / __/ /_/ / / / /_/ /",
    " /_/  \\____/_/_/\\____/ ",
];

fn missing(what: &str) -> String {
    format!("No {what} yet (add them in {DATA_FILE_HINT}).")
}

fn missing_field(what: &str, key: &str) -> String {
    format!("No {what} yet (add {key} in {DATA_FILE_HINT}).")
}

pub fn render_about(site: &SiteData) -> ViewContent {
    let mut lines: Vec<String> = BANNER.iter().map(|l| l.to_string()).collect();
    lines.push(String::new());
    lines.push(present(&site.name).unwrap_or("YOUR NAME").to_string());
    lines.extend(present(&site.tagline).map(str::to_string));
    lines.extend(present(&site.location).map(str::to_string));
    lines.push(String::new());
    lines.push(
        present(&site.summary)
            .map(str::to_string)
            .unwrap_or_else(|| missing_field("summary", "summary")),
    );
    lines.push(String::new());
    if site.highlights.is_empty() {
        lines.push(missing("highlights"));
    } else {
        lines.push("Highlights:".to_string());
        lines.extend(site.highlights.iter().map(|h| format!("- {h}")));
    }

    let mut links = Vec::new();
    if let Some(url) = present(&site.links.website) {
        links.push(Link::url("Website", normalize_url(url)));
    }
    if let Some(url) = present(&site.links.github) {
        links.push(Link::url("GitHub", normalize_url(url)));
    }
    if let Some(url) = present(&site.links.linkedin) {
        links.push(Link::url("LinkedIn", normalize_url(url)));
    }
    if let Some(url) = present(&site.links.cv_pdf) {
        links.push(Link::url("CV (PDF)", url));
    }

    ViewContent::new(boxed("ABOUT", &lines), links)
}

pub fn render_resume(site: &SiteData) -> ViewContent {
    let mut lines = vec!["SUMMARY".to_string()];
    lines.push(
        present(&site.summary)
            .map(str::to_string)
            .unwrap_or_else(|| missing_field("summary", "summary")),
    );
    lines.push(String::new());

    lines.push("SKILLS".to_string());
    if site.skills.is_empty() {
        lines.push(missing("skills"));
    }
    for group in &site.skills {
        lines.push(format!("{}: {}", group.label, group.items.join(", ")));
    }
    lines.push(String::new());

    lines.push("EDUCATION".to_string());
    if site.education.is_empty() {
        lines.push(missing_field("education", "education"));
    }
    for entry in &site.education {
        lines.push(format!(
            "{} - {} ({}-{})",
            present(&entry.degree).unwrap_or_default(),
            present(&entry.school).unwrap_or_default(),
            present(&entry.start).unwrap_or_default(),
            present(&entry.end).unwrap_or_default(),
        ));
        lines.extend(present(&entry.location).map(|l| format!("  {l}")));
        lines.extend(entry.details.iter().map(|d| format!("  - {d}")));
    }
    lines.push(String::new());

    lines.push("EXPERIENCE".to_string());
    if site.experience.is_empty() {
        lines.push(missing_field("experience", "experience"));
    }
    for entry in &site.experience {
        lines.push(format!(
            "{} @ {} ({}-{})",
            present(&entry.role).unwrap_or_default(),
            present(&entry.org).unwrap_or_default(),
            present(&entry.start).unwrap_or_default(),
            present(&entry.end).unwrap_or_default(),
        ));
        lines.extend(present(&entry.location).map(|l| format!("  {l}")));
        lines.extend(entry.bullets.iter().map(|b| format!("  - {b}")));
    }

    let links = present(&site.links.cv_pdf)
        .map(|url| vec![Link::url("CV (PDF)", url)])
        .unwrap_or_default();

    ViewContent::new(boxed("RESUME", &lines), links)
}

pub fn render_publications(site: &SiteData) -> ViewContent {
    let mut lines = Vec::new();
    let mut links = Vec::new();

    if site.publications.is_empty() {
        lines.push(missing("publications"));
    }
    for (i, publication) in site.publications.iter().enumerate() {
        lines.push(format!(
            "{}. {}",
            i + 1,
            present(&publication.title).unwrap_or("Untitled")
        ));
        lines.extend(present(&publication.authors).map(|a| format!("   {a}")));
        let venue = join_non_empty(
            [present(&publication.venue), present(&publication.year)],
            " · ",
        );
        if !venue.is_empty() {
            lines.push(format!("   {venue}"));
        }
        lines.extend(present(&publication.note).map(|n| format!("   Note: {n}")));
        lines.push(String::new());

        let title = present(&publication.title).unwrap_or("paper");
        if let Some(url) = present(&publication.links.pdf) {
            links.push(Link::url(format!("PDF: {title}"), url));
        }
        if let Some(url) = present(&publication.links.doi) {
            links.push(Link::url(format!("DOI: {title}"), normalize_url(url)));
        }
        if let Some(url) = present(&publication.links.code) {
            links.push(Link::url(format!("Code: {title}"), normalize_url(url)));
        }
    }

    ViewContent::new(boxed("PAPERS & PUBLICATIONS", &lines), links)
}

pub fn render_research(site: &SiteData) -> ViewContent {
    let mut lines = Vec::new();
    let mut links = Vec::new();

    if site.research_projects.is_empty() {
        lines.push(missing_field("research projects", "researchProjects"));
    }
    for (i, project) in site.research_projects.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({})",
            i + 1,
            present(&project.title).unwrap_or("Untitled"),
            present(&project.when).unwrap_or_default()
        ));
        lines.extend(present(&project.role).map(|r| format!("   Role: {r}")));
        lines.extend(present(&project.summary).map(|s| format!("   {s}")));
        if !project.stack.is_empty() {
            lines.push(format!("   Stack: {}", project.stack.join(", ")));
        }
        lines.extend(project.highlights.iter().map(|h| format!("   - {h}")));
        lines.push(String::new());

        let title = present(&project.title).unwrap_or("project");
        if let Some(url) = present(&project.links.project_page) {
            links.push(Link::url(format!("Project page: {title}"), normalize_url(url)));
        }
        if let Some(url) = present(&project.links.paper) {
            links.push(Link::url(format!("Paper: {title}"), url));
        }
        if let Some(url) = present(&project.links.code) {
            links.push(Link::url(format!("Code: {title}"), normalize_url(url)));
        }
    }

    ViewContent::new(boxed("RESEARCH PROJECTS", &lines), links)
}

pub fn render_projects_manual(site: &SiteData) -> ViewContent {
    let manual = &site.implementation_projects.manual;
    let mut lines = Vec::new();
    let mut links = Vec::new();

    if manual.is_empty() {
        lines.push(format!(
            "No manual projects. Add implementationProjects.manual in {DATA_FILE_HINT}"
        ));
    }
    for (i, project) in manual.iter().enumerate() {
        let name = present(&project.name);
        lines.push(format!("{}. {}", i + 1, name.unwrap_or("Project")));
        lines.extend(present(&project.description).map(|d| format!("   {d}")));
        if !project.topics.is_empty() {
            lines.push(format!("   Topics: {}", project.topics.join(", ")));
        }
        lines.push(String::new());

        let name = name.unwrap_or("project");
        if let Some(url) = present(&project.links.repo) {
            links.push(Link::url(format!("Repo: {name}"), normalize_url(url)));
        }
        if let Some(url) = present(&project.links.demo) {
            links.push(Link::url(format!("Demo: {name}"), normalize_url(url)));
        }
        if let Some(url) = present(&project.links.docs) {
            links.push(Link::url(format!("Docs: {name}"), normalize_url(url)));
        }
    }

    ViewContent::new(boxed("IMPLEMENTATION PROJECTS", &lines), links).with_meta("MANUAL MODE")
}

pub fn render_projects_github(site: &SiteData, fetch: &RepoFetch) -> ViewContent {
    let featured = pick_featured_repos(
        &fetch.repos,
        &site.implementation_projects.featured_repos,
    );

    let mut lines = vec![
        format!(
            "GitHub user: {}",
            present(&site.github_username).unwrap_or("not set")
        ),
        fetch.note.clone(),
        String::new(),
    ];
    let mut links = Vec::new();
    if let Some(url) = present(&site.links.github) {
        links.push(Link::url("GitHub Profile", normalize_url(url)));
    }

    if featured.is_empty() {
        lines.push("No repos to show yet.".to_string());
        lines.push(format!(
            "Fix: set githubUsername in {DATA_FILE_HINT}, or use manual mode."
        ));
    }
    for (i, repo) in featured.iter().enumerate() {
        lines.push(format!(
            "{}. {}  ★{}  ⑂{}",
            i + 1,
            repo.name,
            repo.stargazers_count,
            repo.forks_count
        ));
        if !repo.description.is_empty() {
            lines.push(format!("   {}", repo.description));
        }
        let updated = format_iso_date(repo.updated_at.as_deref());
        let meta = join_non_empty([Some(repo.language.as_str()), Some(updated.as_str())], " · ");
        if !meta.is_empty() {
            lines.push(format!("   {meta}"));
        }
        lines.push(String::new());

        links.push(Link::url(format!("Repo: {}", repo.full_name), &repo.html_url));
        if !repo.homepage.is_empty() {
            links.push(Link::url(
                format!("Homepage: {}", repo.name),
                normalize_url(&repo.homepage),
            ));
        }
    }

    ViewContent::new(boxed("GITHUB PROJECTS", &lines), links).with_meta("GITHUB MODE")
}

pub fn render_contact(site: &SiteData) -> ViewContent {
    let mut lines = vec![
        present(&site.contact.pitch)
            .unwrap_or("Send an email. Say hi. Build cool things.")
            .to_string(),
        String::new(),
    ];
    lines.extend(present(&site.email).map(|e| format!("Email: {e}")));
    lines.extend(present(&site.phone).map(|p| format!("Phone: {p}")));
    lines.extend(present(&site.location).map(|l| format!("Location: {l}")));
    lines.extend(present(&site.contact.timezone).map(|t| format!("Timezone: {t}")));
    if present(&site.email).is_none() && present(&site.phone).is_none() {
        lines.push(missing_field("contact details", "email"));
    }

    let mut links = Vec::new();
    if let Some(email) = present(&site.email) {
        links.push(Link::url("Email", format!("mailto:{email}")));
    }
    if let Some(phone) = present(&site.phone) {
        links.push(Link::url("Phone", tel_url(phone)));
    }
    if let Some(url) = present(&site.links.linkedin) {
        links.push(Link::url("LinkedIn", normalize_url(url)));
    }
    if let Some(url) = present(&site.links.github) {
        links.push(Link::url("GitHub", normalize_url(url)));
    }

    ViewContent::new(boxed("CONTACT", &lines), links)
}

const HELP_LINES: [&str; 20] = [
    "COMMANDS",
    "",
    "  about | resume | papers | research | projects | contact",
    "  open N        Open link number N from the current screen",
    "  github        Open GitHub profile (if configured)",
    "  cv            Open your CV PDF",
    "  clear         Clear terminal output",
    "  ui            Back to UI selector",
    "  exit          Quit",
    "",
    "KEYS",
    "",
    "  1-6           Switch sections",
    "  F1 or ?       Help",
    "  ESC           UI selector",
    "  CTRL+L        Clear",
    "  CTRL+C        Quit",
    "  UP/DOWN       Scroll one line",
    "  PGUP/PGDN     Scroll one page",
    "",
];

pub fn render_help() -> ViewContent {
    let links = vec![Link {
        label: "UI selector".to_string(),
        target: LinkTarget::Chooser,
    }];
    ViewContent::new(boxed("HELP", &HELP_LINES), links)
}
