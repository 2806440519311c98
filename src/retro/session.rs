//! # Retro Session
//!
//! Explicit state of one retro run: active view, what is on screen, the
//! status line and the bookkeeping for the asynchronous projects fetch.
//! Transitions never perform I/O; they return [`Effect`]s for the controller.

use super::command::{link_number, RetroCommand};
use super::keys::Scroll;
use super::status_line::StatusLine;
use super::views::{
    projects_source, render, render_projects_github, Link, LinkTarget, ProjectsSource, View,
    ViewContent,
};
use crate::github::RepoFetch;
use crate::io::{FrameLine, LineStyle};
use crate::site::format::{normalize_url, present};
use crate::site::SiteData;
use std::time::Instant;

pub const LOADING_STATUS: &str = "LOADING GITHUB…";
pub const ERROR_STATUS: &str = "ERROR";

/// Displayed text and its link list, always replaced together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub links: Vec<Link>,
}

impl Screen {
    /// Body rows: the boxed text, then the numbered links
    pub fn frame_lines(&self) -> Vec<FrameLine> {
        let mut lines: Vec<FrameLine> = self.text.lines().map(FrameLine::normal).collect();
        if !self.links.is_empty() && !lines.is_empty() {
            lines.push(FrameLine::blank());
        }
        for (i, link) in self.links.iter().enumerate() {
            lines.push(FrameLine::new(
                format!("[{}] {}  {}", i + 1, link.label, link.describe()),
                LineStyle::Link,
            ));
        }
        lines
    }
}

/// A repository fetch the controller should start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub username: Option<String>,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenUrl(String),
    OpenChooser,
    FetchRepos(FetchRequest),
    Quit,
}

#[derive(Debug, Clone)]
pub struct Session {
    view: View,
    screen: Screen,
    status: StatusLine,
    /// Bumped on every view switch
    generation: u64,
    /// Generation of the projects fetch whose result is still wanted
    pending: Option<u64>,
    scroll: usize,
}

impl Session {
    pub fn new(view: View) -> Self {
        Self {
            view,
            screen: Screen::default(),
            status: StatusLine::new(),
            generation: 0,
            pending: None,
            scroll: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn links(&self) -> &[Link] {
        &self.screen.links
    }

    pub fn status_text(&self, now: Instant) -> &str {
        self.status.text(now)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn flash(&mut self, message: impl Into<String>, now: Instant) {
        self.status.flash(message, now);
    }

    /// Display the initial view
    pub fn start(&mut self, site: &SiteData) -> Vec<Effect> {
        self.switch_to(self.view, site)
    }

    /// Make `view` active
    ///
    /// GitHub-mode projects cannot render yet: the previous screen stays,
    /// the status shows loading and a fetch is requested.
    pub fn switch_to(&mut self, view: View, site: &SiteData) -> Vec<Effect> {
        self.view = view;
        self.generation += 1;
        tracing::debug!("Switching to {} (generation {})", view.name(), self.generation);

        if let Some(content) = render(view, site) {
            self.pending = None;
            self.show(content);
            return Vec::new();
        }

        let username = match projects_source(site) {
            ProjectsSource::Github { username } => username,
            ProjectsSource::Manual => None,
        };
        self.pending = Some(self.generation);
        self.status.set_meta(LOADING_STATUS);
        vec![Effect::FetchRepos(FetchRequest {
            generation: self.generation,
            username,
        })]
    }

    /// Apply a finished projects fetch; false when it was superseded
    pub fn complete_fetch(&mut self, generation: u64, fetch: &RepoFetch, site: &SiteData) -> bool {
        if self.pending != Some(generation) {
            tracing::debug!(
                "Discarding projects fetch of generation {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.pending = None;
        self.show(render_projects_github(site, fetch));
        true
    }

    pub fn execute(&mut self, command: RetroCommand, site: &SiteData, now: Instant) -> Vec<Effect> {
        match command {
            RetroCommand::Show(view) => self.switch_to(view, site),
            RetroCommand::Cv => match present(&site.links.cv_pdf) {
                Some(url) => {
                    self.status.flash("Opened CV.", now);
                    vec![Effect::OpenUrl(url.to_string())]
                }
                None => self.switch_to(View::Resume, site),
            },
            RetroCommand::Github => match present(&site.links.github) {
                Some(url) => {
                    self.status.flash("Opened GitHub.", now);
                    vec![Effect::OpenUrl(normalize_url(url))]
                }
                None => self.switch_to(View::Projects, site),
            },
            RetroCommand::Open(arg) => self.open_link(arg.as_deref(), now),
            RetroCommand::Clear => {
                self.clear(now);
                Vec::new()
            }
            RetroCommand::Chooser => vec![Effect::OpenChooser],
            RetroCommand::Quit => vec![Effect::Quit],
            RetroCommand::Unknown(name) => {
                tracing::debug!("Unknown command '{}'", name);
                self.status.flash("Unknown command. Type HELP.", now);
                Vec::new()
            }
        }
    }

    /// `open N` against the current link list; the view never changes
    pub fn open_link(&mut self, arg: Option<&str>, now: Instant) -> Vec<Effect> {
        let Some(n) = link_number(arg).filter(|n| *n <= self.screen.links.len()) else {
            self.status.flash("Bad link number.", now);
            return Vec::new();
        };

        match &self.screen.links[n - 1].target {
            LinkTarget::Url(url) if url.is_empty() => {
                self.status.flash("No URL for that link.", now);
                Vec::new()
            }
            LinkTarget::Url(url) => {
                let effect = Effect::OpenUrl(url.clone());
                self.status.flash(format!("Opened [{n}]"), now);
                vec![effect]
            }
            LinkTarget::Chooser => vec![Effect::OpenChooser],
        }
    }

    /// Empty the output and the link list; the view stays
    pub fn clear(&mut self, now: Instant) {
        self.screen = Screen::default();
        self.scroll = 0;
        self.status.flash("CLEARED", now);
    }

    /// Replace everything with a fatal error report
    pub fn fail(&mut self, detail: &str) {
        self.pending = None;
        self.screen = Screen {
            text: format!("Could not start retro UI.\n\n{detail}"),
            links: Vec::new(),
        };
        self.scroll = 0;
        self.status.set_meta(ERROR_STATUS);
    }

    /// Move the output by `amount` given `page` visible rows
    pub fn scroll_by(&mut self, amount: Scroll, page: usize) {
        let page = page.max(1);
        let max = self.screen.frame_lines().len().saturating_sub(page);
        self.scroll = match amount {
            Scroll::LineUp => self.scroll.saturating_sub(1),
            Scroll::LineDown => self.scroll + 1,
            Scroll::PageUp => self.scroll.saturating_sub(page),
            Scroll::PageDown => self.scroll + page,
        }
        .min(max);
    }

    /// Expire flashes; true when a redraw is due
    pub fn tick(&mut self, now: Instant) -> bool {
        self.status.expire(now)
    }

    fn show(&mut self, content: ViewContent) {
        self.screen = Screen {
            text: content.text,
            links: content.links,
        };
        self.scroll = 0;
        self.status
            .set_meta(content.meta.as_deref().unwrap_or(super::status_line::READY));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{FetchSource, RepoSummary};
    use crate::site::ProjectsMode;
    use std::time::Duration;

    fn linked_site() -> SiteData {
        let mut site = SiteData::default();
        site.name = Some("Ada".to_string());
        site.links.website = Some("ada.dev".to_string());
        site.links.github = Some("github.com/ada".to_string());
        site.github_username = Some("ada".to_string());
        site
    }

    fn fetch_with(name: &str) -> RepoFetch {
        RepoFetch {
            repos: vec![RepoSummary {
                name: name.to_string(),
                full_name: format!("ada/{name}"),
                html_url: format!("https://github.com/ada/{name}"),
                ..Default::default()
            }],
            note: "Loaded from GitHub API.".to_string(),
            source: FetchSource::Live,
        }
    }

    #[test]
    fn open_one_should_open_that_link_and_keep_the_view() {
        let site = linked_site();
        let now = Instant::now();
        let mut session = Session::new(View::About);
        session.start(&site);
        let before = session.screen().clone();

        let effects = session.execute(RetroCommand::Open(Some("1".to_string())), &site, now);

        assert_eq!(effects, vec![Effect::OpenUrl("https://ada.dev".to_string())]);
        assert_eq!(session.view(), View::About);
        assert_eq!(session.screen(), &before);
        assert_eq!(session.status_text(now), "Opened [1]");
    }

    #[test]
    fn open_out_of_range_should_only_flash() {
        let site = linked_site();
        let now = Instant::now();
        let mut session = Session::new(View::About);
        session.start(&site);
        assert_eq!(session.links().len(), 2);
        let before = session.screen().clone();
        let generation = session.generation();

        let effects = session.execute(RetroCommand::Open(Some("99".to_string())), &site, now);

        assert!(effects.is_empty());
        assert_eq!(session.view(), View::About);
        assert_eq!(session.screen(), &before);
        assert_eq!(session.generation(), generation);
        assert_eq!(session.status_text(now), "Bad link number.");
        assert_eq!(session.status_text(now + Duration::from_secs(2)), "READY");
    }

    #[test]
    fn open_without_url_should_say_so() {
        let now = Instant::now();
        let mut session = Session::new(View::About);
        session.screen.links = vec![Link::url("Empty", "")];

        assert!(session.open_link(Some("1"), now).is_empty());
        assert_eq!(session.status_text(now), "No URL for that link.");
    }

    #[test]
    fn clear_should_empty_output_but_keep_the_view() {
        let site = linked_site();
        let now = Instant::now();
        let mut session = Session::new(View::Contact);
        session.start(&site);
        assert!(!session.links().is_empty());

        session.execute(RetroCommand::Clear, &site, now);

        assert_eq!(session.view(), View::Contact);
        assert!(session.screen().text.is_empty());
        assert!(session.links().is_empty());
        assert_eq!(session.status_text(now), "CLEARED");
    }

    #[test]
    fn unknown_command_should_not_change_state() {
        let site = linked_site();
        let now = Instant::now();
        let mut session = Session::new(View::Resume);
        session.start(&site);
        let before = session.screen().clone();

        let effects = session.execute(RetroCommand::Unknown("xyzzy".to_string()), &site, now);

        assert!(effects.is_empty());
        assert_eq!(session.view(), View::Resume);
        assert_eq!(session.screen(), &before);
        assert_eq!(session.status_text(now), "Unknown command. Type HELP.");
    }

    #[test]
    fn github_projects_should_wait_for_the_fetch() {
        let site = linked_site();
        let mut session = Session::new(View::About);
        session.start(&site);
        let about = session.screen().clone();

        let effects = session.switch_to(View::Projects, &site);
        let generation = session.generation();
        assert_eq!(
            effects,
            vec![Effect::FetchRepos(FetchRequest {
                generation,
                username: Some("ada".to_string()),
            })]
        );
        assert!(session.is_loading());
        assert_eq!(session.view(), View::Projects);
        assert_eq!(session.screen(), &about);
        assert_eq!(session.status_text(Instant::now()), LOADING_STATUS);

        assert!(session.complete_fetch(generation, &fetch_with("engine"), &site));
        assert!(!session.is_loading());
        assert!(session.screen().text.contains("engine"));
        assert_eq!(session.status_text(Instant::now()), "GITHUB MODE");
    }

    #[test]
    fn stale_fetch_should_not_overwrite_a_newer_view() {
        let site = linked_site();
        let mut session = Session::new(View::About);
        session.start(&site);

        session.switch_to(View::Projects, &site);
        let stale = session.generation();
        session.switch_to(View::Contact, &site);
        let contact = session.screen().clone();

        assert!(!session.complete_fetch(stale, &fetch_with("late"), &site));
        assert_eq!(session.view(), View::Contact);
        assert_eq!(session.screen(), &contact);
    }

    #[test]
    fn manual_projects_should_render_immediately() {
        let mut site = linked_site();
        site.implementation_projects.mode = ProjectsMode::Manual;
        let mut session = Session::new(View::Projects);

        assert!(session.start(&site).is_empty());
        assert_eq!(session.status_text(Instant::now()), "MANUAL MODE");
    }

    #[test]
    fn cv_and_github_should_open_or_fall_back() {
        let now = Instant::now();
        let mut site = linked_site();
        let mut session = Session::new(View::About);
        session.start(&site);

        assert_eq!(
            session.execute(RetroCommand::Github, &site, now),
            vec![Effect::OpenUrl("https://github.com/ada".to_string())]
        );
        assert_eq!(session.status_text(now), "Opened GitHub.");

        assert!(session.execute(RetroCommand::Cv, &site, now).is_empty());
        assert_eq!(session.view(), View::Resume);

        site.links.cv_pdf = Some("cv.pdf".to_string());
        assert_eq!(
            session.execute(RetroCommand::Cv, &site, now),
            vec![Effect::OpenUrl("cv.pdf".to_string())]
        );
    }

    #[test]
    fn help_link_should_lead_to_the_chooser() {
        let site = SiteData::default();
        let mut session = Session::new(View::Help);
        session.start(&site);
        assert_eq!(
            session.open_link(Some("1"), Instant::now()),
            vec![Effect::OpenChooser]
        );
    }

    #[test]
    fn scrolling_should_stay_within_the_output() {
        let site = linked_site();
        let mut session = Session::new(View::Help);
        session.start(&site);
        let total = session.screen().frame_lines().len();

        session.scroll_by(Scroll::LineUp, 5);
        assert_eq!(session.scroll(), 0);
        session.scroll_by(Scroll::PageDown, 5);
        assert_eq!(session.scroll(), 5);
        for _ in 0..20 {
            session.scroll_by(Scroll::PageDown, 5);
        }
        assert_eq!(session.scroll(), total - 5);

        session.switch_to(View::About, &site);
        assert_eq!(session.scroll(), 0);
    }

    #[test]
    fn failure_should_replace_the_screen() {
        let mut session = Session::new(View::About);
        session.fail("could not read data/site.json: No such file");
        assert!(session
            .screen()
            .text
            .starts_with("Could not start retro UI.\n\n"));
        assert_eq!(session.status_text(Instant::now()), ERROR_STATUS);
    }
}
