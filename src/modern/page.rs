//! # Modern Page Model
//!
//! Everything the HTML template shows, computed up front from the profile
//! document. Absent data turns into placeholders that name the key to fill.

use crate::github::{pick_featured_repos, RepoFetch};
use crate::site::format::{
    format_iso_date, join_non_empty, normalize_url, present, pretty_year_range,
};
use crate::site::{Education, Experience, ProjectsMode, SiteData, DATA_FILE_HINT};
use serde::Serialize;

/// Default CV location when the profile names none
pub const DEFAULT_CV: &str = "../resume/CV.pdf";

/// Topic tags shown per repository card
const MAX_REPO_TAGS: usize = 6;

/// A button or link; without `href` it renders disabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub label: String,
    pub href: Option<String>,
}

impl Action {
    fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            label: label.into(),
            href: (!href.is_empty()).then_some(href),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub sub: String,
    pub desc: String,
    pub tags: Vec<String>,
    pub actions: Vec<Action>,
}

impl Card {
    fn placeholder(title: &str, desc: String) -> Self {
        Self {
            title: title.to_string(),
            desc,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRow {
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub title: String,
    pub when: String,
    pub location: String,
    pub points: Vec<String>,
}

/// A list section, or the text shown instead of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub placeholder: Option<String>,
}

impl<T> Listing<T> {
    fn of(items: Vec<T>, key: &str) -> Self {
        let placeholder = items
            .is_empty()
            .then(|| format!("Add {key} in {DATA_FILE_HINT}"));
        Self { items, placeholder }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub brand: String,
    pub name: String,
    pub tagline: String,
    pub summary: String,
    pub meta_line: String,
    pub github: Action,
    pub linkedin: Action,
    pub cv: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectsBlock {
    pub note: String,
    pub profile: Action,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactBlock {
    pub pitch: String,
    pub mail: Action,
    pub location: String,
    pub timezone: String,
    pub github: Action,
    pub linkedin: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModernPage {
    pub title: String,
    pub hero: Hero,
    pub bio: String,
    pub highlights: Listing<String>,
    pub skills: Listing<SkillRow>,
    pub experience: Listing<TimelineEntry>,
    pub education: Listing<TimelineEntry>,
    pub publications: Vec<Card>,
    pub research: Vec<Card>,
    pub projects: ProjectsBlock,
    pub contact: ContactBlock,
}

fn text(value: &Option<String>) -> String {
    present(value).unwrap_or_default().to_string()
}

fn or_dash(value: &Option<String>) -> String {
    present(value).unwrap_or("—").to_string()
}

fn link(value: &Option<String>) -> String {
    normalize_url(present(value).unwrap_or_default())
}

impl ModernPage {
    /// Build the page; `projects` is the repository fetch for GitHub mode
    pub fn build(site: &SiteData, projects: Option<&RepoFetch>) -> Self {
        let name = present(&site.name);

        let hero = Hero {
            brand: name.unwrap_or("Portfolio").to_string(),
            name: name.unwrap_or("YOUR NAME").to_string(),
            tagline: text(&site.tagline),
            summary: text(&site.summary),
            meta_line: join_non_empty([present(&site.location), present(&site.email)], " · "),
            github: Action::new("GitHub", link(&site.links.github)),
            linkedin: Action::new("LinkedIn", link(&site.links.linkedin)),
            cv: Action::new("CV", present(&site.links.cv_pdf).unwrap_or(DEFAULT_CV)),
        };

        let bio = present(&site.summary)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Add summary in {DATA_FILE_HINT}"));

        let skills = site
            .skills
            .iter()
            .map(|group| SkillRow {
                label: group.label.clone(),
                items: group.items.clone(),
            })
            .collect();

        Self {
            title: format!("{} — Modern", name.unwrap_or("Portfolio")),
            hero,
            bio,
            highlights: Listing::of(site.highlights.clone(), "highlights"),
            skills: Listing::of(skills, "skills"),
            experience: Listing::of(
                site.experience.iter().map(experience_entry).collect(),
                "experience",
            ),
            education: Listing::of(
                site.education.iter().map(education_entry).collect(),
                "education",
            ),
            publications: publication_cards(site),
            research: research_cards(site),
            projects: projects_block(site, projects),
            contact: contact_block(site),
        }
    }
}

impl ModernPage {
    /// Rewrite every link target, e.g. to resolve relative hrefs
    pub fn map_links(&mut self, resolve: impl Fn(&str) -> String) {
        let hero = [
            &mut self.hero.github,
            &mut self.hero.linkedin,
            &mut self.hero.cv,
        ];
        let contact = [
            &mut self.contact.mail,
            &mut self.contact.github,
            &mut self.contact.linkedin,
            &mut self.projects.profile,
        ];
        let cards = self
            .publications
            .iter_mut()
            .chain(self.research.iter_mut())
            .chain(self.projects.cards.iter_mut())
            .flat_map(|card| card.actions.iter_mut());

        for action in hero.into_iter().chain(contact).chain(cards) {
            if let Some(href) = action.href.as_mut() {
                *href = resolve(href);
            }
        }
    }
}

fn experience_entry(item: &Experience) -> TimelineEntry {
    TimelineEntry {
        title: format!(
            "{} @ {}",
            present(&item.role).unwrap_or("Role"),
            present(&item.org).unwrap_or("Org")
        ),
        when: pretty_year_range(item.start.as_deref(), item.end.as_deref()),
        location: text(&item.location),
        points: item.bullets.clone(),
    }
}

fn education_entry(item: &Education) -> TimelineEntry {
    TimelineEntry {
        title: format!(
            "{} — {}",
            present(&item.degree).unwrap_or("Degree"),
            present(&item.school).unwrap_or("School")
        ),
        when: pretty_year_range(item.start.as_deref(), item.end.as_deref()),
        location: text(&item.location),
        points: item.details.clone(),
    }
}

fn publication_cards(site: &SiteData) -> Vec<Card> {
    if site.publications.is_empty() {
        return vec![Card::placeholder(
            "No papers yet",
            format!("Add publications in {DATA_FILE_HINT}"),
        )];
    }

    site.publications
        .iter()
        .map(|p| {
            let mut actions = Vec::new();
            if let Some(url) = present(&p.links.pdf) {
                actions.push(Action::new("PDF", url));
            }
            if let Some(url) = present(&p.links.doi) {
                actions.push(Action::new("DOI", normalize_url(url)));
            }
            if let Some(url) = present(&p.links.code) {
                actions.push(Action::new("Code", normalize_url(url)));
            }
            Card {
                title: present(&p.title).unwrap_or("Untitled paper").to_string(),
                sub: join_non_empty(
                    [present(&p.venue), present(&p.year), present(&p.authors)],
                    " · ",
                ),
                desc: text(&p.note),
                tags: p.badges.clone(),
                actions,
            }
        })
        .collect()
}

fn research_cards(site: &SiteData) -> Vec<Card> {
    if site.research_projects.is_empty() {
        return vec![Card::placeholder(
            "No research projects yet",
            format!("Add researchProjects in {DATA_FILE_HINT}"),
        )];
    }

    site.research_projects
        .iter()
        .map(|r| {
            let mut actions = Vec::new();
            if let Some(url) = present(&r.links.project_page) {
                actions.push(Action::new("Project", normalize_url(url)));
            }
            if let Some(url) = present(&r.links.paper) {
                actions.push(Action::new("Paper", url));
            }
            if let Some(url) = present(&r.links.code) {
                actions.push(Action::new("Code", normalize_url(url)));
            }
            Card {
                title: present(&r.title).unwrap_or("Untitled project").to_string(),
                sub: join_non_empty([present(&r.when), present(&r.role)], " · "),
                desc: text(&r.summary),
                tags: r.stack.clone(),
                actions,
            }
        })
        .collect()
}

fn projects_block(site: &SiteData, fetch: Option<&RepoFetch>) -> ProjectsBlock {
    let profile = Action::new("GitHub profile", link(&site.links.github));

    if site.implementation_projects.mode == ProjectsMode::Manual {
        return ProjectsBlock {
            note: format!("Manual mode (projects are curated in {DATA_FILE_HINT})."),
            profile,
            cards: manual_cards(site),
        };
    }

    let featured = fetch
        .map(|f| pick_featured_repos(&f.repos, &site.implementation_projects.featured_repos))
        .unwrap_or_default();

    let cards = if featured.is_empty() {
        vec![Card::placeholder(
            "GitHub projects not loaded",
            format!(
                "Set githubUsername in {DATA_FILE_HINT} (current: {}).",
                present(&site.github_username).unwrap_or("empty")
            ),
        )]
    } else {
        featured
            .into_iter()
            .map(|repo| {
                let stars = format!("★{}", repo.stargazers_count);
                let updated = format!("updated {}", format_iso_date(repo.updated_at.as_deref()));
                let mut actions = vec![Action::new("Repo", repo.html_url.as_str())];
                if !repo.homepage.is_empty() {
                    actions.push(Action::new("Live", normalize_url(&repo.homepage)));
                }
                Card {
                    sub: join_non_empty(
                        [
                            Some(repo.language.as_str()),
                            Some(stars.as_str()),
                            Some(updated.as_str()),
                        ],
                        " · ",
                    ),
                    title: repo.name,
                    desc: repo.description,
                    tags: repo.topics.into_iter().take(MAX_REPO_TAGS).collect(),
                    actions,
                }
            })
            .collect()
    };

    ProjectsBlock {
        note: fetch.map(|f| f.note.clone()).unwrap_or_default(),
        profile,
        cards,
    }
}

fn manual_cards(site: &SiteData) -> Vec<Card> {
    let manual = &site.implementation_projects.manual;
    if manual.is_empty() {
        return vec![Card::placeholder(
            "No projects yet",
            "Add implementationProjects.manual or enable GitHub mode.".to_string(),
        )];
    }

    manual
        .iter()
        .map(|p| {
            let mut actions = Vec::new();
            if let Some(url) = present(&p.links.repo) {
                actions.push(Action::new("Repo", normalize_url(url)));
            }
            if let Some(url) = present(&p.links.demo) {
                actions.push(Action::new("Demo", normalize_url(url)));
            }
            if let Some(url) = present(&p.links.docs) {
                actions.push(Action::new("Docs", normalize_url(url)));
            }
            Card {
                title: present(&p.name).unwrap_or("Project").to_string(),
                sub: p.topics.join(" · "),
                desc: text(&p.description),
                tags: p.topics.clone(),
                actions,
            }
        })
        .collect()
}

fn contact_block(site: &SiteData) -> ContactBlock {
    let mail = present(&site.email)
        .map(|email| format!("mailto:{email}"))
        .unwrap_or_default();
    let github_label = present(&site.github_username).unwrap_or("—");
    let linkedin_label = if present(&site.links.linkedin).is_some() {
        "LinkedIn profile"
    } else {
        "—"
    };

    ContactBlock {
        pitch: text(&site.contact.pitch),
        mail: Action::new("Email me", mail),
        location: or_dash(&site.location),
        timezone: or_dash(&site.contact.timezone),
        github: Action::new(github_label, link(&site.links.github)),
        linkedin: Action::new(linkedin_label, link(&site.links.linkedin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{FetchSource, RepoSummary};
    use crate::site::{Experience, SkillGroup};

    #[test]
    fn empty_profile_should_name_every_missing_key() {
        let page = ModernPage::build(&SiteData::default(), None);

        assert_eq!(page.title, "Portfolio — Modern");
        assert_eq!(page.hero.name, "YOUR NAME");
        assert_eq!(page.hero.cv.href.as_deref(), Some(DEFAULT_CV));
        assert_eq!(page.hero.github.href, None);
        assert_eq!(page.bio, "Add summary in data/site.json");
        assert_eq!(
            page.highlights.placeholder.as_deref(),
            Some("Add highlights in data/site.json")
        );
        assert_eq!(
            page.skills.placeholder.as_deref(),
            Some("Add skills in data/site.json")
        );
        assert_eq!(
            page.experience.placeholder.as_deref(),
            Some("Add experience in data/site.json")
        );
        assert_eq!(
            page.education.placeholder.as_deref(),
            Some("Add education in data/site.json")
        );
        assert_eq!(page.publications[0].desc, "Add publications in data/site.json");
        assert_eq!(page.research[0].desc, "Add researchProjects in data/site.json");
        assert_eq!(
            page.projects.cards[0].desc,
            "Set githubUsername in data/site.json (current: empty)."
        );
        assert_eq!(page.contact.location, "—");
        assert_eq!(page.contact.mail.href, None);
    }

    #[test]
    fn timeline_should_format_year_ranges() {
        let mut site = SiteData::default();
        site.experience = vec![Experience {
            role: Some("Engineer".to_string()),
            org: Some("Acme".to_string()),
            start: Some("2019".to_string()),
            bullets: vec!["Shipped things".to_string()],
            ..Default::default()
        }];

        let page = ModernPage::build(&site, None);
        let entry = &page.experience.items[0];
        assert_eq!(entry.title, "Engineer @ Acme");
        assert_eq!(entry.when, "2019–Present");
        assert_eq!(entry.points, vec!["Shipped things"]);
        assert!(page.experience.placeholder.is_none());
    }

    #[test]
    fn skills_should_keep_document_order() {
        let mut site = SiteData::default();
        site.skills = vec![
            SkillGroup {
                label: "Systems".to_string(),
                items: vec!["Rust".to_string()],
            },
            SkillGroup {
                label: "Data".to_string(),
                items: vec![],
            },
        ];
        let page = ModernPage::build(&site, None);
        let labels: Vec<&str> = page.skills.items.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Systems", "Data"]);
    }

    #[test]
    fn github_cards_should_show_language_stars_and_date() {
        let mut site = SiteData::default();
        site.github_username = Some("ada".to_string());
        let fetch = RepoFetch {
            repos: vec![RepoSummary {
                name: "engine".to_string(),
                html_url: "https://github.com/ada/engine".to_string(),
                language: "Rust".to_string(),
                stargazers_count: 12,
                updated_at: Some("2024-06-01T08:00:00Z".to_string()),
                topics: (0..8).map(|i| format!("t{i}")).collect(),
                ..Default::default()
            }],
            note: "Loaded from GitHub API.".to_string(),
            source: FetchSource::Live,
        };

        let page = ModernPage::build(&site, Some(&fetch));
        let card = &page.projects.cards[0];
        assert_eq!(page.projects.note, "Loaded from GitHub API.");
        assert_eq!(card.title, "engine");
        assert_eq!(card.sub, "Rust · ★12 · updated 2024-06-01");
        assert_eq!(card.tags.len(), 6);
        assert_eq!(card.actions, vec![Action::new("Repo", "https://github.com/ada/engine")]);
    }

    #[test]
    fn manual_mode_should_ignore_the_fetch() {
        let mut site = SiteData::default();
        site.implementation_projects.mode = ProjectsMode::Manual;
        let page = ModernPage::build(&site, None);
        assert!(page.projects.note.starts_with("Manual mode"));
        assert_eq!(page.projects.cards[0].title, "No projects yet");
    }

    #[test]
    fn map_links_should_reach_buttons_and_cards() {
        let mut site = SiteData::default();
        site.publications = serde_json::from_str(r#"[{ "links": { "pdf": "papers/a.pdf" } }]"#).unwrap();
        let mut page = ModernPage::build(&site, None);

        page.map_links(|href| format!("/base/{href}"));

        assert_eq!(page.hero.cv.href.as_deref(), Some("/base/../resume/CV.pdf"));
        assert_eq!(
            page.publications[0].actions[0].href.as_deref(),
            Some("/base/papers/a.pdf")
        );
        assert_eq!(page.hero.github.href, None);
    }

    #[test]
    fn contact_should_link_mail_and_profiles() {
        let mut site = SiteData::default();
        site.email = Some("ada@example.com".to_string());
        site.location = Some("Lisbon".to_string());
        site.links.linkedin = Some("linkedin.com/in/ada".to_string());

        let page = ModernPage::build(&site, None);
        assert_eq!(page.hero.meta_line, "Lisbon · ada@example.com");
        assert_eq!(
            page.contact.mail.href.as_deref(),
            Some("mailto:ada@example.com")
        );
        assert_eq!(page.contact.linkedin.label, "LinkedIn profile");
        assert_eq!(
            page.contact.linkedin.href.as_deref(),
            Some("https://linkedin.com/in/ada")
        );
        assert_eq!(page.contact.github.label, "—");
    }
}
