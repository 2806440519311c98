//! # Profile Document
//!
//! The structured record both skins render. Every field is optional: a missing
//! key, an explicit `null` and an empty string all read as "absent", and the
//! renderers print a placeholder instead.

pub mod format;
pub mod loader;

use serde::{de, Deserialize, Deserializer};
use std::fmt;

pub use loader::{load_site_data, resolve_link, LoadError};

/// Relative location of the profile document, used in placeholder text
pub const DATA_FILE_HINT: &str = "data/site.json";

/// The whole profile document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteData {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github_username: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub links: SiteLinks,
    #[serde(deserialize_with = "skill_groups")]
    pub skills: Vec<SkillGroup>,
    #[serde(deserialize_with = "entry_list")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "entry_list")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "entry_list")]
    pub publications: Vec<Publication>,
    #[serde(deserialize_with = "entry_list")]
    pub research_projects: Vec<ResearchProject>,
    #[serde(deserialize_with = "nullable")]
    pub implementation_projects: ImplementationProjects,
    #[serde(deserialize_with = "nullable")]
    pub contact: Contact,
}

/// Top-level profile links
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteLinks {
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub cv_pdf: Option<String>,
}

/// One labelled row of skills, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillGroup {
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub role: Option<String>,
    pub org: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: Option<String>,
    pub school: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub venue: Option<String>,
    /// Written as either `"2020"` or `2020` in the wild
    #[serde(deserialize_with = "lenient_text")]
    pub year: Option<String>,
    pub note: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub badges: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub links: PublicationLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PublicationLinks {
    pub pdf: Option<String>,
    pub doi: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResearchProject {
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub when: Option<String>,
    pub role: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub stack: Vec<String>,
    #[serde(deserialize_with = "text_list")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub links: ResearchLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResearchLinks {
    pub project_page: Option<String>,
    pub paper: Option<String>,
    pub code: Option<String>,
}

/// Where the "projects" section gets its entries from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectsMode {
    /// Curated list in `implementationProjects.manual`
    Manual,
    /// Featured repositories of `githubUsername`; any unknown mode lands here
    #[default]
    #[serde(other)]
    Github,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImplementationProjects {
    #[serde(deserialize_with = "nullable")]
    pub mode: ProjectsMode,
    #[serde(deserialize_with = "entry_list")]
    pub manual: Vec<ManualProject>,
    #[serde(deserialize_with = "text_list")]
    pub featured_repos: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManualProject {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub topics: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub repo: Option<String>,
    pub demo: Option<String>,
    pub docs: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub pitch: Option<String>,
    pub timezone: Option<String>,
}

/// Treat `null` like a missing key
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of free-text items; `null` items are dropped and numbers or
/// booleans become text
fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().iter().filter_map(scalar_text).collect())
}

/// A list of records; `null` entries are dropped
fn entry_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default().into_iter().flatten().collect())
}

/// Accept strings, numbers and booleans for free-text fields such as years
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| scalar_text(&v)))
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize the `skills` object into rows while keeping document order
fn skill_groups<'de, D>(deserializer: D) -> Result<Vec<SkillGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SkillGroupsVisitor;

    impl<'de> de::Visitor<'de> for SkillGroupsVisitor {
        type Value = Vec<SkillGroup>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an object mapping skill categories to lists")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            let mut groups = Vec::new();
            while let Some((label, items)) =
                map.next_entry::<String, Option<Vec<serde_json::Value>>>()?
            {
                let items = items
                    .unwrap_or_default()
                    .iter()
                    .filter_map(scalar_text)
                    .collect();
                groups.push(SkillGroup { label, items });
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_option(SkillGroupsVisitor)
}
