//! HTML rendering of the modern skin through minijinja.

use super::page::ModernPage;
use super::theme::Theme;
use anyhow::{Context, Result};
use minijinja::{context, Environment};

const PAGE_TEMPLATE: &str = include_str!("page.html");

const ERROR_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Portfolio — Modern</title></head>
<body><pre style="padding:20px">Modern UI failed to load.

{{ detail }}</pre></body>
</html>
"#;

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("page.html", PAGE_TEMPLATE)
        .context("Failed to parse the page template")?;
    env.add_template("error.html", ERROR_TEMPLATE)
        .context("Failed to parse the error template")?;
    Ok(env)
}

/// Render the full page; `theme` becomes the `data-theme` attribute when set
pub fn render_page(page: &ModernPage, theme: Option<Theme>) -> Result<String> {
    let env = environment()?;
    let template = env.get_template("page.html")?;
    let html = template
        .render(context! {
            page => page,
            theme => theme.map(Theme::as_str),
        })
        .context("Failed to render the page template")?;
    Ok(html)
}

/// Page shown instead of the portfolio when the profile cannot be loaded
pub fn render_error_page(detail: &str) -> Result<String> {
    let env = environment()?;
    let html = env
        .get_template("error.html")?
        .render(context! { detail => detail })
        .context("Failed to render the error page")?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteData;

    fn sample() -> SiteData {
        serde_json::from_str(
            r#"{
                "name": "Ada <Lovelace>",
                "tagline": "Engines & notes",
                "links": { "github": "github.com/ada" },
                "highlights": ["First program"],
                "implementationProjects": { "mode": "manual" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn page_should_escape_profile_text() {
        let page = ModernPage::build(&sample(), None);
        let html = render_page(&page, None).unwrap();

        assert!(html.contains("<title>Ada &lt;Lovelace&gt; — Modern</title>"));
        assert!(html.contains("Engines &amp; notes"));
        assert!(!html.contains("<Lovelace>"));
    }

    #[test]
    fn theme_attribute_should_only_appear_when_set() {
        let page = ModernPage::build(&sample(), None);

        let unset = render_page(&page, None).unwrap();
        assert!(unset.contains("<html lang=\"en\">"));

        let dark = render_page(&page, Some(Theme::Dark)).unwrap();
        assert!(dark.contains("<html lang=\"en\" data-theme=\"dark\">"));
    }

    #[test]
    fn missing_links_should_render_disabled_buttons() {
        let page = ModernPage::build(&sample(), None);
        let html = render_page(&page, None).unwrap();

        assert!(html.contains("<a class=\"btn\" href=\"https:"));
        assert!(html.contains("github.com"));
        assert!(html.contains("href=\"#\" aria-disabled=\"true\">LinkedIn</a>"));
    }

    #[test]
    fn placeholders_should_be_rendered() {
        let page = ModernPage::build(&sample(), None);
        let html = render_page(&page, None).unwrap();

        assert!(html.contains("<li>First program</li>"));
        // autoescape writes `/` as `&#x2f;`
        assert!(html.contains("Add skills in data&#x2f;site.json"));
        assert!(html.contains("No papers yet"));
        assert!(html.contains("Manual mode (projects are curated in data&#x2f;site.json)."));
    }

    #[test]
    fn error_page_should_escape_the_detail() {
        let html = render_error_page("bad <json> & 'quotes'").unwrap();
        assert!(html.contains("<pre style=\"padding:20px\">Modern UI failed to load.\n\nbad &lt;json&gt; &amp; &#x27;quotes&#x27;</pre>"));
    }
}
