//! Chooser screen layout.

use super::{Chooser, Focus, Skin};
use crate::io::{FrameLine, LineStyle, TerminalSize};

const CARDS: [(Skin, &str, &str); 2] = [
    (Skin::Modern, "1", "Clean sections and cards, opened in your browser."),
    (Skin::Retro, "2", "A green-screen terminal driven by typed commands."),
];

fn control(focused: bool, text: String) -> FrameLine {
    if focused {
        FrameLine::new(format!("  > {text}"), LineStyle::Highlight)
    } else {
        FrameLine::normal(format!("    {text}"))
    }
}

/// Rows of the chooser, top-aligned and padded to the terminal height
pub fn compose_chooser(chooser: &Chooser, size: TerminalSize) -> Vec<FrameLine> {
    let mut lines = vec![
        FrameLine::new(" FOLIO", LineStyle::Title),
        FrameLine::new(" Choose your interface", LineStyle::Title),
        FrameLine::new("─".repeat(size.0 as usize), LineStyle::Dim),
        FrameLine::blank(),
    ];

    for (skin, key, blurb) in CARDS {
        let focused = chooser.focus() == Focus::Card(skin);
        lines.push(control(focused, format!("[{key}] {:<8} {blurb}", skin.label())));
    }
    lines.push(FrameLine::blank());

    let mark = if chooser.remember() { "x" } else { " " };
    lines.push(control(
        chooser.focus() == Focus::Remember,
        format!("[{mark}] Remember my choice"),
    ));

    if let Some(saved) = chooser.saved() {
        lines.push(FrameLine::normal(format!(
            "    Saved choice: {}",
            saved.label()
        )));
        lines.push(control(
            chooser.focus() == Focus::ClearSaved,
            "[ Clear saved ]".to_string(),
        ));
        lines.push(FrameLine::blank());
        lines.push(FrameLine::new(
            format!(" Press Enter to continue with {}.", saved.label()),
            LineStyle::Link,
        ));
    } else {
        lines.push(FrameLine::blank());
    }

    lines.push(FrameLine::new(
        " 1/m modern · 2/r retro · Tab move · Space/Enter select · Esc quit",
        LineStyle::Dim,
    ));

    lines.resize(lines.len().max(size.1 as usize), FrameLine::blank());
    lines
}
