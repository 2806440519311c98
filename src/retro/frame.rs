//! # Retro Frame
//!
//! Lays the session out on the terminal:
//!
//! ```text
//! row 0      menu bar and clock
//! row 1      rule
//! rows 2..   boxed output and numbered links (scrollable)
//! row h-2    view name and status
//! row h-1    command prompt
//! ```

use super::session::Session;
use super::views::View;
use crate::io::{FrameLine, LineStyle, TerminalSize};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

pub const PROMPT: &str = "> ";

/// Rows above and below the output area
const CHROME_ROWS: usize = 4;

/// A composed screen plus where the cursor goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<FrameLine>,
    pub cursor: (u16, u16),
}

/// Rows available for output at terminal `size`
pub fn body_height(size: TerminalSize) -> usize {
    (size.1 as usize).saturating_sub(CHROME_ROWS)
}

/// `left` and `right` on one row of `width`, right-aligned when they fit
fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.width() + right.width();
    if used + 1 > width {
        return left.to_string();
    }
    format!("{left}{}{right}", " ".repeat(width - used))
}

fn menu_bar(active: View) -> String {
    let mut bar = String::from(" FOLIO │");
    for (i, view) in View::PRIMARY.iter().enumerate() {
        let item = format!("{} {}", i + 1, view.menu_label());
        if *view == active {
            bar.push_str(&format!(" [{item}]"));
        } else {
            bar.push_str(&format!("  {item} "));
        }
    }
    if active == View::Help {
        bar.push_str(" [? HELP]");
    } else {
        bar.push_str("  ? HELP ");
    }
    bar
}

pub fn compose_frame(
    session: &Session,
    input: &str,
    size: TerminalSize,
    clock: &str,
    now: Instant,
) -> Frame {
    let width = size.0 as usize;
    let height = size.1 as usize;
    let body = body_height(size);

    let mut lines = Vec::with_capacity(height);
    lines.push(FrameLine::new(
        spread(&menu_bar(session.view()), &format!("{clock} "), width),
        LineStyle::Title,
    ));
    lines.push(FrameLine::new("─".repeat(width), LineStyle::Dim));

    let mut output: Vec<FrameLine> = session
        .screen()
        .frame_lines()
        .into_iter()
        .skip(session.scroll())
        .take(body)
        .collect();
    output.resize(body, FrameLine::blank());
    lines.extend(output);

    let status = session.status_text(now);
    let status_style = if status == super::session::ERROR_STATUS {
        LineStyle::Error
    } else {
        LineStyle::Status
    };
    lines.push(FrameLine::new(
        spread(
            &format!(" VIEW: {} │ {}", session.view().label(), status),
            "F1 HELP  ESC MENU ",
            width,
        ),
        status_style,
    ));
    lines.push(FrameLine::normal(format!("{PROMPT}{input}")));

    lines.truncate(height);
    let cursor_x = (PROMPT.width() + input.width()).min(u16::MAX as usize) as u16;
    Frame {
        lines,
        cursor: (cursor_x, size.1.saturating_sub(1)),
    }
}
