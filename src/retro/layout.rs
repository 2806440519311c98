//! Box drawing and word wrapping for the retro screens.

use crate::io::renderer::fit_width;
use unicode_width::UnicodeWidthStr;

/// Total width of a retro box, borders included
pub const BOX_WIDTH: usize = 70;

/// Columns available for text inside a box of `width`
pub fn inner_width(width: usize) -> usize {
    width.saturating_sub(4).max(1)
}

/// Word-wrap `lines` so none is wider than `max` columns
///
/// Embedded newlines start new lines, tabs become four spaces, and a line's
/// leading indentation is repeated on its continuation lines. A single word
/// wider than `max` keeps a line of its own and is clipped later by the box.
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], max: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in lines {
        for physical in line.as_ref().split('\n') {
            wrap_one(&physical.replace('\t', "    "), max, &mut out);
        }
    }
    out
}

fn wrap_one(line: &str, max: usize, out: &mut Vec<String>) {
    let line = line.trim_end();
    if line.width() <= max {
        out.push(line.to_string());
        return;
    }

    let body = line.trim_start();
    let mut indent = line[..line.len() - body.len()].to_string();
    if indent.width() * 2 > max {
        indent.clear();
    }

    let mut current = indent.clone();
    for word in body.split_whitespace() {
        let at_start = current.len() == indent.len();
        let needed = if at_start {
            word.width()
        } else {
            word.width() + 1
        };
        if !at_start && current.width() + needed > max {
            out.push(std::mem::replace(&mut current, indent.clone()));
            current.push_str(word);
            continue;
        }
        if !at_start {
            current.push(' ');
        }
        current.push_str(word);
    }
    out.push(current);
}

/// Draw `lines` inside a titled box of `width` columns
///
/// ```text
/// ┌────────┐
/// │ TITLE  │
/// ├────────┤
/// │ body   │
/// └────────┘
/// ```
///
/// Content wider than the box is clipped, never wrapped.
pub fn draw_box<S: AsRef<str>>(title: &str, lines: &[S], width: usize) -> String {
    let inner = inner_width(width);
    let rule = "─".repeat(inner + 2);

    let mut out = Vec::with_capacity(lines.len() + 4);
    out.push(format!("┌{rule}┐"));
    out.push(format!("│ {} │", fit_width(title, inner)));
    out.push(format!("├{rule}┤"));
    for line in lines {
        out.push(format!("│ {} │", fit_width(line.as_ref(), inner)));
    }
    out.push(format!("└{rule}┘"));
    out.join("\n")
}

/// Wrap `lines` to the inner width and draw them in a standard box
pub fn boxed<S: AsRef<str>>(title: &str, lines: &[S]) -> String {
    draw_box(title, &wrap_lines(lines, inner_width(BOX_WIDTH)), BOX_WIDTH)
}
