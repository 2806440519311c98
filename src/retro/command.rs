//! # Retro Commands
//!
//! The typed command vocabulary. The first whitespace-separated token names
//! the command (case-insensitive); the rest are arguments.

use super::views::View;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetroCommand {
    Show(View),
    /// Open the CV, or show the resume when none is configured
    Cv,
    /// Open the GitHub profile, or show projects when none is configured
    Github,
    /// `open N`; the raw argument is validated when the link list is known
    Open(Option<String>),
    Clear,
    Chooser,
    Quit,
    Unknown(String),
}

/// Parse one command line; blank input is no command at all
pub fn parse_command(raw: &str) -> Option<RetroCommand> {
    let mut parts = raw.split_whitespace();
    let name = parts.next()?.to_lowercase();

    let command = match name.as_str() {
        "1" | "2" | "3" | "4" | "5" | "6" => {
            let position = name.parse::<usize>().ok()?;
            RetroCommand::Show(View::primary(position)?)
        }
        "about" | "a" => RetroCommand::Show(View::About),
        "resume" | "r" => RetroCommand::Show(View::Resume),
        "cv" => RetroCommand::Cv,
        "papers" | "pubs" | "publications" | "p" => RetroCommand::Show(View::Publications),
        "research" | "lab" => RetroCommand::Show(View::Research),
        "github" => RetroCommand::Github,
        "projects" | "g" => RetroCommand::Show(View::Projects),
        "contact" | "c" => RetroCommand::Show(View::Contact),
        "help" | "?" | "h" | "f1" => RetroCommand::Show(View::Help),
        "open" => RetroCommand::Open(parts.next().map(str::to_string)),
        "ui" | "home" => RetroCommand::Chooser,
        "clear" | "cls" => RetroCommand::Clear,
        "exit" | "quit" => RetroCommand::Quit,
        _ => RetroCommand::Unknown(name),
    };
    tracing::debug!("Parsed '{}' as {:?}", raw.trim(), command);
    Some(command)
}

/// Parse the argument of `open N` into a 1-based link number
pub fn link_number(arg: Option<&str>) -> Option<usize> {
    arg?.parse::<usize>().ok().filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> RetroCommand {
        parse_command(raw).unwrap()
    }

    #[test]
    fn blank_input_should_be_no_command() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn aliases_should_map_to_views() {
        assert_eq!(parse("a"), RetroCommand::Show(View::About));
        assert_eq!(parse("RESUME"), RetroCommand::Show(View::Resume));
        assert_eq!(parse("pubs"), RetroCommand::Show(View::Publications));
        assert_eq!(parse("Lab"), RetroCommand::Show(View::Research));
        assert_eq!(parse("g"), RetroCommand::Show(View::Projects));
        assert_eq!(parse("c"), RetroCommand::Show(View::Contact));
        assert_eq!(parse("F1"), RetroCommand::Show(View::Help));
        assert_eq!(parse("?"), RetroCommand::Show(View::Help));
    }

    #[test]
    fn digits_should_select_primary_views() {
        assert_eq!(parse("1"), RetroCommand::Show(View::About));
        assert_eq!(parse("5"), RetroCommand::Show(View::Projects));
        assert_eq!(parse("7"), RetroCommand::Unknown("7".to_string()));
    }

    #[test]
    fn open_should_keep_its_argument() {
        assert_eq!(parse("open 2"), RetroCommand::Open(Some("2".to_string())));
        assert_eq!(parse("OPEN"), RetroCommand::Open(None));
        assert_eq!(parse("  open   3  extra"), RetroCommand::Open(Some("3".to_string())));
    }

    #[test]
    fn navigation_and_housekeeping_commands_should_parse() {
        assert_eq!(parse("home"), RetroCommand::Chooser);
        assert_eq!(parse("cls"), RetroCommand::Clear);
        assert_eq!(parse("quit"), RetroCommand::Quit);
        assert_eq!(parse("github"), RetroCommand::Github);
        assert_eq!(parse("cv"), RetroCommand::Cv);
    }

    #[test]
    fn unknown_words_should_be_reported() {
        assert_eq!(parse("dance now"), RetroCommand::Unknown("dance".to_string()));
    }

    #[test]
    fn link_number_should_reject_nonsense() {
        assert_eq!(link_number(Some("2")), Some(2));
        assert_eq!(link_number(Some("0")), None);
        assert_eq!(link_number(Some("-1")), None);
        assert_eq!(link_number(Some("two")), None);
        assert_eq!(link_number(None), None);
    }
}
