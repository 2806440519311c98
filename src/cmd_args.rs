use std::ffi::OsString;

pub use clap::Parser;
use clap::{Subcommand, ValueEnum};

use crate::modern::ThemeSetting;
use crate::retro::View;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Section of the profile file to read settings from.
    #[clap(
        short = 'p',
        long,
        global = true,
        default_value = "default",
        help = "profile name"
    )]
    profile: String,

    #[clap(short = 'v', long, global = true, help = "log debug output")]
    verbose: bool,

    #[clap(short = 'd', long, global = true, help = "profile document path or URL")]
    data: Option<String>,

    #[clap(long, global = true, help = "write logs to this file")]
    log_file: Option<String>,

    /// Skin to launch without showing the chooser (modern or retro)
    #[clap(long, help = "skip the chooser: modern or retro")]
    ui: Option<String>,

    #[command(subcommand)]
    command: Option<ClapCommand>,
}

#[derive(Subcommand, Debug)]
enum ClapCommand {
    /// Start the retro terminal skin
    Retro {
        #[clap(long, help = "initial view (about, resume, publications, research, projects, contact, help)")]
        view: Option<String>,
    },
    /// Write the modern HTML page and open it
    Modern {
        #[clap(short = 'o', long, help = "output file for the page")]
        out: Option<String>,

        #[clap(long, value_enum, help = "theme to store before rendering")]
        theme: Option<ThemeArg>,

        #[clap(long, help = "flip the stored light/dark theme")]
        toggle_theme: bool,

        #[clap(long, help = "do not open the page after writing it")]
        no_open: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeArg {
    Light,
    Dark,
    System,
}

/// What the user asked folio to start with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// The chooser, unless a valid `--ui` value skips it
    Chooser { ui: Option<String> },
    Retro { view: View },
    Modern(ModernArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModernArgs {
    pub out: Option<String>,
    pub theme: Option<ThemeSetting>,
    pub toggle_theme: bool,
    pub no_open: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    data: Option<String>,
    log_file: Option<String>,
    launch: Launch,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        let launch = match args.command {
            None => Launch::Chooser { ui: args.ui },
            Some(ClapCommand::Retro { view }) => Launch::Retro {
                view: View::from_fragment(view.as_deref()),
            },
            Some(ClapCommand::Modern {
                out,
                theme,
                toggle_theme,
                no_open,
            }) => Launch::Modern(ModernArgs {
                out,
                theme: theme.map(|theme| match theme {
                    ThemeArg::Light => ThemeSetting::Light,
                    ThemeArg::Dark => ThemeSetting::Dark,
                    ThemeArg::System => ThemeSetting::System,
                }),
                toggle_theme,
                no_open,
            }),
        };

        Self {
            profile: args.profile,
            verbose: args.verbose,
            data: args.data,
            log_file: args.log_file,
            launch,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    pub fn launch(&self) -> &Launch {
        &self.launch
    }

    /// Whether the run takes over the terminal
    pub fn is_full_screen(&self) -> bool {
        !matches!(self.launch, Launch::Modern(_))
    }
}
