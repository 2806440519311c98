//! # Folio Main Entry Point
//!
//! Reads the command line and the INI profile, wires the production
//! collaborators together and runs the chosen skin.

use anyhow::{Context, Result};
use folio::cmd_args::{CommandLineArgs, Launch};
use folio::config::{expand_path, FolioConfig};
use folio::github::{GithubApi, RepoService};
use folio::io::{TerminalEventStream, TerminalRenderStream};
use folio::opener::SystemOpener;
use folio::services::Services;
use folio::storage::{JsonFileStore, KeyValueStore};
use folio::{App, AppExit};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Dependencies whose debug output drowns folio's own
const NOISY_TARGETS: &[&str] = &[
    "reqwest",
    "hyper",
    "hyper_util",
    "tokio",
    "tracing",
    "tracing_subscriber",
    "tokio_util",
    "tokio_rustls",
    "rustls",
    "h2",
    "mio",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();

    let mut config = FolioConfig::load_default(cmd_args.profile())?;
    if let Some(data) = cmd_args.data() {
        config.data = data.to_string();
    }
    if let Some(log_file) = cmd_args.log_file() {
        config.log_file = Some(expand_path(log_file));
    }

    init_tracing_subscriber(&config, &cmd_args)?;
    tracing::debug!("Configuration: {:?}", config);

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.state));
    let api = Arc::new(GithubApi::new(config.github_api.clone())?);
    let services = Services {
        data: config.data.clone(),
        store: Arc::clone(&store),
        repos: Arc::new(RepoService::new(api, store)),
        opener: Arc::new(SystemOpener),
        max_repos: config.max_repos,
    };

    let mut app = App::with_io_streams(
        cmd_args.launch().clone(),
        services,
        config.output.clone(),
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;

    match app.run().await? {
        AppExit::Published(path) => println!("Modern page written to {}", path.display()),
        AppExit::Quit => {}
    }
    Ok(())
}

fn init_tracing_subscriber(config: &FolioConfig, cmd_args: &CommandLineArgs) -> Result<()> {
    let default_level = if cmd_args.verbose() { "debug" } else { "info" };
    let mut filter = EnvFilter::try_from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ))
    .unwrap_or_else(|_| EnvFilter::new(default_level));
    for target in NOISY_TARGETS {
        if let Ok(directive) = format!("{target}=warn").parse() {
            filter = filter.add_directive(directive);
        }
    }

    // The full-screen skins own the terminal, so logs only go to stderr
    // when nothing else would show them
    let writer = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if matches!(cmd_args.launch(), Launch::Modern(_)) => {
            BoxMakeWriter::new(std::io::stderr)
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}
