//! # Application Controller
//!
//! Moves the viewer between the chooser, the retro skin and the modern page
//! and makes sure the terminal is handed back however the run ends.

use crate::chooser::{redirect_target, run_chooser, Chooser, ChooserOutcome, Preferences, Skin};
use crate::cmd_args::{Launch, ModernArgs};
use crate::config::expand_path;
use crate::io::{EventStream, FrameRenderer, RenderStream};
use crate::modern::{publish, ModernOptions};
use crate::retro::{show_failure, RetroController, RetroExit, View};
use crate::services::Services;
use crate::site::load_site_data;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppExit {
    Quit,
    /// The modern page was written to this path
    Published(PathBuf),
}

#[derive(Debug, Clone)]
enum Stage {
    Chooser,
    Retro(View),
    Modern(ModernOptions),
}

pub struct App<ES: EventStream, RS: RenderStream> {
    services: Services,
    launch: Launch,
    output: PathBuf,
    event_stream: ES,
    renderer: FrameRenderer<RS>,
}

impl<ES: EventStream, RS: RenderStream> App<ES, RS> {
    /// Create the application with injected I/O streams
    ///
    /// `output` is where the modern page goes unless `folio modern --out`
    /// names another file.
    pub fn with_io_streams(
        launch: Launch,
        services: Services,
        output: PathBuf,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let renderer = FrameRenderer::new(render_stream)?;
        Ok(Self {
            services,
            launch,
            output,
            event_stream,
            renderer,
        })
    }

    fn first_stage(&self) -> Stage {
        match &self.launch {
            Launch::Chooser { ui } => match redirect_target(ui.as_deref()) {
                Some(Skin::Retro) => Stage::Retro(View::default()),
                Some(Skin::Modern) => Stage::Modern(ModernOptions::default()),
                None => Stage::Chooser,
            },
            Launch::Retro { view } => Stage::Retro(*view),
            Launch::Modern(args) => Stage::Modern(modern_options(args)),
        }
    }

    fn output(&self) -> PathBuf {
        match &self.launch {
            Launch::Modern(ModernArgs { out: Some(out), .. }) => expand_path(out),
            _ => self.output.clone(),
        }
    }

    /// Run until the viewer quits or the modern page is published
    pub async fn run(&mut self) -> Result<AppExit> {
        let result = self.navigate().await;
        if let Err(e) = self.renderer.cleanup() {
            tracing::warn!("Failed to restore the terminal: {}", e);
        }
        result
    }

    async fn navigate(&mut self) -> Result<AppExit> {
        let mut stage = self.first_stage();
        loop {
            tracing::debug!("Entering {:?}", stage);
            stage = match stage {
                Stage::Chooser => match self.choose()? {
                    Some(Skin::Retro) => Stage::Retro(View::default()),
                    Some(Skin::Modern) => Stage::Modern(ModernOptions::default()),
                    None => return Ok(AppExit::Quit),
                },
                Stage::Retro(view) => match self.retro(view).await? {
                    RetroExit::Chooser => Stage::Chooser,
                    RetroExit::Quit => return Ok(AppExit::Quit),
                },
                Stage::Modern(options) => {
                    // The browser takes over from here
                    self.renderer.cleanup()?;
                    let path = publish(&self.services, &self.output(), &options).await?;
                    return Ok(AppExit::Published(path));
                }
            };
        }
    }

    fn choose(&mut self) -> Result<Option<Skin>> {
        let mut chooser = Chooser::new(Preferences::new(Arc::clone(&self.services.store)));
        match run_chooser(&mut chooser, &mut self.event_stream, &mut self.renderer)? {
            ChooserOutcome::Launch(skin) => {
                tracing::info!("Chooser picked {}", skin);
                Ok(Some(skin))
            }
            ChooserOutcome::Quit | ChooserOutcome::Stay => Ok(None),
        }
    }

    async fn retro(&mut self, view: View) -> Result<RetroExit> {
        let site = match load_site_data(&self.services.data).await {
            Ok(site) => Arc::new(site),
            Err(e) => {
                tracing::error!("Could not start retro UI: {}", e);
                show_failure(&mut self.event_stream, &mut self.renderer, &e.to_string())?;
                return Err(e).context("Could not start retro UI");
            }
        };

        let mut controller = RetroController::new(site, view, self.services.clone());
        controller
            .run(&mut self.event_stream, &mut self.renderer)
            .await
    }
}

fn modern_options(args: &ModernArgs) -> ModernOptions {
    ModernOptions {
        theme: args.theme,
        toggle_theme: args.toggle_theme,
        open: !args.no_open,
    }
}
