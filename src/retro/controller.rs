//! # Retro Controller
//!
//! The event loop of the retro skin: reads keys, feeds the session, performs
//! the effects it asks for and repaints.

use super::command::parse_command;
use super::frame::{body_height, compose_frame};
use super::keys::{KeyAction, KeyContext, KeyRegistry};
use super::session::{Effect, FetchRequest, Session};
use super::views::View;
use crate::github::RepoFetch;
use crate::io::{EventStream, FrameRenderer, RenderStream};
use crate::services::Services;
use crate::site::{resolve_link, SiteData};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long to wait for input before checking fetches and timers
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Why the retro skin stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetroExit {
    Chooser,
    Quit,
}

#[derive(Debug)]
struct FetchDone {
    generation: u64,
    fetch: RepoFetch,
}

fn clock_text() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

pub struct RetroController {
    session: Session,
    site: Arc<SiteData>,
    input: String,
    keys: KeyRegistry,
    services: Services,
    fetch_tx: mpsc::Sender<FetchDone>,
    fetch_rx: mpsc::Receiver<FetchDone>,
}

impl RetroController {
    pub fn new(site: Arc<SiteData>, view: View, services: Services) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel(10);
        Self {
            session: Session::new(view),
            site,
            input: String::new(),
            keys: KeyRegistry::new(),
            services,
            fetch_tx,
            fetch_rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the viewer leaves
    pub async fn run<ES: EventStream, RS: RenderStream>(
        &mut self,
        events: &mut ES,
        renderer: &mut FrameRenderer<RS>,
    ) -> Result<RetroExit> {
        renderer.initialize()?;
        tracing::info!("Retro skin started on {}", self.session.view().name());

        let effects = self.session.start(&self.site);
        if let Some(exit) = self.apply_effects(effects) {
            return Ok(exit);
        }
        let mut clock = clock_text();
        self.redraw(renderer, &clock)?;

        loop {
            let mut dirty = false;

            if events.poll(POLL_INTERVAL)? {
                match events.read()? {
                    Event::Key(key) => {
                        let page = body_height(renderer.terminal_size());
                        if let Some(exit) = self.handle_key(&key, page) {
                            tracing::info!("Retro skin finished: {:?}", exit);
                            return Ok(exit);
                        }
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        renderer.update_size(width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            // Spawned fetches need a turn on a current-thread runtime
            tokio::task::yield_now().await;
            while let Ok(done) = self.fetch_rx.try_recv() {
                dirty |= self
                    .session
                    .complete_fetch(done.generation, &done.fetch, &self.site);
            }

            dirty |= self.session.tick(Instant::now());

            let now = clock_text();
            if now != clock {
                clock = now;
                dirty = true;
            }

            if dirty {
                self.redraw(renderer, &clock)?;
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, page: usize) -> Option<RetroExit> {
        let context = KeyContext {
            typing: !self.input.is_empty(),
        };
        let action = self.keys.process(key, &context)?;
        let now = Instant::now();

        let effects = match action {
            KeyAction::Insert(c) => {
                self.input.push(c);
                return None;
            }
            KeyAction::Backspace => {
                self.input.pop();
                return None;
            }
            KeyAction::Scroll(amount) => {
                self.session.scroll_by(amount, page);
                return None;
            }
            KeyAction::Submit => {
                let line = std::mem::take(&mut self.input);
                match parse_command(&line) {
                    Some(command) => self.session.execute(command, &self.site, now),
                    None => Vec::new(),
                }
            }
            KeyAction::Run(command) => self.session.execute(command, &self.site, now),
        };
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> Option<RetroExit> {
        for effect in effects {
            match effect {
                Effect::OpenUrl(url) => self.open(&url),
                Effect::FetchRepos(request) => self.spawn_fetch(request),
                Effect::OpenChooser => return Some(RetroExit::Chooser),
                Effect::Quit => return Some(RetroExit::Quit),
            }
        }
        None
    }

    fn open(&mut self, url: &str) {
        let target = resolve_link(&self.services.data, url);
        if let Err(e) = self.services.opener.open(&target) {
            tracing::warn!("{:#}", e);
            self.session.flash("Could not open link.", Instant::now());
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let repos = Arc::clone(&self.services.repos);
        let tx = self.fetch_tx.clone();
        let max = self.services.max_repos;

        tokio::spawn(async move {
            let fetch = repos
                .fetch(request.username.as_deref(), max)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Projects fetch failed: {:#}", e);
                    RepoFetch::failed(&e)
                });
            let done = FetchDone {
                generation: request.generation,
                fetch,
            };
            if tx.send(done).await.is_err() {
                tracing::debug!("Retro skin ended before the projects fetch completed");
            }
        });
    }

    fn redraw<RS: RenderStream>(&self, renderer: &mut FrameRenderer<RS>, clock: &str) -> Result<()> {
        let frame = compose_frame(
            &self.session,
            &self.input,
            renderer.terminal_size(),
            clock,
            Instant::now(),
        );
        renderer.draw(&frame.lines, Some(frame.cursor))
    }
}

/// Show the fatal start-up error and wait for any key
pub fn show_failure<ES: EventStream, RS: RenderStream>(
    events: &mut ES,
    renderer: &mut FrameRenderer<RS>,
    detail: &str,
) -> Result<()> {
    renderer.initialize()?;
    let mut session = Session::new(View::About);
    session.fail(detail);
    let frame = compose_frame(
        &session,
        "",
        renderer.terminal_size(),
        &clock_text(),
        Instant::now(),
    );
    renderer.draw(&frame.lines, None)?;

    loop {
        if events.poll(POLL_INTERVAL)? {
            if let Event::Key(_) = events.read()? {
                return Ok(());
            }
        }
    }
}
