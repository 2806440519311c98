//! Chooser event loop.

use super::screen::compose_chooser;
use super::{Chooser, ChooserOutcome};
use crate::io::{EventStream, FrameRenderer, RenderStream};
use crate::retro::controller::POLL_INTERVAL;
use anyhow::Result;
use crossterm::event::Event;

/// Show the chooser until a skin is picked or the viewer quits
pub fn run_chooser<ES: EventStream, RS: RenderStream>(
    chooser: &mut Chooser,
    events: &mut ES,
    renderer: &mut FrameRenderer<RS>,
) -> Result<ChooserOutcome> {
    renderer.initialize()?;
    renderer.draw(&compose_chooser(chooser, renderer.terminal_size()), None)?;

    loop {
        if !events.poll(POLL_INTERVAL)? {
            continue;
        }
        match events.read()? {
            Event::Key(key) => {
                tracing::debug!("Chooser key {:?}", key.code);
                let outcome = chooser.handle_key(&key);
                if outcome != ChooserOutcome::Stay {
                    return Ok(outcome);
                }
            }
            Event::Resize(width, height) => renderer.update_size(width, height),
            _ => continue,
        }
        renderer.draw(&compose_chooser(chooser, renderer.terminal_size()), None)?;
    }
}
