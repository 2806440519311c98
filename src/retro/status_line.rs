//! # Status Line Model
//!
//! The retro status area: a steady status (`READY`, `GITHUB MODE`, ...) and an
//! optional flash message that hides it for a short while.

use std::time::{Duration, Instant};

/// How long a flash message stays up
pub const FLASH_DURATION: Duration = Duration::from_millis(1200);

pub const READY: &str = "READY";

#[derive(Debug, Clone)]
struct Flash {
    message: String,
    until: Instant,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Steady status the line reverts to
    meta: String,
    flash: Option<Flash>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            meta: READY.to_string(),
            flash: None,
        }
    }

    pub fn meta(&self) -> &str {
        &self.meta
    }

    /// Replace the steady status; a running flash stays on top
    pub fn set_meta(&mut self, meta: impl Into<String>) {
        self.meta = meta.into();
    }

    pub fn flash(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!("Status flash: {}", message);
        self.flash = Some(Flash {
            message,
            until: now + FLASH_DURATION,
        });
    }

    /// Text to display at `now`
    pub fn text(&self, now: Instant) -> &str {
        match &self.flash {
            Some(flash) if now < flash.until => &flash.message,
            _ => &self.meta,
        }
    }

    /// Drop an expired flash; true when the visible text changed
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.flash {
            Some(flash) if now >= flash.until => {
                self.flash = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
