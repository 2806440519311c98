//! # URL Opener
//!
//! Hands links and generated pages to the desktop's default handler.

use anyhow::{Context, Result};
use std::sync::Mutex;

pub trait UrlOpener: Send + Sync {
    /// Open a URL or a local path with the system handler
    fn open(&self, target: &str) -> Result<()>;
}

/// Uses the platform opener (`xdg-open`, `open`, `start`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, target: &str) -> Result<()> {
        tracing::info!("Opening {}", target);
        open::that_detached(target).with_context(|| format!("Failed to open {target}"))
    }
}

/// Remembers what it was asked to open instead of opening it
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, target: &str) -> Result<()> {
        self.opened
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(target.to_string());
        Ok(())
    }
}
