//! # Folio - A Portfolio With Two Skins
//!
//! One JSON profile document, rendered either as a static HTML page (the
//! modern skin) or as an interactive green-screen terminal driven by typed
//! commands (the retro skin). A small chooser picks between them and can
//! remember the choice.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────┐
//!                 │   App    │  chooser ⇄ retro, chooser → modern
//!                 └────┬─────┘
//!        ┌─────────────┼──────────────┐
//!        ▼             ▼              ▼
//!  ┌──────────┐  ┌──────────┐   ┌──────────┐
//!  │ chooser  │  │  retro   │   │  modern  │
//!  │ (screen) │  │ session  │   │ page +   │
//!  │          │  │ + views  │   │ template │
//!  └────┬─────┘  └────┬─────┘   └────┬─────┘
//!       │   io (crossterm)           │
//!       └─────────────┼──────────────┘
//!                     ▼
//!   site (profile) · github (repos + cache) · storage (state)
//! ```
//!
//! Terminal input and output go through the [`io::EventStream`] and
//! [`io::RenderStream`] traits so every screen runs against mocks in tests.

pub mod app;
pub mod chooser;
pub mod cmd_args;
pub mod config;
pub mod github;
pub mod io;
pub mod modern;
pub mod opener;
pub mod retro;
pub mod services;
pub mod site;
pub mod storage;

pub use app::{App, AppExit};
