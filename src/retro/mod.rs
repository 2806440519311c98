//! # Retro Skin
//!
//! A full-screen terminal portfolio driven by typed commands and single-key
//! shortcuts.
//!
//! - [`views`]: pure renderers from profile data to boxed text and links
//! - [`command`] and [`keys`]: what the viewer typed or pressed
//! - [`session`]: the state machine, returning effects instead of doing I/O
//! - [`frame`]: screen layout of a session
//! - [`controller`]: the event loop tying them to a terminal

pub mod command;
pub mod controller;
pub mod frame;
pub mod keys;
pub mod layout;
pub mod session;
pub mod status_line;
pub mod views;

pub use command::{parse_command, RetroCommand};
pub use controller::{show_failure, RetroController, RetroExit};
pub use session::{Effect, Session};
pub use views::View;
