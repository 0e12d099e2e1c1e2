//! Runtime module - terminal integration
//!
//! - `app` - message loop, command execution and rendering
//! - `stdin` - reader thread turning input lines into messages

pub mod app;
pub mod stdin;

pub use app::App;
