//! Chat: transcript, sessions, history and document attachment.

pub mod api;
pub mod attachment;
pub mod controller;
#[cfg(test)]
mod fake;
pub mod history;
pub mod model;
pub mod reveal;
pub mod scroll;
pub mod ui;

pub use controller::ChatController;
