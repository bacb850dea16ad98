//! Chat page (MVVM)
//!
//! - view_model.rs: `ChatVm`, the controller mirrored into a signal plus the
//!   timers that drive it
//! - view.rs: `ChatPage`, header and transcript
//! - sidebar.rs: history list
//! - composer.rs: input, file picker and upload banner

mod composer;
mod sidebar;
mod view;
mod view_model;

pub use view::ChatPage;
pub use view_model::ChatVm;
