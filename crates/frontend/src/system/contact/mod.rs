//! Contact form delivered through a third-party mail relay.

pub mod api;
pub mod form;
