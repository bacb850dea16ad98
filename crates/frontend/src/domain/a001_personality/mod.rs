//! Assistant personas: a fixed catalog plus the persisted "last selected"
//! preference.

pub mod preferences;
pub mod registry;
pub mod ui;

pub use registry::{all, find, Personality};
