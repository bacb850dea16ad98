//! Wire types shared between the NeuraChat client and its backend.

pub mod domain;
pub mod shared;
pub mod system;
