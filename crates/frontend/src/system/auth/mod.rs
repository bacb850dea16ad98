pub mod api;
pub mod context;
pub mod guard;
pub mod redirect;
pub mod session;
pub mod storage;
