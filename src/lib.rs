//! Portfolio backend and terminal viewer.
//!
//! `folio serve` runs a cached proxy listing a user's public repositories;
//! the default command browses those projects and recent GitHub activity.

pub mod activity;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod server;
pub mod state;
pub mod ui;

pub use error::{FolioError, Result};
