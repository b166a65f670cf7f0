//! Common utilities for the Agora governance dashboard
//!
//! This crate provides the pieces shared by the rest of the workspace:
//! the common error type, logging initialization, application
//! configuration, and display helpers for addresses and voting deadlines.

pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub use config::{AppConfig, ConfigError};
pub use error::{Error, Result};
