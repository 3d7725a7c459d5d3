//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP scoring client, configuration loading
//! and operator logging.

pub mod config;
pub mod logging;
pub mod scoring;

pub use self::config::*;
pub use logging::*;
pub use scoring::*;
