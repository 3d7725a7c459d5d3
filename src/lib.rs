//! Career Finder - Terminal Recommendation Client
//!
//! Collects five short answers, sends them to a remote scoring service and
//! shows the recommended faculty, falling back to a degraded result when the
//! service cannot be reached.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
