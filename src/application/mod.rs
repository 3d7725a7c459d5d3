//! Application layer managing the view lifecycle.
//!
//! This module coordinates between the domain layer and presentation layer,
//! sequencing answer collection, scoring and result display.

pub mod state;

pub use state::*;
