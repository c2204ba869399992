//! Common utilities module
//!
//! This module contains shared utilities used across the exposure engine.

pub mod error;

pub use error::{MeterError, Result};
