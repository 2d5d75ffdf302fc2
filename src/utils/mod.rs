//! Utility modules for the translator.
//!
//! This module contains common utilities used throughout the codebase:
//! - Error types
//! - Source location tracking
//! - Indented code formatting

pub mod errors;
pub mod location;
pub mod pretty;

// Re-exports
pub use errors::*;
pub use location::{SourceLocation, Span};
pub use pretty::CodeFormatter;
