//! Error types and the diagnostics sink for the parser.
//!
//! This module defines:
//!
//! - The error variants the parser can report
//! - The append-only diagnostics list handed back to the caller
//!
//! Nothing here aborts a parse; errors are rendered to text and collected.

pub mod errors;
