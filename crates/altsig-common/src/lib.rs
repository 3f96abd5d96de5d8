//! Common types and utilities for the altsig signature verifier.
//!
//! This crate provides foundational types shared by the solver, the checker
//! and the CLI:
//! - Diagnostic categories and the message catalog (`diagnostics`)
//! - Centralized recursion and size limits (`limits`)

// Diagnostic categories, codes and message templates
pub mod diagnostics;
pub use diagnostics::{
    DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages, format_message,
    get_diagnostic_category, get_diagnostic_message, get_message_template,
};

// Centralized limits and thresholds
pub mod limits;
