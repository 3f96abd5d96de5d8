//! Diagnostic categories and message lookup for the signature verifier.
//!
//! Message data lives in `data.rs`. Templates use `{0}`, `{1}`, ...
//! placeholders that are filled in with [`format_message`].

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    /// Lowercase label used by text renderers.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
///
/// The template is scanned once, so placeholder-like text inside an
/// argument is copied verbatim. Placeholders without a matching argument
/// are left as they are.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let tail = &rest[open..];
        let arg = tail.find('}').and_then(|close| {
            let index: usize = tail[1..close].parse().ok()?;
            args.get(index).map(|arg| (*arg, close))
        });
        match arg {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &tail[close + 1..];
            }
            None => {
                result.push('{');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
