use altsig_common::DiagnosticCategory;
use altsig_solver::Diagnostic;
use colored::Colorize;
use serde::Serialize;

/// Renders diagnostics for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// `<declaration> @ <position> - error ALT3001: <message>`, followed by
    /// the overridden declaration when there is one.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = self.format_location(diagnostic);
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(related) = &diagnostic.related {
            output.push_str("\n    overrides ");
            let related = related.to_string();
            if self.color {
                output.push_str(&related.cyan().to_string());
            } else {
                output.push_str(&related);
            }
        }
        output
    }

    pub fn summary(&self, diagnostics: &[Diagnostic]) -> String {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let mut declarations: Vec<_> = diagnostics.iter().map(|d| &d.declaration).collect();
        declarations.dedup();

        let text = match errors {
            0 => "No errors found.".to_string(),
            1 => "Found 1 error.".to_string(),
            n => format!("Found {n} errors in {} declarations.", declarations.len()),
        };
        if self.color && errors > 0 {
            text.red().bold().to_string()
        } else {
            text
        }
    }

    fn format_location(&self, diagnostic: &Diagnostic) -> String {
        let mut location = diagnostic.declaration.to_string();
        if let Some(position) = &diagnostic.position {
            location.push_str(" @ ");
            location.push_str(&position.to_string());
        }
        if self.color {
            location.cyan().to_string()
        } else {
            location
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.label();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("ALT{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    errors: usize,
}

/// Machine-readable output: every diagnostic with its structured fields.
pub fn render_json(diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        diagnostics,
        errors: diagnostics.iter().filter(|d| d.is_error()).count(),
    })
}

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod tests;
