//! Diagnostic sink shared by the checking workers.

use altsig_solver::Diagnostic;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Accepts diagnostics from any thread and hands them back sorted.
///
/// The final order depends only on the diagnostics themselves, never on
/// the order in which workers finished.
#[derive(Default)]
pub struct DiagnosticReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }

    pub fn report_all(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        let diagnostics: Vec<Diagnostic> = diagnostics.into_iter().collect();
        if diagnostics.is_empty() {
            return;
        }
        self.lock().extend(diagnostics);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consume the reporter, returning every diagnostic in stable order.
    pub fn finish(self) -> Vec<Diagnostic> {
        let mut diagnostics = self
            .diagnostics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        diagnostics.sort_by(|a, b| {
            a.sort_key()
                .cmp(&b.sort_key())
                .then_with(|| a.message_text.cmp(&b.message_text))
        });
        diagnostics.dedup();
        diagnostics
    }

    // A panicking worker cannot leave the Vec half-pushed.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod tests;
