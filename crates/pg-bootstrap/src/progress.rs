//! Console progress markers for named bootstrap steps.

use std::io::{self, Write};

/// Receives begin/success/failure notifications around each named step.
///
/// Purely cosmetic: implementations must not affect control flow. A benign
/// "does not exist" drop still surfaces as a failure here, because the marker
/// reflects the raw execution outcome.
pub trait StepReporter: Send + Sync {
    /// A step is about to run.
    fn begin(&self, label: &str);

    /// The step completed.
    fn success(&self, label: &str);

    /// The step errored.
    fn failure(&self, label: &str);
}

/// Prints `[ ]` / `[+]` / `[-]` markers, rewriting the pending line in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl StepReporter for ConsoleReporter {
    fn begin(&self, label: &str) {
        print!("[ ] {}", label);
        let _ = io::stdout().flush();
    }

    fn success(&self, label: &str) {
        println!("\r[+] {}", label);
    }

    fn failure(&self, label: &str) {
        println!("\r[-] {}", label);
    }
}

/// Discards all progress notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl StepReporter for NoopReporter {
    fn begin(&self, _label: &str) {}

    fn success(&self, _label: &str) {}

    fn failure(&self, _label: &str) {}
}
