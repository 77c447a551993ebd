//! `RecordingSink` — a test double for `DiagnosticSink`.
//!
//! Useful in unit tests that assert *how* a result was reached, not just
//! what it was.

use std::sync::{Arc, Mutex};

use crate::{Diagnostic, DiagnosticSink, Resolution};

/// A sink that keeps every diagnostic it receives, in order.
///
/// Clones share the same buffer, so a test can hand one clone to the engine
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// All diagnostics seen by this sink (in call order).
    pub events: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded diagnostics.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().unwrap().clone()
    }

    /// Number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolution path of the most recent `TriggerResolved` event.
    pub fn last_resolution(&self) -> Option<Resolution> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|event| match event {
                Diagnostic::TriggerResolved { resolution, .. } => Some(*resolution),
                _ => None,
            })
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        self.events.lock().unwrap().push(diagnostic.clone());
    }
}
