//! Degradation tracking for the deep pass.
//!
//! When the classifier is down the pipeline silently falls back to
//! pattern-only output; this log keeps an auditable record of those
//! fallbacks so the status surface can report degraded mode.

use std::sync::Mutex;

/// A single recorded degradation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
}

/// Append-only log of degradation events.
#[derive(Debug, Default)]
pub struct DegradationLog {
    events: Mutex<Vec<DegradationEvent>>,
}

impl DegradationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fallback to degraded operation.
    pub fn record(&self, component: &str, failure: &str) {
        tracing::warn!(component, failure, "degraded operation");
        if let Ok(mut events) = self.events.lock() {
            events.push(DegradationEvent {
                component: component.to_string(),
                failure: failure.to_string(),
            });
        }
    }

    /// All recorded events.
    pub fn events(&self) -> Vec<DegradationEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Whether any degradation has been recorded.
    pub fn is_degraded(&self) -> bool {
        self.events.lock().map(|e| !e.is_empty()).unwrap_or(false)
    }
}
