//! Categorical attachment blocking.
//!
//! Structured and binary attachments are not scanned; while protection is
//! on they are blocked outright and the user is told why.

use std::sync::Arc;

use tracing::info;

use guardian_core::traits::INotifier;
use guardian_store::MappingStore;

/// How the attachment is being introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Drag-and-drop file transfer.
    FileDrop,
    /// File picker / attach button.
    FilePicker,
}

/// Policy decision for an attachment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Block,
}

/// Evaluates attachment attempts against the protection toggle.
pub struct AttachmentGuard {
    store: Arc<MappingStore>,
    notifier: Option<Arc<dyn INotifier>>,
}

impl AttachmentGuard {
    pub fn new(store: Arc<MappingStore>) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    /// Attach a notification channel for block warnings.
    pub fn with_notifier(mut self, notifier: Arc<dyn INotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Decide whether an attachment attempt may proceed. Blocks whenever
    /// protection is enabled, and fires a best-effort warning.
    pub fn evaluate(&self, kind: AttachmentKind) -> Verdict {
        if !self.store.protection_enabled() {
            return Verdict::Allow;
        }

        info!(?kind, "attachment blocked");
        if let Some(notifier) = &self.notifier {
            let message = match kind {
                AttachmentKind::FileDrop => {
                    "Drag-and-drop file uploads are blocked to prevent data leakage."
                }
                AttachmentKind::FilePicker => {
                    "File attachments are disabled by your local security policy."
                }
            };
            notifier.notify("Sensitive Data Blocked", message);
        }
        Verdict::Block
    }
}
