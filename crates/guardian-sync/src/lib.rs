//! # guardian-sync
//!
//! Mediates between the anonymization pipeline and a live editable
//! surface without feedback loops: programmatic overwrites are guarded so
//! the synthetic change events they fire are ignored, deep scans are
//! debounced behind a quiet interval, and a reverse watcher substitutes
//! known placeholders back to real values in rendered output.

pub mod attachment;
pub mod synchronizer;
pub mod watcher;

pub use attachment::{AttachmentGuard, AttachmentKind, Verdict};
pub use synchronizer::LiveEditSync;
pub use watcher::RenderWatcher;
