//! Trait seams for external collaborators.
//!
//! The engine consumes its host environment exclusively through these
//! contracts: the named-entity classifier, the persistent key-value store,
//! the editable surface, and the notification channel.

mod classifier;
mod kv;
mod notifier;
mod surface;

pub use classifier::IEntityClassifier;
pub use kv::IKeyValueStore;
pub use notifier::INotifier;
pub use surface::IEditableSurface;
