//! # guardian-core
//!
//! Foundation crate for the Guardian anonymization engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{GuardianConfig, PatternDef};
pub use errors::{GuardianError, GuardianResult};
pub use models::{EntitySpan, MappingEntry, MergedEntity, StatusReport};
