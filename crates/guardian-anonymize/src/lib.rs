//! # guardian-anonymize
//!
//! The anonymization pipeline: a synchronous regex pattern pass for
//! structurally-recognizable sensitive data, and an asynchronous deep pass
//! that stitches classifier output into whole-word entities and redacts
//! person/location names. The deep pass degrades gracefully to the
//! pattern-only result whenever the classifier is unavailable.

pub mod degradation;
pub mod detector;
pub mod engine;
pub mod patterns;
pub mod stitcher;

pub use degradation::DegradationLog;
pub use detector::PatternDetector;
pub use engine::AnonymizerEngine;
pub use patterns::PatternSet;
pub use stitcher::stitch;
