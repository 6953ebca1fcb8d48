//! Error types for the Guardian workspace.
//!
//! One enum per subsystem, aggregated into [`GuardianError`]. Redaction is
//! best-effort: most callers log these and degrade rather than propagate.

mod classifier_error;
mod store_error;
mod surface_error;

pub use classifier_error::ClassifierError;
pub use store_error::StoreError;
pub use surface_error::SurfaceError;

/// Top-level error aggregating all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum GuardianError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },
}

pub type GuardianResult<T> = std::result::Result<T, GuardianError>;
