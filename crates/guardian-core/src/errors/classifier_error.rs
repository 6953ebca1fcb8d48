/// Errors from the named-entity classifier.
///
/// These are expected, non-exceptional conditions: the pipeline treats any
/// of them as "no entities found" and falls back to pattern-only output.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier '{name}' is not available: {reason}")]
    Unavailable { name: String, reason: String },

    #[error("classification failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("classifier returned malformed output: {details}")]
    MalformedOutput { details: String },
}
