/// Persistence-layer errors for the mapping store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("persistence backend error: {message}")]
    BackendError { message: String },

    #[error("failed to serialize mapping state: {reason}")]
    SerializationFailed { reason: String },

    #[error("persisted state is malformed: {details}")]
    MalformedState { details: String },
}
