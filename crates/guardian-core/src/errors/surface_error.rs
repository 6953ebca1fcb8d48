/// Errors from the editable surface (the host input widget).
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("editable surface is detached")]
    Detached,

    #[error("failed to write to surface: {reason}")]
    WriteFailed { reason: String },
}
