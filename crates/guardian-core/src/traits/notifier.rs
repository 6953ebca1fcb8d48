/// User-visible notification channel.
///
/// The receiving end may be torn down or not yet ready; implementations
/// swallow delivery errors rather than surfacing them.
pub trait INotifier: Send + Sync {
    /// Fire a notification. Best-effort, never fails.
    fn notify(&self, title: &str, message: &str);
}
