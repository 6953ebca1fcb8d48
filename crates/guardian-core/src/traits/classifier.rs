use async_trait::async_trait;

use crate::errors::GuardianResult;
use crate::models::EntitySpan;

/// Black-box named-entity classifier.
///
/// Classification may take hundreds of milliseconds to seconds; the model
/// may still be loading or permanently absent. Callers must treat failure
/// as a normal condition and degrade to pattern-only redaction.
#[async_trait]
pub trait IEntityClassifier: Send + Sync {
    /// Classify text into labeled sub-word spans, in document order.
    async fn classify(&self, text: &str) -> GuardianResult<Vec<EntitySpan>>;

    /// Whether the classifier is currently able to serve requests.
    fn is_available(&self) -> bool;

    /// Human-readable classifier name.
    fn name(&self) -> &str;
}
