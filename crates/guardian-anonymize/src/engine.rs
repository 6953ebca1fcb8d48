//! AnonymizerEngine — the main entry point for guardian-anonymize.
//!
//! Orchestrates the synchronous pattern pass and the asynchronous
//! classifier pass over a shared mapping store. All session state
//! (ordinal counter, mapping cache) lives in the store, so the engine
//! itself carries no globals and can be shared behind an `Arc`.

use std::sync::Arc;

use regex::{NoExpand, Regex};
use tracing::debug;

use guardian_core::config::GuardianConfig;
use guardian_core::errors::GuardianResult;
use guardian_core::traits::IEntityClassifier;
use guardian_store::MappingStore;

use crate::degradation::DegradationLog;
use crate::detector::PatternDetector;
use crate::patterns::PatternSet;
use crate::stitcher::stitch;

/// The two-tier anonymization pipeline.
pub struct AnonymizerEngine {
    store: Arc<MappingStore>,
    detector: PatternDetector,
    classifier: Option<Arc<dyn IEntityClassifier>>,
    degradation: DegradationLog,
    config: GuardianConfig,
}

impl AnonymizerEngine {
    /// Build an engine from configuration. Fails only if a configured
    /// pattern does not compile.
    pub fn new(store: Arc<MappingStore>, config: GuardianConfig) -> GuardianResult<Self> {
        let set = PatternSet::compile(&config.patterns)?;
        Ok(Self {
            store,
            detector: PatternDetector::new(set),
            classifier: None,
            degradation: DegradationLog::new(),
            config,
        })
    }

    /// Attach a named-entity classifier for the deep pass. Without one,
    /// `anonymize_deep` is equivalent to `anonymize_sync`.
    pub fn with_classifier(mut self, classifier: Arc<dyn IEntityClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// The fast pass: pattern-only redaction. Synchronous, deterministic,
    /// safe to run on every keystroke.
    pub fn anonymize_sync(&self, text: &str) -> String {
        self.detector.redact(&self.store, text)
    }

    /// The deep pass: pattern pass first (patterns take precedence and are
    /// cheaper), then classifier entities. Classifier failure of any kind
    /// returns the pattern-only result — never an error.
    pub async fn anonymize_deep(&self, text: &str) -> String {
        let redacted = self.anonymize_sync(text);

        let Some(classifier) = &self.classifier else {
            return redacted;
        };
        if !classifier.is_available() {
            self.degradation
                .record(classifier.name(), "classifier not available");
            return redacted;
        }

        let spans = match classifier.classify(&redacted).await {
            Ok(spans) => spans,
            Err(e) => {
                self.degradation.record(classifier.name(), &e.to_string());
                return redacted;
            }
        };

        let mut working = redacted;
        for entity in stitch(&spans) {
            let clean = entity.word.trim();
            if clean.chars().count() <= self.config.min_entity_chars {
                continue;
            }
            let Some(tag) = self.tag_for_label(&entity.label) else {
                continue;
            };

            let placeholder = self.store.placeholder_for(clean, tag);
            // Replace every case-insensitive occurrence of the entity text.
            let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(clean))) else {
                continue;
            };
            working = re
                .replace_all(&working, NoExpand(placeholder.as_str()))
                .into_owned();
            debug!(entity = %clean, %placeholder, "entity redacted");
        }
        working
    }

    /// Map an entity label to its placeholder tag, if the label denotes a
    /// redactable entity class. Labels arrive scheme-prefixed (`B-PER`,
    /// `I-LOC`), so matching is by substring.
    fn tag_for_label(&self, label: &str) -> Option<&str> {
        self.config
            .entity_labels
            .iter()
            .find(|(substring, _)| label.contains(substring.as_str()))
            .map(|(_, tag)| tag.as_str())
    }

    /// The shared mapping store.
    pub fn store(&self) -> &Arc<MappingStore> {
        &self.store
    }

    /// Degradation log for the deep pass.
    pub fn degradation(&self) -> &DegradationLog {
        &self.degradation
    }
}
