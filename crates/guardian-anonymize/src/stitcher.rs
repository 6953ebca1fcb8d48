//! Entity stitching — reconstructing whole words from sub-word spans.

use guardian_core::models::{EntitySpan, MergedEntity};

/// Marker prefix sub-word tokenizers attach to continuation fragments.
const CONTINUATION_MARKER: &str = "##";

/// Merge classifier spans back into whole-word entities.
///
/// A continuation span appends its text (marker stripped) to the current
/// accumulator without changing its label; any other span flushes the
/// accumulator and starts a new word. The trailing accumulator is flushed
/// at the end, so a sequence ending in continuations still produces its
/// final entity.
pub fn stitch(spans: &[EntitySpan]) -> Vec<MergedEntity> {
    let mut merged = Vec::new();
    let mut word = String::new();
    let mut label = String::new();

    for span in spans {
        if span.is_continuation {
            word.push_str(span.word.strip_prefix(CONTINUATION_MARKER).unwrap_or(&span.word));
        } else {
            if !word.is_empty() {
                merged.push(MergedEntity {
                    word: std::mem::take(&mut word),
                    label: std::mem::take(&mut label),
                });
            }
            word.push_str(&span.word);
            label = span.label.clone();
        }
    }
    if !word.is_empty() {
        merged.push(MergedEntity { word, label });
    }

    merged
}
