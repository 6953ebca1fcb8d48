//! LiveEditSync — feedback-loop-free mediation between pipeline and surface.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use guardian_anonymize::AnonymizerEngine;
use guardian_core::traits::IEditableSurface;

/// Synchronizes pipeline output into an actively-edited surface.
///
/// Writing redacted text back into the surface fires the same change
/// notification a genuine user edit does, so every programmatic overwrite
/// runs under a reentrancy guard: Idle → Writing → Idle, with the guard
/// released on a timer that outlasts the host's event-loop turnaround.
/// Overwrite attempts while Writing are dropped, not queued.
///
/// Deep scans are debounced: every input event resets a single timer, and
/// only the content at the end of a quiet period reaches the classifier.
/// Each debounce cycle carries a generation number; a deep result whose
/// generation is no longer current is discarded, so a slow classifier
/// response can never overwrite newer content with stale redactions.
pub struct LiveEditSync {
    engine: Arc<AnonymizerEngine>,
    surface: Arc<dyn IEditableSurface>,
    guard: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
    debounce: Mutex<Option<JoinHandle<()>>>,
    debounce_ms: u64,
    guard_release_ms: u64,
}

impl LiveEditSync {
    pub fn new(
        engine: Arc<AnonymizerEngine>,
        surface: Arc<dyn IEditableSurface>,
        debounce_ms: u64,
        guard_release_ms: u64,
    ) -> Self {
        Self {
            engine,
            surface,
            guard: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            debounce: Mutex::new(None),
            debounce_ms,
            guard_release_ms,
        }
    }

    /// Handle a raw input event from the surface.
    ///
    /// Synthetic events (guard set) are ignored at the top. Otherwise the
    /// fast pass runs immediately and overwrites the surface if it changed
    /// anything, then the debounce timer for the deep pass is reset.
    pub fn on_input(&self) {
        if !self.engine.store().protection_enabled() {
            return;
        }
        if self.guard.load(Ordering::SeqCst) {
            debug!("input event during guarded write, ignored");
            return;
        }

        let text = self.surface.text();
        if text.is_empty() {
            return;
        }

        let fast = self.engine.anonymize_sync(&text);
        if fast != text {
            overwrite_guarded(
                &self.surface,
                &self.guard,
                &fast,
                self.guard_release_ms,
            );
        }

        self.reset_debounce();
    }

    /// Handle a paste event. The caller suppresses the native paste and
    /// passes the clipboard text here; the fast-redacted result is written
    /// immediately and a deep pass follows up in the background if it
    /// finds anything more.
    pub fn on_paste(&self, pasted: &str) {
        if !self.engine.store().protection_enabled() {
            return;
        }
        if self.guard.load(Ordering::SeqCst) {
            return;
        }

        let fast = self.engine.anonymize_sync(pasted);
        overwrite_guarded(
            &self.surface,
            &self.guard,
            &fast,
            self.guard_release_ms,
        );

        // Deep follow-up on the raw paste; a newer cycle supersedes it.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, paste deep scan skipped");
            return;
        };
        let engine = Arc::clone(&self.engine);
        let surface = Arc::clone(&self.surface);
        let guard = Arc::clone(&self.guard);
        let gen_counter = Arc::clone(&self.generation);
        let pasted = pasted.to_string();
        let release_ms = self.guard_release_ms;
        handle.spawn(async move {
            let deep = engine.anonymize_deep(&pasted).await;
            if gen_counter.load(Ordering::SeqCst) != generation {
                debug!("stale paste deep scan discarded");
                return;
            }
            if deep != fast {
                overwrite_guarded(&surface, &guard, &deep, release_ms);
            }
        });
    }

    /// Reset the single debounced deep-scan timer. The previous pending
    /// scan (if any) is aborted; only the state at the end of a quiet
    /// period reaches the classifier.
    fn reset_debounce(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, deep scan skipped");
            return;
        };
        let engine = Arc::clone(&self.engine);
        let surface = Arc::clone(&self.surface);
        let guard = Arc::clone(&self.guard);
        let gen_counter = Arc::clone(&self.generation);
        let debounce_ms = self.debounce_ms;
        let release_ms = self.guard_release_ms;

        let handle = runtime.spawn(async move {
            tokio::time::sleep(Duration::from_millis(debounce_ms)).await;
            if guard.load(Ordering::SeqCst) {
                return;
            }

            let current = surface.text();
            let deep = engine.anonymize_deep(&current).await;

            // A newer input or paste cycle started while the classifier
            // was working; its result must not clobber newer content.
            if gen_counter.load(Ordering::SeqCst) != generation {
                debug!("stale deep scan discarded");
                return;
            }
            if deep != current {
                overwrite_guarded(&surface, &guard, &deep, release_ms);
            }
        });

        let mut slot = self.debounce.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = slot.replace(handle) {
            old.abort();
        }
    }

    /// Whether the synchronizer is currently in the Writing state.
    pub fn is_writing(&self) -> bool {
        self.guard.load(Ordering::SeqCst)
    }
}

/// Overwrite the surface under the reentrancy guard.
///
/// Re-entrant attempts while Writing are dropped. The guard is released
/// on a timer even when the write fails, so a detached surface can never
/// deadlock the synchronizer in the Writing state. The release timer
/// needs a runtime; without one the overwrite is skipped entirely rather
/// than setting a guard nothing would ever release.
fn overwrite_guarded(
    surface: &Arc<dyn IEditableSurface>,
    guard: &Arc<AtomicBool>,
    text: &str,
    release_ms: u64,
) {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        debug!("no async runtime, surface overwrite skipped");
        return;
    };

    if guard.swap(true, Ordering::SeqCst) {
        debug!("overwrite attempted while writing, dropped");
        return;
    }

    if let Err(e) = surface.set_text(text) {
        warn!(error = %e, "surface overwrite failed");
    }

    let guard = Arc::clone(guard);
    handle.spawn(async move {
        tokio::time::sleep(Duration::from_millis(release_ms)).await;
        guard.store(false, Ordering::SeqCst);
    });
}
