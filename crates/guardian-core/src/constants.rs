/// Guardian system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Quiet interval after the last input event before the deep scan fires (ms).
pub const DEFAULT_DEBOUNCE_MS: u64 = 1500;

/// Delay before the reentrancy guard is released after a programmatic
/// overwrite (ms). Must exceed one event-loop turnaround of the host so the
/// synthetic change notification from the overwrite itself is absorbed.
pub const DEFAULT_GUARD_RELEASE_MS: u64 = 100;

/// Minimum trimmed length of a merged entity before it is redacted.
/// Shorter fragments are classifier noise, not names.
pub const DEFAULT_MIN_ENTITY_CHARS: usize = 2;

/// Entity label substrings that trigger redaction, with the tag minted for
/// each. Labels arrive as scheme-prefixed variants (`B-PER`, `I-LOC`), so
/// matching is by substring.
pub const DEFAULT_ENTITY_LABELS: &[(&str, &str)] = &[("PER", "PER"), ("LOC", "LOC")];

/// Persisted key holding the serialized placeholder→real-value map.
pub const KEY_ANONYMIZATION_MAP: &str = "anonymization_map";

/// Persisted key holding the next placeholder ordinal.
pub const KEY_ORDINAL_COUNTER: &str = "ordinal_counter";

/// Persisted key holding the protection toggle.
pub const KEY_PROTECTION_ENABLED: &str = "protection_enabled";
