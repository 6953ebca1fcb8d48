use serde::{Deserialize, Serialize};

/// Read-only status surface for UI glue: the protection toggle and the
/// number of mapping entries held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub protection_enabled: bool,
    pub mapping_entries: usize,
}
