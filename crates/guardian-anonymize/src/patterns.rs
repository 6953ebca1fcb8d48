//! Compiled sensitive-data pattern set.
//!
//! Pattern definitions come from configuration (`PatternDef`), so new
//! pattern types are added without touching engine internals. Compilation
//! happens once when the set is built; a bad regex is a construction
//! error, not a scan-time surprise.

use regex::Regex;

use guardian_core::config::{default_patterns, PatternDef};
use guardian_core::errors::{GuardianError, GuardianResult};

/// A single compiled pattern.
pub struct CompiledPattern {
    pub name: String,
    pub tag: String,
    pub regex: Regex,
}

/// An ordered set of compiled patterns. Order is priority: each pattern
/// scans the cumulative output of the previous one, so text consumed by
/// an earlier pattern is invisible to later ones.
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Compile a pattern set from definitions, preserving order.
    pub fn compile(defs: &[PatternDef]) -> GuardianResult<Self> {
        let mut patterns = Vec::with_capacity(defs.len());
        for def in defs {
            let regex = Regex::new(&def.regex).map_err(|e| GuardianError::InvalidPattern {
                name: def.name.clone(),
                reason: e.to_string(),
            })?;
            patterns.push(CompiledPattern {
                name: def.name.clone(),
                tag: def.tag.clone(),
                regex,
            });
        }
        Ok(Self { patterns })
    }

    /// The built-in set: email, credit card, SSN.
    pub fn builtin() -> Self {
        Self::compile(&default_patterns()).expect("built-in patterns are valid")
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns_compile() {
        let set = PatternSet::builtin();
        assert_eq!(set.len(), 3);
        let names: Vec<&str> = set.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["email", "credit_card", "ssn"]);
    }

    #[test]
    fn invalid_regex_is_a_construction_error() {
        let defs = vec![PatternDef {
            name: "broken".to_string(),
            tag: "BROKEN".to_string(),
            regex: "[unclosed".to_string(),
        }];
        assert!(PatternSet::compile(&defs).is_err());
    }
}
