//! Function-of-interest filtering
//!
//! Decides which routines get instrumented. An empty pattern set means
//! everything is of interest. Otherwise a routine is included when its name
//! matches a pattern exactly or contains a pattern as a substring, which
//! tolerates decorated and namespaced names (`my::calc`, `_ZN4calc...`).
//!
//! Evaluated once per routine at discovery time, never per instruction.

use std::collections::HashSet;

/// Filter that determines which functions to instrument
#[derive(Debug, Clone, Default)]
pub struct FunctionFilter {
    /// Patterns to match against (empty = instrument everything)
    patterns: HashSet<String>,
}

impl FunctionFilter {
    /// Create a filter that includes every function
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter from a list of name patterns
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check if a function name is of interest
    pub fn matches(&self, name: &str) -> bool {
        if self.patterns.is_empty() {
            return true; // No filter = everything is of interest
        }

        // Exact match first
        if self.patterns.contains(name) {
            return true;
        }

        // Substring match (for namespaced/decorated names)
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }
}
