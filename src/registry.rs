//! Function statistics registry
//!
//! Per-function accumulation of arithmetic instruction counts, keyed by
//! function start address. Records are created at discovery time, grow
//! monotonically for the rest of the run, and are drained once by the
//! report generator. The registry never deletes.

use crate::classify::ArithClass;
use std::collections::HashMap;

/// Accumulated statistics for a single instrumented function
#[derive(Debug, Clone, Default)]
pub struct FunctionRecord {
    /// Function name (not guaranteed unique; addresses are the key)
    pub name: String,
    /// Function start address
    pub address: u64,
    /// Occurrence count per arithmetic class
    pub counts: HashMap<ArithClass, u64>,
    /// Sum of all class counts; kept in lockstep with `counts`
    pub total: u64,
    /// Hint that this function may also execute inlined elsewhere.
    /// Set once, never cleared.
    pub possibly_inlined: bool,
}

/// Registry of per-function statistics plus the address-to-name index
#[derive(Debug, Default)]
pub struct Registry {
    records: HashMap<u64, FunctionRecord>,
    names: HashMap<u64, String>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function at discovery time.
    ///
    /// Inserts a zero-count record and a name-index entry if the address
    /// is new; a no-op otherwise, so repeated discovery of the same
    /// address never disturbs accumulated counts.
    pub fn register(&mut self, address: u64, name: &str) {
        self.records.entry(address).or_insert_with(|| FunctionRecord {
            name: name.to_string(),
            address,
            ..FunctionRecord::default()
        });
        self.names.entry(address).or_insert_with(|| name.to_string());
    }

    /// Record one executed arithmetic instruction for a function.
    ///
    /// Creates the record on first use. The class count and the running
    /// total are incremented together, so `total` always equals the sum
    /// of per-class counts.
    pub fn record_arithmetic(&mut self, address: u64, class: ArithClass) {
        let record = self.records.entry(address).or_insert_with(|| FunctionRecord {
            address,
            ..FunctionRecord::default()
        });
        *record.counts.entry(class).or_insert(0) += 1;
        record.total += 1;
    }

    /// Flag a function as possibly inlined elsewhere
    pub fn mark_possibly_inlined(&mut self, address: u64) {
        if let Some(record) = self.records.get_mut(&address) {
            record.possibly_inlined = true;
        }
    }

    /// Look up a function name by address
    pub fn name_of(&self, address: u64) -> Option<&str> {
        self.names.get(&address).map(String::as_str)
    }

    /// Whether an address is already registered
    pub fn contains(&self, address: u64) -> bool {
        self.records.contains_key(&address)
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot all records for report generation
    pub fn records(&self) -> impl Iterator<Item = &FunctionRecord> {
        self.records.values()
    }

    /// Access a single record (mainly for tests and diagnostics)
    pub fn get(&self, address: u64) -> Option<&FunctionRecord> {
        self.records.get(&address)
    }
}
