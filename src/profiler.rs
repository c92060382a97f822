//! Profiler context
//!
//! Ties the classifier, filter, registry, and call stack together behind
//! the host-facing [`InstrumentationEvents`] interface. All shared state
//! lives on this object rather than in process globals, so independent
//! profiling runs (and tests) cannot cross-contaminate.
//!
//! Host callbacks may arrive concurrently from multiple target threads;
//! the registry and call stack are each guarded by a mutex. Every
//! callback completes in bounded time on the target's hot path, except
//! report generation which runs once at finalization.

use crate::call_stack::CallStack;
use crate::classify::{self, ArithClass};
use crate::events::{Image, InstrumentationEvents};
use crate::filter::FunctionFilter;
use crate::registry::Registry;
use crate::report;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Configuration for one profiling run
#[derive(Debug)]
pub struct ProfilerConfig {
    /// Track call hierarchy (entry/exit stack)
    pub track_calls: bool,
    /// Instrument routines from shared libraries
    pub include_libraries: bool,
    /// Function-of-interest patterns
    pub filter: FunctionFilter,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            track_calls: true,
            include_libraries: false,
            filter: FunctionFilter::all(),
        }
    }
}

/// The profiling core for a single run
pub struct Profiler {
    config: ProfilerConfig,
    registry: Mutex<Registry>,
    call_stack: Mutex<CallStack>,
    /// Output sink, consumed by the one-and-only report generation
    sink: Mutex<Option<Box<dyn Write + Send>>>,
}

/// Recover the guard even if a callback panicked while holding the lock;
/// counters stay usable for the final report.
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl Profiler {
    /// Create a profiler writing its report to `sink`
    pub fn new(config: ProfilerConfig, sink: Box<dyn Write + Send>) -> Self {
        Self {
            config,
            registry: Mutex::new(Registry::new()),
            call_stack: Mutex::new(CallStack::new()),
            sink: Mutex::new(Some(sink)),
        }
    }

    /// Access the registry (tests and diagnostics)
    pub fn registry(&self) -> MutexGuard<'_, Registry> {
        lock_unpoisoned(&self.registry)
    }

    /// Current call-stack depth
    pub fn call_depth(&self) -> u32 {
        lock_unpoisoned(&self.call_stack).depth()
    }
}

impl InstrumentationEvents for Profiler {
    fn on_image_loaded(&self, image: &Image) {
        debug!("image loaded: {} @ 0x{:x}", image.name, image.base);

        for routine in &image.routines {
            self.on_routine_discovered(&routine.name, routine.address, image.shared_library);
        }
    }

    fn on_routine_discovered(&self, name: &str, address: u64, from_shared_library: bool) -> bool {
        if from_shared_library && !self.config.include_libraries {
            return false;
        }
        if !self.config.filter.matches(name) {
            return false;
        }

        let mut registry = lock_unpoisoned(&self.registry);
        match registry.name_of(address) {
            Some(known) if known != name => {
                // Same start address reported under another symbol:
                // the earlier registration wins, but flag the record.
                registry.mark_possibly_inlined(address);
            }
            Some(_) => {} // re-discovery, idempotent
            None => {
                debug!("instrumenting function: {name} @ 0x{address:x}");
                registry.register(address, name);
            }
        }
        true
    }

    fn on_instruction_executed(&self, function_address: u64, mnemonic: &str) {
        let class = classify::classify(mnemonic);
        if class == ArithClass::Unclassified {
            return;
        }
        lock_unpoisoned(&self.registry).record_arithmetic(function_address, class);
    }

    fn on_routine_entered(&self, function_address: u64, call_site: u64) {
        if !self.config.track_calls {
            return;
        }
        let name = lock_unpoisoned(&self.registry)
            .name_of(function_address)
            .unwrap_or_default()
            .to_string();

        let mut stack = lock_unpoisoned(&self.call_stack);
        debug!(
            "{}-> {} @ 0x{:x}",
            "  ".repeat(stack.depth() as usize),
            name,
            function_address
        );
        stack.push(name, call_site);
    }

    fn on_routine_exited(&self, _function_address: u64) {
        if !self.config.track_calls {
            return;
        }
        // No verification that the popped frame matches the exiting
        // routine; tail calls and unwinds are tolerated silently.
        lock_unpoisoned(&self.call_stack).pop();
    }

    fn on_program_finished(&self) -> Result<()> {
        let Some(mut sink) = lock_unpoisoned(&self.sink).take() else {
            debug!("report already generated, ignoring duplicate finish");
            return Ok(());
        };

        let registry = lock_unpoisoned(&self.registry);
        report::write_report(&registry, &mut sink).context("failed to write profile report")?;
        sink.flush().context("failed to flush profile report")?;
        Ok(())
    }
}
