//! Instrumentation host interface
//!
//! The dynamic-binary-instrumentation host owns process injection, code
//! rewriting, and callback dispatch; the profiling core only consumes the
//! event stream defined here. Keeping the boundary a trait lets unit tests
//! drive the core with synthetic event sequences instead of a live
//! instrumented process.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A routine contained in a loaded image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    /// Symbol name as reported by the host
    pub name: String,
    /// Start address (the unit of attribution)
    pub address: u64,
}

/// A loaded executable image (main binary or shared library)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Image path or name
    pub name: String,
    /// Load base address
    pub base: u64,
    /// Whether this image is a dynamically loaded library
    #[serde(default)]
    pub shared_library: bool,
    /// Routines discovered in the image
    #[serde(default)]
    pub routines: Vec<Routine>,
}

/// Capability set the host invokes on the profiling core.
///
/// Callbacks may arrive concurrently from multiple target threads, so all
/// methods take `&self`; implementations guard their shared state.
pub trait InstrumentationEvents {
    /// An image was loaded; the core offers each contained routine to
    /// discovery.
    fn on_image_loaded(&self, image: &Image);

    /// A routine was discovered. Returns `true` when the host should
    /// instrument it (instruction-level and entry/exit callbacks).
    fn on_routine_discovered(&self, name: &str, address: u64, from_shared_library: bool) -> bool;

    /// An arithmetic-candidate instruction executed inside an
    /// instrumented routine.
    fn on_instruction_executed(&self, function_address: u64, mnemonic: &str);

    /// Control entered an instrumented routine.
    fn on_routine_entered(&self, function_address: u64, call_site: u64);

    /// Control left an instrumented routine.
    fn on_routine_exited(&self, function_address: u64);

    /// The target program finished; generate the report and release the
    /// output sink. Runs exactly once per run.
    fn on_program_finished(&self) -> Result<()>;
}
