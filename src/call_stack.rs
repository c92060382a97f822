//! Call hierarchy tracking
//!
//! An explicit stack of call contexts, pushed on routine entry and popped
//! on routine exit. Popping does not verify that the departing routine is
//! the one on top: tail calls and stack unwinding can desynchronize the
//! pairing, and the tracker tolerates that silently rather than treating
//! it as fatal. The only cost is depth reporting drift.

/// One active call frame
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Name of the entered function (empty if never discovered)
    pub function: String,
    /// Address the call was made from
    pub call_site: u64,
    /// Stack depth at the moment of the push
    pub depth: u32,
}

/// Stack of active call contexts
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<CallContext>,
}

impl CallStack {
    /// Create an empty call stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Current depth (element count)
    pub fn depth(&self) -> u32 {
        self.frames.len() as u32
    }

    /// Whether no calls are active
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Push a frame for an entered routine, returning its depth
    pub fn push(&mut self, function: String, call_site: u64) -> u32 {
        let depth = self.depth();
        self.frames.push(CallContext {
            function,
            call_site,
            depth,
        });
        depth
    }

    /// Pop the top frame. Popping an empty stack is a no-op returning
    /// `None`, never an error.
    pub fn pop(&mut self) -> Option<CallContext> {
        self.frames.pop()
    }

    /// Peek at the innermost active frame
    pub fn top(&self) -> Option<&CallContext> {
        self.frames.last()
    }
}
