//! Arithprof - arithmetic instruction profiler core
//!
//! Classifies arithmetic machine instructions executed by an instrumented
//! target program, attributes them to the enclosing function, tracks call
//! hierarchy, and emits a ranked report. The dynamic-binary-instrumentation
//! host is an external collaborator that delivers the event stream; this
//! crate owns classification, aggregation, call-stack bookkeeping, and
//! reporting.

pub mod call_stack;
pub mod classify;
pub mod cli;
pub mod events;
pub mod filter;
pub mod profiler;
pub mod registry;
pub mod replay;
pub mod report;
