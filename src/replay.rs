//! Trace replay event source
//!
//! The instrumentation host records its callback stream as one JSON object
//! per line; this module replays such a stream into any
//! [`InstrumentationEvents`] implementation and fires the finalization
//! callback when the stream ends. This is the event source behind the
//! `--trace` flag and the integration tests.

use crate::events::{Image, InstrumentationEvents};
use serde::Deserialize;
use std::io::BufRead;
use thiserror::Error;

/// One recorded host callback
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// An image was loaded, with its discovered routines
    Image(Image),
    /// An arithmetic-candidate instruction executed
    Insn { function: u64, mnemonic: String },
    /// Control entered an instrumented routine
    Enter { function: u64, call_site: u64 },
    /// Control left an instrumented routine
    Exit { function: u64 },
}

/// Errors raised while replaying a recorded trace
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read trace stream")]
    Io(#[from] std::io::Error),

    #[error("malformed trace event at line {line}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Finish(#[from] anyhow::Error),
}

/// Replay a recorded event stream into the profiling core.
///
/// Blank lines are skipped. The finalization callback fires after the
/// last event, so the report is generated even for an empty stream.
/// Returns the number of events delivered.
pub fn replay<R, E>(reader: R, sink: &E) -> Result<usize, ReplayError>
where
    R: BufRead,
    E: InstrumentationEvents,
{
    let mut delivered = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: TraceEvent =
            serde_json::from_str(&line).map_err(|source| ReplayError::Malformed {
                line: idx + 1,
                source,
            })?;

        match event {
            TraceEvent::Image(image) => sink.on_image_loaded(&image),
            TraceEvent::Insn { function, mnemonic } => {
                sink.on_instruction_executed(function, &mnemonic);
            }
            TraceEvent::Enter { function, call_site } => {
                sink.on_routine_entered(function, call_site);
            }
            TraceEvent::Exit { function } => sink.on_routine_exited(function),
        }
        delivered += 1;
    }

    sink.on_program_finished()?;
    Ok(delivered)
}
