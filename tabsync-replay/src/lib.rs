//! Headless replay of scripted scroll gestures through `tabsync`.

pub mod easing;
pub mod error;
pub mod runner;
pub mod scenario;
pub mod surface;

pub use error::ReplayError;
pub use runner::{Replay, TraceRow};
pub use scenario::{GestureEvent, Scenario, TimedEvent, Variant};

use std::io::Write;

/// Write a trace as aligned text lines.
pub fn write_trace(out: &mut impl Write, trace: &[TraceRow]) -> std::io::Result<()> {
    for row in trace {
        let offsets: Vec<String> = row.offsets.iter().map(|o| format!("{o:.1}")).collect();
        write!(
            out,
            "{:>6}ms  translation {:>8.2}  active {}  offsets [{}]",
            row.at_ms,
            row.translation,
            row.active_index,
            offsets.join(", ")
        )?;
        if !row.notes.is_empty() {
            write!(out, "  | {}", row.notes.join("; "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
