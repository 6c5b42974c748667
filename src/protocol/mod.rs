//! The i3bar streaming protocol as emitted by i3status.
//!
//! ```text
//! {"version":1}
//! [
//! [{"name":"memory",...},{"name":"ethernet",...}]
//! ,[{"name":"memory",...},{"name":"ethernet",...}]
//! ,[...]
//! ```
//!
//! Two header lines, then one JSON array per line. Every array after the
//! first carries a leading comma.

pub mod splice;

use crate::error::Result;
use crate::models::StatusEntry;

/// Number of lines echoed untouched before the first status line.
pub const HEADER_LINES: usize = 2;

const SUFFIX: &str = "]";

/// Position of a status line in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    First,
    Continuation,
}

impl Frame {
    pub fn for_line(index: usize) -> Self {
        if index == 0 {
            Frame::First
        } else {
            Frame::Continuation
        }
    }

    /// The JSON array part of an input line.
    pub fn payload<'a>(&self, line: &'a str) -> &'a str {
        match self {
            Frame::First => line,
            Frame::Continuation => line.strip_prefix(',').unwrap_or(line),
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Frame::First => "[",
            Frame::Continuation => ",[",
        }
    }
}

/// Parse one status line payload into its entries, in source order.
pub fn parse_entries(payload: &str) -> Result<Vec<StatusEntry>> {
    let entries: Vec<StatusEntry> = serde_json::from_str(payload)?;
    for entry in &entries {
        entry.validate()?;
    }
    Ok(entries)
}

/// Serialise entries into an output line (without the newline).
pub fn render_line(frame: Frame, entries: &[StatusEntry]) -> Result<String> {
    let mut out = String::from(frame.prefix());
    for (idx, entry) in entries.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&serde_json::to_string(entry)?);
    }
    out.push_str(SUFFIX);
    Ok(out)
}
