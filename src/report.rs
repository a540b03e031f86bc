//! Output of a rotation analysis.
//!
//! `RotationMatrixAnalyzer::run_with` drives a `Reporter` through the run:
//! `begin` once, then either `snapshot` for every counted snapshot (when
//! details are on) or `progress` after every snapshot (when they are off),
//! and finally `summary`. Snapshots arrive in traversal order.
//!
//! `TextReporter` writes the classic console report:
//!
//! ```text
//! ==========
//! [0, 0, 0, 4, 4, 4, 7, 7, 0, 7, 2, 0, 7, 3, 0, 0] Group 1
//! [4, 4, 7, 7, 0, 7, 2, 0, 7, 3, 0, 0, 0, 0, 0, 4] Group 2
//! [0, 7, 2, 0, 7, 3, 0, 0, 0, 0, 0, 4, 4, 4, 7, 7] Group 3
//! ------------------------------------------------
//! [0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1] Score
//!
//! Total Score: 6
//! ```

use std::io::Write;

use serde::Serialize;

use crate::analyzer::{Analysis, VoiceGroup};
use crate::error::Result;

/// A view of the matrix at one point of the rotation.
#[derive(Debug)]
pub struct Snapshot<'a> {
    /// 1-based position of this snapshot in the traversal.
    pub index: u64,
    /// The groups as they were before the run began.
    pub original: &'a [VoiceGroup],
    /// The groups in their current rotated state.
    pub groups: &'a [VoiceGroup],
    /// How many columns each group is currently rotated to the right.
    pub offsets: &'a [usize],
    /// Number of search sets matched in each column.
    pub column_counts: &'a [usize],
    /// Sum of `column_counts`.
    pub score: u64,
}

impl<'a> Snapshot<'a> {
    pub fn columns(&self) -> usize {
        self.column_counts.len()
    }
}

/// Receives the events of an analysis run.
pub trait Reporter {
    fn begin(&mut self, _maximum_rotations: u64) -> Result<()> {
        Ok(())
    }

    /// A snapshot whose score passed the filter, when details are enabled.
    fn snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;

    /// Called after every snapshot when details are disabled.
    fn progress(&mut self, _rotation_count: u64, _maximum_rotations: u64) -> Result<()> {
        Ok(())
    }

    fn summary(&mut self, analysis: &Analysis) -> Result<()>;
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn snapshot(&mut self, _snapshot: &Snapshot<'_>) -> Result<()> {
        Ok(())
    }

    fn summary(&mut self, _analysis: &Analysis) -> Result<()> {
        Ok(())
    }
}

/// Writes the human-readable report to any `Write` sink.
pub struct TextReporter<W: Write> {
    out: W,
    progress_shown: bool,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> TextReporter<W> {
        TextReporter {
            out,
            progress_shown: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn bracketed(counts: &[usize]) -> String {
    let inner: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

impl<W: Write> Reporter for TextReporter<W> {
    fn snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        writeln!(self.out, "{}", "=".repeat(10))?;
        for (number, group) in snapshot.groups.iter().enumerate() {
            for row in group.rows() {
                writeln!(self.out, "{} Group {}", row, number + 1)?;
            }
        }
        writeln!(self.out, "{}", "-".repeat(snapshot.columns() * 3))?;
        writeln!(self.out, "{} Score", bracketed(snapshot.column_counts))?;
        writeln!(self.out)?;
        writeln!(self.out, "Total Score: {}", snapshot.score)?;
        Ok(())
    }

    fn progress(&mut self, rotation_count: u64, maximum_rotations: u64) -> Result<()> {
        write!(self.out, "\r{} of {} processed...", rotation_count, maximum_rotations)?;
        self.out.flush()?;
        self.progress_shown = true;
        Ok(())
    }

    fn summary(&mut self, analysis: &Analysis) -> Result<()> {
        if self.progress_shown {
            writeln!(self.out)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "Score : # Instances")?;
        writeln!(self.out, "{}", "=".repeat(19))?;
        for (score, count) in &analysis.summary_totals {
            writeln!(self.out, "{:>6} : {:>8}", score, count)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "** End of Report")?;
        self.out.flush()?;
        Ok(())
    }
}

/// An owned copy of a reported snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SnapshotRecord {
    pub index: u64,
    /// The groups as they were before the run began.
    pub original: Vec<VoiceGroup>,
    pub offsets: Vec<usize>,
    pub groups: Vec<VoiceGroup>,
    pub column_counts: Vec<usize>,
    pub score: u64,
}

/// Keeps every event in memory, for callers that post-process results.
#[derive(Clone, Debug, Default)]
pub struct CollectingReporter {
    pub snapshots: Vec<SnapshotRecord>,
    pub progress_events: u64,
    pub analysis: Option<Analysis>,
}

impl Reporter for CollectingReporter {
    fn snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        self.snapshots.push(SnapshotRecord {
            index: snapshot.index,
            original: snapshot.original.to_vec(),
            offsets: snapshot.offsets.to_vec(),
            groups: snapshot.groups.to_vec(),
            column_counts: snapshot.column_counts.to_vec(),
            score: snapshot.score,
        });
        Ok(())
    }

    fn progress(&mut self, _rotation_count: u64, _maximum_rotations: u64) -> Result<()> {
        self.progress_events += 1;
        Ok(())
    }

    fn summary(&mut self, analysis: &Analysis) -> Result<()> {
        self.analysis = Some(analysis.clone());
        Ok(())
    }
}
