//! The error type shared by every fallible operation in the crate.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building sets, loading reference data
/// or running an analysis.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw integer outside `0..=11` was offered where a strict pitch class
    /// was required.
    #[error("{value} is not a pitch class (expected 0-11)")]
    InvalidPitchClass { value: i64 },

    /// Voice-groups are numbered from 1, and a new group must follow the
    /// last existing one.
    #[error("group id {group} is out of range (groups are numbered from 1 without gaps)")]
    InvalidGroupId { group: usize },

    #[error("rows must contain at least one pitch class")]
    EmptyRow,

    /// Every row in every group has to span the same number of columns.
    #[error("row added to group {group} has {found} columns, expected {expected}")]
    RowLengthMismatch {
        group: usize,
        expected: usize,
        found: usize,
    },

    #[error("the matrix has no voice-groups")]
    NoGroups,

    /// A job listed a group without rows.
    #[error("group {group} has no rows")]
    EmptyGroup { group: usize },

    #[error("score filter {min}..={max} is empty")]
    InvalidScoreRange { min: u64, max: u64 },

    /// `columns^(groups - 1)` does not fit in a `u64`.
    #[error("{columns} columns across {groups} groups overflows the rotation counter")]
    RotationOverflow { columns: usize, groups: usize },

    #[error("no set-class named {name:?} in the dictionary")]
    UnknownSetClass { name: String },

    /// A row of the reference table could not be read.
    #[error("reference table line {line}: {reason}")]
    MalformedReference { line: usize, reason: String },

    /// A line of a Scala tuning file could not be read.
    #[error("tuning file line {line}: {reason}")]
    MalformedTuning { line: usize, reason: String },

    /// Free-form input such as a set literal failed to parse.
    #[error("could not parse {input:?}: {reason}")]
    Syntax { input: String, reason: String },

    /// The run was cancelled through its `CancelToken`.
    #[error("analysis cancelled after {completed} rotations")]
    Cancelled { completed: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid job description: {0}")]
    Job(#[from] serde_json::Error),
}
