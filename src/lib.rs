//! # pcmatrix
//!
//! A crate for pitch-class set analysis.
//!
//! The `set` module holds the modulo-12 set algebra: transposition,
//! inversion, complement, normal order, prime form and interval vectors.
//! Named set-classes are looked up in a `dictionary`, which ships with
//! Forte's catalogue built in.
//!
//! The `analyzer` module rotates several voice-groups against each other,
//! as in a canon, and scores every alignment by how many of a collection of
//! target sonorities appear in its columns. Results are delivered through
//! the `report` module.
//!
//! `spectrum` and `tuning` provide frequency helpers and Scala tuning files;
//! `generator` pairs up sets for compositional use and `music_math` holds
//! small numeric helpers such as quantization and rescaling.
//!
//! ```
//! use pcmatrix::analyzer::RotationMatrixAnalyzer;
//! use pcmatrix::config::AnalyzerConfig;
//! use pcmatrix::dictionary::SetClassDictionary;
//! use pcmatrix::set::PcSet;
//!
//! let forte = SetClassDictionary::builtin().unwrap();
//! let row: PcSet = "[0, 0, 0, 4, 4, 4, 7, 7, 0, 7, 2, 0, 7, 3, 0, 0]".parse().unwrap();
//!
//! let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
//! for group in 1..=3 {
//!     analyzer.add_row(group, &row, 0).unwrap();
//! }
//! for n in 0..12 {
//!     analyzer.add_named_search_set(&forte, "3-11", n).unwrap();
//!     analyzer.add_named_search_set(&forte, "3-11i", n).unwrap();
//! }
//!
//! let analysis = analyzer.run().unwrap();
//! assert_eq!(analysis.rotation_count, 256);
//! assert_eq!(analysis.count(6), 6);
//! ```

pub mod analyzer;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod job;
pub mod music_math;
mod parser;
pub mod pitch;
pub mod report;
pub mod set;
pub mod spectrum;
pub mod tuning;

pub use error::{Error, Result};
