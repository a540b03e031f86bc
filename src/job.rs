//! A complete analysis described in JSON.
//!
//! ```json
//! {
//!   "score_filter": { "min": 0, "max": 99 },
//!   "report_details": false,
//!   "dictionary": "forte_dictionary.tsv",
//!   "groups": [
//!     { "rows": [[0, 4, 7, 0]] },
//!     { "rows": [[0, 4, 7, 0]], "transpose": 7 }
//!   ],
//!   "search_sets": [{ "set": [0, 4, 7], "transpositions": [0, 5, 7] }],
//!   "named_sets": [{ "name": "3-11" }]
//! }
//! ```
//!
//! Only `groups` is required. Groups are numbered by their position in the
//! list, starting at 1. A search set without `transpositions` is used
//! untransposed. Without a `dictionary` path the built-in catalogue is used;
//! a relative path is taken from the directory holding the job file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analyzer::RotationMatrixAnalyzer;
use crate::config::{AnalyzerConfig, ScoreRange};
use crate::dictionary::SetClassDictionary;
use crate::error::{Error, Result};
use crate::set::PcSet;

fn untransposed() -> Vec<i32> {
    vec![0]
}

/// One voice-group and the transposition applied to each of its rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    pub rows: Vec<PcSet>,
    #[serde(default)]
    pub transpose: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSetSpec {
    pub set: PcSet,
    #[serde(default = "untransposed")]
    pub transpositions: Vec<i32>,
}

/// A catalogue set-class to search for, by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedSetSpec {
    pub name: String,
    #[serde(default = "untransposed")]
    pub transpositions: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    #[serde(default)]
    pub score_filter: ScoreRange,
    #[serde(default)]
    pub report_details: bool,
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub search_sets: Vec<SearchSetSpec>,
    #[serde(default)]
    pub named_sets: Vec<NamedSetSpec>,
}

impl Job {
    pub fn from_json(text: &str) -> Result<Job> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a job file, resolving its dictionary path against the file's
    /// directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Job> {
        let path = path.as_ref();
        debug!("loading job from {}", path.display());

        let mut job = Job::from_json(&fs::read_to_string(path)?)?;
        if let (Some(dictionary), Some(base)) = (job.dictionary.as_mut(), path.parent()) {
            if dictionary.is_relative() {
                *dictionary = base.join(&*dictionary);
            }
        }
        Ok(job)
    }

    pub fn config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            score_filter: self.score_filter,
            report_details: self.report_details,
        }
    }

    /// The dictionary named by the job, or the built-in catalogue.
    pub fn dictionary(&self) -> Result<SetClassDictionary> {
        match self.dictionary {
            Some(ref path) => SetClassDictionary::load(path),
            None => SetClassDictionary::builtin(),
        }
    }

    /// An analyzer loaded with every group and search set of the job.
    pub fn build(&self, dictionary: &SetClassDictionary) -> Result<RotationMatrixAnalyzer> {
        let mut analyzer = RotationMatrixAnalyzer::new(self.config());

        for (index, group) in self.groups.iter().enumerate() {
            if group.rows.is_empty() {
                return Err(Error::EmptyGroup { group: index + 1 });
            }
            for row in &group.rows {
                analyzer.add_row(index + 1, row, group.transpose)?;
            }
        }
        for spec in &self.search_sets {
            for &n in &spec.transpositions {
                analyzer.add_search_set(&spec.set, n);
            }
        }
        for spec in &self.named_sets {
            for &n in &spec.transpositions {
                analyzer.add_named_search_set(dictionary, &spec.name, n)?;
            }
        }

        info!(
            "job has {} groups and {} search sets",
            analyzer.groups().len(),
            analyzer.search_sets().len()
        );
        Ok(analyzer)
    }
}
