//! A catalogue of named set-classes.
//!
//! The catalogue is read from a tab-separated reference table with one entry
//! per line:
//!
//! ```text
//! <name> \t <canonical set> \t <interval vector> \t <description>
//! ```
//!
//! Sets and vectors are written as strings of alphanumeric digits (`A` = 10,
//! `B` = 11, and `C` = 12 in interval vectors). Entries are taken as given;
//! nothing here recomputes a prime form.
//!
//! A copy of Forte's catalogue, including the `i`-suffixed inversions (for
//! example `3-11i`, the major triad), is embedded in the crate and available
//! through `SetClassDictionary::builtin`.
//!
//! ```
//! use pcmatrix::dictionary::SetClassDictionary;
//!
//! let forte = SetClassDictionary::builtin().unwrap();
//! let major = forte.get_set("3-11i").unwrap();
//! assert_eq!(major.to_ints(), vec![0, 4, 7]);
//! assert_eq!(forte.get_description("3-11i"), Some("Major Triad"));
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser;
use crate::set::{IntervalVector, PcSet};

const FORTE_TABLE: &str = include_str!("../data/forte_dictionary.tsv");

/// One entry of the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetClass {
    /// Catalogue name, e.g. `"4-Z15"` or `"3-11i"`.
    pub name: String,
    /// The canonical representative of the class.
    pub set: PcSet,
    pub interval_vector: IntervalVector,
    pub description: String,
}

/// Named set-classes, looked up by name.
///
/// Built once and shared by reference with whatever needs it.
#[derive(Clone, Debug, Default)]
pub struct SetClassDictionary {
    entries: Vec<SetClass>,
    index: HashMap<String, usize>,
}

impl SetClassDictionary {
    /// The embedded Forte catalogue.
    pub fn builtin() -> Result<SetClassDictionary> {
        SetClassDictionary::parse(FORTE_TABLE)
    }

    /// Read a reference table from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SetClassDictionary> {
        let path = path.as_ref();
        debug!("loading set-class dictionary from {}", path.display());

        let text = fs::read_to_string(path)?;
        SetClassDictionary::parse(&text)
    }

    /// Parse a reference table held in memory.
    ///
    /// Blank lines are skipped. Any other line that does not hold all four
    /// fields fails the whole load. A repeated name replaces the earlier
    /// entry.
    pub fn parse(text: &str) -> Result<SetClassDictionary> {
        let mut dictionary = SetClassDictionary::default();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let entry = parser::parse_reference_row(line).map_err(|reason| {
                Error::MalformedReference {
                    line: number + 1,
                    reason,
                }
            })?;
            dictionary.insert(entry);
        }

        debug!("set-class dictionary holds {} entries", dictionary.len());
        Ok(dictionary)
    }

    fn insert(&mut self, entry: SetClass) {
        match self.index.get(&entry.name) {
            Some(&slot) => {
                warn!("set-class {} listed twice, keeping the later entry", entry.name);
                self.entries[slot] = entry;
            }
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Find a set-class by its catalogue name.
    pub fn lookup(&self, name: &str) -> Option<&SetClass> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// A copy of the canonical set for `name`.
    pub fn get_set(&self, name: &str) -> Option<PcSet> {
        self.lookup(name).map(|entry| entry.set.clone())
    }

    pub fn get_interval_vector(&self, name: &str) -> Option<IntervalVector> {
        self.lookup(name).map(|entry| entry.interval_vector)
    }

    pub fn get_description(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|entry| entry.description.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, SetClass> {
        self.entries.iter()
    }
}
