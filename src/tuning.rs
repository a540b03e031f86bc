//! Tunings loaded from Scala (`.scl`) files.
//!
//! A Scala file is plain text. Lines starting with `!` are comments. The
//! first other line describes the tuning and the next holds the number of
//! pitches. Each remaining line is one pitch above the unison, given either
//! in cents (any value with a `.`) or as a ratio (`3/2`, or a bare integer
//! such as `2`). Anything after the pitch on a line is ignored.
//!
//! ```
//! use pcmatrix::tuning::Tuning;
//!
//! let scl = "! pythagorean.scl\n\
//!            Pythagorean fifths\n \
//!            2\n \
//!            3/2\n \
//!            1200.0\n";
//! let tuning = Tuning::parse(scl).unwrap();
//! assert_eq!(tuning.description, "Pythagorean fifths");
//! assert_eq!(tuning.cents.len(), 2);
//! assert!((tuning.cents[0] - 701.955).abs() < 1e-3);
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::{self, ScalaPitch};
use crate::spectrum;

/// A scale expressed as intervals above its first degree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tuning {
    pub description: String,
    /// Each degree's distance from the unison, in cents.
    pub cents: Vec<f64>,
}

impl Tuning {
    pub fn new(description: String, cents: Vec<f64>) -> Tuning {
        Tuning { description, cents }
    }

    /// Read a Scala file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Tuning> {
        let path = path.as_ref();
        debug!("loading tuning from {}", path.display());

        let text = fs::read_to_string(path)?;
        Tuning::parse(&text)
    }

    /// Parse Scala text held in memory.
    pub fn parse(text: &str) -> Result<Tuning> {
        let mut description = None;
        let mut declared = None;
        let mut cents = Vec::new();
        let mut last_line = 0;

        for (number, line) in text.lines().enumerate() {
            let number = number + 1;
            let line = line.trim();
            last_line = number;

            if line.starts_with('!') {
                continue;
            }
            if description.is_none() {
                description = Some(line.to_string());
                continue;
            }
            if line.is_empty() {
                continue;
            }
            if declared.is_none() {
                declared = Some(parse_count(line, number)?);
                continue;
            }

            cents.push(parse_pitch(line, number)?);
        }

        let declared = declared.ok_or_else(|| Error::MalformedTuning {
            line: last_line,
            reason: "missing note count".to_string(),
        })?;
        if declared != cents.len() {
            warn!("tuning declares {} notes but lists {}", declared, cents.len());
        }

        Ok(Tuning {
            description: description.unwrap_or_default(),
            cents,
        })
    }

    /// The degrees as frequency ratios.
    pub fn ratios(&self) -> Vec<f64> {
        self.cents.iter().map(|&c| spectrum::cents_to_ratio(c)).collect()
    }

    /// The audible frequencies of this tuning built on `fundamental`.
    pub fn frequencies(&self, fundamental: f64) -> Vec<f64> {
        spectrum::tuning_frequencies(fundamental, &self.ratios())
    }
}

fn parse_count(line: &str, number: usize) -> Result<usize> {
    line.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| Error::MalformedTuning {
            line: number,
            reason: format!("expected a note count, found {:?}", line),
        })
}

fn parse_pitch(line: &str, number: usize) -> Result<f64> {
    let malformed = |reason: String| Error::MalformedTuning {
        line: number,
        reason,
    };

    match parser::parse_scala_pitch(line).map_err(malformed)? {
        ScalaPitch::Cents(text) => text
            .parse()
            .map_err(|_| malformed(format!("bad cents value {:?}", text))),
        ScalaPitch::Ratio(numerator, denominator) => {
            if numerator <= 0 || denominator <= 0 {
                return Err(malformed(format!(
                    "ratio {}/{} is not positive",
                    numerator, denominator
                )));
            }
            Ok(spectrum::ratio_to_cents(numerator as f64 / denominator as f64))
        }
    }
}
