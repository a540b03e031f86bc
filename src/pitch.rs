//! Defines the pitch class, the atom every other type in the crate is built
//! from.
//!
//! A pitch class is a note name with octave equivalence removed, numbered
//! `0` (C) through `11` (B). All arithmetic on pitch classes is carried out
//! modulo 12, so results are always back in range.
//!
//! ```
//! use pcmatrix::pitch::PitchClass;
//!
//! let e = PitchClass::from_int(4).unwrap();
//! assert_eq!(e.transpose(9).to_int(), 1);
//! assert_eq!(e.invert().to_int(), 8);
//! assert_eq!(PitchClass::from_char('b'), PitchClass::from_int(11));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The total number of distinct pitch classes.
pub const PITCH_CLASS_COUNT: usize = 12;

/// A single pitch class in `0..=11`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    /// Construct a `PitchClass` from a small integer value.
    ///
    /// Returns `None` for anything outside `0..=11`.
    pub fn from_int(input: usize) -> Option<PitchClass> {
        if input < PITCH_CLASS_COUNT {
            Some(PitchClass(input as u8))
        } else {
            None
        }
    }

    /// Construct a `PitchClass` from any integer, reducing it modulo 12.
    pub fn wrapping(input: i64) -> PitchClass {
        PitchClass(input.rem_euclid(PITCH_CLASS_COUNT as i64) as u8)
    }

    /// Construct a `PitchClass` from its alphanumeric digit.
    ///
    /// `'0'` to `'9'` are literal, `'A'` and `'B'` (either case) stand for 10
    /// and 11.
    pub fn from_char(input: char) -> Option<PitchClass> {
        match input {
            '0'..='9' => Some(PitchClass(input as u8 - b'0')),
            'A' | 'a' => Some(PitchClass(10)),
            'B' | 'b' => Some(PitchClass(11)),
            _ => None,
        }
    }

    /// Returns the integer value of this `PitchClass`.
    pub fn to_int(self) -> usize {
        self.0 as usize
    }

    /// Returns the alphanumeric digit for this `PitchClass`.
    pub fn to_char(self) -> char {
        const DIGITS: [char; PITCH_CLASS_COUNT] = [
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B',
        ];

        DIGITS[self.to_int()]
    }

    /// Transpose up by `n` semitones. `n` may be negative or larger than an
    /// octave.
    pub fn transpose(self, n: i32) -> PitchClass {
        let n = n.rem_euclid(PITCH_CLASS_COUNT as i32) as u8;
        PitchClass((self.0 + n) % PITCH_CLASS_COUNT as u8)
    }

    /// Mirror around C: `(12 - pc) mod 12`.
    pub fn invert(self) -> PitchClass {
        PitchClass((PITCH_CLASS_COUNT as u8 - self.0) % PITCH_CLASS_COUNT as u8)
    }

    /// The ascending interval from `self` up to `other`, in `0..=11`.
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 + PITCH_CLASS_COUNT as u8 - self.0) % PITCH_CLASS_COUNT as u8
    }

    /// The conventional note name, spelled with sharps except for Eb, Ab
    /// and Bb.
    pub fn name(self) -> &'static str {
        const NAMES: [&str; PITCH_CLASS_COUNT] = [
            "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
        ];

        NAMES[self.to_int()]
    }

    /// All twelve pitch classes in ascending order.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..PITCH_CLASS_COUNT as u8).map(PitchClass)
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PitchClass::from_int(value as usize).ok_or(Error::InvalidPitchClass {
            value: i64::from(value),
        })
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
