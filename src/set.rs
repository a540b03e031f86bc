//! Pitch-class sets and the modulo-12 algebra over them.
//!
//! A `PcSet` is an *ordered* sequence of pitch classes. Duplicates are
//! permitted and order is significant, so the same type serves both as a
//! melodic line (a row of the rotation matrix) and as an unordered sonority
//! (a catalogue entry). Where order must be ignored, `PcMask` is used instead.
//!
//! Every transformation comes in two flavours: a method returning a fresh
//! set, which never touches its receiver, and an `*_in_place` variant which
//! replaces the receiver and hands back a reference to it.
//!
//! ```
//! use pcmatrix::set::PcSet;
//!
//! let set = PcSet::from_ints(&[1, 4, 6, 7, 10]).unwrap();
//!
//! assert_eq!(set.normal_order().to_ints(), vec![4, 6, 7, 10, 1]);
//! assert_eq!(set.reduce().to_ints(), vec![0, 2, 3, 6, 9]);
//! assert_eq!(set.prime_form().to_ints(), vec![0, 1, 3, 6, 9]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser;
use crate::pitch::{PitchClass, PITCH_CLASS_COUNT};

/// An ordered sequence of pitch classes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PcSet(Vec<PitchClass>);

impl PcSet {
    /// Construct and return an empty `PcSet`.
    pub fn new() -> PcSet {
        PcSet(Vec::new())
    }

    /// The full twelve-tone aggregate in ascending order.
    pub fn aggregate() -> PcSet {
        PitchClass::all().collect()
    }

    /// Construct a `PcSet` from raw integers, rejecting anything outside
    /// `0..=11`.
    pub fn from_ints(values: &[u8]) -> Result<PcSet> {
        values
            .iter()
            .map(|&v| {
                PitchClass::from_int(v as usize).ok_or(Error::InvalidPitchClass {
                    value: i64::from(v),
                })
            })
            .collect()
    }

    /// Construct a `PcSet` from raw integers, reducing each modulo 12.
    pub fn from_ints_wrapping(values: &[i64]) -> PcSet {
        values.iter().map(|&v| PitchClass::wrapping(v)).collect()
    }

    /// Parse the compact alphanumeric spelling used by set-class catalogues,
    /// e.g. `"01369"` or `"0258AB"`.
    pub fn from_alpha(input: &str) -> Result<PcSet> {
        parser::parse_alpha_set(input)
    }

    /// Returns the compact alphanumeric spelling of this set.
    pub fn to_alpha(&self) -> String {
        self.0.iter().map(|pc| pc.to_char()).collect()
    }

    /// Returns the members as plain integers.
    pub fn to_ints(&self) -> Vec<u8> {
        self.0.iter().map(|&pc| u8::from(pc)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PitchClass> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PitchClass] {
        &self.0
    }

    pub fn first(&self) -> Option<PitchClass> {
        self.0.first().copied()
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.0.contains(&pc)
    }

    pub fn push(&mut self, pc: PitchClass) {
        self.0.push(pc);
    }

    /// Cyclically shift the sequence `k` places to the right; the last
    /// element wraps round to the front.
    pub fn rotate_right(&mut self, k: usize) {
        if !self.0.is_empty() {
            let k = k % self.0.len();
            self.0.rotate_right(k);
        }
    }

    /// Cyclically shift the sequence `k` places to the left.
    pub fn rotate_left(&mut self, k: usize) {
        if !self.0.is_empty() {
            let k = k % self.0.len();
            self.0.rotate_left(k);
        }
    }

    /// The distinct members as an unordered mask.
    pub fn to_mask(&self) -> PcMask {
        self.0.iter().copied().collect()
    }

    /// Returns a copy of the set transposed up by `n` semitones (Tn).
    pub fn transpose(&self, n: i32) -> PcSet {
        self.0.iter().map(|pc| pc.transpose(n)).collect()
    }

    pub fn transpose_in_place(&mut self, n: i32) -> &mut PcSet {
        for pc in self.0.iter_mut() {
            *pc = pc.transpose(n);
        }
        self
    }

    /// Returns the inversion of the set about C (T0I).
    pub fn invert(&self) -> PcSet {
        self.0.iter().map(|pc| pc.invert()).collect()
    }

    pub fn invert_in_place(&mut self) -> &mut PcSet {
        for pc in self.0.iter_mut() {
            *pc = pc.invert();
        }
        self
    }

    /// Returns every pitch class *not* in the set, in ascending order.
    ///
    /// Membership order and duplicates of the receiver are irrelevant, so
    /// `complement(complement(s)) == s` only holds for ascending sets
    /// without duplicates.
    pub fn complement(&self) -> PcSet {
        self.to_mask().complement().to_set()
    }

    pub fn complement_in_place(&mut self) -> &mut PcSet {
        *self = self.complement();
        self
    }

    /// Returns the transposition which places the first element on 0.
    pub fn zero_form(&self) -> PcSet {
        match self.first() {
            Some(first) => self.transpose(-(first.to_int() as i32)),
            None => PcSet::new(),
        }
    }

    pub fn zero_in_place(&mut self) -> &mut PcSet {
        if let Some(first) = self.first() {
            self.transpose_in_place(-(first.to_int() as i32));
        }
        self
    }

    /// Returns the most compact rotation of the set.
    ///
    /// The members are sorted descending and every rotation of that
    /// sequence is visited by repeatedly moving the first element to the
    /// end. Each candidate is measured up from its last element, starting at
    /// the outer edge. A candidate replaces the current winner only when it
    /// is strictly tighter, so ties go to the rotation visited first. The
    /// winner is reversed into ascending order on return.
    pub fn normal_order(&self) -> PcSet {
        if self.len() <= 1 {
            return self.clone();
        }

        let mut working = self.0.clone();
        working.sort_by(|a, b| b.cmp(a));
        let mut winner = working.clone();

        for _ in 1..working.len() {
            working.rotate_left(1);
            if descending_candidate_wins(&winner, &working) {
                winner.clone_from(&working);
            }
        }

        winner.reverse();
        PcSet(winner)
    }

    pub fn normalize_in_place(&mut self) -> &mut PcSet {
        *self = self.normal_order();
        self
    }

    /// Normal order, zeroed: `zero_form(normal_order(s))`.
    pub fn reduce(&self) -> PcSet {
        self.normal_order().zero_form()
    }

    pub fn reduce_in_place(&mut self) -> &mut PcSet {
        *self = self.reduce();
        self
    }

    /// Returns the prime form: whichever of the reduced set and its reduced
    /// inversion is more compact.
    pub fn prime_form(&self) -> PcSet {
        let prime = self.reduce();
        let inverted = self.invert().reduce();

        if candidate_wins(&prime.0, &inverted.0) {
            inverted
        } else {
            prime
        }
    }

    pub fn prime_in_place(&mut self) -> &mut PcSet {
        *self = self.prime_form();
        self
    }

    /// Compare two orderings and return the more compact one.
    ///
    /// Both sequences are walked from their last element inward, measuring
    /// each element's distance above the sequence's first element. The first
    /// strict difference decides; if every distance ties the receiver is
    /// returned.
    ///
    /// ```
    /// use pcmatrix::set::PcSet;
    ///
    /// let a = PcSet::from_ints(&[1, 4, 6, 7, 10]).unwrap();
    /// let b = PcSet::from_ints(&[4, 6, 7, 10, 1]).unwrap();
    /// assert_eq!(a.more_compact(&b), &b);
    /// assert_eq!(b.more_compact(&a), &b);
    /// ```
    pub fn more_compact<'a>(&'a self, other: &'a PcSet) -> &'a PcSet {
        if candidate_wins(&self.0, &other.0) {
            other
        } else {
            self
        }
    }

    /// Counts of each interval class 1 through 6 between distinct members.
    pub fn interval_vector(&self) -> IntervalVector {
        let members: Vec<PitchClass> = self.to_mask().iter().collect();
        let mut counts = [0u8; 6];

        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let interval = a.interval_to(*b);
                let class = interval.min(PITCH_CLASS_COUNT as u8 - interval);
                counts[class as usize - 1] += 1;
            }
        }

        IntervalVector(counts)
    }
}

/// True if `candidate` is strictly more compact than `winner`. Both are in
/// ascending order.
fn candidate_wins(winner: &[PitchClass], candidate: &[PitchClass]) -> bool {
    match (winner.first(), candidate.first()) {
        (Some(&w), Some(&c)) => tighter(w, winner.iter().rev(), c, candidate.iter().rev()),
        _ => false,
    }
}

/// As `candidate_wins`, for sequences held in descending order.
fn descending_candidate_wins(winner: &[PitchClass], candidate: &[PitchClass]) -> bool {
    match (winner.last(), candidate.last()) {
        (Some(&w), Some(&c)) => tighter(w, winner.iter(), c, candidate.iter()),
        _ => false,
    }
}

/// Walks both sequences outer edge first, comparing each element's distance
/// above its sequence's base.
fn tighter<'a, W, C>(
    winner_base: PitchClass,
    winner: W,
    candidate_base: PitchClass,
    candidate: C,
) -> bool
where
    W: Iterator<Item = &'a PitchClass>,
    C: Iterator<Item = &'a PitchClass>,
{
    for (&w, &c) in winner.zip(candidate) {
        match candidate_base.interval_to(c).cmp(&winner_base.interval_to(w)) {
            Ordering::Less => return true,
            Ordering::Greater => return false,
            Ordering::Equal => continue,
        }
    }

    false
}

impl From<Vec<PitchClass>> for PcSet {
    fn from(pcs: Vec<PitchClass>) -> PcSet {
        PcSet(pcs)
    }
}

impl FromIterator<PitchClass> for PcSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> PcSet {
        PcSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PcSet {
    type Item = &'a PitchClass;
    type IntoIter = std::slice::Iter<'a, PitchClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for PcSet {
    type Output = PitchClass;

    fn index(&self, index: usize) -> &PitchClass {
        &self.0[index]
    }
}

/// Accepts `[0, 3, 7]`, `0 3 7`, `0,3,7` or the compact `037`.
impl FromStr for PcSet {
    type Err = Error;

    fn from_str(input: &str) -> Result<PcSet> {
        parser::parse_set_literal(input)
    }
}

impl fmt::Display for PcSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, pc) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", pc)?;
        }
        write!(f, "]")
    }
}

/// An unordered set of pitch classes packed into the low twelve bits of a
/// `u16`. Bit `n` is set when pitch class `n` is a member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PcMask(u16);

impl PcMask {
    const FULL: u16 = (1 << PITCH_CLASS_COUNT) - 1;

    pub fn empty() -> PcMask {
        PcMask(0)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn insert(&mut self, pc: PitchClass) {
        self.0 |= 1 << pc.to_int();
    }

    pub fn contains(self, pc: PitchClass) -> bool {
        self.0 & (1 << pc.to_int()) != 0
    }

    /// True if every member of `self` is also in `other`.
    pub fn is_subset_of(self, other: PcMask) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn complement(self) -> PcMask {
        PcMask(!self.0 & PcMask::FULL)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = PitchClass> {
        PitchClass::all().filter(move |&pc| self.contains(pc))
    }

    /// Members as an ascending `PcSet`.
    pub fn to_set(self) -> PcSet {
        self.iter().collect()
    }
}

impl FromIterator<PitchClass> for PcMask {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> PcMask {
        let mut mask = PcMask::empty();
        for pc in iter {
            mask.insert(pc);
        }
        mask
    }
}

impl fmt::Display for PcMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.to_set().to_alpha())
    }
}

/// The interval-class content of a set: counts of interval classes 1 to 6.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalVector([u8; 6]);

impl IntervalVector {
    pub fn new(counts: [u8; 6]) -> IntervalVector {
        IntervalVector(counts)
    }

    pub fn counts(&self) -> [u8; 6] {
        self.0
    }

    /// The compact spelling used by catalogues, where 10, 11 and 12 are
    /// written `A`, `B` and `C`.
    pub fn to_alpha(&self) -> String {
        const DIGITS: &[u8; 13] = b"0123456789ABC";

        self.0
            .iter()
            .map(|&n| DIGITS.get(n as usize).map_or('?', |&d| d as char))
            .collect()
    }
}

impl fmt::Display for IntervalVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{}>", self.to_alpha())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u8]) -> PcSet {
        PcSet::from_ints(values).unwrap()
    }

    /// Every subset of the aggregate, each in ascending order.
    fn every_subset() -> impl Iterator<Item = PcSet> {
        (0u16..1 << 12).map(|bits| {
            PitchClass::all()
                .filter(|pc| bits & (1 << pc.to_int()) != 0)
                .collect()
        })
    }

    #[test]
    fn transposition_leaves_receiver_untouched() {
        let s = set(&[0, 3, 5, 6, 9]);
        assert_eq!(s.transpose(4), set(&[4, 7, 9, 10, 1]));
        assert_eq!(s, set(&[0, 3, 5, 6, 9]));
    }

    #[test]
    fn transposition_in_place() {
        let mut s = set(&[0, 3, 5, 6, 9]);
        s.transpose_in_place(4);
        assert_eq!(s, set(&[4, 7, 9, 10, 1]));

        s.transpose_in_place(-16);
        assert_eq!(s, set(&[0, 3, 5, 6, 9]));
    }

    #[test]
    fn inversion_of_transposed_set() {
        let s = set(&[0, 3, 5, 6, 9]).transpose(4);
        assert_eq!(s.invert(), set(&[8, 5, 3, 2, 11]));
        assert_eq!(s, set(&[4, 7, 9, 10, 1]));

        let mut t = s.clone();
        t.invert_in_place();
        assert_eq!(t, set(&[8, 5, 3, 2, 11]));
    }

    #[test]
    fn complement() {
        let s = set(&[0, 3, 5, 6, 9]);
        assert_eq!(s.complement(), set(&[1, 2, 4, 7, 8, 10, 11]));

        let mut t = s.clone();
        t.complement_in_place();
        assert_eq!(t, set(&[1, 2, 4, 7, 8, 10, 11]));

        // unordered, duplicated input still yields an ascending result
        assert_eq!(set(&[9, 0, 0, 3]).complement(), set(&[1, 2, 4, 5, 6, 7, 8, 10, 11]));
        assert_eq!(PcSet::new().complement(), PcSet::aggregate());
        assert_eq!(PcSet::aggregate().complement(), PcSet::new());
    }

    #[test]
    fn zero_form() {
        let s = set(&[0, 3, 5, 6, 9]).transpose(7);
        assert_eq!(s, set(&[7, 10, 0, 1, 4]));
        assert_eq!(s.zero_form(), set(&[0, 3, 5, 6, 9]));

        let mut t = s.clone();
        t.zero_in_place();
        assert_eq!(t, set(&[0, 3, 5, 6, 9]));
    }

    #[test]
    fn normal_order() {
        let s = set(&[1, 4, 6, 7, 10]);
        assert_eq!(s.normal_order(), set(&[4, 6, 7, 10, 1]));
        assert_eq!(s, set(&[1, 4, 6, 7, 10]));

        let mut t = s.clone();
        t.normalize_in_place();
        assert_eq!(t, set(&[4, 6, 7, 10, 1]));
    }

    #[test]
    fn normal_order_of_symmetric_set() {
        // [11, 0, 5, 6] and [5, 6, 11, 0] tie; the first one visited wins
        let s = set(&[0, 5, 6, 11]);
        assert_eq!(s.normal_order(), set(&[11, 0, 5, 6]));
        assert_eq!(set(&[6, 0, 11, 5]).normal_order(), set(&[11, 0, 5, 6]));
        assert_eq!(s.reduce(), set(&[0, 1, 6, 7]));
        assert_eq!(s.prime_form(), set(&[0, 1, 6, 7]));

        assert_eq!(set(&[0, 4, 8]).normal_order(), set(&[0, 4, 8]));
    }

    #[test]
    fn reduce() {
        let s = set(&[1, 4, 6, 7, 10]);
        assert_eq!(s.reduce(), set(&[0, 2, 3, 6, 9]));

        let mut t = s.clone();
        t.reduce_in_place();
        assert_eq!(t, set(&[0, 2, 3, 6, 9]));
    }

    #[test]
    fn prime_form() {
        let s = set(&[1, 4, 6, 7, 10]);
        assert_eq!(s.prime_form(), set(&[0, 1, 3, 6, 9]));
        assert_eq!(s, set(&[1, 4, 6, 7, 10]));

        let mut t = s.clone();
        t.prime_in_place();
        assert_eq!(t, set(&[0, 1, 3, 6, 9]));
    }

    #[test]
    fn prime_form_of_triads() {
        // major and minor triads share a set-class
        assert_eq!(set(&[7, 11, 2]).prime_form(), set(&[0, 3, 7]));
        assert_eq!(set(&[9, 0, 4]).prime_form(), set(&[0, 3, 7]));
        assert_eq!(set(&[0, 4, 8]).prime_form(), set(&[0, 4, 8]));
        assert_eq!(set(&[11, 2, 5, 8]).prime_form(), set(&[0, 3, 6, 9]));
    }

    #[test]
    fn more_compact_prefers_receiver_on_tie() {
        let a = set(&[0, 4, 8]);
        let b = set(&[4, 8, 0]);
        assert_eq!(a.more_compact(&b), &a);
        assert_eq!(b.more_compact(&a), &b);
    }

    #[test]
    fn degenerate_sets() {
        let empty = PcSet::new();
        assert_eq!(empty.transpose(5), empty);
        assert_eq!(empty.invert(), empty);
        assert_eq!(empty.zero_form(), empty);
        assert_eq!(empty.normal_order(), empty);
        assert_eq!(empty.reduce(), empty);
        assert_eq!(empty.prime_form(), empty);

        let single = set(&[7]);
        assert_eq!(single.normal_order(), single);
        assert_eq!(single.prime_form(), set(&[0]));
        assert_eq!(single.zero_form(), set(&[0]));
    }

    #[test]
    fn duplicates_survive_normal_order() {
        let mut normal = set(&[7, 0, 7, 4]).normal_order().to_ints();
        normal.sort();
        assert_eq!(normal, vec![0, 4, 7, 7]);
    }

    #[test]
    fn algebraic_properties_hold_for_every_subset() {
        for s in every_subset() {
            assert_eq!(s.invert().invert(), s);
            assert_eq!(s.complement().complement(), s);

            if !s.is_empty() {
                assert_eq!(s.zero_form()[0].to_int(), 0);
            }

            let prime = s.prime_form();
            assert!(prime == s.reduce() || prime == s.invert().reduce(), "{}", s);

            let reduced = s.reduce();
            for n in 1..12 {
                assert_eq!(s.transpose(n).reduce(), reduced, "T{} of {}", n, s);
            }
        }
    }

    #[test]
    fn normal_order_ignores_rotation() {
        for s in every_subset().filter(|s| s.len() > 1) {
            let expected = s.normal_order();
            let mut rotated = s.clone();
            for _ in 0..s.len() {
                rotated.rotate_left(1);
                assert_eq!(rotated.normal_order(), expected, "{}", rotated);
            }
        }
    }

    #[test]
    fn interval_vectors() {
        assert_eq!(set(&[0, 3, 7]).interval_vector().counts(), [0, 0, 1, 1, 1, 0]);
        assert_eq!(set(&[0, 1, 3, 5, 6, 8, 10]).interval_vector().to_alpha(), "254361");
        assert_eq!(PcSet::aggregate().interval_vector().to_alpha(), "CCCCC6");
        // duplicates do not count twice
        assert_eq!(set(&[0, 0, 4]).interval_vector().counts(), [0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn masks() {
        let triad = set(&[0, 4, 7]).to_mask();
        let column = set(&[7, 0, 4, 4]).to_mask();
        assert!(triad.is_subset_of(column));
        assert!(!set(&[0, 3, 7]).to_mask().is_subset_of(column));
        assert_eq!(column.len(), 3);
        assert_eq!(column.to_set(), set(&[0, 4, 7]));
        assert!(PcMask::empty().is_subset_of(column));
    }

    #[test]
    fn rotation() {
        let mut s = set(&[0, 1, 2, 3]);
        s.rotate_right(1);
        assert_eq!(s, set(&[3, 0, 1, 2]));
        s.rotate_left(5);
        assert_eq!(s, set(&[0, 1, 2, 3]));
    }

    #[test]
    fn strict_and_wrapping_construction() {
        assert!(matches!(PcSet::from_ints(&[0, 12]), Err(Error::InvalidPitchClass { value: 12 })));
        assert_eq!(PcSet::from_ints_wrapping(&[-1, 12, 25]), set(&[11, 0, 1]));
    }

    #[test]
    fn display_and_alpha() {
        let s = set(&[0, 10, 11, 3]);
        assert_eq!(s.to_string(), "[0, 10, 11, 3]");
        assert_eq!(s.to_alpha(), "0AB3");
        assert_eq!(PcSet::new().to_string(), "[]");
    }
}
