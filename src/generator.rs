//! Supplies material for composition by combining sets.

use crate::set::PcSet;

/// Every ordered pair drawn from `sets`, with repetition, except pairs whose
/// two members hold the same pitch classes.
///
/// Order is that of a nested loop over `sets`, so `(sets[0], sets[1])` comes
/// before `(sets[1], sets[0])`. A set and its retrograde count as the same
/// set, and so does a set paired with itself.
///
/// ```
/// use pcmatrix::generator::permute_set_pairs;
/// use pcmatrix::set::PcSet;
///
/// let sets: Vec<PcSet> = ["012", "210", "345"].iter().map(|s| s.parse().unwrap()).collect();
/// let pairs = permute_set_pairs(&sets);
/// assert_eq!(pairs.len(), 4);
/// assert_eq!(pairs[0], (sets[0].clone(), sets[2].clone()));
/// ```
pub fn permute_set_pairs(sets: &[PcSet]) -> Vec<(PcSet, PcSet)> {
    let masks: Vec<_> = sets.iter().map(PcSet::to_mask).collect();

    let mut pairs = Vec::new();
    for (first, first_mask) in sets.iter().zip(&masks) {
        for (second, second_mask) in sets.iter().zip(&masks) {
            if first_mask != second_mask {
                pairs.push((first.clone(), second.clone()));
            }
        }
    }
    pairs
}
