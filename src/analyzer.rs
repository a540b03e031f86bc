//! The rotation matrix analyzer.
//!
//! A matrix is a list of voice-groups, each holding one or more rows of equal
//! length. The first group stays put while every other group is rotated
//! through all of its column offsets, canon-style, so every relative
//! alignment of the groups is visited exactly once. For each alignment the
//! pitch classes sounding in a column are gathered into a sonority and
//! matched against the search sets; the number of matches over all columns
//! is that alignment's score.
//!
//! ```
//! use pcmatrix::analyzer::RotationMatrixAnalyzer;
//! use pcmatrix::config::AnalyzerConfig;
//! use pcmatrix::set::PcSet;
//!
//! let row: PcSet = "[0, 4, 7, 0]".parse().unwrap();
//! let third: PcSet = "04".parse().unwrap();
//!
//! let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
//! analyzer.add_row(1, &row, 0).unwrap();
//! analyzer.add_row(2, &row, 0).unwrap();
//! analyzer.add_search_set(&third, 0);
//!
//! let analysis = analyzer.run().unwrap();
//! assert_eq!(analysis.rotation_count, 4);
//! assert_eq!(analysis.count(0), 1);
//! assert_eq!(analysis.count(1), 2);
//! assert_eq!(analysis.max_score(), Some(2));
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::dictionary::SetClassDictionary;
use crate::error::{Error, Result};
use crate::report::{NullReporter, Reporter, Snapshot};
use crate::set::{PcMask, PcSet};

/// A flag shared between a running analysis and whoever may want to stop it.
///
/// Clones refer to the same flag, so a clone can be handed to another thread
/// and cancelled from there.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Rows that rotate together as a unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceGroup {
    rows: Vec<PcSet>,
}

impl VoiceGroup {
    pub fn from_rows(rows: Vec<PcSet>) -> VoiceGroup {
        VoiceGroup { rows }
    }

    pub fn rows(&self) -> &[PcSet] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn push(&mut self, row: PcSet) {
        self.rows.push(row);
    }

    /// Rotate every row `k` columns to the right in lock-step.
    fn rotate_right(&mut self, k: usize) {
        for row in &mut self.rows {
            row.rotate_right(k);
        }
    }
}

/// The outcome of a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Number of snapshots reaching each score, for scores inside the filter.
    pub summary_totals: BTreeMap<u64, u64>,
    /// Snapshots visited, counted or not.
    pub rotation_count: u64,
    pub maximum_rotations: u64,
}

impl Analysis {
    /// How many snapshots scored exactly `score`.
    pub fn count(&self, score: u64) -> u64 {
        self.summary_totals.get(&score).copied().unwrap_or(0)
    }

    /// The highest score that was counted, if any.
    pub fn max_score(&self) -> Option<u64> {
        self.summary_totals.keys().next_back().copied()
    }

    /// Number of snapshots that passed the score filter.
    pub fn counted(&self) -> u64 {
        self.summary_totals.values().sum()
    }
}

/// State that lives for the duration of a single run.
struct Pass {
    original: Vec<VoiceGroup>,
    offsets: Vec<usize>,
    column_counts: Vec<usize>,
    columns: usize,
}

/// Scores every relative rotation of a set of voice-groups.
#[derive(Debug)]
pub struct RotationMatrixAnalyzer {
    config: AnalyzerConfig,
    groups: Vec<VoiceGroup>,
    search_sets: Vec<PcMask>,
    summary_totals: BTreeMap<u64, u64>,
    rotation_count: u64,
    maximum_rotations: u64,
    cancel: Option<CancelToken>,
}

impl RotationMatrixAnalyzer {
    pub fn new(config: AnalyzerConfig) -> RotationMatrixAnalyzer {
        RotationMatrixAnalyzer {
            config,
            groups: Vec::new(),
            search_sets: Vec::new(),
            summary_totals: BTreeMap::new(),
            rotation_count: 0,
            maximum_rotations: 0,
            cancel: None,
        }
    }

    /// Append `row`, transposed by `transpose_by`, to the group numbered
    /// `group_id`.
    ///
    /// Groups are numbered from 1 without gaps: `group_id` names an
    /// existing group or the one after the last. Every row in the matrix
    /// must have the same number of columns.
    pub fn add_row(&mut self, group_id: usize, row: &PcSet, transpose_by: i32) -> Result<()> {
        if group_id == 0 || group_id > self.groups.len() + 1 {
            return Err(Error::InvalidGroupId { group: group_id });
        }
        if row.is_empty() {
            return Err(Error::EmptyRow);
        }
        if let Some(expected) = self.columns() {
            if row.len() != expected {
                return Err(Error::RowLengthMismatch {
                    group: group_id,
                    expected,
                    found: row.len(),
                });
            }
        }

        if group_id > self.groups.len() {
            self.groups.push(VoiceGroup::default());
        }
        let row = row.transpose(transpose_by);
        debug!("group {} row {}: {}", group_id, self.groups[group_id - 1].rows.len() + 1, row);
        self.groups[group_id - 1].push(row);
        Ok(())
    }

    /// Add `set`, transposed by `transpose_by`, as a sonority to search for.
    ///
    /// Order and duplicates in `set` are irrelevant.
    pub fn add_search_set(&mut self, set: &PcSet, transpose_by: i32) {
        let mask = set.transpose(transpose_by).to_mask();
        if mask.is_empty() {
            warn!("empty search set matches every column");
        }
        trace!("search set {}", mask);
        self.search_sets.push(mask);
    }

    /// Add the catalogue set named `name`, transposed by `transpose_by`, as
    /// a sonority to search for.
    ///
    /// Nothing is added when the name is unknown.
    pub fn add_named_search_set(
        &mut self,
        dictionary: &SetClassDictionary,
        name: &str,
        transpose_by: i32,
    ) -> Result<()> {
        let entry = dictionary.lookup(name).ok_or_else(|| Error::UnknownSetClass {
            name: name.to_string(),
        })?;
        self.add_search_set(&entry.set, transpose_by);
        Ok(())
    }

    /// Have `run` poll `token` and abort once it is cancelled.
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AnalyzerConfig {
        &mut self.config
    }

    pub fn groups(&self) -> &[VoiceGroup] {
        &self.groups
    }

    pub fn search_sets(&self) -> &[PcMask] {
        &self.search_sets
    }

    /// The shared row length, once any row has been added.
    pub fn columns(&self) -> Option<usize> {
        self.groups
            .iter()
            .flat_map(|group| group.rows.first())
            .map(PcSet::len)
            .next()
    }

    /// Totals from the most recent run.
    pub fn summary_totals(&self) -> &BTreeMap<u64, u64> {
        &self.summary_totals
    }

    pub fn rotation_count(&self) -> u64 {
        self.rotation_count
    }

    pub fn maximum_rotations(&self) -> u64 {
        self.maximum_rotations
    }

    /// Run the analysis without reporting anything along the way.
    pub fn run(&mut self) -> Result<Analysis> {
        self.run_with(&mut NullReporter)
    }

    /// Run the analysis, feeding snapshots or progress to `reporter`.
    ///
    /// Totals from any previous run are discarded first. If the run is
    /// cancelled or the reporter fails, the groups are put back as they were
    /// and the error is returned; totals gathered so far are left in place.
    pub fn run_with<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<Analysis> {
        self.config.score_filter.validate()?;
        let columns = self.validate_matrix()?;
        let maximum_rotations = self.count_rotations(columns)?;

        self.summary_totals.clear();
        self.rotation_count = 0;
        self.maximum_rotations = maximum_rotations;

        info!(
            "rotating {} groups over {} columns against {} search sets ({} snapshots)",
            self.groups.len(),
            columns,
            self.search_sets.len(),
            maximum_rotations
        );
        reporter.begin(maximum_rotations)?;

        let mut pass = Pass {
            original: self.groups.clone(),
            offsets: vec![0; self.groups.len()],
            column_counts: vec![0; columns],
            columns,
        };

        let outcome = if self.groups.len() == 1 {
            self.check_cancelled()
                .and_then(|_| self.analyze_sonorities(&mut pass, reporter))
        } else {
            self.rotate_group(1, &mut pass, reporter)
        };

        if let Err(err) = outcome {
            warn!("run stopped after {} snapshots: {}", self.rotation_count, err);
            self.groups = pass.original;
            return Err(err);
        }
        debug_assert_eq!(self.groups, pass.original);

        let analysis = Analysis {
            summary_totals: self.summary_totals.clone(),
            rotation_count: self.rotation_count,
            maximum_rotations: self.maximum_rotations,
        };
        info!(
            "visited {} snapshots, {} within the score filter",
            analysis.rotation_count,
            analysis.counted()
        );
        reporter.summary(&analysis)?;
        Ok(analysis)
    }

    /// Checks the matrix can be rotated and returns its column count.
    fn validate_matrix(&self) -> Result<usize> {
        if self.groups.is_empty() {
            return Err(Error::NoGroups);
        }
        match self.columns() {
            Some(columns) if columns > 0 => Ok(columns),
            _ => Err(Error::EmptyRow),
        }
    }

    /// `columns ^ (groups - 1)`, the first group being held fixed.
    fn count_rotations(&self, columns: usize) -> Result<u64> {
        let overflow = || Error::RotationOverflow {
            columns,
            groups: self.groups.len(),
        };

        let exponent = u32::try_from(self.groups.len() - 1).map_err(|_| overflow())?;
        (columns as u64).checked_pow(exponent).ok_or_else(overflow)
    }

    fn check_cancelled(&self) -> Result<()> {
        match self.cancel {
            Some(ref token) if token.is_cancelled() => Err(Error::Cancelled {
                completed: self.rotation_count,
            }),
            _ => Ok(()),
        }
    }

    /// Cycle group `depth` through every column offset, descending into the
    /// next group at each step. A full cycle leaves the group as it started.
    fn rotate_group<R: Reporter + ?Sized>(
        &mut self,
        depth: usize,
        pass: &mut Pass,
        reporter: &mut R,
    ) -> Result<()> {
        for _ in 0..pass.columns {
            if depth == 1 {
                self.check_cancelled()?;
            }

            self.groups[depth].rotate_right(1);
            pass.offsets[depth] = (pass.offsets[depth] + 1) % pass.columns;

            if depth + 1 == self.groups.len() {
                self.analyze_sonorities(pass, reporter)?;
            } else {
                self.rotate_group(depth + 1, pass, reporter)?;
            }
        }
        Ok(())
    }

    /// Score the current alignment and record it.
    fn analyze_sonorities<R: Reporter + ?Sized>(
        &mut self,
        pass: &mut Pass,
        reporter: &mut R,
    ) -> Result<()> {
        for (column, count) in pass.column_counts.iter_mut().enumerate() {
            let sonority: PcMask = self
                .groups
                .iter()
                .flat_map(|group| group.rows.iter())
                .map(|row| row[column])
                .collect();

            *count = self
                .search_sets
                .iter()
                .filter(|target| target.is_subset_of(sonority))
                .count();
        }

        let score = pass.column_counts.iter().sum::<usize>() as u64;
        self.rotation_count += 1;
        trace!("snapshot {} {:?} scored {}", self.rotation_count, pass.offsets, score);

        if self.config.score_filter.contains(score) {
            *self.summary_totals.entry(score).or_insert(0) += 1;

            if self.config.report_details {
                reporter.snapshot(&Snapshot {
                    index: self.rotation_count,
                    original: &pass.original,
                    groups: &self.groups,
                    offsets: &pass.offsets,
                    column_counts: &pass.column_counts,
                    score,
                })?;
            }
        }

        if !self.config.report_details {
            reporter.progress(self.rotation_count, self.maximum_rotations)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreRange;
    use crate::report::CollectingReporter;

    const CANON: [u8; 16] = [0, 0, 0, 4, 4, 4, 7, 7, 0, 7, 2, 0, 7, 3, 0, 0];

    fn set(values: &[u8]) -> PcSet {
        PcSet::from_ints(values).unwrap()
    }

    fn canon_in_three() -> RotationMatrixAnalyzer {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        for group in 1..=3 {
            analyzer.add_row(group, &set(&CANON), 0).unwrap();
        }
        analyzer
    }

    fn expected_histogram() -> BTreeMap<u64, u64> {
        vec![(0, 46), (1, 18), (2, 48), (3, 72), (4, 24), (5, 42), (6, 6)]
            .into_iter()
            .collect()
    }

    #[test]
    fn canon_with_raw_triads() {
        let mut analyzer = canon_in_three();
        for n in 0..12 {
            analyzer.add_search_set(&set(&[0, 4, 7]), n);
            analyzer.add_search_set(&set(&[0, 3, 7]), n);
        }

        let analysis = analyzer.run().unwrap();
        assert_eq!(analysis.summary_totals, expected_histogram());
        assert_eq!(analysis.rotation_count, 256);
        assert_eq!(analysis.maximum_rotations, 256);
        assert_eq!(analysis.max_score(), Some(6));
        assert_eq!(analyzer.summary_totals(), &expected_histogram());
    }

    #[test]
    fn canon_with_named_triads() {
        let forte = SetClassDictionary::builtin().unwrap();
        let mut analyzer = canon_in_three();
        for n in 0..12 {
            analyzer.add_named_search_set(&forte, "3-11", n).unwrap();
            analyzer.add_named_search_set(&forte, "3-11i", n).unwrap();
        }

        let analysis = analyzer.run().unwrap();
        assert_eq!(analysis.summary_totals, expected_histogram());
    }

    #[test]
    fn unknown_named_set_leaves_analyzer_untouched() {
        let forte = SetClassDictionary::builtin().unwrap();
        let mut analyzer = canon_in_three();
        analyzer.add_named_search_set(&forte, "3-11", 0).unwrap();

        let result = analyzer.add_named_search_set(&forte, "3-99", 0);
        assert!(matches!(result, Err(Error::UnknownSetClass { ref name }) if name == "3-99"));
        assert_eq!(analyzer.search_sets().len(), 1);
    }

    #[test]
    fn snapshot_count_is_columns_to_the_groups_minus_one() {
        for groups in 1..=4 {
            let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
            for group in 1..=groups {
                analyzer.add_row(group, &set(&[0, 1, 2, 3]), 0).unwrap();
            }
            let analysis = analyzer.run().unwrap();
            assert_eq!(analysis.rotation_count, 4u64.pow(groups as u32 - 1));
            assert_eq!(analysis.counted(), analysis.rotation_count);
        }
    }

    #[test]
    fn traversal_order() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig {
            report_details: true,
            ..AnalyzerConfig::default()
        });
        for group in 1..=3 {
            analyzer.add_row(group, &set(&[0, 1, 2, 3]), 0).unwrap();
        }

        let mut reporter = CollectingReporter::default();
        analyzer.run_with(&mut reporter).unwrap();
        assert_eq!(reporter.snapshots.len(), 16);
        assert_eq!(reporter.progress_events, 0);

        let offsets: Vec<Vec<usize>> = reporter.snapshots.iter().map(|s| s.offsets.clone()).collect();
        assert_eq!(offsets[0], vec![0, 1, 1]);
        assert_eq!(offsets[1], vec![0, 1, 2]);
        assert_eq!(offsets[3], vec![0, 1, 0]);
        assert_eq!(offsets[4], vec![0, 2, 1]);
        assert_eq!(offsets[15], vec![0, 0, 0]);

        let first = &reporter.snapshots[0];
        assert_eq!(first.index, 1);
        assert_eq!(first.groups[0].rows()[0], set(&[0, 1, 2, 3]));
        assert_eq!(first.groups[1].rows()[0], set(&[3, 0, 1, 2]));
        assert_eq!(first.groups[2].rows()[0], set(&[3, 0, 1, 2]));

        // The matrix is back in its starting state.
        assert!(analyzer.groups().iter().all(|g| g.rows()[0] == set(&[0, 1, 2, 3])));
    }

    #[test]
    fn multi_row_groups_rotate_in_lock_step() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig {
            report_details: true,
            ..AnalyzerConfig::default()
        });
        analyzer.add_row(1, &set(&[0, 0, 0]), 0).unwrap();
        analyzer.add_row(2, &set(&[4, 5, 6]), 0).unwrap();
        analyzer.add_row(2, &set(&[7, 8, 9]), 0).unwrap();
        analyzer.add_search_set(&set(&[0, 4, 7]), 0);

        let mut reporter = CollectingReporter::default();
        let analysis = analyzer.run_with(&mut reporter).unwrap();

        let rows = reporter.snapshots[0].groups[1].rows().to_vec();
        assert_eq!(rows, vec![set(&[6, 4, 5]), set(&[9, 7, 8])]);
        for snapshot in &reporter.snapshots {
            assert_eq!(snapshot.original, analyzer.groups());
        }
        let original = reporter.snapshots[1].original[1].rows().to_vec();
        assert_eq!(original, vec![set(&[4, 5, 6]), set(&[7, 8, 9])]);
        assert_eq!(reporter.snapshots[0].column_counts, vec![0, 1, 0]);
        assert_eq!(reporter.snapshots[1].column_counts, vec![0, 0, 1]);
        assert_eq!(reporter.snapshots[2].column_counts, vec![1, 0, 0]);
        assert_eq!(analysis.count(1), 3);
    }

    #[test]
    fn single_group_is_scored_once() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        analyzer.add_row(1, &set(&[0, 4, 7, 2]), 0).unwrap();
        analyzer.add_row(1, &set(&[4, 7, 0, 11]), 0).unwrap();
        analyzer.add_row(1, &set(&[7, 0, 4, 7]), 0).unwrap();
        analyzer.add_search_set(&set(&[0, 4, 7]), 0);

        let mut reporter = CollectingReporter::default();
        let analysis = analyzer.run_with(&mut reporter).unwrap();
        assert_eq!(analysis.rotation_count, 1);
        assert_eq!(analysis.maximum_rotations, 1);
        assert_eq!(analysis.count(3), 1);
        assert_eq!(reporter.progress_events, 1);
        assert_eq!(reporter.analysis, Some(analysis));
    }

    #[test]
    fn rows_are_transposed_on_entry() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        analyzer.add_row(1, &set(&[0, 4, 7]), 5).unwrap();
        analyzer.add_search_set(&set(&[0, 4, 7]), -1);

        assert_eq!(analyzer.groups()[0].rows()[0], set(&[5, 9, 0]));
        assert_eq!(analyzer.search_sets()[0], set(&[11, 3, 6]).to_mask());
        assert_eq!(analyzer.columns(), Some(3));
    }

    #[test]
    fn invalid_rows_are_rejected() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        assert!(matches!(
            analyzer.add_row(0, &set(&[0]), 0),
            Err(Error::InvalidGroupId { group: 0 })
        ));
        assert!(matches!(analyzer.add_row(1, &PcSet::new(), 0), Err(Error::EmptyRow)));

        analyzer.add_row(1, &set(&[0, 1, 2]), 0).unwrap();
        assert!(matches!(
            analyzer.add_row(2, &set(&[0, 1]), 0),
            Err(Error::RowLengthMismatch {
                group: 2,
                expected: 3,
                found: 2
            })
        ));
        assert_eq!(analyzer.groups().len(), 1);
    }

    #[test]
    fn group_ids_must_not_skip() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        let row = set(&[0, 1, 2]);
        assert!(matches!(
            analyzer.add_row(2, &row, 0),
            Err(Error::InvalidGroupId { group: 2 })
        ));

        analyzer.add_row(1, &row, 0).unwrap();
        analyzer.add_row(2, &row, 0).unwrap();
        analyzer.add_row(1, &row, 3).unwrap();
        assert!(matches!(
            analyzer.add_row(4, &row, 0),
            Err(Error::InvalidGroupId { group: 4 })
        ));
        assert!(matches!(
            analyzer.add_row(usize::MAX / 32, &row, 0),
            Err(Error::InvalidGroupId { .. })
        ));
        assert!(matches!(
            analyzer.add_row(usize::MAX, &row, 0),
            Err(Error::InvalidGroupId { .. })
        ));

        assert_eq!(analyzer.groups().len(), 2);
        assert_eq!(analyzer.groups()[0].rows().len(), 2);
        assert_eq!(analyzer.groups()[1].rows().len(), 1);
    }

    #[test]
    fn invalid_matrices_fail_before_rotating() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        assert!(matches!(analyzer.run(), Err(Error::NoGroups)));

        assert_eq!(analyzer.rotation_count(), 0);

        analyzer.add_row(1, &set(&[0, 1, 2]), 0).unwrap();
        analyzer.config_mut().score_filter = ScoreRange::new(4, 2);
        assert!(matches!(
            analyzer.run(),
            Err(Error::InvalidScoreRange { min: 4, max: 2 })
        ));
    }

    #[test]
    fn rotation_counter_overflow() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        let chromatic = PcSet::aggregate();
        for group in 1..=19 {
            analyzer.add_row(group, &chromatic, 0).unwrap();
        }
        assert!(matches!(
            analyzer.run(),
            Err(Error::RotationOverflow {
                columns: 12,
                groups: 19
            })
        ));
    }

    #[test]
    fn score_filter_limits_the_totals() {
        let mut analyzer = canon_in_three();
        for n in 0..12 {
            analyzer.add_search_set(&set(&[0, 4, 7]), n);
            analyzer.add_search_set(&set(&[0, 3, 7]), n);
        }
        analyzer.config_mut().score_filter = ScoreRange::new(5, 6);
        analyzer.config_mut().report_details = true;

        let mut reporter = CollectingReporter::default();
        let analysis = analyzer.run_with(&mut reporter).unwrap();

        let totals: Vec<(u64, u64)> = analysis.summary_totals.into_iter().collect();
        assert_eq!(totals, vec![(5, 42), (6, 6)]);
        assert_eq!(analysis.rotation_count, 256);
        assert_eq!(reporter.snapshots.len(), 48);
        assert!(reporter.snapshots.iter().all(|s| s.score >= 5));
        assert!(reporter.snapshots.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn runs_start_from_scratch() {
        let mut analyzer = canon_in_three();
        analyzer.add_search_set(&set(&[0, 4, 7]), 0);

        let first = analyzer.run().unwrap();
        let second = analyzer.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(analyzer.rotation_count(), 256);
    }

    struct CancelAfter {
        token: CancelToken,
        after: u64,
    }

    impl Reporter for CancelAfter {
        fn snapshot(&mut self, _snapshot: &Snapshot<'_>) -> Result<()> {
            Ok(())
        }

        fn progress(&mut self, rotation_count: u64, _maximum_rotations: u64) -> Result<()> {
            if rotation_count == self.after {
                self.token.cancel();
            }
            Ok(())
        }

        fn summary(&mut self, _analysis: &Analysis) -> Result<()> {
            panic!("a cancelled run has no summary");
        }
    }

    #[test]
    fn cancellation_restores_the_matrix() {
        let mut analyzer = canon_in_three();
        analyzer.add_search_set(&set(&[0, 4, 7]), 0);
        let original = analyzer.groups().to_vec();

        let token = CancelToken::new();
        analyzer.set_cancel_token(token.clone());

        let mut reporter = CancelAfter { token, after: 20 };
        match analyzer.run_with(&mut reporter) {
            // The first group to rotate finishes its current step.
            Err(Error::Cancelled { completed }) => assert_eq!(completed, 32),
            other => panic!("expected cancellation, got {:?}", other),
        }
        assert_eq!(analyzer.groups(), &original[..]);
        assert_eq!(analyzer.rotation_count(), 32);
    }

    #[test]
    fn cancelled_before_starting() {
        let mut analyzer = RotationMatrixAnalyzer::new(AnalyzerConfig::default());
        analyzer.add_row(1, &set(&[0, 1]), 0).unwrap();

        let token = CancelToken::new();
        token.cancel();
        analyzer.set_cancel_token(token);
        assert!(matches!(analyzer.run(), Err(Error::Cancelled { completed: 0 })));
    }
}
