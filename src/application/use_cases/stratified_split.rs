// ============================================================
// STRATIFIED TRAIN/TEST SPLIT
// ============================================================
// Seeded split that preserves label proportions in both subsets

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::error::{AppError, Result};
use crate::domain::review::LabeledText;

#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Vec<LabeledText>,
    pub test: Vec<LabeledText>,
}

/// Split `records` so that `ceil(test_size * n)` rows are held out.
///
/// Per-class test counts are the floor of each class's proportional share,
/// with the leftover slots handed to the largest fractional remainders
/// (ties by ascending label).
pub fn stratified_split(
    records: Vec<LabeledText>,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    let n = records.len();
    if n == 0 {
        return Err(AppError::SplitError("Cannot split an empty dataset".to_string()));
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(AppError::SplitError(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let mut groups: BTreeMap<i64, Vec<LabeledText>> = BTreeMap::new();
    for record in records {
        groups.entry(record.label).or_default().push(record);
    }

    if let Some((label, members)) = groups.iter().find(|(_, members)| members.len() < 2) {
        return Err(AppError::SplitError(format!(
            "Label {} has only {} member(s); every class needs at least 2",
            label,
            members.len()
        )));
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n - n_test;
    let n_classes = groups.len();
    if n_test < n_classes || n_train < n_classes {
        return Err(AppError::SplitError(format!(
            "Split of {} rows into {} train / {} test cannot hold all {} classes",
            n, n_train, n_test, n_classes
        )));
    }

    let counts: Vec<usize> = groups.values().map(Vec::len).collect();
    let allocation = allocate_test_counts(&counts, n, n_test);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);

    for (mut members, take) in groups.into_values().zip(allocation) {
        members.shuffle(&mut rng);
        let rest = members.split_off(take);
        test.extend(members);
        train.extend(rest);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(TrainTestSplit { train, test })
}

fn allocate_test_counts(counts: &[usize], n: usize, n_test: usize) -> Vec<usize> {
    let mut allocation: Vec<usize> = counts.iter().map(|&c| c * n_test / n).collect();
    let assigned: usize = allocation.iter().sum();

    // Stable sort keeps ascending label order among equal remainders.
    let mut by_remainder: Vec<usize> = (0..counts.len()).collect();
    by_remainder.sort_by(|&a, &b| (counts[b] * n_test % n).cmp(&(counts[a] * n_test % n)));

    for &pos in by_remainder.iter().take(n_test - assigned) {
        allocation[pos] += 1;
    }
    allocation
}
