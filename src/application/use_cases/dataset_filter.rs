// ============================================================
// DATASET FILTER
// ============================================================
// Drop too-short cleaned texts, coerce labels of the survivors, then drop
// duplicate (text, label) pairs

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::error::Result;
use crate::domain::review::{parse_label, CleanedRecord};

/// Normalized text of one raw row, label still as read
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReview {
    pub row: usize,
    pub raw: Option<String>,
    pub text: String,
    pub label: String,
    pub score: Option<String>,
}

impl NormalizedReview {
    fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A kept review together with the raw text it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedReview {
    pub raw: Option<String>,
    pub record: CleanedRecord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub input_rows: usize,
    pub dropped_short: usize,
    pub dropped_duplicate: usize,
    pub kept: usize,
}

/// Keep reviews with at least `min_words` tokens and, when
/// `drop_duplicates` is set, only the first review per (text, label).
/// Original order is preserved.
///
/// Labels are coerced after the length filter, so rows dropped as too short
/// never fail on an empty or malformed label. A bad label on a kept row is
/// an `InvalidLabel` error.
pub fn filter_reviews(
    reviews: Vec<NormalizedReview>,
    min_words: usize,
    drop_duplicates: bool,
) -> Result<(Vec<CleanedReview>, FilterStats)> {
    let mut stats = FilterStats {
        input_rows: reviews.len(),
        ..Default::default()
    };
    let mut seen: HashSet<(String, i64)> = HashSet::new();
    let mut kept = Vec::with_capacity(reviews.len());

    for review in reviews {
        if review.word_count() < min_words {
            stats.dropped_short += 1;
            continue;
        }

        let label = parse_label(review.row, &review.label)?;
        if drop_duplicates && !seen.insert((review.text.clone(), label)) {
            stats.dropped_duplicate += 1;
            continue;
        }

        kept.push(CleanedReview {
            raw: review.raw,
            record: CleanedRecord {
                text: review.text,
                label,
                score: review.score,
            },
        });
    }

    stats.kept = kept.len();
    Ok((kept, stats))
}
