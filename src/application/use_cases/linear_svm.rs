// ============================================================
// LINEAR SVM
// ============================================================
// Hinge-loss linear SVM solved in the dual by coordinate descent,
// extended to multiclass with one-vs-one voting

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sprs::CsMat;

use crate::domain::error::{AppError, Result};
use crate::domain::pipeline_config::{TrainerConfig, RANDOM_STATE, SVM_C, SVM_MAX_ITER, SVM_TOLERANCE};

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSvcParams {
    /// Regularization strength; upper bound of each dual variable
    pub c: f64,
    /// Maximum passes over the data per binary sub-problem
    pub max_iter: usize,
    /// Stop once the projected gradient gap falls below this
    pub tolerance: f64,
    /// Seed for the per-epoch visiting order
    pub random_state: u64,
}

impl Default for LinearSvcParams {
    fn default() -> Self {
        Self {
            c: SVM_C,
            max_iter: SVM_MAX_ITER,
            tolerance: SVM_TOLERANCE,
            random_state: RANDOM_STATE,
        }
    }
}

impl From<&TrainerConfig> for LinearSvcParams {
    fn from(config: &TrainerConfig) -> Self {
        Self {
            c: config.c,
            max_iter: config.max_iter,
            tolerance: config.tolerance,
            random_state: config.random_state,
        }
    }
}

/// Binary decision function separating `positive` from `negative`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PairwiseEstimator {
    positive: i64,
    negative: i64,
    weights: Vec<f64>,
    bias: f64,
}

impl PairwiseEstimator {
    fn decision(&self, row: &[(usize, f64)]) -> f64 {
        sparse_dot(&self.weights, row) + self.bias
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvc {
    /// Distinct training labels, ascending
    classes: Vec<i64>,
    /// One estimator per unordered class pair
    estimators: Vec<PairwiseEstimator>,
    num_features: usize,
}

impl LinearSvc {
    pub fn fit(x: &CsMat<f64>, y: &[i64], params: &LinearSvcParams) -> Result<Self> {
        if x.rows() != y.len() {
            return Err(AppError::ModelError(format!(
                "Feature matrix has {} rows but {} labels were given",
                x.rows(),
                y.len()
            )));
        }

        let classes: Vec<i64> = y.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if classes.len() < 2 {
            return Err(AppError::ModelError(format!(
                "Need samples of at least 2 classes, got {}",
                classes.len()
            )));
        }

        let rows = sparse_rows(x);
        let mut rng = StdRng::seed_from_u64(params.random_state);
        let mut estimators = Vec::with_capacity(classes.len() * (classes.len() - 1) / 2);

        for (i, &positive) in classes.iter().enumerate() {
            for &negative in &classes[i + 1..] {
                let (samples, targets): (Vec<usize>, Vec<f64>) = y
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, &label)| {
                        if label == positive {
                            Some((idx, 1.0))
                        } else if label == negative {
                            Some((idx, -1.0))
                        } else {
                            None
                        }
                    })
                    .unzip();

                let (weights, bias) = solve_dual(&rows, &samples, &targets, x.cols(), params, &mut rng);
                tracing::debug!(positive, negative, samples = samples.len(), "Fitted pairwise estimator");

                estimators.push(PairwiseEstimator {
                    positive,
                    negative,
                    weights,
                    bias,
                });
            }
        }

        Ok(Self {
            classes,
            estimators,
            num_features: x.cols(),
        })
    }

    pub fn predict(&self, x: &CsMat<f64>) -> Result<Vec<i64>> {
        if x.cols() != self.num_features {
            return Err(AppError::ModelError(format!(
                "Expected {} features, got {}",
                self.num_features,
                x.cols()
            )));
        }

        let predictions = sparse_rows(x)
            .iter()
            .map(|row| {
                let mut votes = vec![0usize; self.classes.len()];
                for estimator in &self.estimators {
                    let winner = if estimator.decision(row) > 0.0 {
                        estimator.positive
                    } else {
                        estimator.negative
                    };
                    if let Ok(pos) = self.classes.binary_search(&winner) {
                        votes[pos] += 1;
                    }
                }
                majority(&self.classes, &votes)
            })
            .collect();

        Ok(predictions)
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }
}

/// Dual coordinate descent for the L1-loss (hinge) SVM with a bias feature.
///
/// Minimizes `0.5 a'Qa - e'a` subject to `0 <= a_i <= C`, where
/// `Q_ij = y_i y_j (x_i . x_j + 1)`.
fn solve_dual(
    rows: &[Vec<(usize, f64)>],
    samples: &[usize],
    targets: &[f64],
    num_features: usize,
    params: &LinearSvcParams,
    rng: &mut StdRng,
) -> (Vec<f64>, f64) {
    let mut weights = vec![0.0; num_features];
    let mut bias = 0.0;
    let mut alpha = vec![0.0; samples.len()];

    let diagonal: Vec<f64> = samples
        .iter()
        .map(|&s| rows[s].iter().map(|(_, v)| v * v).sum::<f64>() + 1.0)
        .collect();

    let mut order: Vec<usize> = (0..samples.len()).collect();
    let mut converged = false;

    for _ in 0..params.max_iter {
        order.shuffle(rng);
        let mut pg_max = f64::NEG_INFINITY;
        let mut pg_min = f64::INFINITY;

        for &i in &order {
            let row = &rows[samples[i]];
            let y = targets[i];
            let gradient = y * (sparse_dot(&weights, row) + bias) - 1.0;

            let projected = if alpha[i] <= 0.0 {
                gradient.min(0.0)
            } else if alpha[i] >= params.c {
                gradient.max(0.0)
            } else {
                gradient
            };
            pg_max = pg_max.max(projected);
            pg_min = pg_min.min(projected);

            if projected.abs() > 1e-12 {
                let previous = alpha[i];
                alpha[i] = (previous - gradient / diagonal[i]).clamp(0.0, params.c);
                let step = (alpha[i] - previous) * y;
                for &(column, value) in row {
                    weights[column] += step * value;
                }
                bias += step;
            }
        }

        if pg_max - pg_min <= params.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            max_iter = params.max_iter,
            "Solver did not converge; consider raising max_iter"
        );
    }

    (weights, bias)
}

/// Label with the most votes; ties go to the smallest label.
fn majority(classes: &[i64], votes: &[usize]) -> i64 {
    let mut best = 0;
    for (pos, &count) in votes.iter().enumerate() {
        if count > votes[best] {
            best = pos;
        }
    }
    classes[best]
}

fn sparse_rows(x: &CsMat<f64>) -> Vec<Vec<(usize, f64)>> {
    x.outer_iterator()
        .map(|row| row.iter().map(|(column, &value)| (column, value)).collect())
        .collect()
}

fn sparse_dot(weights: &[f64], row: &[(usize, f64)]) -> f64 {
    row.iter().map(|&(column, value)| weights[column] * value).sum()
}
