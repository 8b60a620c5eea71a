// ============================================================
// TF-IDF VECTORIZER
// ============================================================
// Term counts weighted by smoothed IDF, L2-normalized per row

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sprs::CsMat;

use crate::domain::error::{AppError, Result};

/// Words of two or more word characters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> column index, assigned in sorted term order
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<T: AsRef<str>>(texts: &[T]) -> Result<Self> {
        tracing::debug!(num_texts = texts.len(), "Fitting TfidfVectorizer");

        // Document frequency per term
        let mut doc_frequencies: BTreeMap<String, usize> = BTreeMap::new();
        for text in texts {
            let mut terms = tokenize(text.as_ref());
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *doc_frequencies.entry(term).or_insert(0) += 1;
            }
        }

        if doc_frequencies.is_empty() {
            return Err(AppError::ModelError(
                "Empty vocabulary; the training texts contain no tokens".to_string(),
            ));
        }

        // IDF: ln((n_docs + 1) / (df + 1)) + 1
        let n_docs = texts.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_frequencies.len());
        for (index, (term, df)) in doc_frequencies.into_iter().enumerate() {
            idf.push(((n_docs + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        tracing::debug!(num_features = idf.len(), "IDF calculation complete");
        Ok(Self { vocabulary, idf })
    }

    pub fn fit_transform<T: AsRef<str>>(texts: &[T]) -> Result<(Self, CsMat<f64>)> {
        let vectorizer = Self::fit(texts)?;
        let matrix = vectorizer.transform(texts)?;
        Ok((vectorizer, matrix))
    }

    /// One CSR row per text. Terms outside the vocabulary are ignored.
    pub fn transform<T: AsRef<str>>(&self, texts: &[T]) -> Result<CsMat<f64>> {
        if !self.is_fitted() {
            return Err(AppError::ModelError(
                "TfidfVectorizer is not fitted".to_string(),
            ));
        }

        let mut indptr = Vec::with_capacity(texts.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        for text in texts {
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for term in tokenize(text.as_ref()) {
                if let Some(&column) = self.vocabulary.get(&term) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }

            let weighted: Vec<(usize, f64)> = counts
                .into_iter()
                .map(|(column, count)| (column, count * self.idf[column]))
                .collect();
            let norm = weighted.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();

            for (column, value) in weighted {
                indices.push(column);
                data.push(if norm > 0.0 { value / norm } else { value });
            }
            indptr.push(indices.len());
        }

        Ok(CsMat::new(
            (texts.len(), self.num_features()),
            indptr,
            indices,
            data,
        ))
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty() && self.vocabulary.len() == self.idf.len()
    }

    pub fn num_features(&self) -> usize {
        self.idf.len()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sorted_and_single_chars_dropped() {
        let vectorizer = TfidfVectorizer::fit(&["kerja bagus a", "Bagus cepat"]).unwrap();
        let terms: Vec<_> = vectorizer.vocabulary.iter().collect();
        assert_eq!(
            terms,
            vec![
                (&"bagus".to_string(), &0),
                (&"cepat".to_string(), &1),
                (&"kerja".to_string(), &2)
            ]
        );
    }

    #[test]
    fn test_smoothed_idf() {
        let vectorizer = TfidfVectorizer::fit(&["bagus cepat", "bagus"]).unwrap();
        // bagus: df = 2 of 2 docs, cepat: df = 1
        assert!((vectorizer.idf[0] - 1.0).abs() < 1e-12);
        assert!((vectorizer.idf[1] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_l2_normalized_and_unknown_terms_ignored() {
        let (vectorizer, matrix) =
            TfidfVectorizer::fit_transform(&["bagus cepat bagus", "lambat error"]).unwrap();
        assert_eq!(matrix.shape(), (2, 4));
        for row in matrix.outer_iterator() {
            let norm: f64 = row.iter().map(|(_, v)| v * v).sum();
            assert!((norm - 1.0).abs() < 1e-9);
        }

        let unseen = vectorizer.transform(&["tidak dikenal", ""]).unwrap();
        assert_eq!(unseen.nnz(), 0);
        assert_eq!(unseen.rows(), 2);
    }

    #[test]
    fn test_empty_vocabulary_is_error() {
        let err = TfidfVectorizer::fit(&["", "a b c"]).unwrap_err();
        assert!(matches!(err, AppError::ModelError(_)));
    }

    #[test]
    fn test_unfitted_transform_is_error() {
        let vectorizer = TfidfVectorizer::default();
        assert!(!vectorizer.is_fitted());
        assert!(vectorizer.transform(&["test text"]).is_err());
    }
}
