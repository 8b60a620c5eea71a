// ============================================================
// TEXT CLEANER
// ============================================================
// Deterministic normalization chain applied to every review

mod stemmer;
mod stopwords;

pub use stemmer::IndonesianStemmer;
pub use stopwords::{BASELINE_STOPWORDS, EXTENDED_STOPWORDS};

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\.\S+").unwrap());

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").unwrap());

static NON_ALPHA_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z\s]").unwrap());

static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Stopword/stemming strategy, chosen once at startup
#[derive(Debug, Clone)]
pub enum LinguisticBackend {
    /// Baseline stopwords, no stemming
    Baseline,
    /// Baseline plus general Indonesian stopwords, with root-word stemming
    Extended(IndonesianStemmer),
}

impl LinguisticBackend {
    pub fn name(&self) -> &'static str {
        match self {
            LinguisticBackend::Baseline => "baseline",
            LinguisticBackend::Extended(_) => "extended",
        }
    }

    fn stopwords(&self) -> &'static HashSet<&'static str> {
        match self {
            LinguisticBackend::Baseline => &BASELINE_STOPWORDS,
            LinguisticBackend::Extended(_) => &EXTENDED_STOPWORDS,
        }
    }
}

/// Normalizes raw review text into lowercase alphabetic tokens
#[derive(Debug, Clone)]
pub struct TextCleaner {
    backend: LinguisticBackend,
}

impl TextCleaner {
    pub fn new(backend: LinguisticBackend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &LinguisticBackend {
        &self.backend
    }

    pub fn uses_extended_backend(&self) -> bool {
        matches!(self.backend, LinguisticBackend::Extended(_))
    }

    /// Run the full chain. Missing input yields an empty string.
    pub fn clean(&self, raw: Option<&str>) -> String {
        let text = raw.unwrap_or_default().to_lowercase();
        let text = text.replace(['\n', '\r', '\t'], " ");

        let text = URL_PATTERN.replace_all(&text, " ");
        let text = EMAIL_PATTERN.replace_all(&text, " ");
        let text = NON_ALPHA_PATTERN.replace_all(&text, " ");
        let text = collapse_whitespace(&text);

        let tokens = self.filter_tokens(text.split(' '));

        let tokens = match &self.backend {
            LinguisticBackend::Baseline => tokens,
            LinguisticBackend::Extended(stemmer) => {
                let stemmed: Vec<String> = tokens.iter().map(|t| stemmer.stem_word(t)).collect();
                // A root can itself be a stopword ("guna") or too short.
                self.filter_tokens(stemmed.iter().map(String::as_str))
            }
        };

        collapse_whitespace(&tokens.join(" "))
    }

    fn filter_tokens<'a>(&self, tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
        let stopwords = self.backend.stopwords();
        tokens
            .filter(|t| t.chars().count() > 1 && !stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_PATTERN.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extended() -> TextCleaner {
        TextCleaner::new(LinguisticBackend::Extended(IndonesianStemmer::from_words([
            "aplikasi", "bantu", "guna", "mudah", "kecewa", "pakai", "susah", "bagus", "cepat",
        ])))
    }

    fn assert_normalized(cleaned: &str, stopwords: &HashSet<&str>) {
        assert!(cleaned.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        assert!(!cleaned.contains("  "));
        assert_eq!(cleaned, cleaned.trim());
        for token in cleaned.split_whitespace() {
            assert!(token.len() > 1, "short token {token:?}");
            assert!(!stopwords.contains(token), "stopword {token:?}");
        }
    }

    #[test]
    fn test_missing_input_is_empty() {
        let cleaner = TextCleaner::new(LinguisticBackend::Baseline);
        assert_eq!(cleaner.clean(None), "");
        assert_eq!(cleaner.clean(Some("")), "");
        assert_eq!(cleaner.clean(Some("   \n\t ")), "");
    }

    #[test]
    fn test_url_stopwords_and_punctuation_removed() {
        let cleaner = TextCleaner::new(LinguisticBackend::Baseline);
        assert_eq!(
            cleaner.clean(Some("Aplikasi ini SANGAT bagus!!! http://x.com")),
            "bagus"
        );
    }

    #[test]
    fn test_email_digits_and_symbols_removed() {
        let cleaner = TextCleaner::new(LinguisticBackend::Baseline);
        let cleaned = cleaner.clean(Some("Hubungi cs@nyarigawe.id\nlowongan 24/7 ok👍 café"));
        assert_eq!(cleaned, "hubungi lowongan ok caf");
    }

    #[test]
    fn test_www_links_removed() {
        let cleaner = TextCleaner::new(LinguisticBackend::Baseline);
        assert_eq!(
            cleaner.clean(Some("cek www.example.com lowongan kerja")),
            "cek lowongan kerja"
        );
    }

    #[test]
    fn test_extended_backend_stems_and_refilters() {
        let cleaner = extended();
        assert!(cleaner.uses_extended_backend());
        assert_eq!(
            cleaner.clean(Some("Aplikasinya sangat membantu dan mudah digunakan")),
            "bantu mudah"
        );
        assert_eq!(
            cleaner.clean(Some("Sering error dan susah dipakai, mengecewakan")),
            "sering error susah pakai kecewa"
        );
    }

    #[test]
    fn test_bundled_dictionary_keeps_meaning() {
        let cleaner = TextCleaner::new(LinguisticBackend::Extended(IndonesianStemmer::from_words(
            include_str!("../../../../resources/kata-dasar.txt").lines(),
        )));
        assert_eq!(cleaner.clean(Some("Selalu lancar")), "selalu lancar");
        assert_eq!(cleaner.clean(Some("Pelayanan lambat")), "layan lambat");
    }

    #[test]
    fn test_output_invariants_hold_for_both_backends() {
        let samples = [
            "Mantap!!! 5 bintang :) https://t.co/abc",
            "  GAK   bisa login\t\tpadahal sudah update ",
            "Tolong diperbaiki min, sering force close 😡😡",
            "a b c d e",
            "Lowongan di Jakarta & Bandung banyak sekali, terima kasih!",
        ];
        let baseline = TextCleaner::new(LinguisticBackend::Baseline);
        let extended = extended();
        for sample in samples {
            assert_normalized(&baseline.clean(Some(sample)), &BASELINE_STOPWORDS);
            assert_normalized(&extended.clean(Some(sample)), &EXTENDED_STOPWORDS);
        }
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(LinguisticBackend::Baseline.name(), "baseline");
        assert!(!TextCleaner::new(LinguisticBackend::Baseline).uses_extended_backend());
    }
}
