//! Dictionary-backed Indonesian affix stemmer.
//!
//! Strips inflectional particles, possessive pronouns, derivational suffixes
//! and up to three derivational prefixes (with nasal recoding), and only
//! accepts a candidate when it is a known root word. Words with no root in
//! the dictionary are returned unchanged.
//!
//! Prefixes are only tried once neither the word nor any suffix-stripped
//! form of it is a dictionary entry, so lexicalized words such as `selalu`
//! or `sebagai` listed in the dictionary keep their meaning.

use std::collections::HashSet;

const PARTICLES: [&str; 4] = ["lah", "kah", "tah", "pun"];
const POSSESSIVES: [&str; 3] = ["nya", "ku", "mu"];
const MAX_PREFIXES: usize = 3;
const MIN_STEM_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Di,
    Ke,
    Se,
    Be,
    Te,
    Me,
    Pe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    I,
    Kan,
    An,
}

/// Prefix/suffix pairs that never form a valid confix.
fn is_disallowed_confix(prefix: Prefix, suffix: Suffix) -> bool {
    matches!(
        (prefix, suffix),
        (Prefix::Be, Suffix::I)
            | (Prefix::Di, Suffix::An)
            | (Prefix::Ke, Suffix::I)
            | (Prefix::Ke, Suffix::Kan)
            | (Prefix::Me, Suffix::An)
            | (Prefix::Se, Suffix::I)
            | (Prefix::Se, Suffix::Kan)
            | (Prefix::Te, Suffix::An)
    )
}

#[derive(Debug, Clone, Default)]
pub struct IndonesianStemmer {
    dictionary: HashSet<String>,
}

impl IndonesianStemmer {
    /// Build from raw dictionary lines. Blank lines and `#` comments are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dictionary = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .collect();
        Self { dictionary }
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_root(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    pub fn stem_word(&self, word: &str) -> String {
        if word.chars().count() <= 3 || self.is_root(word) {
            return word.to_string();
        }

        let without_particle = strip_any_suffix(word, &PARTICLES);
        let without_possessive = strip_any_suffix(without_particle, &POSSESSIVES);

        // Most stripped form first, then progressively restore suffixes.
        let mut candidates = derivational_candidates(without_possessive);
        candidates.push((without_possessive, None));
        if without_particle != without_possessive {
            candidates.push((without_particle, None));
        }
        if word != without_particle {
            candidates.push((word, None));
        }

        if let Some((root, _)) = candidates.iter().find(|(c, _)| self.is_root(c)) {
            return root.to_string();
        }
        for (candidate, suffix) in candidates {
            if let Some(root) = self.strip_prefixes(candidate, suffix, None, 0) {
                return root;
            }
        }

        word.to_string()
    }

    fn strip_prefixes(
        &self,
        word: &str,
        suffix: Option<Suffix>,
        previous: Option<Prefix>,
        depth: usize,
    ) -> Option<String> {
        if depth >= MAX_PREFIXES {
            return None;
        }

        for (prefix, remainder) in prefix_candidates(word) {
            if previous == Some(prefix) {
                continue;
            }
            if depth == 0 && suffix.is_some_and(|s| is_disallowed_confix(prefix, s)) {
                continue;
            }
            if remainder.chars().count() < MIN_STEM_LEN {
                continue;
            }
            if self.is_root(&remainder) {
                return Some(remainder);
            }
            if let Some(root) = self.strip_prefixes(&remainder, suffix, Some(prefix), depth + 1) {
                return Some(root);
            }
        }

        None
    }
}

fn strip_any_suffix<'a>(word: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .filter(|stem| stem.chars().count() > MIN_STEM_LEN)
        .unwrap_or(word)
}

fn derivational_candidates(word: &str) -> Vec<(&str, Option<Suffix>)> {
    let mut out = Vec::new();
    if let Some(stem) = word.strip_suffix("kan") {
        out.push((stem, Some(Suffix::Kan)));
    }
    if let Some(stem) = word.strip_suffix("an") {
        out.push((stem, Some(Suffix::An)));
    } else if let Some(stem) = word.strip_suffix('i') {
        out.push((stem, Some(Suffix::I)));
    }
    out.retain(|(stem, _)| stem.chars().count() >= MIN_STEM_LEN);
    out
}

fn prefix_candidates(word: &str) -> Vec<(Prefix, String)> {
    let mut out = Vec::new();

    for (text, prefix) in [("di", Prefix::Di), ("ke", Prefix::Ke), ("se", Prefix::Se)] {
        if let Some(rest) = word.strip_prefix(text) {
            out.push((prefix, rest.to_string()));
        }
    }

    for text in ["ber", "bel", "be"] {
        if let Some(rest) = word.strip_prefix(text) {
            out.push((Prefix::Be, rest.to_string()));
        }
    }

    for text in ["ter", "te"] {
        if let Some(rest) = word.strip_prefix(text) {
            out.push((Prefix::Te, rest.to_string()));
        }
    }

    nasal_candidates(word, "me", Prefix::Me, &mut out);

    for text in ["per", "pel"] {
        if let Some(rest) = word.strip_prefix(text) {
            out.push((Prefix::Pe, rest.to_string()));
        }
    }
    nasal_candidates(word, "pe", Prefix::Pe, &mut out);

    out
}

/// `me-`/`pe-` and their nasal forms, with the consonant the nasal replaced.
fn nasal_candidates(word: &str, base: &str, prefix: Prefix, out: &mut Vec<(Prefix, String)>) {
    let Some(after_base) = word.strip_prefix(base) else {
        return;
    };

    if let Some(rest) = after_base.strip_prefix("nge") {
        out.push((prefix, rest.to_string()));
    }
    if let Some(rest) = after_base.strip_prefix("ng") {
        out.push((prefix, rest.to_string()));
        out.push((prefix, format!("k{rest}")));
    }
    if let Some(rest) = after_base.strip_prefix("ny") {
        out.push((prefix, format!("s{rest}")));
    }
    if let Some(rest) = after_base.strip_prefix('m') {
        out.push((prefix, rest.to_string()));
        out.push((prefix, format!("p{rest}")));
    }
    if let Some(rest) = after_base.strip_prefix('n') {
        out.push((prefix, rest.to_string()));
        out.push((prefix, format!("t{rest}")));
    }
    out.push((prefix, after_base.to_string()));
}
