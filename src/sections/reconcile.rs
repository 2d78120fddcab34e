use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

static LEADING_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.\d]*\s*").expect("valid numbering regex"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

pub fn normalize_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }
    let lowered = title.to_lowercase();
    let unnumbered = LEADING_NUMBERING.replace(&lowered, "");
    let bare = NON_WORD.replace_all(&unnumbered, "");
    WHITESPACE_RUN.replace_all(&bare, " ").trim().to_string()
}

/// Jaccard ratio of the whitespace-separated word sets of two titles that are
/// already normalized. `None` when either side has no words.
pub fn word_jaccard(left: &str, right: &str) -> Option<f64> {
    let left_words = left.split_whitespace().collect::<HashSet<&str>>();
    let right_words = right.split_whitespace().collect::<HashSet<&str>>();
    if left_words.is_empty() || right_words.is_empty() {
        return None;
    }

    let intersection = left_words.intersection(&right_words).count();
    let union = left_words.union(&right_words).count();
    Some(intersection as f64 / union as f64)
}

pub fn are_titles_similar(left: &str, right: &str, threshold: f64) -> bool {
    normalized_titles_similar(&normalize_title(left), &normalize_title(right), threshold)
}

pub(crate) fn normalized_titles_similar(left: &str, right: &str, threshold: f64) -> bool {
    word_jaccard(left, right).is_some_and(|ratio| ratio >= threshold)
}
