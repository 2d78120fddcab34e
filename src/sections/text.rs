use std::sync::LazyLock;

use regex::Regex;

const MIN_ABSTRACT_CHARS: usize = 20;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid markup regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static TITLE_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*\.?\s*").expect("valid numbering regex"));

// Concatenated forms ("AbstractIntroduction") have no word boundary after
// "Abstract", so they need their own entry.
static ABSTRACT_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^abstract\b\s*:?\s*",
        r"(?i)^summary\b\s*:?\s*",
        r"(?i)^introduction\b\s*:?\s*",
        r"(?i)^background\b\s*:?\s*",
        r"(?i)^objectives?\b\s*:?\s*",
        r"(?i)^purpose\b\s*:?\s*",
        r"(?i)^abstract(?:introduction|background|objectives?|purpose|aims?|methods?)\s*:?\s*",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid abstract prefix regex"))
    .collect()
});

pub fn clean_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let without_tags = MARKUP_TAG.replace_all(input, "");
    WHITESPACE_RUN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

pub fn clean_section_title(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let unnumbered = TITLE_NUMBERING.replace(trimmed, "");
    let cleaned = clean_text(&unnumbered);
    if cleaned.is_empty() {
        return String::new();
    }
    title_case(&cleaned)
}

/// Remove boilerplate lead-ins ("Abstract:", "Background", ...) from an
/// abstract. Returns an empty string when fewer than 20 characters remain.
pub fn clean_abstract(input: &str) -> String {
    let mut cleaned = clean_text(input);
    if cleaned.is_empty() {
        return String::new();
    }

    loop {
        let before = cleaned.len();
        for prefix in ABSTRACT_PREFIXES.iter() {
            let stripped = prefix.replace(&cleaned, "");
            cleaned = trim_leading_punctuation(&stripped).to_string();
        }
        if cleaned.len() == before {
            break;
        }
    }

    if cleaned.chars().count() < MIN_ABSTRACT_CHARS {
        return String::new();
    }
    cleaned
}

/// Capitalize the first letter of every alphabetic run and lower-case the
/// rest. Any non-letter starts a new word, so "2nd" becomes "2Nd".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}

pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &input[..byte_index],
        None => input,
    }
}

fn trim_leading_punctuation(input: &str) -> &str {
    input.trim_start_matches(|ch: char| {
        ch.is_whitespace() || matches!(ch, ':' | '-' | '.' | ',' | ';' | '–' | '—')
    })
}
