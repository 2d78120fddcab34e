use std::sync::LazyLock;

use regex::{Regex, RegexSet};

const NUMBERED_HEADINGS: &[&str] = &[
    r"^(\d+\.?\d*\.?\d*)\s+([A-Z][A-Za-z\s\-:,()]+)$",
    r"^#\s*(\d+\.?\d*\.?\d*)\s*([A-Z][A-Za-z\s\-:,()]+)$",
    r"^##\s*(\d+\.?\d*\.?\d*)\s*([A-Z][A-Za-z\s\-:,()]+)$",
    r"^###\s*(\d+\.?\d*\.?\d*)\s*([A-Z][A-Za-z\s\-:,()]+)$",
    r"^(\d+)\s+([A-Z][A-Z\s\-:,()]{5,})$",
    r"^(\d+\.\d+)\s+([A-Z][A-Za-z\s\-:,()]{5,})$",
];

const NAMED_HEADINGS: &[&str] = &[
    "Abstract",
    "Introduction",
    "Related Work",
    "Preliminaries",
    "Background",
    "Problem Definition",
    "Methods|Materials and Methods|Methodology",
    "Results|Experimental Results|Evaluation",
    "Discussion",
    "Conclusions?",
    "Acknowledge?ments?",
    "Keywords?|Key words?",
    "Data Availability Statement",
    "Author Contributions",
    "Funding",
    "Conflicts? of Interest",
    "Ethics Statement",
    "Auto-Prep",
    "Offline Model Training",
    "Online Global Graph Search",
    "Experimental Evaluation",
    "Transformation Models",
    "Join Models",
    "Graph Representations",
    "Implementation",
    "Experimental Setup",
    "System Design",
    "Case Study",
    "Performance Analysis",
    "Future Work",
    "Limitations",
];

const APPENDIX_HEADING: &str = r"^(?:#{1,6}\s*)?((?i:appendix(?:es)?))(?:\s+[A-Z0-9]{1,2}(?:\.\d+)*)?(?:\s*[:.\-–]\s*[^.]{0,80})?\s*$";

const SKIP_LINES: &[&str] = &[
    r"^[*\-=+]{3,}$",
    r"^(?:Figure|Fig\.|Table|Algorithm|Theorem|Proposition|Definition|Example|Lemma)\s*\d+",
    r"^Supplementary",
    r"^\|.*\|.*\|",
    r"^[:\-+=|]{4,}$",
    r"^\d+\s*\|\s*\d+",
    r"^Proof\b",
    r"^\$\$",
    r"(?i)^arxiv:",
    r"(?i)^doi:",
    r"^\d+$",
    r"^[A-Z\s]{15,}$",
    r"^\([a-d]\)\s",
    r"^\([^)]{1,5}\)$",
    r"^[A-Za-z]+\s+\d+:",
    r"^[A-Z][a-z]+\s+(?:[A-Z]\.\s+)?[A-Z][a-z]+\s*[\d*†‡]+(?:,|$)",
    r"^[A-Z][a-z]+\s+[A-Z]\.\s+[A-Z][a-z]+",
    r"^[A-Z][a-z]+\s+(?:University|Institute|Research|Laboratory)",
    r"(?i)^e-?mail\s*:",
    r"^\d{4}$",
    r"^\d{1,2}/\d{1,2}/\d{4}",
    r"^(?:Page\s+\d+|p\.\s*\d+)",
    r"^[A-Z]{2,}\s*:",
    r"^https?://",
    r"^www\.",
    r"^[\w.+\-]+@[\w\-]+\.",
    r"^\d+\.\d+\.\d+",
    r"(?i)^copyright",
    r"^©",
    r"^\d{4}-\d{3}[\dX]",
    r"^(?:PVLDB|VLDB|ACM|IEEE)",
    r"^(?:pp|Vol|No)\.\s*\d+",
    r"(?i)^how to cite this article:",
    r"^(?:Received|Revised|Accepted|Published)\s*:",
];

const CONTENT_NOISE: &[&str] = &[
    r"^\|.*\|.*\|",
    r"^[:\-+=|]{4,}$",
    r"^[-*_=]{3,}$",
    r"^\$",
    r"^\\\[|^\\\]",
    r"^(?:Algorithm|Theorem|Proposition|Definition|Example|Lemma|Corollary)\s+\d+",
    r"^(?:\([a-z]\)|\(\d+\))\s",
    r"^(?:Figure|Table|Equation)\s+\d+",
    r"^\d+\.\s*\[[^\]]+\]",
    r"^\[[^\]]+\]\s*\d+",
    r"^\[\d+(?:[,\-–]\s*\d+)*\]",
    r"^(?:Input|Output)(?::|\s)",
    r"^\d+\s+(?:foreach|while|if|else|return)\b",
    r"^[A-Z][a-z]+\s+[A-Z]\.[A-Z]\.",
    r"^\w+\s*=\s*",
    r"^[a-zA-Z]+\(\s*[a-zA-Z]",
    r"^\d+\s*:\s*",
    r"^(?:••|■|▪)",
    r"(?i)^arxiv:\d+\.\d+",
    r"(?i)^doi:\s*\d+",
    r"^\d+\s+[a-z]+\s+[a-z]+\s+do$",
    r"^(?:foreach|while|if|else|return)\s+",
];

static NUMBERED: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(NUMBERED_HEADINGS));

static NAMED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let mut compiled = NAMED_HEADINGS
        .iter()
        .map(|names| {
            Regex::new(&format!(r"(?i)^(?:#{{1,6}}\s*)?({names})\s*[:.]?$"))
                .expect("valid named heading regex")
        })
        .collect::<Vec<Regex>>();
    compiled.push(Regex::new(APPENDIX_HEADING).expect("valid appendix heading regex"));
    compiled
});

static REFERENCES_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#{1,6}\s*)?(?:\d+\.?\s*)?(?:References|REFERENCES|Bibliography|BIBLIOGRAPHY)\s*:?$")
        .expect("valid references heading regex")
});

static ALGORITHM_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Algorithm\s+\d+").expect("valid algorithm regex"));

static TABLE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|.*\|").expect("valid table row regex"));

static TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[:\-+=|\s]{3,}$").expect("valid table separator regex"));

static SKIP: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(SKIP_LINES).expect("valid skip pattern set"));

static NOISE: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(CONTENT_NOISE).expect("valid content noise set"));

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid heading regex"))
        .collect()
}

pub(crate) fn numbered_heading(line: &str) -> Option<String> {
    NUMBERED.iter().find_map(|pattern| {
        pattern
            .captures(line)
            .and_then(|captures| captures.get(2))
            .map(|title| title.as_str().trim().to_string())
    })
}

pub(crate) fn named_heading(line: &str) -> Option<String> {
    NAMED.iter().find_map(|pattern| {
        pattern
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map(|title| title.as_str().trim().to_string())
    })
}

// numbered first; table order is first-match-wins
pub(crate) fn heading(line: &str) -> Option<String> {
    numbered_heading(line).or_else(|| named_heading(line))
}

/// Heading check used inside a references block, where a named heading that
/// starts with "ref" must not end the block.
pub(crate) fn heading_after_references(line: &str) -> Option<String> {
    if let Some(title) = numbered_heading(line) {
        return Some(title);
    }
    if line.to_lowercase().starts_with("ref") {
        return None;
    }
    named_heading(line)
}

pub(crate) fn is_references_heading(line: &str) -> bool {
    REFERENCES_HEADING.is_match(line)
}

pub(crate) fn is_algorithm_start(line: &str) -> bool {
    ALGORITHM_START.is_match(line)
}

pub(crate) fn is_table_row(line: &str) -> bool {
    TABLE_ROW.is_match(line)
}

pub(crate) fn is_table_separator(line: &str) -> bool {
    TABLE_SEPARATOR.is_match(line)
}

pub(crate) fn is_skip_line(line: &str) -> bool {
    SKIP.is_match(line)
}

pub(crate) fn is_content_noise(line: &str) -> bool {
    NOISE.is_match(line)
}
