use super::patterns::is_content_noise;

const MIN_LINE_CHARS: usize = 9;
const MAX_LINE_CHARS: usize = 799;
const MIN_FILTERED_LINE_CHARS: usize = 16;

const MIN_SECTION_CHARS: usize = 101;
const MIN_SECTION_SPACES: usize = 21;
const MIN_SECTION_PERIODS: usize = 3;
const MIN_SECTION_WORDS: usize = 26;

const LINE_BLACKLIST: &[&str] = &[
    "page",
    "doi:",
    "journal",
    "volume",
    "copyright",
    "©",
    "arxiv:",
    "email",
    "@",
    "university",
    "institute",
    "laboratory",
    "department",
];

pub fn is_valid_content_line(line: &str) -> bool {
    let length = line.chars().count();
    if !(MIN_LINE_CHARS..=MAX_LINE_CHARS).contains(&length) {
        return false;
    }

    let lowered = line.to_lowercase();
    if LINE_BLACKLIST.iter().any(|keyword| lowered.contains(keyword)) {
        return false;
    }

    !is_all_digits(line)
        && !(length >= 10 && is_upper_and_spaces(line))
        && !line.starts_with("http")
        && pipe_count(line) < 2
        && !is_letter_marker(line)
        && !is_numbered_marker(line)
}

pub fn filter_section_content<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !is_content_noise(line))
        .map(str::trim)
        .filter(|line| {
            line.chars().count() >= MIN_FILTERED_LINE_CHARS
                && !is_all_digits(line)
                && !is_upper_and_spaces(line)
                && pipe_count(line) < 3
                && !is_punctuation_only(line)
        })
        .map(ToOwned::to_owned)
        .collect()
}

pub fn is_valid_section_content(content: &str) -> bool {
    content.chars().count() >= MIN_SECTION_CHARS
        && content.matches(' ').count() >= MIN_SECTION_SPACES
        && content.matches('.').count() >= MIN_SECTION_PERIODS
        && !content.starts_with('|')
        && !is_layout_only(content)
        && content.split_whitespace().count() >= MIN_SECTION_WORDS
}

fn pipe_count(line: &str) -> usize {
    line.matches('|').count()
}

fn is_all_digits(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|ch| ch.is_ascii_digit())
}

fn is_upper_and_spaces(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|ch| ch.is_ascii_uppercase() || ch.is_whitespace())
}

fn is_punctuation_only(line: &str) -> bool {
    line.chars()
        .all(|ch| ch.is_whitespace() || ch.is_ascii_punctuation())
}

fn is_layout_only(content: &str) -> bool {
    content
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch.is_whitespace() || matches!(ch, '|' | '-' | '+' | '=' | ':'))
}

fn is_letter_marker(line: &str) -> bool {
    let trimmed = line.trim_end();
    let mut chars = trimmed.chars();
    matches!(
        (chars.next(), chars.next(), chars.next(), chars.next()),
        (Some('('), Some(letter), Some(')'), None) if letter.is_ascii_lowercase()
    )
}

fn is_numbered_marker(line: &str) -> bool {
    line.trim_end()
        .strip_suffix('.')
        .is_some_and(|digits| is_all_digits(digits.trim_end()))
}
