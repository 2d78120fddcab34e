use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::filters::{filter_section_content, is_valid_content_line, is_valid_section_content};
use super::map::{Origin, Section, SectionMap};
use super::patterns;
use super::text::{clean_section_title, clean_text, truncate_chars};

pub const SECTION_CONTENT_CAP: usize = 4000;
pub const REFERENCES_CONTENT_CAP: usize = 8000;

const REFERENCES_TITLE: &str = "References";
const MAX_REFERENCE_LINES: usize = 50;
const MIN_REFERENCE_LINE_CHARS: usize = 11;
const MAX_TABLE_TAIL_LINES: usize = 5;

static RESIDUAL_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\d*\.?\d*\s*").expect("valid numbering regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Prose,
    Table { tail_lines: usize },
    Algorithm,
    References,
}

#[derive(Debug)]
struct OpenSection {
    title: String,
    lines: Vec<String>,
    block: Block,
}

impl OpenSection {
    fn new(title: impl Into<String>, block: Block) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            block,
        }
    }
}

#[derive(Debug, Default)]
enum ParseState {
    #[default]
    Outside,
    InSection(OpenSection),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SegmentStats {
    pub lines_seen: usize,
    pub lines_skipped: usize,
    pub table_lines_dropped: usize,
    pub algorithm_lines_dropped: usize,
    pub headings_detected: usize,
    pub sections_rejected: usize,
    pub sections_emitted: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub sections: SectionMap,
    pub stats: SegmentStats,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RawTextSegmenter;

impl RawTextSegmenter {
    pub fn new() -> Self {
        Self
    }

    pub fn segment<I, S>(&self, lines: I) -> Segmentation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pass = SegmentPass::default();
        for line in lines {
            pass.feed(line.as_ref());
        }
        pass.finish()
    }
}

#[derive(Debug, Default)]
struct SegmentPass {
    state: ParseState,
    finished: Vec<(String, String)>,
    stats: SegmentStats,
}

impl SegmentPass {
    fn feed(&mut self, raw_line: &str) {
        let line = raw_line.trim();
        if line.is_empty() {
            return;
        }
        self.stats.lines_seen += 1;

        if patterns::is_references_heading(line) {
            self.close_section();
            self.state = ParseState::InSection(OpenSection::new(REFERENCES_TITLE, Block::References));
            self.stats.headings_detected += 1;
            return;
        }

        if self.block() == Some(Block::References) {
            if patterns::heading_after_references(line).is_none() {
                if line.chars().count() >= MIN_REFERENCE_LINE_CHARS
                    && !patterns::is_skip_line(line)
                    && line.matches('|').count() < 2
                {
                    self.push_line(line);
                } else {
                    self.stats.lines_skipped += 1;
                }
                return;
            }
            self.close_section();
        }

        if patterns::is_algorithm_start(line) {
            self.set_block(Block::Algorithm);
            self.stats.algorithm_lines_dropped += 1;
            return;
        }

        if self.block() == Some(Block::Algorithm) {
            if patterns::heading(line).is_none() {
                self.stats.algorithm_lines_dropped += 1;
                return;
            }
            self.set_block(Block::Prose);
        }

        if patterns::is_table_row(line) {
            self.set_block(Block::Table { tail_lines: 0 });
            self.stats.table_lines_dropped += 1;
            return;
        }

        if let Some(Block::Table { tail_lines }) = self.block() {
            if patterns::is_table_separator(line) {
                self.set_block(Block::Table { tail_lines: 0 });
                self.stats.table_lines_dropped += 1;
                return;
            }
            if tail_lines < MAX_TABLE_TAIL_LINES && patterns::heading(line).is_none() {
                self.set_block(Block::Table {
                    tail_lines: tail_lines + 1,
                });
                self.stats.table_lines_dropped += 1;
                return;
            }
            self.set_block(Block::Prose);
        }

        if patterns::is_skip_line(line) {
            self.stats.lines_skipped += 1;
            return;
        }

        if let Some(title) = patterns::heading(line) {
            self.close_section();
            self.state = ParseState::InSection(OpenSection::new(title, Block::Prose));
            self.stats.headings_detected += 1;
            return;
        }

        if is_valid_content_line(line) {
            self.push_line(line);
        } else {
            self.stats.lines_skipped += 1;
        }
    }

    fn block(&self) -> Option<Block> {
        match &self.state {
            ParseState::InSection(open) => Some(open.block),
            ParseState::Outside => None,
        }
    }

    fn set_block(&mut self, block: Block) {
        if let ParseState::InSection(open) = &mut self.state {
            open.block = block;
        }
    }

    fn push_line(&mut self, line: &str) {
        if let ParseState::InSection(open) = &mut self.state {
            open.lines.push(line.to_string());
        }
    }

    fn close_section(&mut self) {
        let ParseState::InSection(open) = std::mem::take(&mut self.state) else {
            return;
        };
        if open.lines.is_empty() {
            return;
        }

        match finalize(&open) {
            Some(content) => self.finished.push((open.title, content)),
            None => {
                debug!(title = %open.title, lines = open.lines.len(), "dropped section without narrative content");
                self.stats.sections_rejected += 1;
            }
        }
    }

    fn finish(mut self) -> Segmentation {
        self.close_section();

        let mut sections = SectionMap::new();
        for (title, content) in self.finished {
            let unnumbered = RESIDUAL_NUMBERING.replace(&title, "");
            let clean_title = clean_section_title(&unnumbered);
            if clean_title.is_empty() || clean_title.eq_ignore_ascii_case("abstract") {
                continue;
            }

            let cap = if clean_title.eq_ignore_ascii_case(REFERENCES_TITLE) {
                REFERENCES_CONTENT_CAP
            } else {
                SECTION_CONTENT_CAP
            };
            let content = truncate_chars(&content, cap);
            if content.is_empty() {
                continue;
            }
            sections.insert(Section::new(clean_title, content, Origin::RawText));
        }

        self.stats.sections_emitted = sections.len();
        debug!(
            sections = sections.len(),
            rejected = self.stats.sections_rejected,
            "raw text segmentation complete"
        );

        Segmentation {
            sections,
            stats: self.stats,
        }
    }
}

fn finalize(open: &OpenSection) -> Option<String> {
    if open.block == Block::References {
        let kept = open
            .lines
            .iter()
            .filter(|line| line.chars().count() >= MIN_REFERENCE_LINE_CHARS)
            .take(MAX_REFERENCE_LINES)
            .map(String::as_str)
            .collect::<Vec<&str>>();
        return (!kept.is_empty()).then(|| kept.join("\n"));
    }

    let filtered = filter_section_content(&open.lines);
    if filtered.is_empty() {
        return None;
    }
    let joined = filtered.join("\n");
    let body = joined.trim();
    is_valid_section_content(body).then(|| clean_text(body))
}
