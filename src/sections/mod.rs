//! Missing or garbled input yields an empty map, never an error.

mod filters;
mod loader;
mod map;
mod merge;
mod patterns;
mod reconcile;
mod segmenter;
mod text;

#[cfg(test)]
mod tests;

pub use filters::{filter_section_content, is_valid_content_line, is_valid_section_content};
pub use loader::{
    ArticleRef, DEFAULT_RAW_TEXT_PUBLISHERS, LegacySource, LoadOutcome, LoadReport, LoaderConfig,
    RawTextSource, SectionLoader, StructuredSource,
};
pub use map::{Origin, Section, SectionMap};
pub use merge::{DuplicateMatch, MergeOutcome, Placement, SectionMerger};
pub use reconcile::{
    DEFAULT_SIMILARITY_THRESHOLD, are_titles_similar, normalize_title, word_jaccard,
};
pub use segmenter::{
    REFERENCES_CONTENT_CAP, RawTextSegmenter, SECTION_CONTENT_CAP, SegmentStats, Segmentation,
};
pub use text::{clean_abstract, clean_section_title, clean_text, title_case, truncate_chars};

/// Segment a document, given as lines, into an ordered section map.
pub fn segment_raw_text<I, S>(lines: I) -> SectionMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RawTextSegmenter::new().segment(lines).sections
}

/// Segment a whole document held in one string.
pub fn segment_text(text: &str) -> SectionMap {
    segment_raw_text(text.lines())
}

/// Merge raw-text sections into a structured section map, keeping the
/// structured version of any section both sources know about.
pub fn merge_sections(
    structured: &SectionMap,
    raw: &SectionMap,
    similarity_threshold: f64,
) -> SectionMap {
    SectionMerger::new(similarity_threshold)
        .merge(structured, raw)
        .sections
}
