use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::map::SectionMap;
use super::merge::SectionMerger;
use super::reconcile::DEFAULT_SIMILARITY_THRESHOLD;
use super::segmenter::RawTextSegmenter;

pub const DEFAULT_RAW_TEXT_PUBLISHERS: &[&str] = &["wiley", "mdpi", "arxiv", "acl", "anthology"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    pub id: String,
    pub publisher: String,
}

impl ArticleRef {
    pub fn new(id: impl Into<String>, publisher: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            publisher: publisher.into(),
        }
    }
}

pub trait StructuredSource {
    fn structured_sections(&self, article: &ArticleRef) -> Result<Option<SectionMap>>;
}

pub trait LegacySource {
    fn legacy_sections(&self, article: &ArticleRef) -> Result<Option<SectionMap>>;
}

/// The best available OCR/markdown rendering of the article, already decoded.
pub trait RawTextSource {
    fn raw_text(&self, article: &ArticleRef) -> Result<Option<String>>;
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub raw_text_publishers: Vec<String>,
    pub similarity_threshold: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            raw_text_publishers: DEFAULT_RAW_TEXT_PUBLISHERS
                .iter()
                .map(|publisher| publisher.to_string())
                .collect(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl LoaderConfig {
    pub fn supports_raw_text(&self, publisher: &str) -> bool {
        let publisher = publisher.to_lowercase();
        self.raw_text_publishers
            .iter()
            .any(|allowed| publisher.contains(&allowed.to_lowercase()))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub structured_sections: usize,
    pub legacy_sections: usize,
    pub raw_text_attempted: bool,
    pub raw_text_sections: usize,
    pub added_from_raw_text: usize,
    pub duplicates_suppressed: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub sections: SectionMap,
    pub report: LoadReport,
}

pub struct SectionLoader<'a> {
    structured: &'a dyn StructuredSource,
    legacy: &'a dyn LegacySource,
    raw: &'a dyn RawTextSource,
    config: LoaderConfig,
}

impl<'a> SectionLoader<'a> {
    pub fn new(
        structured: &'a dyn StructuredSource,
        legacy: &'a dyn LegacySource,
        raw: &'a dyn RawTextSource,
        config: LoaderConfig,
    ) -> Self {
        Self {
            structured,
            legacy,
            raw,
            config,
        }
    }

    pub fn load(&self, article: &ArticleRef) -> LoadOutcome {
        let mut report = LoadReport::default();

        let mut sections = settle(
            self.structured.structured_sections(article),
            "structured",
            article,
            &mut report.warnings,
        );
        report.structured_sections = sections.len();

        if sections.is_empty() {
            sections = settle(
                self.legacy.legacy_sections(article),
                "legacy",
                article,
                &mut report.warnings,
            );
            report.legacy_sections = sections.len();
        }

        if !self.config.supports_raw_text(&article.publisher) {
            debug!(article = %article.id, publisher = %article.publisher, "raw text extraction not supported for publisher");
            return LoadOutcome { sections, report };
        }
        report.raw_text_attempted = true;

        let raw_text = match self.raw.raw_text(article) {
            Ok(text) => text.unwrap_or_default(),
            Err(error) => {
                warn!(article = %article.id, error = %error, "raw text source failed");
                report.warnings.push(format!("raw text source failed: {error:#}"));
                String::new()
            }
        };

        let segmentation = RawTextSegmenter::new().segment(raw_text.lines());
        report.raw_text_sections = segmentation.sections.len();
        if segmentation.sections.is_empty() {
            return LoadOutcome { sections, report };
        }

        let before = sections.len();
        let merged = SectionMerger::new(self.config.similarity_threshold)
            .merge(&sections, &segmentation.sections);
        report.duplicates_suppressed = merged.duplicates.len();
        report.added_from_raw_text = merged.sections.len().saturating_sub(before);

        info!(
            article = %article.id,
            raw_sections = report.raw_text_sections,
            added = report.added_from_raw_text,
            total = merged.sections.len(),
            "merged raw text sections"
        );

        LoadOutcome {
            sections: merged.sections,
            report,
        }
    }
}

fn settle(
    loaded: Result<Option<SectionMap>>,
    source: &str,
    article: &ArticleRef,
    warnings: &mut Vec<String>,
) -> SectionMap {
    match loaded {
        Ok(Some(sections)) => {
            debug!(article = %article.id, source, count = sections.len(), "loaded sections");
            sections
        }
        Ok(None) => SectionMap::new(),
        Err(error) => {
            warn!(article = %article.id, source, error = %error, "section source failed");
            warnings.push(format!("{source} source failed: {error:#}"));
            SectionMap::new()
        }
    }
}
