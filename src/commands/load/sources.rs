use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use parsal::sections::{
    ArticleRef, LegacySource, Origin, RawTextSource, Section, SectionMap, StructuredSource,
    clean_section_title, clean_text, title_case,
};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::util::read_text_lossy;

static LEGACY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+|[ivxlc]+|sec(?:tion)?)_").expect("valid legacy prefix regex")
});

/// A publisher export shaped as `{"sections": {id: {"title", "content"} | "content"}}`.
#[derive(Debug, Clone, Default)]
pub struct JsonStructuredSource {
    path: Option<PathBuf>,
}

impl JsonStructuredSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl StructuredSource for JsonStructuredSource {
    fn structured_sections(&self, article: &ArticleRef) -> Result<Option<SectionMap>> {
        let Some(path) = existing(self.path.as_deref()) else {
            return Ok(None);
        };

        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let document: Value = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let sections = parse_structured_sections(&document)
            .with_context(|| format!("unexpected structured export layout: {}", path.display()))?;
        debug!(article = %article.id, path = %path.display(), count = sections.len(), "read structured export");
        Ok(Some(sections))
    }
}

pub fn parse_structured_sections(document: &Value) -> Result<SectionMap> {
    let mut sections = SectionMap::new();
    let entries = match document.get("sections") {
        None | Some(Value::Null) => return Ok(sections),
        Some(Value::Object(entries)) => entries,
        Some(other) => bail!("`sections` must be an object, found {}", json_kind(other)),
    };

    for (section_id, entry) in entries {
        let (title, content) = match entry {
            Value::Object(fields) => (
                fields
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(section_id),
                fields.get("content").and_then(Value::as_str).unwrap_or_default(),
            ),
            Value::String(content) => (section_id.as_str(), content.as_str()),
            _ => continue,
        };
        if title.trim().is_empty() || content.trim().is_empty() {
            continue;
        }

        let title = clean_section_title(title);
        if title.is_empty() {
            continue;
        }
        sections.insert(Section::new(title, clean_text(content), Origin::Structured));
    }

    Ok(sections)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One markdown file per section, named after the section.
#[derive(Debug, Clone, Default)]
pub struct MarkdownDirLegacySource {
    dir: Option<PathBuf>,
}

impl MarkdownDirLegacySource {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

impl LegacySource for MarkdownDirLegacySource {
    fn legacy_sections(&self, article: &ArticleRef) -> Result<Option<SectionMap>> {
        let Some(dir) = existing(self.dir.as_deref()) else {
            return Ok(None);
        };

        let sections = collect_legacy_sections(&discover_markdown(dir)?, read_text_lossy);
        debug!(article = %article.id, dir = %dir.display(), count = sections.len(), "read legacy section files");
        Ok(Some(sections))
    }
}

pub(super) fn collect_legacy_sections<F>(paths: &[PathBuf], read: F) -> SectionMap
where
    F: Fn(&Path) -> Result<String>,
{
    let mut sections = SectionMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let content = match read(path) {
            Ok(content) => content,
            Err(error) => {
                warn!(path = %path.display(), error = %format!("{error:#}"), "skipping unreadable legacy section file");
                continue;
            }
        };
        if content.trim().is_empty() {
            continue;
        }
        sections.insert(Section::new(
            legacy_title(stem),
            clean_text(&content),
            Origin::LegacyFile,
        ));
    }
    sections
}

pub fn legacy_title(stem: &str) -> String {
    let unprefixed = LEGACY_PREFIX.replace(stem, "");
    title_case(unprefixed.replace('_', " ").trim())
}

fn discover_markdown(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_markdown = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("md"))
            .unwrap_or(false);
        if is_markdown {
            files.push(path);
        }
    }

    files.sort_by(|a, b| legacy_sort_key(a).cmp(&legacy_sort_key(b)));
    Ok(files)
}

// Numbered files come first, by number, so `10_` follows `2_`.
pub(super) fn legacy_sort_key(path: &Path) -> (bool, u64, String) {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let digits = name.len() - name.trim_start_matches(|ch: char| ch.is_ascii_digit()).len();
    let number = name[digits..]
        .starts_with('_')
        .then(|| name[..digits].parse::<u64>().ok())
        .flatten();

    match number {
        Some(number) => (false, number, name),
        None => (true, 0, name),
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileRawTextSource {
    path: Option<PathBuf>,
}

impl FileRawTextSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl RawTextSource for FileRawTextSource {
    fn raw_text(&self, article: &ArticleRef) -> Result<Option<String>> {
        let Some(path) = existing(self.path.as_deref()) else {
            return Ok(None);
        };
        let text = read_text_lossy(path)?;
        debug!(article = %article.id, path = %path.display(), chars = text.len(), "read raw text");
        Ok(Some(text))
    }
}

fn existing(path: Option<&Path>) -> Option<&Path> {
    path.filter(|path| path.exists())
}
