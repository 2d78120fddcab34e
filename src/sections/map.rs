use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::reconcile::normalize_title;

const ABSTRACT_TITLE: &str = "abstract";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Structured,
    RawText,
    LegacyFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub normalized_title: String,
    pub content: String,
    pub origin: Origin,
    pub position: usize,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>, origin: Origin) -> Self {
        let title = title.into();
        Self {
            normalized_title: normalize_title(&title),
            title,
            content: content.into(),
            origin,
            position: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<Section>,
    index: HashMap<String, usize>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, T, C>(origin: Origin, pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<String>,
        C: Into<String>,
    {
        let mut map = Self::new();
        for (title, content) in pairs {
            map.insert(Section::new(title, content, origin));
        }
        map
    }

    /// Returns `false` when the section was refused.
    pub fn insert(&mut self, mut section: Section) -> bool {
        if section.title.trim().is_empty() || section.normalized_title == ABSTRACT_TITLE {
            return false;
        }

        if let Some(&slot) = self.index.get(&section.title) {
            let existing = &mut self.entries[slot];
            existing.content = section.content;
            existing.origin = section.origin;
            return true;
        }

        section.position = self.entries.len();
        self.index.insert(section.title.clone(), section.position);
        self.entries.push(section);
        true
    }

    pub fn get(&self, title: &str) -> Option<&Section> {
        self.index.get(title).map(|&slot| &self.entries[slot])
    }

    pub fn content(&self, title: &str) -> Option<&str> {
        self.get(title).map(|section| section.content.as_str())
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.entries.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|section| section.title.as_str())
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        for section in &mut self.entries {
            section.origin = origin;
        }
        self
    }
}

impl<'a> IntoIterator for &'a SectionMap {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for section in &self.entries {
            map.serialize_entry(&section.title, &section.content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SectionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionMapVisitor;

        impl<'de> Visitor<'de> for SectionMapVisitor {
            type Value = SectionMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping section titles to content")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = SectionMap::new();
                while let Some((title, content)) = access.next_entry::<String, String>()? {
                    map.insert(Section::new(title, content, Origin::Structured));
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(SectionMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_keeps_first_slot_and_last_content() {
        let mut map = SectionMap::new();
        map.insert(Section::new("Introduction", "first", Origin::RawText));
        map.insert(Section::new("Methods", "methods", Origin::RawText));
        map.insert(Section::new("Introduction", "second", Origin::RawText));

        assert_eq!(map.titles().collect::<Vec<_>>(), vec!["Introduction", "Methods"]);
        assert_eq!(map.content("Introduction"), Some("second"));
        assert_eq!(map.get("Methods").map(|s| s.position), Some(1));
    }

    #[test]
    fn abstract_and_empty_titles_are_refused() {
        let mut map = SectionMap::new();
        assert!(!map.insert(Section::new("Abstract", "text", Origin::Structured)));
        assert!(!map.insert(Section::new("1. ABSTRACT", "text", Origin::Structured)));
        assert!(!map.insert(Section::new("   ", "text", Origin::Structured)));
        assert!(map.is_empty());
    }

    #[test]
    fn json_round_trip_preserves_key_order() {
        let raw = r#"{"Zeta": "z", "Alpha": "a", "Mu": "m"}"#;
        let map: SectionMap = serde_json::from_str(raw).expect("valid section map json");
        assert_eq!(map.titles().collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mu"]);

        let rendered = serde_json::to_string(&map).expect("serializable map");
        assert_eq!(rendered, r#"{"Zeta":"z","Alpha":"a","Mu":"m"}"#);
    }

    #[test]
    fn with_origin_retags_every_section() {
        let map = SectionMap::from_pairs(Origin::Structured, [("Methods", "m")])
            .with_origin(Origin::RawText);
        assert_eq!(map.get("Methods").map(|s| s.origin), Some(Origin::RawText));
    }
}
