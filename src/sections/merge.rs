use serde::Serialize;
use tracing::debug;

use super::map::{Section, SectionMap};
use super::reconcile::{DEFAULT_SIMILARITY_THRESHOLD, normalized_titles_similar};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateMatch {
    pub raw_title: String,
    pub structured_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub title: String,
    pub raw_position: usize,
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub sections: SectionMap,
    pub duplicates: Vec<DuplicateMatch>,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionMerger {
    threshold: f64,
}

impl Default for SectionMerger {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl SectionMerger {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn merge(&self, structured: &SectionMap, raw: &SectionMap) -> MergeOutcome {
        let mut duplicates = Vec::new();
        let mut pending = Vec::<(usize, &Section)>::new();

        for (raw_position, raw_section) in raw.iter().enumerate() {
            match structured
                .iter()
                .find(|known| self.similar(&raw_section.normalized_title, &known.normalized_title))
            {
                Some(known) => {
                    debug!(raw = %raw_section.title, structured = %known.title, "duplicate section suppressed");
                    duplicates.push(DuplicateMatch {
                        raw_title: raw_section.title.clone(),
                        structured_title: known.title.clone(),
                    });
                }
                None => pending.push((raw_position, raw_section)),
            }
        }

        if pending.is_empty() {
            return MergeOutcome {
                sections: structured.clone(),
                duplicates,
                placements: Vec::new(),
            };
        }
        pending.sort_by_key(|(raw_position, _)| *raw_position);

        let raw_positions = structured
            .iter()
            .map(|known| {
                raw.iter()
                    .position(|candidate| {
                        self.similar(&known.normalized_title, &candidate.normalized_title)
                    })
            })
            .collect::<Vec<Option<usize>>>();

        let mut merged = SectionMap::new();
        let mut placements = Vec::with_capacity(pending.len());

        for (raw_position, section) in pending {
            let anchor = raw_positions
                .iter()
                .enumerate()
                .filter_map(|(slot, position)| match *position {
                    Some(position) if position > raw_position => Some((position, slot)),
                    _ => None,
                })
                .min()
                .map(|(_, slot)| slot);

            for (slot, known) in structured.iter().enumerate() {
                if Some(slot) == anchor || merged.contains_title(&known.title) {
                    continue;
                }
                let earlier = match raw_positions[slot] {
                    Some(position) => position < raw_position,
                    // unresolved sections only move ahead of an anchored insert
                    None => anchor.is_some(),
                };
                if earlier {
                    merged.insert(known.clone());
                }
            }

            let anchor_title = anchor
                .and_then(|slot| structured.iter().nth(slot))
                .map(|known| known.title.clone());
            debug!(
                title = %section.title,
                raw_position,
                anchor = anchor_title.as_deref().unwrap_or("<end>"),
                "placing raw-only section"
            );
            merged.insert(section.clone());
            placements.push(Placement {
                title: section.title.clone(),
                raw_position,
                anchor: anchor_title,
            });
        }

        for known in structured {
            if !merged.contains_title(&known.title) {
                merged.insert(known.clone());
            }
        }

        MergeOutcome {
            sections: merged,
            duplicates,
            placements,
        }
    }

    fn similar(&self, left: &str, right: &str) -> bool {
        normalized_titles_similar(left, right, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::map::Origin;

    fn structured(titles: &[&str]) -> SectionMap {
        SectionMap::from_pairs(
            Origin::Structured,
            titles.iter().map(|title| (*title, format!("structured {title}"))),
        )
    }

    fn raw(titles: &[&str]) -> SectionMap {
        SectionMap::from_pairs(
            Origin::RawText,
            titles.iter().map(|title| (*title, format!("raw {title}"))),
        )
    }

    fn titles(map: &SectionMap) -> Vec<&str> {
        map.titles().collect()
    }

    #[test]
    fn duplicate_raw_section_is_suppressed_in_favor_of_structured() {
        let outcome = SectionMerger::default().merge(
            &structured(&["Introduction"]),
            &raw(&["1 Introduction", "2 Methods"]),
        );

        assert_eq!(titles(&outcome.sections), vec!["Introduction", "2 Methods"]);
        assert_eq!(
            outcome.sections.content("Introduction"),
            Some("structured Introduction")
        );
        assert_eq!(
            outcome.duplicates,
            vec![DuplicateMatch {
                raw_title: "1 Introduction".to_string(),
                structured_title: "Introduction".to_string(),
            }]
        );
    }

    #[test]
    fn section_after_every_structured_section_goes_after_them() {
        let outcome = SectionMerger::default().merge(
            &structured(&["Methods"]),
            &raw(&["A", "B", "C", "D", "E", "Methods", "F", "Results"]),
        );

        let order = titles(&outcome.sections);
        let methods = order.iter().position(|t| *t == "Methods").expect("methods kept");
        let results = order.iter().position(|t| *t == "Results").expect("results added");
        assert!(methods < results);
        assert_eq!(outcome.placements.last().map(|p| p.raw_position), Some(7));
        assert_eq!(outcome.placements.last().and_then(|p| p.anchor.clone()), None);
    }

    #[test]
    fn new_section_is_placed_before_nearest_later_anchor() {
        let outcome = SectionMerger::default().merge(
            &structured(&["Introduction", "Results", "Conclusion"]),
            &raw(&["Introduction", "Methods", "Results", "Conclusion"]),
        );

        assert_eq!(
            titles(&outcome.sections),
            vec!["Introduction", "Methods", "Results", "Conclusion"]
        );
        assert_eq!(
            outcome.placements,
            vec![Placement {
                title: "Methods".to_string(),
                raw_position: 1,
                anchor: Some("Results".to_string()),
            }]
        );
    }

    #[test]
    fn anchor_is_nearest_not_first_in_structured_order() {
        let outcome = SectionMerger::default().merge(
            &structured(&["Conclusion", "Results"]),
            &raw(&["Methods", "Results", "Conclusion"]),
        );

        assert_eq!(
            outcome.placements[0].anchor.as_deref(),
            Some("Results"),
        );
        assert_eq!(titles(&outcome.sections), vec!["Methods", "Conclusion", "Results"]);
    }

    #[test]
    fn unresolved_structured_sections_fall_to_the_end_without_anchor() {
        let outcome = SectionMerger::default().merge(
            &structured(&["Highlights", "Introduction"]),
            &raw(&["Introduction", "Discussion"]),
        );

        assert_eq!(
            titles(&outcome.sections),
            vec!["Introduction", "Discussion", "Highlights"]
        );
    }

    #[test]
    fn unresolved_structured_sections_precede_anchored_insert() {
        let outcome = SectionMerger::default().merge(
            &structured(&["Highlights", "Conclusion"]),
            &raw(&["Discussion", "Conclusion"]),
        );

        assert_eq!(
            titles(&outcome.sections),
            vec!["Highlights", "Discussion", "Conclusion"]
        );
    }

    #[test]
    fn new_sections_keep_raw_order_among_themselves() {
        let outcome = SectionMerger::default().merge(
            &structured(&["Introduction"]),
            &raw(&["Introduction", "Methods", "Results", "Discussion"]),
        );

        assert_eq!(
            titles(&outcome.sections),
            vec!["Introduction", "Methods", "Results", "Discussion"]
        );
    }

    #[test]
    fn no_new_sections_returns_structured_map_unchanged() {
        let structured_map = structured(&["Introduction", "Methods"]);
        let outcome =
            SectionMerger::default().merge(&structured_map, &raw(&["2. Methods", "INTRODUCTION"]));

        assert_eq!(outcome.sections, structured_map);
        assert_eq!(outcome.duplicates.len(), 2);
        assert!(outcome.placements.is_empty());
    }

    #[test]
    fn empty_structured_map_yields_raw_order() {
        let outcome = SectionMerger::default()
            .merge(&SectionMap::new(), &raw(&["Introduction", "Methods"]));
        assert_eq!(titles(&outcome.sections), vec!["Introduction", "Methods"]);
    }

    #[test]
    fn lower_threshold_treats_partial_overlap_as_duplicate() {
        let structured_map = structured(&["Materials and Methods"]);
        let raw_map = raw(&["Methods"]);

        let strict = SectionMerger::default().merge(&structured_map, &raw_map);
        assert_eq!(strict.sections.len(), 2);

        let loose = SectionMerger::new(0.3).merge(&structured_map, &raw_map);
        assert_eq!(loose.sections.len(), 1);
    }
}
