use super::*;

const INTRO_BODY: &str = "We study how scanned scientific articles can be split into sections.
The method walks every line once and keeps a small amount of state.
Noise such as captions and tables is removed before the text is stored.";

const RELATED_BODY: &str = "Earlier systems relied on layout analysis of the rendered document.
Those systems need font metrics that optical recognition output lacks.
Our approach only looks at the text and a list of heading patterns.";

const METHODS_BODY: &str = "Every line is classified once against a fixed list of patterns.
Headings open new sections and close the one that was open before.
Bodies that are too short to be narrative text are dropped entirely.";

fn article(parts: &[&str]) -> String {
    parts.join("\n")
}

fn titles(map: &SectionMap) -> Vec<&str> {
    map.titles().collect()
}

#[test]
fn headings_keep_document_order() {
    let text = article(&[
        "1. Introduction",
        INTRO_BODY,
        "2. Related Work",
        RELATED_BODY,
        "3. Methods",
        METHODS_BODY,
    ]);

    let sections = segment_text(&text);
    assert_eq!(titles(&sections), vec!["Introduction", "Related Work", "Methods"]);
    assert_eq!(
        sections.content("Methods"),
        Some(
            "Every line is classified once against a fixed list of patterns. \
             Headings open new sections and close the one that was open before. \
             Bodies that are too short to be narrative text are dropped entirely."
        )
    );
}

#[test]
fn segmentation_is_idempotent() {
    let text = article(&[
        "# 1 Introduction",
        INTRO_BODY,
        "| metric | value |",
        "## Discussion",
        RELATED_BODY,
        "References",
        "Smith, J. and Doe, A. Recovering structure from scans. 2019.",
    ]);

    let first = segment_text(&text);
    let second = segment_text(&text);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn table_rows_never_reach_content() {
    let text = article(&[
        "1. Introduction",
        "| Source | Sections | Accuracy |",
        INTRO_BODY,
        "2. Methods",
        METHODS_BODY,
        "| a | b |",
        "References",
        "| Author | Title | Year |",
        "Smith, J. and Doe, A. Recovering structure from scans. 2019.",
    ]);

    let sections = segment_text(&text);
    for section in &sections {
        assert!(
            !section.content.contains('|'),
            "pipe row leaked into {}",
            section.title
        );
    }
}

#[test]
fn captions_identifiers_and_emails_are_dropped() {
    let text = article(&[
        "1. Introduction",
        "Figure 1 shows the overall layout of the proposed pipeline here.",
        INTRO_BODY,
        "Table 2 summarises the accuracy of every source we considered.",
        "DOI: 10.1000/182 is the persistent identifier of this article.",
        "jane.doe@example.org",
        "References",
        "Smith, J. and Doe, A. Recovering structure from scans. 2019.",
        "Figure 3 appears here only because the scan was misread.",
        "DOI: 10.1000/183 printed at the bottom of the reference list",
        "contact.author@example.org",
    ]);

    let sections = segment_text(&text);
    assert!(sections.contains_title("Introduction"));
    assert!(sections.contains_title("References"));
    for section in &sections {
        for forbidden in ["Figure 1", "Figure 3", "Table 2", "DOI:", "@example.org"] {
            assert!(
                !section.content.contains(forbidden),
                "{forbidden} leaked into {}",
                section.title
            );
        }
    }
}

#[test]
fn references_keep_first_fifty_qualifying_lines_in_order() {
    let mut lines = vec![
        "1. Introduction".to_string(),
        INTRO_BODY.to_string(),
        "References".to_string(),
    ];
    for index in 0..65 {
        lines.push(format!("Author{index}, A. A study numbered {index}. 2020."));
        if index % 10 == 0 {
            lines.push("short ref".to_string());
        }
    }

    let sections = segment_raw_text(&lines);
    let references = sections.content("References").expect("references kept");
    let kept = references.lines().collect::<Vec<_>>();

    assert_eq!(kept.len(), 50);
    assert_eq!(kept[0], "Author0, A. A study numbered 0. 2020.");
    assert_eq!(kept[49], "Author49, A. A study numbered 49. 2020.");
    assert!(kept.iter().all(|line| line.chars().count() > 10));
}

#[test]
fn references_close_on_next_heading() {
    let text = article(&[
        "1. Introduction",
        INTRO_BODY,
        "References",
        "Smith, J. and Doe, A. Recovering structure from scans. 2019.",
        "Appendix A: Proofs",
        METHODS_BODY,
    ]);

    let sections = segment_text(&text);
    assert_eq!(titles(&sections), vec!["Introduction", "References", "Appendix"]);
    assert_eq!(
        sections.content("References"),
        Some("Smith, J. and Doe, A. Recovering structure from scans. 2019.")
    );
}

#[test]
fn abstract_section_is_never_emitted() {
    let text = article(&["Abstract", INTRO_BODY, "1. Introduction", RELATED_BODY]);

    let sections = segment_text(&text);
    assert_eq!(titles(&sections), vec!["Introduction"]);
}

#[test]
fn short_body_drops_the_whole_section() {
    let text = article(&[
        "1. Introduction",
        "Only a handful of words appear in this body.",
        "It cannot pass as narrative text. Not at all.",
        "2. Methods",
        METHODS_BODY,
    ]);

    let sections = segment_text(&text);
    assert_eq!(titles(&sections), vec!["Methods"]);
}

#[test]
fn merge_prefers_structured_duplicate_and_keeps_order() {
    let structured = SectionMap::from_pairs(
        Origin::Structured,
        [("Introduction", "Structured introduction text.")],
    );
    let raw = segment_text(&article(&[
        "1 Introduction",
        INTRO_BODY,
        "2 Methods",
        METHODS_BODY,
    ]));
    assert_eq!(titles(&raw), vec!["Introduction", "Methods"]);

    let merged = merge_sections(&structured, &raw, DEFAULT_SIMILARITY_THRESHOLD);
    assert_eq!(titles(&merged), vec!["Introduction", "Methods"]);
    assert_eq!(
        merged.content("Introduction"),
        Some("Structured introduction text.")
    );
    assert_eq!(merged.get("Methods").map(|s| s.origin), Some(Origin::RawText));
}

#[test]
fn merge_places_later_raw_section_after_its_structured_predecessor() {
    let structured = SectionMap::from_pairs(Origin::Structured, [("Methods", "A")]);
    let raw = SectionMap::from_pairs(
        Origin::RawText,
        [
            ("Overview", "o"),
            ("Background", "b"),
            ("Motivation", "m"),
            ("Setting", "s"),
            ("Notation", "n"),
            ("Methods", "raw methods"),
            ("Datasets", "d"),
            ("Results", "r"),
        ],
    );

    let merged = merge_sections(&structured, &raw, DEFAULT_SIMILARITY_THRESHOLD);
    let order = titles(&merged);
    let methods = order.iter().position(|t| *t == "Methods").expect("methods present");
    let results = order.iter().position(|t| *t == "Results").expect("results present");
    assert!(methods < results);
    assert_eq!(merged.content("Methods"), Some("A"));
}

#[test]
fn merged_map_has_no_normalized_title_duplicates() {
    let structured = SectionMap::from_pairs(
        Origin::Structured,
        [("Introduction", "i"), ("Experimental Results", "r")],
    );
    let raw = SectionMap::from_pairs(
        Origin::RawText,
        [
            ("1. INTRODUCTION", "i"),
            ("Related Work", "w"),
            ("4 Experimental Results", "r"),
        ],
    );

    let merged = merge_sections(&structured, &raw, DEFAULT_SIMILARITY_THRESHOLD);
    let mut normalized = merged
        .iter()
        .map(|section| section.normalized_title.clone())
        .collect::<Vec<_>>();
    normalized.sort();
    normalized.dedup();
    assert_eq!(normalized.len(), merged.len());
    assert_eq!(
        titles(&merged),
        vec!["Introduction", "Related Work", "Experimental Results"]
    );
}
