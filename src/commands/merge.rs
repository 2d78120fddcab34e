use anyhow::{Result, bail};
use parsal::sections::{Origin, SectionMap, SectionMerger};
use tracing::info;

use crate::cli::MergeArgs;
use crate::util::{emit_json, read_json};

pub fn run(args: MergeArgs) -> Result<()> {
    if !(0.0..=1.0).contains(&args.threshold) {
        bail!("similarity threshold must be within [0, 1], got {}", args.threshold);
    }

    let structured: SectionMap = read_json(&args.structured)?;
    let raw = read_json::<SectionMap>(&args.raw)?.with_origin(Origin::RawText);

    let outcome = SectionMerger::new(args.threshold).merge(&structured, &raw);
    for placement in &outcome.placements {
        info!(
            title = %placement.title,
            raw_position = placement.raw_position,
            anchor = placement.anchor.as_deref().unwrap_or("<end>"),
            "added raw-only section"
        );
    }
    info!(
        structured = structured.len(),
        raw = raw.len(),
        duplicates = outcome.duplicates.len(),
        merged = outcome.sections.len(),
        "merged section maps"
    );

    emit_json(args.output.as_deref(), &outcome.sections)
}
