use anyhow::Result;
use parsal::sections::RawTextSegmenter;
use tracing::info;

use crate::cli::SegmentArgs;
use crate::util::{emit_json, read_text_lossy};

pub fn run(args: SegmentArgs) -> Result<()> {
    let text = read_text_lossy(&args.input)?;
    let segmentation = RawTextSegmenter::new().segment(text.lines());
    let stats = &segmentation.stats;

    info!(
        input = %args.input.display(),
        lines = stats.lines_seen,
        skipped = stats.lines_skipped,
        table_lines = stats.table_lines_dropped,
        algorithm_lines = stats.algorithm_lines_dropped,
        headings = stats.headings_detected,
        rejected = stats.sections_rejected,
        sections = stats.sections_emitted,
        "segmented raw text"
    );

    emit_json(args.output.as_deref(), &segmentation.sections)
}
