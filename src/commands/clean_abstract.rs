use std::io::{self, Write};

use anyhow::Result;
use parsal::sections::clean_abstract;
use tracing::{info, warn};

use crate::cli::CleanAbstractArgs;
use crate::util::read_text_lossy;

pub fn run(args: CleanAbstractArgs) -> Result<()> {
    let raw = read_text_lossy(&args.input)?;
    let cleaned = clean_abstract(&raw);

    if cleaned.is_empty() {
        warn!(input = %args.input.display(), "abstract rejected after cleaning");
    } else {
        info!(chars = cleaned.chars().count(), "cleaned abstract");
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "{cleaned}")?;
    output.flush()?;
    Ok(())
}
