use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;
use parsal::sections::{ArticleRef, LoaderConfig, SectionLoader};
use tracing::{info, warn};

use super::sources::{FileRawTextSource, JsonStructuredSource, MarkdownDirLegacySource};
use crate::cli::LoadArgs;
use crate::model::{LoadCounts, LoadPaths, LoadRunManifest, SourceArtifact};
use crate::util::{
    emit_json, ensure_directory, now_utc_string, sha256_file, utc_compact_string,
    write_json_pretty,
};

pub fn run(args: LoadArgs) -> Result<()> {
    if !(0.0..=1.0).contains(&args.threshold) {
        bail!("similarity threshold must be within [0, 1], got {}", args.threshold);
    }

    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let manifest_dir = args.cache_root.join("manifests");
    ensure_directory(&manifest_dir)?;
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!("load_run_{}.json", utc_compact_string(started_ts)))
    });

    info!(article = %args.article_id, publisher = %args.publisher, run_id = %run_id, "starting section load");

    let sources = describe_sources(&args)?;
    for source in sources.iter().filter(|source| !source.present) {
        warn!(kind = %source.kind, path = %source.path, "source path does not exist");
    }

    let structured = JsonStructuredSource::new(args.structured.clone());
    let legacy = MarkdownDirLegacySource::new(args.legacy_dir.clone());
    let raw = FileRawTextSource::new(args.raw.clone());
    let config = LoaderConfig {
        raw_text_publishers: args.raw_text_publishers(),
        similarity_threshold: args.threshold,
    };
    let raw_text_publishers = config.raw_text_publishers.clone();

    let article = ArticleRef::new(args.article_id.clone(), args.publisher.clone());
    let outcome = SectionLoader::new(&structured, &legacy, &raw, config).load(&article);
    let report = &outcome.report;

    emit_json(args.output.as_deref(), &outcome.sections)?;

    let mut notes = Vec::new();
    if !report.raw_text_attempted {
        notes.push(format!(
            "Publisher {:?} is not on the raw text allow-list; raw text was not segmented.",
            args.publisher
        ));
    }
    if outcome.sections.is_empty() {
        notes.push("No section source produced any sections.".to_string());
    }

    let manifest = LoadRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_load_command(&args),
        article_id: article.id.clone(),
        publisher: article.publisher.clone(),
        similarity_threshold: args.threshold,
        raw_text_publishers,
        paths: LoadPaths {
            cache_root: args.cache_root.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
            output_path: args.output.as_ref().map(|path| path.display().to_string()),
        },
        sources,
        counts: LoadCounts {
            structured_sections: report.structured_sections,
            legacy_sections: report.legacy_sections,
            raw_text_attempted: report.raw_text_attempted,
            raw_text_sections: report.raw_text_sections,
            added_from_raw_text: report.added_from_raw_text,
            duplicates_suppressed: report.duplicates_suppressed,
            final_sections: outcome.sections.len(),
        },
        section_titles: outcome.sections.titles().map(ToOwned::to_owned).collect(),
        warnings: report.warnings.clone(),
        notes,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote load run manifest");
    info!(
        article = %article.id,
        sections = outcome.sections.len(),
        warnings = report.warnings.len(),
        "section load completed"
    );

    Ok(())
}

pub(super) fn describe_sources(args: &LoadArgs) -> Result<Vec<SourceArtifact>> {
    let mut sources = Vec::new();
    if let Some(path) = &args.structured {
        sources.push(describe_file("structured", path)?);
    }
    if let Some(dir) = &args.legacy_dir {
        sources.push(SourceArtifact {
            kind: "legacy_dir".to_string(),
            path: dir.display().to_string(),
            sha256: None,
            present: dir.is_dir(),
        });
    }
    if let Some(path) = &args.raw {
        sources.push(describe_file("raw_text", path)?);
    }
    Ok(sources)
}

fn describe_file(kind: &str, path: &Path) -> Result<SourceArtifact> {
    let present = path.is_file();
    let sha256 = if present { Some(sha256_file(path)?) } else { None };
    Ok(SourceArtifact {
        kind: kind.to_string(),
        path: path.display().to_string(),
        sha256,
        present,
    })
}

pub(super) fn render_load_command(args: &LoadArgs) -> String {
    let mut parts = vec![
        "parsal load".to_string(),
        format!("--article-id {}", args.article_id),
        format!("--publisher {}", args.publisher),
    ];

    if let Some(path) = &args.structured {
        parts.push(format!("--structured {}", path.display()));
    }
    if let Some(dir) = &args.legacy_dir {
        parts.push(format!("--legacy-dir {}", dir.display()));
    }
    if let Some(path) = &args.raw {
        parts.push(format!("--raw {}", path.display()));
    }
    for publisher in &args.raw_text_publishers {
        parts.push(format!("--raw-text-publisher {publisher}"));
    }
    parts.push(format!("--threshold {}", args.threshold));
    if let Some(path) = &args.output {
        parts.push(format!("--output {}", path.display()));
    }
    parts.push(format!("--cache-root {}", args.cache_root.display()));
    if let Some(path) = &args.manifest_path {
        parts.push(format!("--manifest-path {}", path.display()));
    }

    parts.join(" ")
}
