use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SourceArtifact {
    pub kind: String,
    pub path: String,
    /// Absent for directories and for paths that did not exist.
    pub sha256: Option<String>,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadPaths {
    pub cache_root: String,
    pub manifest_path: String,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadCounts {
    pub structured_sections: usize,
    pub legacy_sections: usize,
    pub raw_text_attempted: bool,
    pub raw_text_sections: usize,
    pub added_from_raw_text: usize,
    pub duplicates_suppressed: usize,
    pub final_sections: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub article_id: String,
    pub publisher: String,
    pub similarity_threshold: f64,
    pub raw_text_publishers: Vec<String>,
    pub paths: LoadPaths,
    pub sources: Vec<SourceArtifact>,
    pub counts: LoadCounts,
    pub section_titles: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}
