//! Reads the three record collections from a data directory.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io;
use std::path::Path;
use studyweek_core::ScheduleItem;
use studyweek_ingest::{Collection, NormalizeOptions, RawRecords, parse_documents};

async fn read_collection(dir: &Path, collection: Collection) -> Result<Vec<Value>> {
    let path = dir.join(collection.file_name());
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "collection file missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_documents(&text).with_context(|| format!("parse {}", path.display()))
}

/// All three collections, read concurrently.
pub async fn load_records(dir: &Path) -> Result<RawRecords> {
    let (assignments, exams, schedules) = tokio::try_join!(
        read_collection(dir, Collection::Assignments),
        read_collection(dir, Collection::Exams),
        read_collection(dir, Collection::Schedules),
    )?;

    Ok(RawRecords {
        assignments,
        exams,
        schedules,
    })
}

/// Load and normalize. Rejected records are logged and left out.
pub async fn load_items(dir: &Path, options: &NormalizeOptions) -> Result<Vec<ScheduleItem>> {
    let raw = load_records(dir).await?;
    let normalized = raw.normalize(options);

    if !normalized.rejected.is_empty() {
        tracing::warn!(
            rejected = normalized.rejected.len(),
            dir = %dir.display(),
            "some records were skipped"
        );
    }
    tracing::info!(items = normalized.items.len(), "loaded schedule items");

    Ok(normalized.items)
}
