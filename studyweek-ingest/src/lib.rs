//! studyweek-ingest: the boundary between stored documents and the engine.
//!
//! Documents arrive as loosely-typed JSON. Each one is deserialized into its
//! collection's record type and mapped onto a [`ScheduleItem`] exactly once;
//! records that fail either step are reported in [`Normalized::rejected`] and
//! never reach the engine.

pub mod records;
pub mod types;

use anyhow::{Context, Result, bail};
use serde_json::Value;

pub use records::{AssignmentRecord, ClassScheduleRecord, ExamRecord, StoredRecord};
pub use types::{Collection, NormalizeOptions, Normalized, Rejected, SubjectRef};

/// Parse one collection's file contents into raw documents.
///
/// Accepts a JSON array of documents, or an object keyed by document id (the
/// key fills in a missing `id`). Blank input is an empty collection.
pub fn parse_documents(json: &str) -> Result<Vec<Value>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(json).context("parse documents JSON")?;
    match value {
        Value::Array(docs) => Ok(docs),
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, mut doc)| {
                if let Value::Object(fields) = &mut doc {
                    fields.entry("id").or_insert(Value::String(key));
                }
                doc
            })
            .collect()),
        other => bail!("expected an array or object of documents, got {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalize the documents of one collection.
pub fn normalize_documents<R: StoredRecord>(
    docs: &[Value],
    options: &NormalizeOptions,
) -> Normalized {
    let mut out = Normalized::default();

    for (index, doc) in docs.iter().enumerate() {
        let fallback_id = || {
            doc.get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{index}"))
        };

        let record = match R::deserialize(doc) {
            Ok(record) => record,
            Err(e) => {
                out.rejected.push(reject(R::COLLECTION, fallback_id(), e.to_string()));
                continue;
            }
        };

        if let Some(user_id) = options.user_id.as_deref() {
            if record.owner() != Some(user_id) {
                continue;
            }
        }

        match record.to_item(options.tz) {
            Ok(Some(item)) => out.items.push(item),
            Ok(None) => {}
            Err(e) => {
                let id = record.id().map(str::to_string).unwrap_or_else(fallback_id);
                out.rejected.push(reject(R::COLLECTION, id, format!("{e:#}")));
            }
        }
    }

    tracing::debug!(
        collection = %R::COLLECTION,
        documents = docs.len(),
        items = out.items.len(),
        rejected = out.rejected.len(),
        "normalized collection"
    );

    out
}

fn reject(collection: Collection, id: String, reason: String) -> Rejected {
    tracing::warn!(%collection, %id, %reason, "skipping malformed record");
    Rejected {
        collection,
        id,
        reason,
    }
}

/// Raw documents of all three collections for one user.
#[derive(Debug, Clone, Default)]
pub struct RawRecords {
    pub assignments: Vec<Value>,
    pub exams: Vec<Value>,
    pub schedules: Vec<Value>,
}

impl RawRecords {
    pub fn set(&mut self, collection: Collection, docs: Vec<Value>) {
        match collection {
            Collection::Assignments => self.assignments = docs,
            Collection::Exams => self.exams = docs,
            Collection::Schedules => self.schedules = docs,
        }
    }

    /// Tasks first, then exams, then classes.
    pub fn normalize(&self, options: &NormalizeOptions) -> Normalized {
        let mut out = normalize_documents::<AssignmentRecord>(&self.assignments, options);
        out.extend(normalize_documents::<ExamRecord>(&self.exams, options));
        out.extend(normalize_documents::<ClassScheduleRecord>(&self.schedules, options));
        out
    }
}
