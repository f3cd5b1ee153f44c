use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use studyweek_core::ScheduleItem;

/// The three document collections the store keeps per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Assignments,
    Exams,
    Schedules,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Assignments,
        Collection::Exams,
        Collection::Schedules,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Assignments => "assignments",
            Collection::Exams => "exams",
            Collection::Schedules => "schedules",
        }
    }

    /// File holding this collection inside a data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Assignments => "assignments.json",
            Collection::Exams => "exams.json",
            Collection::Schedules => "schedules.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Embedded `{id, name}` reference to the subject a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

pub(crate) fn subject_name<'a>(subject: Option<&'a SubjectRef>, fallback: &'a str) -> &'a str {
    subject
        .map(|s| s.name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback)
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Zone stored UTC instants are localized into.
    pub tz: Tz,
    /// When set, records owned by anyone else are skipped.
    pub user_id: Option<String>,
}

impl NormalizeOptions {
    pub fn new(tz: Tz) -> Self {
        Self { tz, user_id: None }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// A stored record that did not survive normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    pub collection: Collection,
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub items: Vec<ScheduleItem>,
    pub rejected: Vec<Rejected>,
}

impl Normalized {
    pub fn extend(&mut self, other: Normalized) {
        self.items.extend(other.items);
        self.rejected.extend(other.rejected);
    }
}
