// Lecture module
// Catalog entry as delivered by the lecture catalog source

use serde::{Deserialize, Serialize};

use crate::models::schedule::TimeSlotRecord;
use crate::services::schedule_encoding;

/// A lecture from the catalog.
///
/// `credits` stays textual because the catalog ships it as text and the
/// credit filter matches on a string prefix. `schedule` holds the raw
/// meeting-time encoding (e.g. `월1~2(101)<p>화3(202)`) and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lecture {
    pub id: String,
    pub title: String,
    pub credits: String,
    pub major: String,
    pub grade: u8,
    #[serde(default)]
    pub schedule: String,
}

impl Lecture {
    /// Create a lecture with an empty schedule
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        credits: impl Into<String>,
        major: impl Into<String>,
        grade: u8,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            credits: credits.into(),
            major: major.into(),
            grade,
            schedule: String::new(),
        }
    }

    /// Set the raw schedule text
    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = schedule.into();
        self
    }

    /// Parsed meeting blocks of this lecture. Recomputed on every call.
    pub fn meetings(&self) -> Vec<TimeSlotRecord> {
        schedule_encoding::parse(&self.schedule)
    }

    /// Validate the catalog record
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Lecture id cannot be empty".to_string());
        }

        if !(1..=4).contains(&self.grade) {
            return Err(format!(
                "Lecture {} has grade {}, expected 1-4",
                self.id, self.grade
            ));
        }

        Ok(())
    }
}
