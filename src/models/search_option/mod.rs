// Search option module
// Filter criteria for the lecture catalog

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::schedule::Day;

/// Lecture search criteria.
///
/// Every field is optional: an empty set (or `None`) leaves that dimension
/// unconstrained, it never means "match nothing". Sets are ordered so two
/// options with the same criteria compare and hash equal, which is what
/// change detection keys on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchOption {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub grades: BTreeSet<u8>,
    #[serde(default)]
    pub days: BTreeSet<Day>,
    #[serde(default)]
    pub times: BTreeSet<u32>,
    #[serde(default)]
    pub majors: BTreeSet<String>,
    #[serde(default)]
    pub credits: Option<u32>,
}

impl SearchOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria used when an empty timetable cell is clicked: the search
    /// opens pre-constrained to that cell's day and slot.
    pub fn for_cell(day: Day, slot: u32) -> Self {
        Self::default().with_day(day).with_time(slot)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_grade(mut self, grade: u8) -> Self {
        self.grades.insert(grade);
        self
    }

    pub fn with_day(mut self, day: Day) -> Self {
        self.days.insert(day);
        self
    }

    pub fn with_time(mut self, slot: u32) -> Self {
        self.times.insert(slot);
        self
    }

    pub fn with_major(mut self, major: impl Into<String>) -> Self {
        self.majors.insert(major.into());
        self
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }

    /// The free-text query, if one is set and non-empty
    pub fn active_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    /// True when no criterion is set
    pub fn is_unconstrained(&self) -> bool {
        self.active_query().is_none()
            && self.grades.is_empty()
            && self.days.is_empty()
            && self.times.is_empty()
            && self.majors.is_empty()
            && self.credits.is_none()
    }
}
