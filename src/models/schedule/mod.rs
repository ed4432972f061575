// Schedule module
// Day labels, parsed meeting blocks and lectures placed on a timetable

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::lecture::Lecture;

/// Day column of the timetable, Monday through Saturday.
///
/// Labels are the single glyphs used by the catalog's schedule encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "월")]
    Mon,
    #[serde(rename = "화")]
    Tue,
    #[serde(rename = "수")]
    Wed,
    #[serde(rename = "목")]
    Thu,
    #[serde(rename = "금")]
    Fri,
    #[serde(rename = "토")]
    Sat,
}

impl Day {
    /// All days in column order
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    /// Glyph used in schedule text and column headers
    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "월",
            Day::Tue => "화",
            Day::Wed => "수",
            Day::Thu => "목",
            Day::Fri => "금",
            Day::Sat => "토",
        }
    }

    pub fn from_label(label: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|day| day.label() == label)
    }

    pub fn from_glyph(glyph: char) -> Option<Day> {
        let mut buf = [0u8; 4];
        Day::from_label(glyph.encode_utf8(&mut buf))
    }

    /// Zero-based column index
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Day::ALL.get(index).copied()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One parsed meeting block: a day, a run of consecutive 1-based time slots
/// and the room text as written in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlotRecord {
    pub day: Day,
    pub range: Vec<u32>,
    pub room: String,
}

impl TimeSlotRecord {
    /// Build a record covering `start..=end`. Returns `None` for an empty or
    /// zero-based span.
    pub fn span(day: Day, start: u32, end: u32, room: impl Into<String>) -> Option<Self> {
        if start == 0 || end < start {
            return None;
        }

        Some(Self {
            day,
            range: (start..=end).collect(),
            room: room.into(),
        })
    }

    /// True when `range` is non-empty and strictly increasing by one
    pub fn is_contiguous(&self) -> bool {
        !self.range.is_empty() && self.range.windows(2).all(|pair| pair[1] == pair[0] + 1)
    }
}

/// A meeting block of a lecture placed into a timetable.
///
/// A lecture meeting on two days yields two placements sharing the same
/// `Arc<Lecture>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedSchedule {
    pub lecture: Arc<Lecture>,
    pub day: Day,
    pub range: Vec<u32>,
    pub room: String,
}

impl PlacedSchedule {
    pub fn from_record(lecture: Arc<Lecture>, record: TimeSlotRecord) -> Self {
        Self {
            lecture,
            day: record.day,
            range: record.range,
            room: record.room,
        }
    }

    /// Expand a catalog lecture into one placement per parsed meeting block
    pub fn place_lecture(lecture: &Arc<Lecture>) -> Vec<PlacedSchedule> {
        lecture
            .meetings()
            .into_iter()
            .map(|record| PlacedSchedule::from_record(Arc::clone(lecture), record))
            .collect()
    }

    pub fn record(&self) -> TimeSlotRecord {
        TimeSlotRecord {
            day: self.day,
            range: self.range.clone(),
            room: self.room.clone(),
        }
    }

    /// Whether this placement occupies the cell at `day` / `slot`
    pub fn covers(&self, day: Day, slot: u32) -> bool {
        self.day == day && self.range.contains(&slot)
    }

    pub fn first_slot(&self) -> Option<u32> {
        self.range.first().copied()
    }

    pub fn last_slot(&self) -> Option<u32> {
        self.range.last().copied()
    }
}

/// A named, ordered timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    pub id: String,
    pub schedules: Vec<Arc<PlacedSchedule>>,
}

impl ScheduleTable {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schedules: Vec::new(),
        }
    }

    /// Copy every placement into fresh allocations under `new_id`.
    /// Lectures stay shared since they are immutable.
    pub fn deep_copy(&self, new_id: impl Into<String>) -> Self {
        Self {
            id: new_id.into(),
            schedules: self
                .schedules
                .iter()
                .map(|schedule| Arc::new(PlacedSchedule::clone(schedule)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lecture() -> Arc<Lecture> {
        Arc::new(
            Lecture::new("CS101", "Intro", "3", "CS", 1).with_schedule("월1~2(101)<p>목3(202)"),
        )
    }

    #[test]
    fn test_day_labels_round_trip() {
        for day in Day::ALL {
            assert_eq!(Day::from_label(day.label()), Some(day));
            assert_eq!(Day::from_index(day.index()), Some(day));
        }
        assert_eq!(Day::from_label("일"), None);
        assert_eq!(Day::from_glyph('토'), Some(Day::Sat));
        assert_eq!(Day::from_index(6), None);
    }

    #[test]
    fn test_day_serializes_as_label() {
        let json = serde_json::to_string(&Day::Wed).unwrap();
        assert_eq!(json, "\"수\"");
        let day: Day = serde_json::from_str("\"금\"").unwrap();
        assert_eq!(day, Day::Fri);
    }

    #[test]
    fn test_span_builds_inclusive_range() {
        let record = TimeSlotRecord::span(Day::Mon, 3, 5, "A").unwrap();
        assert_eq!(record.range, vec![3, 4, 5]);
        assert!(record.is_contiguous());
        assert!(TimeSlotRecord::span(Day::Mon, 5, 3, "").is_none());
        assert!(TimeSlotRecord::span(Day::Mon, 0, 3, "").is_none());
    }

    #[test]
    fn test_is_contiguous_detects_gaps() {
        let record = TimeSlotRecord {
            day: Day::Mon,
            range: vec![1, 3],
            room: String::new(),
        };
        assert!(!record.is_contiguous());

        let empty = TimeSlotRecord {
            day: Day::Mon,
            range: vec![],
            room: String::new(),
        };
        assert!(!empty.is_contiguous());
    }

    #[test]
    fn test_place_lecture_shares_lecture() {
        let lecture = sample_lecture();
        let placed = PlacedSchedule::place_lecture(&lecture);

        assert_eq!(placed.len(), 2);
        assert!(Arc::ptr_eq(&placed[0].lecture, &placed[1].lecture));
        assert_eq!(placed[0].day, Day::Mon);
        assert_eq!(placed[1].day, Day::Thu);
    }

    #[test]
    fn test_covers() {
        let placed = PlacedSchedule::place_lecture(&sample_lecture());
        assert!(placed[0].covers(Day::Mon, 2));
        assert!(!placed[0].covers(Day::Mon, 3));
        assert!(!placed[0].covers(Day::Tue, 1));
    }

    #[test]
    fn test_deep_copy_allocates_new_entries() {
        let mut table = ScheduleTable::new("schedule-1");
        table.schedules = PlacedSchedule::place_lecture(&sample_lecture())
            .into_iter()
            .map(Arc::new)
            .collect();

        let copy = table.deep_copy("schedule-2");
        assert_eq!(copy.id, "schedule-2");
        assert_eq!(copy.schedules, table.schedules);
        for (a, b) in copy.schedules.iter().zip(&table.schedules) {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}
