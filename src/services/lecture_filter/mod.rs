//! Lecture catalog filtering.
//!
//! A lecture matches when it passes every active criterion of a
//! [`SearchOption`]; criteria left empty always pass.

mod search;

pub use search::LectureSearch;

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::lecture::Lecture;
use crate::models::schedule::TimeSlotRecord;
use crate::models::search_option::SearchOption;

/// Lectures matching `options`, in catalog order.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use timetable_planner::models::lecture::Lecture;
/// use timetable_planner::models::schedule::Day;
/// use timetable_planner::models::search_option::SearchOption;
/// use timetable_planner::services::lecture_filter::filter_lectures;
///
/// let catalog = vec![
///     Arc::new(Lecture::new("A", "Calculus", "3", "Math", 2).with_schedule("월1~2(101)")),
///     Arc::new(Lecture::new("B", "Physics", "3", "Physics", 2).with_schedule("화1~2(102)")),
/// ];
/// let options = SearchOption::new().with_grade(2).with_day(Day::Mon);
/// let result = filter_lectures(&catalog, &options);
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].id, "A");
/// ```
pub fn filter_lectures(catalog: &[Arc<Lecture>], options: &SearchOption) -> Vec<Arc<Lecture>> {
    let query = options.active_query().map(str::to_lowercase);

    let filtered: Vec<Arc<Lecture>> = catalog
        .iter()
        .filter(|lecture| matches_with_query(lecture, options, query.as_deref()))
        .cloned()
        .collect();

    log::debug!(
        "Filtered catalog of {} lectures down to {}",
        catalog.len(),
        filtered.len()
    );
    filtered
}

/// Whether a single lecture passes every active criterion
pub fn matches(lecture: &Lecture, options: &SearchOption) -> bool {
    let query = options.active_query().map(str::to_lowercase);
    matches_with_query(lecture, options, query.as_deref())
}

/// Distinct majors in order of first appearance
pub fn all_majors(catalog: &[Arc<Lecture>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut majors = Vec::new();
    for lecture in catalog {
        if seen.insert(lecture.major.as_str()) {
            majors.push(lecture.major.clone());
        }
    }
    majors
}

fn matches_with_query(lecture: &Lecture, options: &SearchOption, query: Option<&str>) -> bool {
    if !matches_query(lecture, query)
        || !matches_grade(lecture, options)
        || !matches_major(lecture, options)
        || !matches_credits(lecture, options)
    {
        return false;
    }

    // Schedule text is only parsed when a day or time criterion needs it.
    if options.days.is_empty() && options.times.is_empty() {
        return true;
    }

    let meetings = lecture.meetings();
    matches_days(&meetings, options) && matches_times(&meetings, options)
}

/// Case-insensitive substring of title or id. `query` is already lowercased.
fn matches_query(lecture: &Lecture, query: Option<&str>) -> bool {
    match query {
        None => true,
        Some(query) => {
            lecture.title.to_lowercase().contains(query) || lecture.id.to_lowercase().contains(query)
        }
    }
}

fn matches_grade(lecture: &Lecture, options: &SearchOption) -> bool {
    options.grades.is_empty() || options.grades.contains(&lecture.grade)
}

fn matches_major(lecture: &Lecture, options: &SearchOption) -> bool {
    options.majors.is_empty() || options.majors.contains(&lecture.major)
}

fn matches_credits(lecture: &Lecture, options: &SearchOption) -> bool {
    match options.credits {
        None => true,
        Some(credits) => lecture.credits.starts_with(&credits.to_string()),
    }
}

fn matches_days(meetings: &[TimeSlotRecord], options: &SearchOption) -> bool {
    options.days.is_empty() || meetings.iter().any(|m| options.days.contains(&m.day))
}

fn matches_times(meetings: &[TimeSlotRecord], options: &SearchOption) -> bool {
    options.times.is_empty()
        || meetings
            .iter()
            .any(|m| m.range.iter().any(|slot| options.times.contains(slot)))
}
