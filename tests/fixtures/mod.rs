// Test fixtures - reusable test data
// Provides a consistent lecture catalog across all test files

#![allow(dead_code)]

use std::sync::Arc;

use timetable_planner::models::lecture::Lecture;

/// JSON catalog in the shape the lecture source delivers
pub const CATALOG_JSON: &str = r#"[
    {"id": "MATH201", "title": "Linear Algebra", "credits": "3", "major": "Math", "grade": 2, "schedule": "월1~2(101)<p>수1~2(101)"},
    {"id": "CS301", "title": "Operating Systems", "credits": "3", "major": "CS", "grade": 3, "schedule": "화5~7(B12)"},
    {"id": "CS202", "title": "Data Structures", "credits": "4", "major": "CS", "grade": 2, "schedule": "월7~8(B10)목7~8(B10)"},
    {"id": "ENG101", "title": "Academic English", "credits": "2", "major": "Liberal Arts", "grade": 1, "schedule": ""},
    {"id": "PHY210", "title": "Mechanics", "credits": "3-1", "major": "Physics", "grade": 2, "schedule": "토23~24(P1)"}
]"#;

pub mod lectures {
    use super::*;

    pub fn catalog() -> Vec<Arc<Lecture>> {
        let lectures: Vec<Lecture> = serde_json::from_str(CATALOG_JSON).unwrap();
        lectures.into_iter().map(Arc::new).collect()
    }

    pub fn by_id(id: &str) -> Arc<Lecture> {
        catalog().into_iter().find(|l| l.id == id).unwrap()
    }

    /// Synthetic catalog of `count` lectures spread over every day and grade
    pub fn synthetic(count: usize) -> Vec<Arc<Lecture>> {
        const DAYS: [&str; 6] = ["월", "화", "수", "목", "금", "토"];
        (0..count)
            .map(|i| {
                let start = i % 20 + 1;
                Arc::new(
                    Lecture::new(
                        format!("L{i:05}"),
                        format!("Lecture {i}"),
                        format!("{}", i % 3 + 1),
                        format!("Major {}", i % 7),
                        (i % 4) as u8 + 1,
                    )
                    .with_schedule(format!(
                        "{}{}~{}(R{})<p>{}{}(R{})",
                        DAYS[i % 6],
                        start,
                        start + 2,
                        i,
                        DAYS[(i + 2) % 6],
                        start,
                        i
                    )),
                )
            })
            .collect()
    }
}
