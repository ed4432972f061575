// Property-based tests for schedule parsing, filtering, paging and drag moves

#[path = "../fixtures/mod.rs"]
mod fixtures;

use std::sync::Arc;

use proptest::prelude::*;
use timetable_planner::models::lecture::Lecture;
use timetable_planner::models::schedule::{Day, PlacedSchedule, TimeSlotRecord};
use timetable_planner::models::search_option::SearchOption;
use timetable_planner::services::drag::{move_in_table, DropOutcome};
use timetable_planner::services::grid::{GridGeometry, Point};
use timetable_planner::services::lecture_filter::filter_lectures;
use timetable_planner::services::paging::window;
use timetable_planner::services::schedule_encoding::{parse, serialize};

fn day_strategy() -> impl Strategy<Value = Day> {
    prop::sample::select(Day::ALL.to_vec())
}

fn record_strategy() -> impl Strategy<Value = TimeSlotRecord> {
    (day_strategy(), 1u32..=24, 0u32..4, "[A-Z0-9]{0,4}").prop_map(|(day, start, len, room)| {
        TimeSlotRecord {
            day,
            range: (start..=start + len).collect(),
            room,
        }
    })
}

fn option_strategy() -> impl Strategy<Value = SearchOption> {
    (
        prop::option::of("[a-z]{1,3}"),
        prop::collection::btree_set(1u8..=4, 0..3),
        prop::collection::btree_set(day_strategy(), 0..3),
        prop::collection::btree_set(1u32..=24, 0..4),
        prop::option::of(1u32..=4),
    )
        .prop_map(|(query, grades, days, times, credits)| SearchOption {
            query,
            grades,
            days,
            times,
            credits,
            ..SearchOption::default()
        })
}

proptest! {
    /// Every parsed record has a non-empty, strictly consecutive range
    #[test]
    fn prop_parsed_ranges_are_contiguous(text in "[월화수목금토일0-9~()<>pA-Z ]{0,40}") {
        for record in parse(&text) {
            prop_assert!(record.is_contiguous());
        }
    }

    /// Parsing never depends on hidden state
    #[test]
    fn prop_parse_is_idempotent(text in "\\PC{0,60}") {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    /// Serialized records parse back to themselves
    #[test]
    fn prop_serialize_then_parse(records in prop::collection::vec(record_strategy(), 0..5)) {
        prop_assert_eq!(parse(&serialize(&records)), records);
    }

    /// Constraining a previously empty field never grows the result set
    #[test]
    fn prop_filter_is_monotonic(
        options in option_strategy(),
        query in "[a-z]{1,3}",
        day in day_strategy(),
        grade in 1u8..=4,
        slot in 1u32..=24,
        credits in 1u32..=4,
    ) {
        let catalog = fixtures::lectures::synthetic(120);
        let base = filter_lectures(&catalog, &options).len();
        let narrower = |opts: SearchOption| filter_lectures(&catalog, &opts).len();

        if options.active_query().is_none() {
            prop_assert!(narrower(options.clone().with_query(query)) <= base);
        }
        if options.days.is_empty() {
            prop_assert!(narrower(options.clone().with_day(day)) <= base);
        }
        if options.grades.is_empty() {
            prop_assert!(narrower(options.clone().with_grade(grade)) <= base);
        }
        if options.times.is_empty() {
            prop_assert!(narrower(options.clone().with_time(slot)) <= base);
        }
        if options.credits.is_none() {
            prop_assert!(narrower(options.clone().with_credits(credits)) <= base);
        }
        prop_assert!(narrower(options.with_major("Major 3")) <= base);
    }

    /// The window is the prefix of length min(len, page_size * page)
    #[test]
    fn prop_window_length(len in 0usize..500, page_size in 1usize..120, page in 0usize..10) {
        let items: Vec<usize> = (0..len).collect();
        let visible = window(&items, page_size, page);
        prop_assert_eq!(visible.len(), len.min(page_size * page));
        prop_assert_eq!(visible, &items[..visible.len()]);
    }

    /// Moving one entry never touches the others
    #[test]
    fn prop_drag_leaves_siblings_identical(
        records in prop::collection::vec(record_strategy(), 1..8),
        pick in any::<prop::sample::Index>(),
        dx in -600i32..600,
        dy in -800i32..800,
    ) {
        let lecture = Arc::new(Lecture::new("L1", "Lecture", "3", "CS", 1));
        let mut schedules: Vec<Arc<PlacedSchedule>> = records
            .into_iter()
            .map(|record| Arc::new(PlacedSchedule::from_record(Arc::clone(&lecture), record)))
            .collect();
        let before = schedules.clone();
        let index = pick.index(schedules.len());

        let outcome = move_in_table(&mut schedules, index, Point::new(dx, dy), &GridGeometry::default());

        for (i, (now, then)) in schedules.iter().zip(&before).enumerate() {
            if i != index {
                prop_assert!(Arc::ptr_eq(now, then));
            }
        }
        if !matches!(outcome, DropOutcome::Moved { .. }) {
            prop_assert!(Arc::ptr_eq(&schedules[index], &before[index]));
        }
    }
}
