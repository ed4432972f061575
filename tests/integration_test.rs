// Integration tests for the planner flow: search, place, drag, persist
mod fixtures;

use std::sync::Arc;

use fixtures::lectures;
use pretty_assertions::assert_eq;
use timetable_planner::models::schedule::Day;
use timetable_planner::models::search_option::SearchOption;
use timetable_planner::services::database::Database;
use timetable_planner::services::drag::{DragSession, DropOutcome, MoveRejection};
use timetable_planner::services::grid::{GridGeometry, Point};
use timetable_planner::services::lecture_filter::{filter_lectures, LectureSearch};
use timetable_planner::services::table_store::{
    add_lecture, delete_at, InMemoryScheduleStore, ScheduleStore, SqliteScheduleStore,
    DEFAULT_TABLE_ID,
};
use tempfile::TempDir;

#[test]
fn test_search_then_place_then_drag() {
    let catalog = lectures::catalog();
    let mut store = InMemoryScheduleStore::with_default_table();

    // Clicking the empty Monday / slot 1 cell opens a pre-constrained search
    let mut search = LectureSearch::new(catalog, 100);
    search.set_options(SearchOption::for_cell(Day::Mon, 1));
    assert_eq!(search.total(), 1);
    let picked = Arc::clone(&search.visible()[0]);
    assert_eq!(picked.id, "MATH201");

    assert_eq!(add_lecture(&mut store, DEFAULT_TABLE_ID, &picked).unwrap(), 2);

    let geometry = GridGeometry::default();
    let mut session = DragSession::new(DEFAULT_TABLE_ID, geometry);
    let table = store.table_mut(DEFAULT_TABLE_ID).unwrap();
    let sibling = Arc::clone(&table.schedules[1]);

    assert!(session.begin(table, 0, geometry.grid_bounds()));
    assert_eq!(session.update(Point::new(85, 65)), Some(Point::new(80, 60)));

    match session.end(Point::new(85, 65), table) {
        DropOutcome::Moved { index, to, .. } => {
            assert_eq!(index, 0);
            assert_eq!(to.day, Day::Tue);
            assert_eq!(to.range, vec![3, 4]);
        }
        other => panic!("expected a move, got {other:?}"),
    }

    // The untouched placement keeps its allocation
    assert!(Arc::ptr_eq(&sibling, &table.schedules[1]));
    assert!(!session.is_dragging());
}

#[test]
fn test_drag_past_saturday_leaves_table_unchanged() {
    let mut store = InMemoryScheduleStore::with_default_table();
    add_lecture(&mut store, DEFAULT_TABLE_ID, &lectures::by_id("PHY210")).unwrap();

    let geometry = GridGeometry::default();
    let mut session = DragSession::new(DEFAULT_TABLE_ID, geometry);
    let table = store.table_mut(DEFAULT_TABLE_ID).unwrap();
    let before = table.clone();

    assert!(session.begin(table, 0, geometry.grid_bounds()));
    assert_eq!(
        session.end(Point::new(80, 0), table),
        DropOutcome::Rejected(MoveRejection::DayOutOfRange(6))
    );
    assert_eq!(*table, before);

    assert!(session.begin(table, 0, geometry.grid_bounds()));
    assert_eq!(
        session.end(Point::new(0, 30), table),
        DropOutcome::Rejected(MoveRejection::SlotOutOfRange(25))
    );
    assert!(Arc::ptr_eq(&table.schedules[0], &before.schedules[0]));
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("timetable.db");
    let db_path = db_path.to_str().unwrap();

    {
        let db = Database::new(db_path).unwrap();
        db.initialize_schema().unwrap();
        let mut store = SqliteScheduleStore::new(&db);

        store.set(DEFAULT_TABLE_ID, Vec::new()).unwrap();
        add_lecture(&mut store, DEFAULT_TABLE_ID, &lectures::by_id("CS202")).unwrap();
        add_lecture(&mut store, DEFAULT_TABLE_ID, &lectures::by_id("MATH201")).unwrap();

        let copy = store.duplicate(DEFAULT_TABLE_ID).unwrap();
        assert_eq!(delete_at(&mut store, &copy, Day::Mon, 8).unwrap(), 1);
    }

    let db = Database::new(db_path).unwrap();
    db.initialize_schema().unwrap();
    let store = SqliteScheduleStore::new(&db);

    assert_eq!(store.table_ids().unwrap(), vec!["schedule-1", "schedule-2"]);

    let original = store.get("schedule-1").unwrap().unwrap();
    let copy = store.get("schedule-2").unwrap().unwrap();
    assert_eq!(original.len(), 4);
    assert_eq!(copy.len(), 3);
    assert!(Arc::ptr_eq(&original.schedules[0].lecture, &original.schedules[1].lecture));
}

#[test]
fn test_drag_then_persist() {
    let db = Database::new(":memory:").unwrap();
    db.initialize_schema().unwrap();
    let mut store = SqliteScheduleStore::new(&db);
    store.set(DEFAULT_TABLE_ID, Vec::new()).unwrap();
    add_lecture(&mut store, DEFAULT_TABLE_ID, &lectures::by_id("CS301")).unwrap();

    let geometry = GridGeometry::default();
    let mut table = store.get(DEFAULT_TABLE_ID).unwrap().unwrap();
    let mut session = DragSession::new(DEFAULT_TABLE_ID, geometry);
    assert!(session.begin(&table, 0, geometry.grid_bounds()));
    let outcome = session.end(Point::new(-80, -120), &mut table);
    assert!(matches!(outcome, DropOutcome::Moved { .. }));

    store.set(DEFAULT_TABLE_ID, table.schedules).unwrap();
    let reloaded = store.get(DEFAULT_TABLE_ID).unwrap().unwrap();
    assert_eq!(reloaded.schedules[0].day, Day::Mon);
    assert_eq!(reloaded.schedules[0].range, vec![1, 2, 3]);
}

#[test]
fn test_filter_example_grade_two_on_monday() {
    let catalog = lectures::catalog();
    let options = SearchOption::new().with_grade(2).with_day(Day::Mon);
    let ids: Vec<String> = filter_lectures(&catalog, &options)
        .iter()
        .map(|l| l.id.clone())
        .collect();
    assert_eq!(ids, vec!["MATH201", "CS202"]);
}
