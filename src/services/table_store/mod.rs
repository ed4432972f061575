// Schedule table store
// Keeps every timetable the user is assembling, keyed by table id

mod sqlite;

pub use sqlite::SqliteScheduleStore;

use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::models::lecture::Lecture;
use crate::models::schedule::{Day, PlacedSchedule, ScheduleTable};

/// Id of the table a fresh planner starts with
pub const DEFAULT_TABLE_ID: &str = "schedule-1";

const TABLE_ID_PREFIX: &str = "schedule-";

/// Container for named schedule tables.
///
/// Tables keep their insertion order. Drag and filter logic never depends on
/// which implementation holds the tables.
pub trait ScheduleStore {
    /// Ids of all tables in order
    fn table_ids(&self) -> Result<Vec<String>>;

    /// The table with `table_id`, if it exists
    fn get(&self, table_id: &str) -> Result<Option<ScheduleTable>>;

    /// Replace the placements of `table_id`, creating the table at the end
    /// when it does not exist yet.
    fn set(&mut self, table_id: &str, schedules: Vec<Arc<PlacedSchedule>>) -> Result<()>;

    /// Deep-copy `table_id` under a new id and return that id
    fn duplicate(&mut self, table_id: &str) -> Result<String>;

    /// Drop a table. Returns false when it did not exist.
    fn remove(&mut self, table_id: &str) -> Result<bool>;
}

/// Smallest `schedule-N` (N >= 1) not present in `existing`
pub fn next_table_id<S: AsRef<str>>(existing: &[S]) -> String {
    let taken: Vec<u64> = existing
        .iter()
        .filter_map(|id| id.as_ref().strip_prefix(TABLE_ID_PREFIX))
        .filter_map(|n| n.parse().ok())
        .collect();

    let n = (1..).find(|n| !taken.contains(n)).unwrap_or(1);
    format!("{TABLE_ID_PREFIX}{n}")
}

/// Place every meeting block of `lecture` into `table_id`.
/// Returns how many placements were added.
pub fn add_lecture(
    store: &mut dyn ScheduleStore,
    table_id: &str,
    lecture: &Arc<Lecture>,
) -> Result<usize> {
    let mut table = store
        .get(table_id)?
        .ok_or_else(|| anyhow!("Schedule table {} not found", table_id))?;

    let placed = PlacedSchedule::place_lecture(lecture);
    let added = placed.len();
    if added == 0 {
        log::debug!("Lecture {} has no meeting blocks, nothing to add", lecture.id);
        return Ok(0);
    }

    table.schedules.extend(placed.into_iter().map(Arc::new));
    store.set(table_id, table.schedules)?;
    Ok(added)
}

/// Remove every placement in `table_id` that covers the cell `day` / `slot`.
/// Returns how many placements were removed.
pub fn delete_at(
    store: &mut dyn ScheduleStore,
    table_id: &str,
    day: Day,
    slot: u32,
) -> Result<usize> {
    let table = store
        .get(table_id)?
        .ok_or_else(|| anyhow!("Schedule table {} not found", table_id))?;

    let before = table.schedules.len();
    let kept: Vec<Arc<PlacedSchedule>> = table
        .schedules
        .into_iter()
        .filter(|schedule| !schedule.covers(day, slot))
        .collect();
    let removed = before - kept.len();

    if removed > 0 {
        store.set(table_id, kept)?;
    }
    Ok(removed)
}

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleStore {
    tables: Vec<ScheduleTable>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding one empty table, [`DEFAULT_TABLE_ID`]
    pub fn with_default_table() -> Self {
        Self {
            tables: vec![ScheduleTable::new(DEFAULT_TABLE_ID)],
        }
    }

    /// Borrow a table without cloning it
    pub fn table(&self, table_id: &str) -> Option<&ScheduleTable> {
        self.tables.iter().find(|table| table.id == table_id)
    }

    /// Mutable access, e.g. for [`crate::services::drag::DragSession::end`]
    pub fn table_mut(&mut self, table_id: &str) -> Option<&mut ScheduleTable> {
        self.tables.iter_mut().find(|table| table.id == table_id)
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn table_ids(&self) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|table| table.id.clone()).collect())
    }

    fn get(&self, table_id: &str) -> Result<Option<ScheduleTable>> {
        Ok(self.table(table_id).cloned())
    }

    fn set(&mut self, table_id: &str, schedules: Vec<Arc<PlacedSchedule>>) -> Result<()> {
        match self.table_mut(table_id) {
            Some(table) => table.schedules = schedules,
            None => self.tables.push(ScheduleTable {
                id: table_id.to_string(),
                schedules,
            }),
        }
        Ok(())
    }

    fn duplicate(&mut self, table_id: &str) -> Result<String> {
        let source = self
            .table(table_id)
            .ok_or_else(|| anyhow!("Cannot duplicate missing table {}", table_id))?;

        let ids: Vec<&str> = self.tables.iter().map(|table| table.id.as_str()).collect();
        let new_id = next_table_id(&ids);
        let copy = source.deep_copy(new_id.clone());
        self.tables.push(copy);

        log::info!("Duplicated table {} as {}", table_id, new_id);
        Ok(new_id)
    }

    fn remove(&mut self, table_id: &str) -> Result<bool> {
        let before = self.tables.len();
        self.tables.retain(|table| table.id != table_id);
        let removed = self.tables.len() < before;
        if removed {
            log::info!("Removed table {}", table_id);
        }
        Ok(removed)
    }
}
