use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::{next_table_id, ScheduleStore};
use crate::models::lecture::Lecture;
use crate::models::schedule::{Day, PlacedSchedule, ScheduleTable};
use crate::services::database::Database;

/// Schedule tables persisted in SQLite.
///
/// Lectures are stored once per id; placements reference them. When a table
/// is loaded, placements of the same lecture share one `Arc<Lecture>`.
pub struct SqliteScheduleStore<'a> {
    db: &'a Database,
}

struct PlacementRow {
    lecture_id: String,
    day: String,
    range_start: u32,
    range_end: u32,
    room: String,
}

impl<'a> SqliteScheduleStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn table_exists(&self, table_id: &str) -> Result<bool> {
        let found = self
            .db
            .connection()
            .query_row(
                "SELECT 1 FROM schedule_tables WHERE id = ?1",
                [table_id],
                |_| Ok(()),
            )
            .optional()
            .context("Failed to look up schedule table")?;
        Ok(found.is_some())
    }

    fn load_lecture(&self, lecture_id: &str) -> Result<Lecture> {
        self.db
            .connection()
            .query_row(
                "SELECT id, title, credits, major, grade, schedule FROM lectures WHERE id = ?1",
                [lecture_id],
                |row| {
                    Ok(Lecture {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        credits: row.get(2)?,
                        major: row.get(3)?,
                        grade: row.get(4)?,
                        schedule: row.get(5)?,
                    })
                },
            )
            .context(format!("Lecture {} not found", lecture_id))
    }

    fn load_placements(&self, table_id: &str) -> Result<Vec<PlacementRow>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT lecture_id, day, range_start, range_end, room
             FROM placed_schedules WHERE table_id = ?1 ORDER BY position ASC",
        )?;

        let rows = stmt
            .query_map([table_id], |row| {
                Ok(PlacementRow {
                    lecture_id: row.get(0)?,
                    day: row.get(1)?,
                    range_start: row.get(2)?,
                    range_end: row.get(3)?,
                    room: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load placed schedules")?;

        Ok(rows)
    }
}

impl ScheduleStore for SqliteScheduleStore<'_> {
    fn table_ids(&self) -> Result<Vec<String>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT id FROM schedule_tables ORDER BY position ASC")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list schedule tables")?;
        Ok(ids)
    }

    fn get(&self, table_id: &str) -> Result<Option<ScheduleTable>> {
        if !self.table_exists(table_id)? {
            return Ok(None);
        }

        let mut lectures: HashMap<String, Arc<Lecture>> = HashMap::new();
        let mut table = ScheduleTable::new(table_id);

        for row in self.load_placements(table_id)? {
            let day = Day::from_label(&row.day)
                .ok_or_else(|| anyhow!("Stored placement has unknown day {:?}", row.day))?;

            let lecture = match lectures.get(&row.lecture_id) {
                Some(lecture) => Arc::clone(lecture),
                None => {
                    let lecture = Arc::new(self.load_lecture(&row.lecture_id)?);
                    lectures.insert(row.lecture_id.clone(), Arc::clone(&lecture));
                    lecture
                }
            };

            table.schedules.push(Arc::new(PlacedSchedule {
                lecture,
                day,
                range: (row.range_start..=row.range_end).collect(),
                room: row.room,
            }));
        }

        Ok(Some(table))
    }

    fn set(&mut self, table_id: &str, schedules: Vec<Arc<PlacedSchedule>>) -> Result<()> {
        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .context("Failed to start transaction")?;

        tx.execute(
            "INSERT OR IGNORE INTO schedule_tables (id, position)
             VALUES (?1, (SELECT COALESCE(MAX(position) + 1, 0) FROM schedule_tables))",
            [table_id],
        )
        .context("Failed to insert schedule table")?;

        tx.execute("DELETE FROM placed_schedules WHERE table_id = ?1", [table_id])
            .context("Failed to clear placed schedules")?;

        for (position, schedule) in schedules.iter().enumerate() {
            let (Some(start), Some(end)) = (schedule.first_slot(), schedule.last_slot()) else {
                log::warn!(
                    "Skipping placement of {} with no time slots in table {}",
                    schedule.lecture.id,
                    table_id
                );
                continue;
            };

            let lecture = &schedule.lecture;
            tx.execute(
                "INSERT INTO lectures (id, title, credits, major, grade, schedule)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    credits = excluded.credits,
                    major = excluded.major,
                    grade = excluded.grade,
                    schedule = excluded.schedule",
                params![
                    lecture.id,
                    lecture.title,
                    lecture.credits,
                    lecture.major,
                    lecture.grade,
                    lecture.schedule,
                ],
            )
            .context(format!("Failed to store lecture {}", lecture.id))?;

            tx.execute(
                "INSERT INTO placed_schedules
                    (table_id, position, lecture_id, day, range_start, range_end, room)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    table_id,
                    position as i64,
                    lecture.id,
                    schedule.day.label(),
                    start,
                    end,
                    schedule.room,
                ],
            )
            .context("Failed to insert placed schedule")?;
        }

        tx.execute(
            "UPDATE schedule_tables SET updated_at = CURRENT_TIMESTAMP WHERE id = ?1",
            [table_id],
        )?;
        prune_unused_lectures(&tx)?;
        tx.commit().context("Failed to commit schedule table")?;

        Ok(())
    }

    fn duplicate(&mut self, table_id: &str) -> Result<String> {
        let source = self
            .get(table_id)?
            .ok_or_else(|| anyhow!("Cannot duplicate missing table {}", table_id))?;

        let new_id = next_table_id(&self.table_ids()?);
        let copy = source.deep_copy(new_id.clone());
        self.set(&new_id, copy.schedules)?;

        log::info!("Duplicated table {} as {}", table_id, new_id);
        Ok(new_id)
    }

    fn remove(&mut self, table_id: &str) -> Result<bool> {
        let conn = self.db.connection();
        let removed = conn
            .execute("DELETE FROM schedule_tables WHERE id = ?1", [table_id])
            .context("Failed to delete schedule table")?;

        if removed == 0 {
            return Ok(false);
        }

        // Placements went with the table.
        prune_unused_lectures(conn)?;

        log::info!("Removed table {}", table_id);
        Ok(true)
    }
}

/// Drop lectures no placement refers to anymore
fn prune_unused_lectures(conn: &Connection) -> Result<()> {
    conn.execute(
        "DELETE FROM lectures
         WHERE id NOT IN (SELECT DISTINCT lecture_id FROM placed_schedules)",
        [],
    )
    .context("Failed to prune unused lectures")?;
    Ok(())
}
