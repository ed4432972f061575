use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_schedule_tables_table(conn)?;
    create_lectures_table(conn)?;
    create_placed_schedules_table(conn)?;
    Ok(())
}

fn create_schedule_tables_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schedule_tables (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create schedule_tables table")?;

    Ok(())
}

fn create_lectures_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS lectures (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            credits TEXT NOT NULL,
            major TEXT NOT NULL,
            grade INTEGER NOT NULL,
            schedule TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .context("Failed to create lectures table")?;

    Ok(())
}

fn create_placed_schedules_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS placed_schedules (
            table_id TEXT NOT NULL REFERENCES schedule_tables(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            lecture_id TEXT NOT NULL REFERENCES lectures(id),
            day TEXT NOT NULL,
            range_start INTEGER NOT NULL,
            range_end INTEGER NOT NULL CHECK (range_end >= range_start),
            room TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (table_id, position)
        )",
        [],
    )
    .context("Failed to create placed_schedules table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_placed_schedules_lecture
         ON placed_schedules(lecture_id)",
        [],
    )
    .context("Failed to create placed_schedules index")?;

    Ok(())
}
