use anyhow::Result;
use rusqlite::Connection;

use crate::models::stack::STACK_PRESETS;

const SCHEMA_VERSION: &str = "1";

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tracked_days (
            date             TEXT PRIMARY KEY,
            completed        INTEGER NOT NULL DEFAULT 0,
            extra_cold       INTEGER NOT NULL DEFAULT 0,
            felt_great       INTEGER NOT NULL DEFAULT 0,
            duration_seconds INTEGER,
            mood_before      INTEGER CHECK(mood_before BETWEEN 1 AND 5),
            mood_after       INTEGER CHECK(mood_after BETWEEN 1 AND 5),
            note             TEXT,
            completed_at     TEXT,
            created_at       TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS reading_log (
            date    TEXT PRIMARY KEY,
            minutes REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS daily_goals (
            date      TEXT NOT NULL,
            slot      INTEGER NOT NULL,
            title     TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            UNIQUE(date, slot)
        );

        CREATE TABLE IF NOT EXISTS challenge_runs (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            kind_id      TEXT NOT NULL,
            started      TEXT NOT NULL,
            target_date  TEXT NOT NULL,
            completed    INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT
        );

        CREATE TABLE IF NOT EXISTS habit_stacks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            active      INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS stack_steps (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            stack_id         INTEGER NOT NULL REFERENCES habit_stacks(id),
            name             TEXT NOT NULL,
            description      TEXT NOT NULL DEFAULT '',
            duration_minutes INTEGER NOT NULL DEFAULT 0,
            position         INTEGER NOT NULL DEFAULT 0,
            phase            TEXT NOT NULL CHECK(phase IN ('before','during','after')),
            required         INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS stack_step_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            step_id   INTEGER NOT NULL REFERENCES stack_steps(id),
            date      TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            UNIQUE(step_id, date)
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ",
    )?;

    seed_stack_presets(conn)?;

    conn.execute(
        "INSERT INTO app_meta (key, value) VALUES ('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value = ?1",
        rusqlite::params![SCHEMA_VERSION],
    )?;
    Ok(())
}

fn seed_stack_presets(conn: &Connection) -> Result<()> {
    for preset in &STACK_PRESETS {
        conn.execute(
            "INSERT OR IGNORE INTO habit_stacks (name, description, active)
             VALUES (?1, ?2, 0)",
            rusqlite::params![preset.name, preset.description],
        )?;

        let stack_id: i64 = conn.query_row(
            "SELECT id FROM habit_stacks WHERE name = ?1",
            rusqlite::params![preset.name],
            |row| row.get(0),
        )?;

        // Seed steps only once per stack
        let existing: i64 = conn.query_row(
            "SELECT COUNT(*) FROM stack_steps WHERE stack_id = ?1",
            rusqlite::params![stack_id],
            |row| row.get(0),
        )?;
        if existing > 0 {
            continue;
        }

        for (position, (name, description, minutes, phase, required)) in
            preset.steps.iter().enumerate()
        {
            conn.execute(
                "INSERT INTO stack_steps
                    (stack_id, name, description, duration_minutes, position, phase, required)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    stack_id,
                    name,
                    description,
                    minutes,
                    position as i64 + 1,
                    phase.as_str(),
                    *required as i64
                ],
            )?;
        }
    }
    Ok(())
}
