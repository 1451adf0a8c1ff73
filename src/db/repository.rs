use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::{
    default_goals, ChallengeKind, ChallengeRun, DailyGoal, HabitStack, StackStep, StepPhase,
    TrackedDay,
};

// ─── Tracked days ────────────────────────────────────────────────────────────

pub struct DayRepo;

const DAY_COLUMNS: &str = "date, completed, extra_cold, felt_great, duration_seconds,
                           mood_before, mood_after, note, completed_at";

fn day_from_row(row: &Row) -> rusqlite::Result<TrackedDay> {
    Ok(TrackedDay {
        date: row.get(0)?,
        completed: row.get::<_, i64>(1)? != 0,
        extra_cold: row.get::<_, i64>(2)? != 0,
        felt_great: row.get::<_, i64>(3)? != 0,
        duration_seconds: row.get(4)?,
        mood_before: row.get(5)?,
        mood_after: row.get(6)?,
        note: row.get(7)?,
        completed_at: row.get(8)?,
    })
}

impl DayRepo {
    pub fn get_all(conn: &Connection) -> Result<Vec<TrackedDay>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {DAY_COLUMNS} FROM tracked_days ORDER BY date"
        ))?;
        let rows = stmt.query_map([], day_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn get_by_date(conn: &Connection, date: &str) -> Result<Option<TrackedDay>> {
        conn.query_row(
            &format!("SELECT {DAY_COLUMNS} FROM tracked_days WHERE date = ?1"),
            params![date],
            day_from_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn get_range(conn: &Connection, start: &str, end: &str) -> Result<Vec<TrackedDay>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {DAY_COLUMNS} FROM tracked_days
             WHERE date >= ?1 AND date <= ?2 ORDER BY date"
        ))?;
        let rows = stmt.query_map(params![start, end], day_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Mark a date completed, merging into any existing row. Flags only
    /// ever turn on here; `completed_at` is kept if already stamped.
    pub fn mark_completed(
        conn: &Connection,
        date: &str,
        extra_cold: bool,
        felt_great: bool,
        completed_at: Option<&str>,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO tracked_days (date, completed, extra_cold, felt_great, completed_at)
             VALUES (?1, 1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                 completed = 1,
                 extra_cold = MAX(extra_cold, ?2),
                 felt_great = MAX(felt_great, ?3),
                 completed_at = COALESCE(?4, completed_at)",
            params![date, extra_cold as i64, felt_great as i64, completed_at],
        )?;
        Ok(())
    }

    /// Clear the completed flag, keeping every other attribute.
    pub fn clear_completed(conn: &Connection, date: &str) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE tracked_days SET completed = 0, completed_at = NULL WHERE date = ?1",
            params![date],
        )?;
        Ok(changed > 0)
    }

    pub fn set_duration(conn: &Connection, date: &str, seconds: i64) -> Result<()> {
        conn.execute(
            "INSERT INTO tracked_days (date, completed, duration_seconds)
             VALUES (?1, 0, ?2)
             ON CONFLICT(date) DO UPDATE SET duration_seconds = ?2",
            params![date, seconds],
        )?;
        Ok(())
    }

    /// Record the 1-5 mood pair. Creates an incomplete row if the date has
    /// never been touched.
    pub fn set_mood(conn: &Connection, date: &str, before: i32, after: i32) -> Result<()> {
        conn.execute(
            "INSERT INTO tracked_days (date, completed, mood_before, mood_after)
             VALUES (?1, 0, ?2, ?3)
             ON CONFLICT(date) DO UPDATE SET mood_before = ?2, mood_after = ?3",
            params![date, before, after],
        )?;
        Ok(())
    }

    pub fn set_note(conn: &Connection, date: &str, note: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO tracked_days (date, completed, note) VALUES (?1, 0, ?2)
             ON CONFLICT(date) DO UPDATE SET note = ?2",
            params![date, note],
        )?;
        Ok(())
    }
}

// ─── Reading log ─────────────────────────────────────────────────────────────

pub struct ReadingRepo;

impl ReadingRepo {
    pub fn log_minutes(conn: &Connection, date: &str, minutes: f64) -> Result<()> {
        conn.execute(
            "INSERT INTO reading_log (date, minutes) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET minutes = minutes + ?2",
            params![date, minutes],
        )?;
        Ok(())
    }

    pub fn get_today(conn: &Connection, date: &str) -> Result<f64> {
        conn.query_row(
            "SELECT COALESCE(minutes, 0) FROM reading_log WHERE date = ?1",
            params![date],
            |row| row.get(0),
        )
        .optional()
        .map(|v| v.unwrap_or(0.0))
        .map_err(anyhow::Error::from)
    }

    pub fn get_week_total(conn: &Connection, start: &str, end: &str) -> Result<f64> {
        conn.query_row(
            "SELECT COALESCE(SUM(minutes), 0) FROM reading_log WHERE date >= ?1 AND date <= ?2",
            params![start, end],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }
}

// ─── Daily goals ─────────────────────────────────────────────────────────────

pub struct GoalRepo;

impl GoalRepo {
    /// Goals for a date. A date with no stored rows reports the default
    /// set without materializing it.
    pub fn get_for_date(conn: &Connection, date: &str) -> Result<Vec<DailyGoal>> {
        let mut stmt = conn.prepare(
            "SELECT slot, title, completed FROM daily_goals WHERE date = ?1 ORDER BY slot",
        )?;
        let rows = stmt.query_map(params![date], |row| {
            Ok(DailyGoal {
                slot: row.get(0)?,
                title: row.get(1)?,
                completed: row.get::<_, i64>(2)? != 0,
            })
        })?;

        let goals = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        if goals.is_empty() {
            Ok(default_goals())
        } else {
            Ok(goals)
        }
    }

    /// Insert the default set for a date if it has no rows yet. Writes go
    /// through here first so a fresh date behaves as if the defaults had
    /// always been stored.
    fn materialize(conn: &Connection, date: &str) -> Result<()> {
        for goal in default_goals() {
            conn.execute(
                "INSERT OR IGNORE INTO daily_goals (date, slot, title, completed)
                 VALUES (?1, ?2, ?3, 0)",
                params![date, goal.slot, goal.title],
            )?;
        }
        Ok(())
    }

    /// Flip one goal; returns the new state.
    pub fn toggle(conn: &Connection, date: &str, slot: i32) -> Result<bool> {
        Self::materialize(conn, date)?;
        let changed = conn.execute(
            "UPDATE daily_goals SET completed = 1 - completed WHERE date = ?1 AND slot = ?2",
            params![date, slot],
        )?;
        if changed == 0 {
            anyhow::bail!("No goal #{} on {}", slot, date);
        }
        conn.query_row(
            "SELECT completed FROM daily_goals WHERE date = ?1 AND slot = ?2",
            params![date, slot],
            |row| row.get::<_, i64>(0),
        )
        .map(|v| v != 0)
        .map_err(anyhow::Error::from)
    }

    pub fn add(conn: &Connection, date: &str, title: &str) -> Result<i32> {
        Self::materialize(conn, date)?;
        let next_slot: i32 = conn.query_row(
            "SELECT COALESCE(MAX(slot), 0) + 1 FROM daily_goals WHERE date = ?1",
            params![date],
            |row| row.get(0),
        )?;
        conn.execute(
            "INSERT INTO daily_goals (date, slot, title, completed) VALUES (?1, ?2, ?3, 0)",
            params![date, next_slot, title],
        )?;
        Ok(next_slot)
    }
}

// ─── Challenge runs ──────────────────────────────────────────────────────────

pub struct ChallengeRepo;

fn run_from_row(row: &Row) -> rusqlite::Result<ChallengeRun> {
    Ok(ChallengeRun {
        id: row.get(0)?,
        kind_id: row.get(1)?,
        started: row.get(2)?,
        target_date: row.get(3)?,
        completed: row.get::<_, i64>(4)? != 0,
        completed_at: row.get(5)?,
    })
}

impl ChallengeRepo {
    /// Start a run of the given kind today. Only one open run at a time.
    pub fn start(
        conn: &Connection,
        kind: &ChallengeKind,
        today: NaiveDate,
    ) -> Result<ChallengeRun> {
        if let Some(active) = Self::active(conn)? {
            anyhow::bail!(
                "Challenge '{}' is already running (started {})",
                active.kind().map(|k| k.name).unwrap_or(active.kind_id.as_str()),
                active.started
            );
        }

        let started = today.format("%Y-%m-%d").to_string();
        let target = (today + Duration::days(kind.duration_days as i64 - 1))
            .format("%Y-%m-%d")
            .to_string();
        conn.execute(
            "INSERT INTO challenge_runs (kind_id, started, target_date, completed)
             VALUES (?1, ?2, ?3, 0)",
            params![kind.id, started, target],
        )?;

        let id = conn.last_insert_rowid();
        Ok(ChallengeRun {
            id,
            kind_id: kind.id.to_string(),
            started,
            target_date: target,
            completed: false,
            completed_at: None,
        })
    }

    pub fn active(conn: &Connection) -> Result<Option<ChallengeRun>> {
        conn.query_row(
            "SELECT id, kind_id, started, target_date, completed, completed_at
             FROM challenge_runs WHERE completed = 0 ORDER BY id DESC LIMIT 1",
            [],
            run_from_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn complete(conn: &Connection, id: i64) -> Result<()> {
        conn.execute(
            "UPDATE challenge_runs SET completed = 1, completed_at = datetime('now')
             WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    /// Completed days inside a run's date span, capped at today.
    pub fn progress(conn: &Connection, run: &ChallengeRun, today: NaiveDate) -> Result<u32> {
        let today_str = today.format("%Y-%m-%d").to_string();
        let end = if today_str < run.target_date {
            today_str
        } else {
            run.target_date.clone()
        };
        let days = DayRepo::get_range(conn, &run.started, &end)?;
        Ok(days.iter().filter(|d| d.completed).count() as u32)
    }

    /// The active run with its progress, marking it done once every day of
    /// the span is completed. Returns None when no run is open.
    pub fn refresh(conn: &Connection, today: NaiveDate) -> Result<Option<(ChallengeRun, u32)>> {
        let Some(mut run) = Self::active(conn)? else {
            return Ok(None);
        };
        let progress = Self::progress(conn, &run, today)?;
        if let Some(kind) = run.kind() {
            if progress >= kind.duration_days {
                Self::complete(conn, run.id)?;
                run.completed = true;
            }
        }
        Ok(Some((run, progress)))
    }

    pub fn history(conn: &Connection) -> Result<Vec<ChallengeRun>> {
        let mut stmt = conn.prepare(
            "SELECT id, kind_id, started, target_date, completed, completed_at
             FROM challenge_runs ORDER BY started, id",
        )?;
        let rows = stmt.query_map([], run_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }
}

// ─── Habit stacks ────────────────────────────────────────────────────────────

pub struct StackRepo;

impl StackRepo {
    pub fn list(conn: &Connection) -> Result<Vec<HabitStack>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, description, active FROM habit_stacks ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(HabitStack {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                active: row.get::<_, i64>(3)? != 0,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn active(conn: &Connection) -> Result<Option<HabitStack>> {
        Ok(Self::list(conn)?.into_iter().find(|s| s.active))
    }

    pub fn set_active(conn: &Connection, id: i64) -> Result<()> {
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM habit_stacks WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if exists == 0 {
            anyhow::bail!("No habit stack with id {}", id);
        }
        conn.execute("UPDATE habit_stacks SET active = (id = ?1)", params![id])?;
        Ok(())
    }

    pub fn steps(conn: &Connection, stack_id: i64) -> Result<Vec<StackStep>> {
        let mut stmt = conn.prepare(
            "SELECT id, stack_id, name, description, duration_minutes, position, phase, required
             FROM stack_steps WHERE stack_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![stack_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i32>(4)?,
                row.get::<_, i32>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, i64>(7)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, stack_id, name, description, duration_minutes, position, phase, required) =
                r?;
            result.push(StackStep {
                id,
                stack_id,
                name,
                description,
                duration_minutes,
                position,
                phase: StepPhase::from_str(&phase)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                required: required != 0,
            });
        }
        Ok(result)
    }

    /// step_id -> completed, for one stack and date.
    pub fn log_for_date(
        conn: &Connection,
        stack_id: i64,
        date: &str,
    ) -> Result<HashMap<i64, bool>> {
        let mut stmt = conn.prepare(
            "SELECT l.step_id, l.completed FROM stack_step_log l
             JOIN stack_steps s ON s.id = l.step_id
             WHERE s.stack_id = ?1 AND l.date = ?2",
        )?;
        let rows = stmt.query_map(params![stack_id, date], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)? != 0))
        })?;
        rows.collect::<rusqlite::Result<HashMap<_, _>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn mark_step(conn: &Connection, step_id: i64, date: &str, completed: bool) -> Result<()> {
        conn.execute(
            "INSERT INTO stack_step_log (step_id, date, completed) VALUES (?1, ?2, ?3)
             ON CONFLICT(step_id, date) DO UPDATE SET completed = ?3",
            params![step_id, date, completed as i64],
        )?;
        Ok(())
    }

    /// A stack counts as done for a date when every required step is logged.
    pub fn completed_on(conn: &Connection, stack_id: i64, date: &str) -> Result<bool> {
        let steps = Self::steps(conn, stack_id)?;
        let log = Self::log_for_date(conn, stack_id, date)?;
        Ok(steps
            .iter()
            .filter(|s| s.required)
            .all(|s| log.get(&s.id).copied().unwrap_or(false)))
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
