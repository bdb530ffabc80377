//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `samples` and `predictions`.

use std::path::Path;

use rusqlite::Connection;

use tg_model::SampleRow;

use crate::writer::OutputWriter;
use crate::{OutputResult, PredictionRow};

/// Writes samples and predictions to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS samples (
                 timestamp         TEXT    NOT NULL,
                 intersection_id   TEXT    NOT NULL,
                 intersection_name TEXT    NOT NULL,
                 lat               REAL    NOT NULL,
                 lng               REAL    NOT NULL,
                 road_type         TEXT    NOT NULL,
                 area_type         TEXT    NOT NULL,
                 time_of_day       INTEGER NOT NULL,
                 weather           TEXT    NOT NULL,
                 day_type          TEXT    NOT NULL,
                 congestion_level  REAL    NOT NULL,
                 predicted_speed   REAL    NOT NULL,
                 volume            INTEGER NOT NULL,
                 wait_time         REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS predictions (
                 hour             INTEGER NOT NULL,
                 weather          TEXT    NOT NULL,
                 day_type         TEXT    NOT NULL,
                 node_id          TEXT    NOT NULL,
                 congestion_level REAL    NOT NULL,
                 predicted_speed  REAL    NOT NULL,
                 volume           INTEGER NOT NULL,
                 wait_time        REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_samples(&mut self, rows: &[SampleRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO samples \
                 (timestamp, intersection_id, intersection_name, lat, lng, road_type, area_type, \
                  time_of_day, weather, day_type, congestion_level, predicted_speed, volume, wait_time) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.timestamp,
                    row.intersection_id.key(),
                    row.intersection_name,
                    row.lat,
                    row.lng,
                    row.road_type.as_str(),
                    row.area_type.as_str(),
                    row.time_of_day,
                    row.weather.as_str(),
                    row.day_type.as_str(),
                    row.congestion_level,
                    row.predicted_speed,
                    row.volume,
                    row.wait_time,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_predictions(&mut self, rows: &[PredictionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO predictions \
                 (hour, weather, day_type, node_id, congestion_level, predicted_speed, volume, wait_time) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                let p = &row.prediction;
                stmt.execute(rusqlite::params![
                    row.hour,
                    row.weather.as_str(),
                    row.day_type.as_str(),
                    row.node.key(),
                    p.congestion_level,
                    p.predicted_speed,
                    p.volume,
                    p.wait_time,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
