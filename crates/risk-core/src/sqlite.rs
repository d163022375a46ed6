//! SQLite Risk Store
//!
//! Durable [`RiskStore`] backed by a single SQLite table. The schema is
//! created on open; there is no separate migration step. One connection is
//! held behind a mutex, so identifier assignment and the row write of an
//! insert happen under the same lock.

use crate::scoring::{RiskLevel, UnknownLevel};
use crate::store::{NewRisk, RiskRecord, RiskStore, StoreResult};
use parking_lot::Mutex;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::time::Duration;

/// Busy timeout for writers contending on the same database file (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Table and index definitions, idempotent.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS risks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    asset TEXT NOT NULL,
    threat TEXT NOT NULL,
    likelihood INTEGER NOT NULL CHECK (likelihood BETWEEN 1 AND 5),
    impact INTEGER NOT NULL CHECK (impact BETWEEN 1 AND 5),
    score INTEGER NOT NULL CHECK (score = likelihood * impact),
    level TEXT NOT NULL,
    compliance_hint TEXT
);

CREATE INDEX IF NOT EXISTS idx_risks_level ON risks(level);
"#;

const SELECT_RISKS: &str = "SELECT id, asset, threat, likelihood, impact, score, level, compliance_hint
     FROM risks WHERE (?1 IS NULL OR level = ?1) ORDER BY id";

impl ToSql for RiskLevel {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for RiskLevel {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<RiskLevel>()
            .map_err(|e: UnknownLevel| FromSqlError::Other(Box::new(e)))
    }
}

/// SQLite-backed risk store
pub struct SqliteRiskStore {
    conn: Mutex<Connection>,
}

impl SqliteRiskStore {
    /// Open or create a database file, creating parent directories as needed
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        tracing::info!("Opened risk database at {}", path.display());
        Self::with_connection(conn)
    }

    /// Private in-memory database; contents vanish with the store
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
        conn.execute_batch(SCHEMA_SQL)?;
        tracing::debug!("Risk schema ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<RiskRecord> {
    Ok(RiskRecord {
        id: row.get(0)?,
        asset: row.get(1)?,
        threat: row.get(2)?,
        likelihood: row.get(3)?,
        impact: row.get(4)?,
        score: row.get(5)?,
        level: row.get(6)?,
        // rows written by older tooling may carry NULL
        compliance_hint: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
    })
}

impl RiskStore for SqliteRiskStore {
    fn insert(&self, risk: NewRisk) -> StoreResult<RiskRecord> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO risks (asset, threat, likelihood, impact, score, level, compliance_hint)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                risk.asset,
                risk.threat,
                risk.likelihood,
                risk.impact,
                risk.score,
                risk.level,
                risk.compliance_hint,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(risk.into_record(id))
    }

    fn list(&self, level: Option<&str>) -> StoreResult<Vec<RiskRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_RISKS)?;
        let records = stmt
            .query_map(params![level], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn count(&self) -> StoreResult<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM risks", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
