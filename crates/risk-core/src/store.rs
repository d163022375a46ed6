//! Risk Store - persistence abstraction for risk records
//!
//! Records are append-only: the store assigns the identifier on insert and
//! never updates or removes a row afterwards.

use crate::rating::Rating;
use crate::scoring::{self, RiskLevel};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem error while opening the database
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persisted risk record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RiskRecord {
    /// Store-assigned, strictly increasing
    pub id: i64,
    /// Affected asset
    pub asset: String,
    /// Threat scenario
    pub threat: String,
    /// Probability rating, 1..=5
    pub likelihood: i64,
    /// Severity rating, 1..=5
    pub impact: i64,
    /// `likelihood * impact`
    pub score: i64,
    /// Bucket of `score`
    pub level: RiskLevel,
    /// Advisory text; empty when the level carries none
    pub compliance_hint: String,
}

/// Risk awaiting an identifier
///
/// Only constructible from validated ratings; the derived fields come from the
/// scoring engine and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRisk {
    pub(crate) asset: String,
    pub(crate) threat: String,
    pub(crate) likelihood: i64,
    pub(crate) impact: i64,
    pub(crate) score: i64,
    pub(crate) level: RiskLevel,
    pub(crate) compliance_hint: String,
}

impl NewRisk {
    /// Score and classify a validated pair
    pub fn new(asset: &str, threat: &str, likelihood: Rating, impact: Rating) -> Self {
        let assessment = scoring::assess(likelihood.into(), impact.into());
        Self {
            asset: asset.to_string(),
            threat: threat.to_string(),
            likelihood: likelihood.into(),
            impact: impact.into(),
            score: assessment.score,
            level: assessment.level,
            compliance_hint: assessment.compliance_hint,
        }
    }

    /// Derived level
    pub fn level(&self) -> RiskLevel {
        self.level
    }

    /// Derived score
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Attach the store-assigned identifier
    pub(crate) fn into_record(self, id: i64) -> RiskRecord {
        RiskRecord {
            id,
            asset: self.asset,
            threat: self.threat,
            likelihood: self.likelihood,
            impact: self.impact,
            score: self.score,
            level: self.level,
            compliance_hint: self.compliance_hint,
        }
    }
}

/// Durable table of risk records
pub trait RiskStore: Send + Sync {
    /// Persist a risk and return it with a fresh, strictly increasing id
    fn insert(&self, risk: NewRisk) -> StoreResult<RiskRecord>;

    /// All records, or only those whose level name equals `level` exactly.
    /// Ordered by id.
    fn list(&self, level: Option<&str>) -> StoreResult<Vec<RiskRecord>>;

    /// Number of stored records
    fn count(&self) -> StoreResult<usize>;
}

/// In-memory risk store (for testing and ephemeral runs)
pub struct InMemoryRiskStore {
    records: RwLock<Vec<RiskRecord>>,
}

impl InMemoryRiskStore {
    /// Empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryRiskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskStore for InMemoryRiskStore {
    fn insert(&self, risk: NewRisk) -> StoreResult<RiskRecord> {
        let mut records = self.records.write();
        let id = records.last().map_or(1, |r| r.id + 1);
        let record = risk.into_record(id);
        records.push(record.clone());
        Ok(record)
    }

    fn list(&self, level: Option<&str>) -> StoreResult<Vec<RiskRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| level.map_or(true, |l| r.level.as_str() == l))
            .cloned()
            .collect())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().len())
    }
}
