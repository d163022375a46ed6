//! Risk Service
//!
//! Sole entry point that produces new records: validate, score, persist.

use crate::dashboard::{Heatmap, RiskSummary};
use crate::rating::validate_ratings;
use crate::sqlite::SqliteRiskStore;
use crate::store::{InMemoryRiskStore, NewRisk, RiskRecord, RiskStore};
use crate::RiskResult;
use std::path::Path;
use std::sync::Arc;

/// Orchestrates validation, scoring and storage
#[derive(Clone)]
pub struct RiskService {
    store: Arc<dyn RiskStore>,
}

impl RiskService {
    /// Create a service over any store
    pub fn new(store: Arc<dyn RiskStore>) -> Self {
        Self { store }
    }

    /// Service backed by a SQLite file
    pub fn open(path: impl AsRef<Path>) -> RiskResult<Self> {
        Ok(Self::new(Arc::new(SqliteRiskStore::open(path)?)))
    }

    /// Service backed by an in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRiskStore::new()))
    }

    /// Assess and record a risk.
    ///
    /// Ratings are validated before the store is touched, so an invalid pair
    /// never produces a partial write. Blank `asset` or `threat` is accepted
    /// as given; non-blankness is a presentation concern.
    pub fn assess_risk(
        &self,
        asset: &str,
        threat: &str,
        likelihood: i64,
        impact: i64,
    ) -> RiskResult<RiskRecord> {
        let (likelihood, impact) = validate_ratings(likelihood, impact).map_err(|e| {
            tracing::warn!(asset, threat, "Rejected risk assessment: {}", e);
            e
        })?;

        let record = self.store.insert(NewRisk::new(asset, threat, likelihood, impact))?;
        tracing::info!(
            id = record.id,
            score = record.score,
            level = %record.level,
            "Recorded risk"
        );
        Ok(record)
    }

    /// List records, optionally only those whose level name matches exactly
    pub fn list_risks(&self, level: Option<&str>) -> RiskResult<Vec<RiskRecord>> {
        let records = self.store.list(level)?;
        tracing::debug!(?level, count = records.len(), "Listed risks");
        Ok(records)
    }

    /// Number of stored records
    pub fn count(&self) -> RiskResult<usize> {
        Ok(self.store.count()?)
    }

    /// Dashboard metrics over the (optionally filtered) register
    pub fn summary(&self, level: Option<&str>) -> RiskResult<RiskSummary> {
        Ok(RiskSummary::from_records(&self.list_risks(level)?))
    }

    /// Likelihood x impact matrix over the whole register
    pub fn heatmap(&self) -> RiskResult<Heatmap> {
        Ok(Heatmap::from_records(&self.list_risks(None)?))
    }
}
