//! Dashboard aggregates
//!
//! Metrics and the risk matrix derived from a listed collection. Nothing here
//! is persisted; every value is recomputed from the records passed in.

use crate::rating::Rating;
use crate::scoring::{self, RiskLevel};
use crate::store::RiskRecord;
use serde::{Deserialize, Serialize};

/// Recommended treatment for a level
pub fn mitigation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Accept / monitor",
        RiskLevel::Medium => "Plan mitigation within 6 months",
        RiskLevel::High => "Prioritize action + compensating controls (NIST PR.AC)",
        RiskLevel::Critical => "Immediate mitigation required + executive reporting",
        RiskLevel::Unknown => "",
    }
}

/// Record counts per level, one field per variant
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
    pub unknown: usize,
}

impl LevelCounts {
    fn bump(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
            RiskLevel::Unknown => self.unknown += 1,
        }
    }

    /// Count for one level
    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
            RiskLevel::Unknown => self.unknown,
        }
    }
}

/// Risk summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RiskSummary {
    /// Records counted
    pub total: usize,
    /// High plus Critical
    pub high_critical: usize,
    /// Mean score, 0.0 when empty
    pub average_score: f64,
    /// Breakdown per level
    pub by_level: LevelCounts,
}

impl RiskSummary {
    /// Aggregate a listed collection
    pub fn from_records(records: &[RiskRecord]) -> Self {
        let mut by_level = LevelCounts::default();
        for record in records {
            by_level.bump(record.level);
        }

        let total = records.len();
        let average_score = if total > 0 {
            records.iter().map(|r| r.score as f64).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Self {
            total,
            high_critical: by_level.high + by_level.critical,
            average_score,
            by_level,
        }
    }
}

/// One likelihood/impact pair of the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HeatmapCell {
    /// Row rating
    pub likelihood: u8,
    /// Column rating
    pub impact: u8,
    /// Score of the cell itself, not of its records
    pub score: i64,
    /// Level of the cell score
    pub level: RiskLevel,
    /// Records in the cell
    pub count: usize,
    /// Assets in the cell, in register order
    pub assets: Vec<String>,
}

/// 5x5 likelihood x impact matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Heatmap {
    /// Row-major: likelihood ascending, then impact ascending
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    const SIDE: usize = Rating::MAX as usize;

    /// Place each record in its cell; records outside the scale are skipped
    pub fn from_records(records: &[RiskRecord]) -> Self {
        let mut cells = Vec::with_capacity(Self::SIDE * Self::SIDE);
        for likelihood in Rating::MIN..=Rating::MAX {
            for impact in Rating::MIN..=Rating::MAX {
                let score = scoring::score(likelihood.into(), impact.into());
                cells.push(HeatmapCell {
                    likelihood,
                    impact,
                    score,
                    level: scoring::classify(score),
                    count: 0,
                    assets: Vec::new(),
                });
            }
        }

        let mut heatmap = Self { cells };
        for record in records {
            if let Some(idx) = Self::index(record.likelihood, record.impact) {
                let cell = &mut heatmap.cells[idx];
                cell.count += 1;
                cell.assets.push(record.asset.clone());
            }
        }
        heatmap
    }

    fn index(likelihood: i64, impact: i64) -> Option<usize> {
        let range = i64::from(Rating::MIN)..=i64::from(Rating::MAX);
        if !range.contains(&likelihood) || !range.contains(&impact) {
            return None;
        }
        let row = (likelihood - 1) as usize;
        let col = (impact - 1) as usize;
        Some(row * Self::SIDE + col)
    }

    /// Cell for a rating pair, `None` outside 1..=5
    pub fn cell(&self, likelihood: i64, impact: i64) -> Option<&HeatmapCell> {
        Self::index(likelihood, impact).map(|idx| &self.cells[idx])
    }

    /// Cells grouped by likelihood row
    pub fn rows(&self) -> impl Iterator<Item = &[HeatmapCell]> {
        self.cells.chunks(Self::SIDE)
    }
}
