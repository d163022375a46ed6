//! Risk Register Core
//!
//! Deterministic risk scoring and the durable register behind it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           RISK SERVICE                                  │
//! │        Range Validation | Scoring | Persistence | Aggregates            │
//! │                                                                         │
//! │  ┌──────────────┐      ┌──────────────────┐      ┌──────────────────┐   │
//! │  │   Ratings    │─────▶│  Scoring Engine  │─────▶│    Risk Store    │   │
//! │  │  (1..=5)     │      │ score|level|hint │      │ SQLite | Memory  │   │
//! │  └──────────────┘      └──────────────────┘      └────────┬─────────┘   │
//! │                                                           │             │
//! │                               ┌───────────────────────────▼─────────┐   │
//! │                               │   Dashboard: Summary | Heatmap      │   │
//! │                               └─────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use risk_core::{RiskLevel, RiskService};
//!
//! let service = RiskService::in_memory();
//! let record = service.assess_risk("Customer DB", "SQL Injection", 5, 4).unwrap();
//! assert_eq!(record.score, 20);
//! assert_eq!(record.level, RiskLevel::Critical);
//! ```

#![warn(missing_docs)]

pub mod dashboard;
pub mod rating;
pub mod scoring;
pub mod service;
pub mod sqlite;
pub mod store;

use thiserror::Error;

pub use dashboard::{mitigation, Heatmap, HeatmapCell, LevelCounts, RiskSummary};
pub use rating::{validate_ratings, Rating};
pub use scoring::{assess, classify, compliance_hint, score, Assessment, RiskLevel, UnknownLevel};
pub use service::RiskService;
pub use sqlite::SqliteRiskStore;
pub use store::{InMemoryRiskStore, NewRisk, RiskRecord, RiskStore, StoreError, StoreResult};

/// Message reported for any likelihood or impact outside `1..=5`.
pub const RANGE_ERROR_MESSAGE: &str = "Invalid range: Likelihood and Impact must be 1–5.";

/// Risk register error types
#[derive(Debug, Error)]
pub enum RiskError {
    /// A rating fell outside `1..=5`
    #[error("{}", RANGE_ERROR_MESSAGE)]
    Validation {
        /// Offending value
        value: i64,
    },
    /// The backing store could not be reached or written
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl RiskError {
    /// True for input rejections that a caller should not retry.
    pub fn is_validation(&self) -> bool {
        matches!(self, RiskError::Validation { .. })
    }
}

/// Result type for risk operations
pub type RiskResult<T> = Result<T, RiskError>;
