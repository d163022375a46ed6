//! Scoring Engine
//!
//! Pure classification of a likelihood/impact pair. The same functions back
//! stored records and the non-persisting preview, so both always agree on the
//! bucket boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Advisory attached to High and Critical risks.
pub const NIST_RATE_LIMITING_HINT: &str = "Recommend NIST PR.AC-7: Rate Limiting";

/// Compliance hints per level. Levels absent from the table get no hint.
const COMPLIANCE_HINTS: &[(RiskLevel, &str)] = &[
    (RiskLevel::High, NIST_RATE_LIMITING_HINT),
    (RiskLevel::Critical, NIST_RATE_LIMITING_HINT),
];

/// Categorical risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RiskLevel {
    /// Score 1..=5
    Low,
    /// Score 6..=12
    Medium,
    /// Score 13..=18
    High,
    /// Score 19..=25
    Critical,
    /// Score outside 1..=25
    Unknown,
}

impl RiskLevel {
    /// Levels reachable from valid ratings, lowest first.
    pub const RATED: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// Stored and wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
            RiskLevel::Unknown => "Unknown",
        }
    }

    /// High or Critical
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level name that matched no variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown risk level: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for RiskLevel {
    type Err = UnknownLevel;

    /// Exact, case-sensitive match on the level name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            "Critical" => Ok(RiskLevel::Critical),
            "Unknown" => Ok(RiskLevel::Unknown),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

/// Score a likelihood/impact pair.
///
/// Total over every input: operands are widened before multiplying.
pub fn score(likelihood: i32, impact: i32) -> i64 {
    i64::from(likelihood) * i64::from(impact)
}

/// Map a score onto its level. Ranges are closed and contiguous.
pub fn classify(score: i64) -> RiskLevel {
    match score {
        1..=5 => RiskLevel::Low,
        6..=12 => RiskLevel::Medium,
        13..=18 => RiskLevel::High,
        19..=25 => RiskLevel::Critical,
        _ => RiskLevel::Unknown,
    }
}

/// Advisory text for a level, empty when none applies.
pub fn compliance_hint(level: RiskLevel) -> &'static str {
    COMPLIANCE_HINTS
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, hint)| *hint)
        .unwrap_or("")
}

/// Scoring outputs embedded into a record at creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Assessment {
    /// Likelihood times impact
    pub score: i64,
    /// Bucket of `score`
    pub level: RiskLevel,
    /// Advisory text, empty for levels without one
    pub compliance_hint: String,
}

/// Score, classify and attach the compliance hint in one step.
pub fn assess(likelihood: i32, impact: i32) -> Assessment {
    let score = score(likelihood, impact);
    let level = classify(score);
    Assessment {
        score,
        level,
        compliance_hint: compliance_hint(level).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(1), RiskLevel::Low);
        assert_eq!(classify(5), RiskLevel::Low);
        assert_eq!(classify(6), RiskLevel::Medium);
        assert_eq!(classify(12), RiskLevel::Medium);
        assert_eq!(classify(13), RiskLevel::High);
        assert_eq!(classify(18), RiskLevel::High);
        assert_eq!(classify(19), RiskLevel::Critical);
        assert_eq!(classify(25), RiskLevel::Critical);
    }

    #[test]
    fn test_classify_out_of_range() {
        assert_eq!(classify(0), RiskLevel::Unknown);
        assert_eq!(classify(26), RiskLevel::Unknown);
        assert_eq!(classify(-4), RiskLevel::Unknown);
        assert_eq!(classify(i64::MAX), RiskLevel::Unknown);
    }

    #[test]
    fn test_compliance_hints() {
        assert_eq!(compliance_hint(RiskLevel::Low), "");
        assert_eq!(compliance_hint(RiskLevel::Medium), "");
        assert_eq!(compliance_hint(RiskLevel::Unknown), "");
        assert!(compliance_hint(RiskLevel::High).contains("NIST"));
        assert!(compliance_hint(RiskLevel::Critical).contains("NIST"));
    }

    #[test]
    fn test_score_is_total() {
        assert_eq!(score(i32::MAX, i32::MAX), 4_611_686_014_132_420_609);
        assert_eq!(score(-3, 2), -6);
        assert_eq!(assess(0, 3).level, RiskLevel::Unknown);
    }

    #[test]
    fn test_assess_examples() {
        let critical = assess(5, 4);
        assert_eq!(critical.score, 20);
        assert_eq!(critical.level, RiskLevel::Critical);
        assert!(critical.compliance_hint.contains("NIST"));

        let low = assess(1, 1);
        assert_eq!(low.score, 1);
        assert_eq!(low.level, RiskLevel::Low);
        assert_eq!(low.compliance_hint, "");
    }

    #[test]
    fn test_level_parse_is_case_sensitive() {
        assert_eq!("High".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert!("high".parse::<RiskLevel>().is_err());
        assert!("Nonexistent".parse::<RiskLevel>().is_err());
        for level in RiskLevel::RATED {
            assert_eq!(level.as_str().parse::<RiskLevel>(), Ok(level));
        }
    }

    #[test]
    fn test_level_serializes_as_name() {
        let json = serde_json::to_string(&RiskLevel::Critical).unwrap();
        assert_eq!(json, "\"Critical\"");
    }

    proptest! {
        #[test]
        fn prop_valid_ratings_score_in_range(l in 1i32..=5, i in 1i32..=5) {
            let s = score(l, i);
            prop_assert_eq!(s, i64::from(l * i));
            prop_assert!((1..=25).contains(&s));
            prop_assert_ne!(classify(s), RiskLevel::Unknown);
        }

        #[test]
        fn prop_hint_iff_elevated(l in 1i32..=5, i in 1i32..=5) {
            let a = assess(l, i);
            prop_assert_eq!(!a.compliance_hint.is_empty(), a.level.is_elevated());
        }
    }
}
