//! Local score preview
//!
//! Uses the same scoring engine as the server, so the preview always matches
//! what `assess` would record.

use crate::output::OutputFormat;
use colored::Colorize;
use risk_core::{assess, validate_ratings, RiskLevel};

pub fn handle(likelihood: i64, impact: i64, format: OutputFormat) -> Result<(), String> {
    let (likelihood, impact) = validate_ratings(likelihood, impact).map_err(|e| e.to_string())?;
    let assessment = assess(likelihood.into(), impact.into());

    format.print(&assessment, |a| {
        let level = match a.level {
            RiskLevel::Low => a.level.to_string().green(),
            RiskLevel::Medium => a.level.to_string().yellow(),
            RiskLevel::High | RiskLevel::Critical => a.level.to_string().red(),
            RiskLevel::Unknown => a.level.to_string().normal(),
        };
        let mut out = format!("Risk Score: {} / 25\nLevel: {}", a.score, level.bold());
        if !a.compliance_hint.is_empty() {
            out.push_str(&format!("\nHint: {}", a.compliance_hint));
        }
        out
    });
    Ok(())
}
