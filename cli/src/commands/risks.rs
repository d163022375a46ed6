//! Risk register commands

use super::ApiClient;
use crate::output::{risks_table, OutputFormat};
use colored::Colorize;
use risk_core::RiskRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RiskCreate<'a> {
    asset: &'a str,
    threat: &'a str,
    likelihood: i64,
    impact: i64,
}

/// Asset and threat must both be filled in before submitting
fn check_inputs(asset: &str, threat: &str) -> Result<(), String> {
    if asset.trim().is_empty() || threat.trim().is_empty() {
        return Err("Please fill in Asset and Threat.".into());
    }
    Ok(())
}

pub async fn assess(
    client: &ApiClient,
    asset: &str,
    threat: &str,
    likelihood: i64,
    impact: i64,
    format: OutputFormat,
) -> Result<(), String> {
    check_inputs(asset, threat)?;

    let body = RiskCreate { asset, threat, likelihood, impact };
    let record: RiskRecord = client.post("/assess-risk", &body).await?;

    if format == OutputFormat::Table {
        println!("{}", format!("Risk Added! (ID: {})", record.id).green().bold());
    }
    format.print(&vec![record], |records| risks_table(records));
    Ok(())
}

pub async fn list(client: &ApiClient, level: Option<&str>, format: OutputFormat) -> Result<(), String> {
    let query: Vec<(&str, &str)> = level.map(|l| ("level", l)).into_iter().collect();
    let records: Vec<RiskRecord> = client.get("/risks", &query).await?;
    format.print(&records, |records| risks_table(records));
    Ok(())
}
