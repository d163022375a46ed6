//! Analytics commands

use super::ApiClient;
use crate::output::{heatmap_table, summary_table, OutputFormat};
use risk_core::{Heatmap, RiskSummary};

pub async fn summary(client: &ApiClient, level: Option<&str>, format: OutputFormat) -> Result<(), String> {
    let query: Vec<(&str, &str)> = level.map(|l| ("level", l)).into_iter().collect();
    let summary: RiskSummary = client.get("/risks/summary", &query).await?;
    format.print(&summary, summary_table);
    Ok(())
}

pub async fn heatmap(client: &ApiClient, format: OutputFormat) -> Result<(), String> {
    let heatmap: Heatmap = client.get("/risks/heatmap", &[]).await?;
    format.print(&heatmap, heatmap_table);
    Ok(())
}
