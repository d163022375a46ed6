//! Output formatting

use clap::ValueEnum;
use risk_core::{mitigation, Heatmap, RiskRecord, RiskSummary};
use serde::Serialize;
use tabled::{builder::Builder, Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `data`, using `table` to render the table form
    pub fn print<T: Serialize>(&self, data: &T, table: impl FnOnce(&T) -> String) {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            OutputFormat::Table => {
                println!("{}", table(data));
            }
        }
    }
}

/// Register row with the derived mitigation action
#[derive(Debug, Tabled)]
pub struct RiskRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Asset")]
    pub asset: String,
    #[tabled(rename = "Threat")]
    pub threat: String,
    #[tabled(rename = "Likelihood")]
    pub likelihood: i64,
    #[tabled(rename = "Impact")]
    pub impact: i64,
    #[tabled(rename = "Score")]
    pub score: i64,
    #[tabled(rename = "Level")]
    pub level: String,
    #[tabled(rename = "Mitigation Action")]
    pub mitigation: &'static str,
}

impl From<&RiskRecord> for RiskRow {
    fn from(r: &RiskRecord) -> Self {
        Self {
            id: r.id,
            asset: r.asset.clone(),
            threat: r.threat.clone(),
            likelihood: r.likelihood,
            impact: r.impact,
            score: r.score,
            level: r.level.to_string(),
            mitigation: mitigation(r.level),
        }
    }
}

pub fn risks_table(records: &[RiskRecord]) -> String {
    if records.is_empty() {
        return "No risks yet".to_string();
    }
    Table::new(records.iter().map(RiskRow::from)).to_string()
}

pub fn summary_table(summary: &RiskSummary) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric".to_string(), "Value".to_string()]);
    builder.push_record(["Total Risks".to_string(), summary.total.to_string()]);
    builder.push_record(["High/Critical Risks".to_string(), summary.high_critical.to_string()]);
    builder.push_record(["Average Score".to_string(), format!("{:.1}", summary.average_score)]);
    builder.push_record(["Low".to_string(), summary.by_level.low.to_string()]);
    builder.push_record(["Medium".to_string(), summary.by_level.medium.to_string()]);
    builder.push_record(["High".to_string(), summary.by_level.high.to_string()]);
    builder.push_record(["Critical".to_string(), summary.by_level.critical.to_string()]);
    builder.build().to_string()
}

/// Likelihood rows against impact columns; each cell shows its level and,
/// when occupied, the number of risks in it.
pub fn heatmap_table(heatmap: &Heatmap) -> String {
    let mut builder = Builder::default();
    let mut header = vec!["Likelihood \\ Impact".to_string()];
    header.extend((1..=5).map(|i| i.to_string()));
    builder.push_record(header);

    for row in heatmap.rows() {
        let mut record = vec![row.first().map(|c| c.likelihood.to_string()).unwrap_or_default()];
        record.extend(row.iter().map(|cell| {
            if cell.count > 0 {
                format!("{} ({})", cell.level, cell.count)
            } else {
                cell.level.to_string()
            }
        }));
        builder.push_record(record);
    }
    builder.build().to_string()
}
