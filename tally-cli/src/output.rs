//! Printing a dense series for humans or for a downstream renderer.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tally_core::DenseSeries;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned `day  balance` rows
    #[default]
    Table,
    /// `{"labels": [...], "values": [...]}`
    Json,
    /// `day,balance` with a header row
    Csv,
}

pub fn render(series: &DenseSeries, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(series)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(series).context("serialize series as JSON")
        }
        OutputFormat::Csv => render_csv(series),
    }
}

fn render_table(series: &DenseSeries) -> String {
    let width = series
        .values
        .iter()
        .map(|v| format!("{v:.2}").len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, value) in series.points() {
        out.push_str(&format!("{label}  {value:>width$.2}\n"));
    }
    out
}

fn render_csv(series: &DenseSeries) -> Result<String> {
    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(["day", "balance"])?;
    for (label, value) in series.points() {
        let value = value.to_string();
        w.write_record([label, value.as_str()])?;
    }
    let bytes = w.into_inner().context("flush CSV")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DenseSeries {
        DenseSeries {
            labels: vec!["2026-02-07".to_string(), "2026-02-08".to_string()],
            values: vec![140.0, -2.5],
        }
    }

    #[test]
    fn test_table_right_aligns_values() {
        let out = render(&sample(), OutputFormat::Table).unwrap();
        assert_eq!(out, "2026-02-07  140.00\n2026-02-08   -2.50\n");
    }

    #[test]
    fn test_csv_has_header() {
        let out = render(&sample(), OutputFormat::Csv).unwrap();
        assert_eq!(out, "day,balance\n2026-02-07,140\n2026-02-08,-2.5\n");
    }

    #[test]
    fn test_json_matches_renderer_contract() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["labels"][1], "2026-02-08");
        assert_eq!(v["values"][0], 140.0);
    }

    #[test]
    fn test_empty_series_renders_nothing() {
        let out = render(&DenseSeries::default(), OutputFormat::Table).unwrap();
        assert!(out.is_empty());
    }
}
