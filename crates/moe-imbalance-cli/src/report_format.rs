use std::io::Write;

use moe_imbalance::{ImbalanceReport, MetricSet};
use serde_json::{Value, json};

/// Output format of scored inputs.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human readable; scores to 3 decimals.
    #[default]
    Text,

    /// One JSON object per input.
    Json,
}

fn write_metric_lines(
    writer: &mut dyn Write,
    metrics: &MetricSet,
) -> std::io::Result<()> {
    for (name, value) in metrics.named_values() {
        if name.ends_with("_tokens") {
            writeln!(writer, "    {name:<24}{value}")?;
        } else {
            writeln!(writer, "    {name:<24}{value:.3}")?;
        }
    }
    Ok(())
}

/// Write one scored input.
pub fn write_report(
    writer: &mut dyn Write,
    source: &str,
    report: &ImbalanceReport,
    format: ReportFormat,
    breakdown: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        ReportFormat::Text => {
            writeln!(writer, "{source}: imbalance_score {:.3}", report.imbalance_score)?;
            if breakdown && let Some(metrics) = &report.metrics {
                write_metric_lines(writer, metrics)?;
            }
        }
        ReportFormat::Json => {
            let mut value = serde_json::to_value(report)?;
            if !breakdown && let Value::Object(fields) = &mut value {
                fields.remove("metrics");
            }
            value["source"] = json!(source);
            writeln!(writer, "{value}")?;
        }
    }
    Ok(())
}

/// Write the metric set of one input.
pub fn write_metrics(
    writer: &mut dyn Write,
    source: &str,
    metrics: Option<&MetricSet>,
    format: ReportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        ReportFormat::Text => {
            writeln!(writer, "{source}:")?;
            match metrics {
                Some(metrics) => write_metric_lines(writer, metrics)?,
                None => writeln!(writer, "    (no tokens)")?,
            }
        }
        ReportFormat::Json => {
            let value = json!({
                "source": source,
                "metrics": metrics,
            });
            writeln!(writer, "{value}")?;
        }
    }
    Ok(())
}
