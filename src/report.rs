//! Console statistics report.
//!
//! The report is assembled as a string so its bytes depend only on the
//! analysis; printing is left to the caller.

use crate::aggregate::{Analysis, ConfigurationStat, GroupedStat};
use crate::stats::Summary;
use probcond_common::output::{format_micros, format_optional};
use probcond_common::{Align, ProbcondError, Result, TableBuilder};
use std::fmt::Write;

const SUMMARY_HEADERS: [&str; 8] =
    ["count", "mean (μs)", "std (μs)", "min (μs)", "25% (μs)", "50% (μs)", "75% (μs)", "max (μs)"];
const CONFIGURATION_HEADERS: [&str; 5] = ["count", "mean (μs)", "std (μs)", "min (μs)", "max (μs)"];

/// Render the report as plain text.
pub fn render_text(analysis: &Analysis) -> String {
    let overall = &analysis.overall;
    let mut out = String::new();

    out.push_str("=== Estadísticas de Rendimiento ===\n");
    let _ = writeln!(out, "Total de mediciones: {}", analysis.record_count);
    let _ = writeln!(out, "Tiempo promedio: {}", format_micros(overall.mean));
    let _ = writeln!(out, "Tiempo mínimo: {}", format_micros(overall.min));
    let _ = writeln!(out, "Tiempo máximo: {}", format_micros(overall.max));
    let _ = writeln!(out, "Desviación estándar: {}", format_spread(overall.std));

    out.push_str("\nPor número de variables de interés:\n");
    out.push_str(&group_table("VariablesInteres", &analysis.by_interest));

    out.push_str("\nPor número de variables condicionadas:\n");
    out.push_str(&group_table("VariablesCondicionadas", &analysis.by_conditioned));

    out.push_str("\nPor configuración:\n");
    out.push_str(&configuration_table(&analysis.by_configuration));

    let correlation = analysis.log_log_correlation.map_or_else(|| "n/d".to_string(), |r| format!("{r:.4}"));
    let _ = writeln!(out, "\nCorrelación log-log (estados vs tiempo): {correlation}");

    out
}

/// Render the report as pretty-printed JSON.
pub fn render_json(analysis: &Analysis) -> Result<String> {
    serde_json::to_string_pretty(analysis).map_err(|e| ProbcondError::Serialization { message: e.to_string() })
}

fn format_spread(std: Option<f64>) -> String {
    std.map_or_else(|| "NaN".to_string(), format_micros)
}

fn summary_cells(summary: &Summary) -> Vec<String> {
    vec![
        summary.count.to_string(),
        format!("{:.2}", summary.mean),
        format_optional(summary.std),
        format!("{:.2}", summary.min),
        format!("{:.2}", summary.q1),
        format!("{:.2}", summary.median),
        format!("{:.2}", summary.q3),
        format!("{:.2}", summary.max),
    ]
}

fn group_table(key_header: &str, groups: &[GroupedStat]) -> String {
    let mut headers = vec![key_header.to_string()];
    headers.extend(SUMMARY_HEADERS.iter().map(|h| h.to_string()));

    let mut builder = TableBuilder::new().headers(headers).align(vec![Align::Left]);
    for group in groups {
        let mut row = vec![group.key.to_string()];
        row.extend(summary_cells(&group.summary));
        builder = builder.row(row);
    }
    builder.build().to_string()
}

fn configuration_table(configurations: &[ConfigurationStat]) -> String {
    let with_marginalized = configurations.iter().any(|c| c.marginalized.is_some());

    let mut headers = vec!["VariablesInteres", "VariablesCondicionadas"];
    if with_marginalized {
        headers.push("VariablesMarginalizadas");
    }
    headers.extend(CONFIGURATION_HEADERS);

    let mut builder = TableBuilder::new().headers(headers);

    for config in configurations {
        let s = &config.summary;
        let mut row = vec![config.interest.to_string(), config.conditioned.to_string()];
        if with_marginalized {
            row.push(config.marginalized.map_or_else(|| "-".to_string(), |m| m.to_string()));
        }
        row.extend([
            s.count.to_string(),
            format!("{:.2}", s.mean),
            format_optional(s.std),
            format!("{:.2}", s.min),
            format!("{:.2}", s.max),
        ]);
        builder = builder.row(row);
    }
    builder.build().to_string()
}
