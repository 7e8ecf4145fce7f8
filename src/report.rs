use std::io::{self, Write};
use std::time::Duration;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ReportFormat;
use crate::domain::SelectionResult;
use crate::optimizer::OptimizerError;

/// One rendered solver run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub label: String,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,
    #[serde(flatten)]
    pub outcome: RunOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Solved(SelectionResult),
    Skipped {
        error_type: String,
        message: String,
    },
}

impl RunReport {
    pub fn solved(label: &str, result: SelectionResult, elapsed: Option<Duration>) -> Self {
        Self {
            label: label.to_string(),
            generated_at: Utc::now(),
            elapsed_ms: elapsed.map(|d| d.as_secs_f64() * 1000.0),
            outcome: RunOutcome::Solved(result),
        }
    }

    pub fn skipped(label: &str, error: &OptimizerError) -> Self {
        Self {
            label: label.to_string(),
            generated_at: Utc::now(),
            elapsed_ms: None,
            outcome: RunOutcome::Skipped {
                error_type: error.error_type().to_string(),
                message: error.to_string(),
            },
        }
    }

    /// Human readable block
    pub fn to_text(&self) -> String {
        let mut out = format!("=== {} ===\n", self.label);
        match &self.outcome {
            RunOutcome::Solved(result) => {
                out.push_str(&format!(
                    "Selected Building IDs: [{}]\n",
                    result.selected_ids().iter().join(", ")
                ));
                out.push_str(&format!(
                    "Total Energy Generated: {} kWh/month\n",
                    result.total_yield()
                ));
                out.push_str(&format!(
                    "Total Installation Cost: RM {}\n",
                    result.total_cost()
                ));
            }
            RunOutcome::Skipped { message, .. } => {
                out.push_str(&format!("Skipped: {}\n", message));
            }
        }
        if let Some(ms) = self.elapsed_ms {
            out.push_str(&format!("Elapsed: {:.3} ms\n", ms));
        }
        out
    }
}

/// Writes run reports to an output stream and mirrors them to the log
pub struct Reporter<W: Write> {
    out: W,
    format: ReportFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }

    pub fn report(
        &mut self,
        label: &str,
        result: &SelectionResult,
        elapsed: Option<Duration>,
    ) -> io::Result<()> {
        info!(
            label,
            selected = ?result.selected_ids(),
            total_yield = result.total_yield(),
            total_cost = result.total_cost(),
            elapsed_ms = elapsed.map(|d| d.as_secs_f64() * 1000.0),
            "selection result"
        );
        self.write(&RunReport::solved(label, result.clone(), elapsed))
    }

    pub fn report_failure(&mut self, label: &str, error: &OptimizerError) -> io::Result<()> {
        warn!(label, error = %error, "strategy skipped");
        self.write(&RunReport::skipped(label, error))
    }

    fn write(&mut self, report: &RunReport) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => writeln!(self.out, "{}", report.to_text()),
            ReportFormat::Json => {
                serde_json::to_writer(&mut self.out, report)?;
                writeln!(self.out)
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::StrategyKind;

    #[test]
    fn test_text_report() {
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Text);
        reporter
            .report("Dynamic Programming", &SelectionResult::new(vec![1, 2], 90, 5000), None)
            .unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "=== Dynamic Programming ===\n\
             Selected Building IDs: [1, 2]\n\
             Total Energy Generated: 90 kWh/month\n\
             Total Installation Cost: RM 5000\n\n"
        );
    }

    #[test]
    fn test_text_report_with_elapsed() {
        let report = RunReport::solved(
            "Greedy",
            SelectionResult::empty(),
            Some(Duration::from_micros(1500)),
        );
        let text = report.to_text();
        assert!(text.contains("Selected Building IDs: []"));
        assert!(text.contains("Elapsed: 1.500 ms"));
    }

    #[test]
    fn test_json_report() {
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Json);
        reporter
            .report("Greedy", &SelectionResult::new(vec![2, 1], 90, 5000), None)
            .unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["label"], "Greedy");
        assert_eq!(value["status"], "solved");
        assert_eq!(value["selected_ids"], serde_json::json!([2, 1]));
        assert_eq!(value["total_yield"], 90);
        assert!(value.get("elapsed_ms").is_none());
    }

    #[test]
    fn test_failure_report() {
        let error = OptimizerError::ResourceExhaustion {
            strategy: StrategyKind::BruteForce,
            requested: 40,
            limit: 25,
        };
        let mut reporter = Reporter::new(Vec::new(), ReportFormat::Json);
        reporter.report_failure("Brute Force", &error).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["error_type"], "ResourceExhaustion");
    }
}
