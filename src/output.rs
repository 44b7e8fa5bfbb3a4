use serde::Serialize;

use crate::error::{Error, Result};
use crate::estimate::DensityEstimate;
use crate::evaluator;
use crate::graph::GraphPoint;
use crate::models::{SignalResult, StoredRun};

/// One renderable command outcome.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Result(SignalResult),
    SavedResult(SavedResult),
    Saved(StoredRun),
    History(Vec<StoredRun>),
    Graph(Vec<GraphPoint>),
    Cycles(Vec<CycleReport>),
}

/// A computed result together with the id it was persisted under.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResult {
    #[serde(flatten)]
    pub result: SignalResult,
    pub saved_run_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub cycle: usize,
    pub estimate: DensityEstimate,
    pub result: SignalResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_run_id: Option<u64>,
}

pub trait Formatter {
    fn write(&self, report: &Report) -> Result<String>;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn write(&self, report: &Report) -> Result<String> {
        let mut out = serde_json::to_string_pretty(report)
            .map_err(|err| Error::Internal(format!("failed to encode report: {}", err)))?;
        out.push('\n');
        Ok(out)
    }
}

impl Formatter for HumanFormatter {
    fn write(&self, report: &Report) -> Result<String> {
        let mut out = String::new();
        match report {
            Report::Result(result) => {
                write_result(&mut out, result);
            }
            Report::SavedResult(saved) => {
                write_result(&mut out, &saved.result);
                out.push_str(&format!("Saved run #{}\n", saved.saved_run_id));
            }
            Report::Saved(run) => {
                out.push_str(&format!("Saved run #{}\n", run.id));
                out.push_str(&run_line(run));
            }
            Report::History(runs) => {
                if runs.is_empty() {
                    out.push_str("No runs recorded.\n");
                }
                for run in runs {
                    out.push_str(&format!(
                        "#{} peds={} vehicles={} peak={} -> {}s {} ({})\n",
                        run.id,
                        run.pedestrians,
                        run.vehicles,
                        peak_label(run.is_peak_hour),
                        run.calculated_green_time,
                        run.risk_level,
                        run.created_at,
                    ));
                }
            }
            Report::Graph(points) => {
                out.push_str("Green time by pedestrian count (vehicles=20, peak hour off):\n");
                for point in points {
                    out.push_str(&format!("{} -> {}s\n", point.pedestrians, point.green_time));
                }
            }
            Report::Cycles(cycles) => {
                for cycle in cycles {
                    let saved = match cycle.saved_run_id {
                        Some(id) => format!(" (saved #{})", id),
                        None => String::new(),
                    };
                    out.push_str(&format!(
                        "cycle {}: peds={} vehicles={} -> {}s {}{}\n",
                        cycle.cycle,
                        cycle.estimate.estimated_pedestrians,
                        cycle.estimate.estimated_vehicles,
                        cycle.result.adaptive_green_time,
                        cycle.result.risk_level,
                        saved,
                    ));
                }
            }
        }
        Ok(out)
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, report: &Report) -> Result<String> {
        let out = match report {
            Report::Result(result) => format!(
                "Green time: {}s\nRisk: {}\n",
                result.adaptive_green_time, result.risk_level
            ),
            Report::SavedResult(saved) => format!(
                "Green time: {}s\nRisk: {}\nSaved run #{}\n",
                saved.result.adaptive_green_time, saved.result.risk_level, saved.saved_run_id
            ),
            Report::Saved(run) => format!("Saved run #{}\n", run.id),
            Report::History(runs) => format!("Runs recorded: {}\n", runs.len()),
            Report::Graph(points) => format!("Samples: {}\n", points.len()),
            Report::Cycles(cycles) => format!("Cycles: {}\n", cycles.len()),
        };
        Ok(out)
    }
}

fn write_result(out: &mut String, result: &SignalResult) {
    out.push_str(&format!(
        "Adaptive green time: {}s (base {}s)\n",
        result.adaptive_green_time, result.base_green_time
    ));
    out.push_str(&format!("Risk level: {}\n", result.risk_level));
    out.push_str("Breakdown:\n");
    for entry in &result.breakdown {
        out.push_str(&format!("- {}: {:+}s\n", entry.rule, entry.adjustment));
    }
    let phases: Vec<String> = evaluator::phase_plan(result)
        .iter()
        .map(|phase| format!("{} {}s", phase.light, phase.duration_s))
        .collect();
    out.push_str(&format!("Cycle: {}\n", phases.join(" -> ")));
    out.push_str(&format!("Explanation: {}\n", result.explanation));
}

fn run_line(run: &StoredRun) -> String {
    format!(
        "peds={} vehicles={} peak={} -> {}s {}\n",
        run.pedestrians,
        run.vehicles,
        peak_label(run.is_peak_hour),
        run.calculated_green_time,
        run.risk_level,
    )
}

fn peak_label(is_peak_hour: bool) -> &'static str {
    if is_peak_hour {
        "yes"
    } else {
        "no"
    }
}
