use serde::Serialize;

use crate::evaluator;
use crate::models::SignalInput;

pub const GRAPH_PEDESTRIAN_MAX: i64 = 60;
pub const GRAPH_PEDESTRIAN_STEP: i64 = 5;
pub const GRAPH_VEHICLES: i64 = 20;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphPoint {
    pub pedestrians: i64,
    pub green_time: i64,
}

/// Illustrative curve of green time against pedestrian count, holding
/// vehicles at 20 and peak hour off. Recomputed on every call, never
/// cached.
pub fn sample_curve() -> Vec<GraphPoint> {
    (0..=GRAPH_PEDESTRIAN_MAX)
        .step_by(GRAPH_PEDESTRIAN_STEP as usize)
        .map(|pedestrians| {
            let input = SignalInput {
                pedestrians,
                vehicles: GRAPH_VEHICLES,
                is_peak_hour: false,
            };
            GraphPoint {
                pedestrians,
                green_time: evaluator::apply_rules(&input).adaptive_green_time,
            }
        })
        .collect()
}
