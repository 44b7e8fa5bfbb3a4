use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::models::SignalInput;

pub const MAX_ESTIMATED_PEDESTRIANS: i64 = 60;
pub const MAX_ESTIMATED_VEHICLES: i64 = 80;

/// Stand-in contract for the camera-feed analysis that would supply
/// live counts. The real pipeline is an external collaborator; anything
/// that yields a density estimate can drive the evaluator.
pub trait DensityEstimator {
    fn estimate(&mut self) -> DensityEstimate;
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DensityEstimate {
    pub estimated_pedestrians: i64,
    pub estimated_vehicles: i64,
}

impl DensityEstimate {
    pub fn to_input(&self, is_peak_hour: bool) -> SignalInput {
        SignalInput {
            pedestrians: self.estimated_pedestrians,
            vehicles: self.estimated_vehicles,
            is_peak_hour,
        }
    }
}

/// Seeded mock estimator, deterministic for a given seed so control
/// loops built on it stay reproducible.
pub struct SeededEstimator {
    rng: StdRng,
}

impl SeededEstimator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DensityEstimator for SeededEstimator {
    fn estimate(&mut self) -> DensityEstimate {
        DensityEstimate {
            estimated_pedestrians: self.rng.gen_range(0..=MAX_ESTIMATED_PEDESTRIANS),
            estimated_vehicles: self.rng.gen_range(0..=MAX_ESTIMATED_VEHICLES),
        }
    }
}
