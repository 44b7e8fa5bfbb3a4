use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts are signed on the wire so out-of-range values reach validation
/// instead of failing opaquely at deserialization.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignalInput {
    pub pedestrians: i64,
    pub vehicles: i64,
    #[serde(alias = "is_peak_hour")]
    pub is_peak_hour: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuleAdjustment {
    pub rule: String,
    pub adjustment: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignalResult {
    pub base_green_time: i64,
    pub adaptive_green_time: i64,
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub breakdown: Vec<RuleAdjustment>,
}

/// Fields persisted for one completed run. The breakdown is not stored.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewRun {
    pub pedestrians: i64,
    pub vehicles: i64,
    pub is_peak_hour: bool,
    pub calculated_green_time: i64,
    pub risk_level: RiskLevel,
    pub explanation: String,
}

impl NewRun {
    pub fn from_result(input: &SignalInput, result: &SignalResult) -> Self {
        Self {
            pedestrians: input.pedestrians,
            vehicles: input.vehicles,
            is_peak_hour: input.is_peak_hour,
            calculated_green_time: result.adaptive_green_time,
            risk_level: result.risk_level,
            explanation: result.explanation.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredRun {
    pub id: u64,
    pub pedestrians: i64,
    pub vehicles: i64,
    pub is_peak_hour: bool,
    pub calculated_green_time: i64,
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub created_at: String,
}

/// One timed phase of the light cycle derived from a computed result.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub light: Light,
    pub duration_s: i64,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Light {
    Red,
    Green,
    Yellow,
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Light::Red => write!(f, "red"),
            Light::Green => write!(f, "green"),
            Light::Yellow => write!(f, "yellow"),
        }
    }
}
