use crate::error::{Error, Result};
use crate::models::{Light, Phase, RiskLevel, RuleAdjustment, SignalInput, SignalResult};

pub const BASE_GREEN_TIME: i64 = 25;
pub const MODERATE_PEDESTRIAN_THRESHOLD: i64 = 15;
pub const MODERATE_PEDESTRIAN_BONUS: i64 = 10;
pub const HEAVY_PEDESTRIAN_THRESHOLD: i64 = 30;
pub const HEAVY_PEDESTRIAN_BONUS: i64 = 20;
pub const PEAK_HOUR_BONUS: i64 = 5;
pub const VEHICLE_CAP_THRESHOLD: i64 = 40;
pub const GREEN_TIME_CAP: i64 = 45;
pub const RED_CLEARANCE_S: i64 = 2;
pub const YELLOW_CLEARANCE_S: i64 = 3;

pub fn validate(input: &SignalInput) -> Result<()> {
    if input.pedestrians < 0 {
        return Err(Error::NegativePedestrians(input.pedestrians));
    }
    if input.vehicles < 0 {
        return Err(Error::NegativeVehicles(input.vehicles));
    }
    Ok(())
}

pub fn evaluate(input: &SignalInput) -> Result<SignalResult> {
    validate(input)?;
    Ok(apply_rules(input))
}

/// Rule application over an already validated input. The breakdown order
/// is the audit trail shown to callers; the final value is the running
/// sum after the vehicle cap, so the adjustments always sum to it.
pub(crate) fn apply_rules(input: &SignalInput) -> SignalResult {
    let mut green_time = BASE_GREEN_TIME;
    let mut explanation = String::from("Base green time starts at 25s.");
    let mut breakdown = vec![RuleAdjustment {
        rule: "Base Time".to_string(),
        adjustment: BASE_GREEN_TIME,
    }];
    let mut risk_level = RiskLevel::Low;

    if input.pedestrians > HEAVY_PEDESTRIAN_THRESHOLD {
        green_time += HEAVY_PEDESTRIAN_BONUS;
        explanation.push_str(" Increased by 20s due to heavy pedestrian traffic (>30).");
        breakdown.push(RuleAdjustment {
            rule: "Heavy Pedestrians (>30)".to_string(),
            adjustment: HEAVY_PEDESTRIAN_BONUS,
        });
        risk_level = RiskLevel::High;
    } else if input.pedestrians > MODERATE_PEDESTRIAN_THRESHOLD {
        green_time += MODERATE_PEDESTRIAN_BONUS;
        explanation.push_str(" Increased by 10s due to moderate pedestrian traffic (>15).");
        breakdown.push(RuleAdjustment {
            rule: "Moderate Pedestrians (>15)".to_string(),
            adjustment: MODERATE_PEDESTRIAN_BONUS,
        });
        risk_level = RiskLevel::Moderate;
    }

    if input.is_peak_hour {
        green_time += PEAK_HOUR_BONUS;
        explanation.push_str(" Added 5s bonus for Peak Hour.");
        breakdown.push(RuleAdjustment {
            rule: "Peak Hour Bonus".to_string(),
            adjustment: PEAK_HOUR_BONUS,
        });
    }

    if input.vehicles > VEHICLE_CAP_THRESHOLD && green_time > GREEN_TIME_CAP {
        explanation.push_str(" Capped at 45s due to high vehicle traffic (>40).");
        // Negative correction entry, so the breakdown still sums to the total.
        breakdown.push(RuleAdjustment {
            rule: "High Vehicle Traffic Cap".to_string(),
            adjustment: GREEN_TIME_CAP - green_time,
        });
        green_time = GREEN_TIME_CAP;
    }

    SignalResult {
        base_green_time: BASE_GREEN_TIME,
        adaptive_green_time: green_time,
        risk_level,
        explanation,
        breakdown,
    }
}

/// Fixed clearance sequence the signal runs for one computed result:
/// red, then green for the adaptive duration, then yellow.
pub fn phase_plan(result: &SignalResult) -> Vec<Phase> {
    vec![
        Phase {
            light: Light::Red,
            duration_s: RED_CLEARANCE_S,
        },
        Phase {
            light: Light::Green,
            duration_s: result.adaptive_green_time,
        },
        Phase {
            light: Light::Yellow,
            duration_s: YELLOW_CLEARANCE_S,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pedestrians: i64, vehicles: i64, is_peak_hour: bool) -> SignalInput {
        SignalInput {
            pedestrians,
            vehicles,
            is_peak_hour,
        }
    }

    fn breakdown_sum(result: &SignalResult) -> i64 {
        result.breakdown.iter().map(|entry| entry.adjustment).sum()
    }

    #[test]
    fn quiet_intersection_stays_at_base() {
        let result = evaluate(&input(0, 0, false)).unwrap();
        assert_eq!(result.adaptive_green_time, 25);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(
            result.breakdown,
            vec![RuleAdjustment {
                rule: "Base Time".to_string(),
                adjustment: 25
            }]
        );
        assert_eq!(result.explanation, "Base green time starts at 25s.");
    }

    #[test]
    fn moderate_pedestrians_add_ten_seconds() {
        let result = evaluate(&input(20, 10, false)).unwrap();
        assert_eq!(result.adaptive_green_time, 35);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(
            result.breakdown,
            vec![
                RuleAdjustment {
                    rule: "Base Time".to_string(),
                    adjustment: 25
                },
                RuleAdjustment {
                    rule: "Moderate Pedestrians (>15)".to_string(),
                    adjustment: 10
                },
            ]
        );
    }

    #[test]
    fn heavy_pedestrians_with_peak_hour_hit_the_vehicle_cap() {
        let result = evaluate(&input(35, 45, true)).unwrap();
        assert_eq!(result.adaptive_green_time, 45);
        assert_eq!(result.risk_level, RiskLevel::High);
        let labels: Vec<&str> = result
            .breakdown
            .iter()
            .map(|entry| entry.rule.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Base Time",
                "Heavy Pedestrians (>30)",
                "Peak Hour Bonus",
                "High Vehicle Traffic Cap",
            ]
        );
        assert_eq!(result.breakdown[3].adjustment, -5);
        assert_eq!(breakdown_sum(&result), 45);
    }

    #[test]
    fn cap_only_fires_above_forty_vehicles() {
        // Same totals, vehicles at the threshold: no clamp.
        let result = evaluate(&input(35, 40, true)).unwrap();
        assert_eq!(result.adaptive_green_time, 50);
        assert_eq!(result.breakdown.len(), 3);
    }

    #[test]
    fn cap_only_fires_when_total_exceeds_it() {
        // Heavy vehicles but the total never passes 45.
        let result = evaluate(&input(20, 80, false)).unwrap();
        assert_eq!(result.adaptive_green_time, 35);
        assert_eq!(result.breakdown.len(), 2);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(evaluate(&input(15, 0, false)).unwrap().adaptive_green_time, 25);
        assert_eq!(evaluate(&input(16, 0, false)).unwrap().adaptive_green_time, 35);
        assert_eq!(evaluate(&input(30, 0, false)).unwrap().adaptive_green_time, 35);
        assert_eq!(evaluate(&input(31, 0, false)).unwrap().adaptive_green_time, 45);
    }

    #[test]
    fn explanation_concatenates_fired_clauses_in_order() {
        let result = evaluate(&input(35, 45, true)).unwrap();
        assert_eq!(
            result.explanation,
            "Base green time starts at 25s. \
             Increased by 20s due to heavy pedestrian traffic (>30). \
             Added 5s bonus for Peak Hour. \
             Capped at 45s due to high vehicle traffic (>40)."
        );
    }

    #[test]
    fn negative_pedestrians_are_rejected() {
        let err = evaluate(&input(-1, 10, false)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "pedestrians must be a non-negative count (got -1)"
        );
    }

    #[test]
    fn negative_vehicles_are_rejected() {
        let err = evaluate(&input(10, -4, false)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "vehicles must be a non-negative count (got -4)"
        );
    }

    #[test]
    fn green_time_is_monotone_in_pedestrians() {
        let mut previous = 0;
        for pedestrians in 0..=100 {
            let result = evaluate(&input(pedestrians, 20, false)).unwrap();
            assert!(result.adaptive_green_time >= previous);
            previous = result.adaptive_green_time;
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let first = evaluate(&input(35, 45, true)).unwrap();
        let second = evaluate(&input(35, 45, true)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn phase_plan_wraps_green_with_fixed_clearances() {
        let result = evaluate(&input(20, 10, false)).unwrap();
        let phases = phase_plan(&result);
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].light, Light::Red);
        assert_eq!(phases[0].duration_s, 2);
        assert_eq!(phases[1].light, Light::Green);
        assert_eq!(phases[1].duration_s, 35);
        assert_eq!(phases[2].light, Light::Yellow);
        assert_eq!(phases[2].duration_s, 3);
    }
}
