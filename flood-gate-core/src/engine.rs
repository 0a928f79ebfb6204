//! Actuation and status
//!
//! Maps the current distance onto the gate angle, the alarm line and a risk
//! tier. Open-loop and stateless: every cycle recomputes from scratch, and
//! re-issuing the same output to the hardware is harmless.
//!
//! # Gate Angle
//! ```text
//! distance:  >= caution ........ alert >=
//! angle:          0° ........... 90°
//! ```
//! The gate closes as the water rises (distance shrinks).

use crate::config::{
    GATE_CLOSED_DEG, GATE_OPEN_DEG, GATE_SERVO_MAX_PULSE_US, GATE_SERVO_MIN_PULSE_US,
    GATE_SERVO_TRAVEL_DEG,
};
use crate::thresholds::Thresholds;

/// Discrete risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tier {
    /// Water below the caution level
    Safe,
    /// Water between the caution and alert levels
    Caution,
    /// Water at or above the alert level
    Danger,
}

/// Everything the control loop writes to the hardware in one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorOutput {
    /// Gate angle in degrees, within [`GATE_OPEN_DEG`, `GATE_CLOSED_DEG`]
    pub gate_angle_deg: i32,
    /// Alarm relay state
    pub alarm_on: bool,
    /// Risk tier, for logging
    pub tier: Tier,
}

/// Computes the outputs for a distance (cm) under the given thresholds
pub fn update(distance: i32, thresholds: &Thresholds) -> ActuatorOutput {
    let alert = thresholds.alert();
    let caution = thresholds.caution();

    let tier = if distance <= alert {
        Tier::Danger
    } else if distance <= caution {
        Tier::Caution
    } else {
        Tier::Safe
    };

    ActuatorOutput {
        gate_angle_deg: gate_angle(distance, thresholds),
        alarm_on: distance <= alert,
        tier,
    }
}

/// Gate angle for a distance, clamped to the gate travel
///
/// Equal thresholds collapse the linear band into a step at the alert level.
pub fn gate_angle(distance: i32, thresholds: &Thresholds) -> i32 {
    let alert = thresholds.alert();
    let caution = thresholds.caution();

    if caution == alert {
        return if distance <= alert {
            GATE_CLOSED_DEG
        } else {
            GATE_OPEN_DEG
        };
    }

    let angle = map_range(distance, caution, alert, GATE_OPEN_DEG, GATE_CLOSED_DEG);
    angle.clamp(i64::from(GATE_OPEN_DEG), i64::from(GATE_CLOSED_DEG)) as i32
}

/// Integer linear re-mapping with truncating division
///
/// `in_min` must differ from `in_max`. Computed in `i64` so keypad-sized
/// inputs cannot overflow.
fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i64 {
    let (x, in_min, in_max) = (i64::from(x), i64::from(in_min), i64::from(in_max));
    let (out_min, out_max) = (i64::from(out_min), i64::from(out_max));
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Pulse width range of a hobby servo over its travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoCalibration {
    /// Pulse width at 0°
    pub min_pulse_us: u32,
    /// Pulse width at full travel
    pub max_pulse_us: u32,
    /// Full travel in degrees
    pub travel_deg: u32,
}

impl ServoCalibration {
    /// The servo fitted to the gate
    pub const GATE: Self = Self {
        min_pulse_us: GATE_SERVO_MIN_PULSE_US,
        max_pulse_us: GATE_SERVO_MAX_PULSE_US,
        travel_deg: GATE_SERVO_TRAVEL_DEG,
    };

    /// Pulse width for an angle, clamped to the travel
    pub fn pulse_us(&self, angle_deg: i32) -> u32 {
        if self.travel_deg == 0 {
            return self.min_pulse_us;
        }
        let angle = angle_deg.max(0).unsigned_abs().min(self.travel_deg);
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us);
        self.min_pulse_us + angle * span / self.travel_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danger_scenario() {
        let output = update(5, &Thresholds::default());
        assert_eq!(output.tier, Tier::Danger);
        assert!(output.alarm_on);
        assert_eq!(output.gate_angle_deg, 90);
    }

    #[test]
    fn test_caution_scenario() {
        let output = update(10, &Thresholds::default());
        assert_eq!(output.tier, Tier::Caution);
        assert!(!output.alarm_on);
        assert_eq!(output.gate_angle_deg, 45);
    }

    #[test]
    fn test_safe_scenario() {
        let output = update(15, &Thresholds::default());
        assert_eq!(output.tier, Tier::Safe);
        assert!(!output.alarm_on);
        assert_eq!(output.gate_angle_deg, 0);
    }

    #[test]
    fn test_band_edges() {
        let thresholds = Thresholds::default();
        // at alert: danger and closed
        assert_eq!(update(8, &thresholds).tier, Tier::Danger);
        assert_eq!(gate_angle(8, &thresholds), 90);
        // at caution: caution tier but gate still open
        assert_eq!(update(12, &thresholds).tier, Tier::Caution);
        assert_eq!(gate_angle(12, &thresholds), 0);
        // 11 -> (11 - 12) * 90 / (8 - 12) = 22 (truncated)
        assert_eq!(gate_angle(11, &thresholds), 22);
        // 9 -> (9 - 12) * 90 / (8 - 12) = 67 (truncated)
        assert_eq!(gate_angle(9, &thresholds), 67);
    }

    #[test]
    fn test_simulated_distance_beyond_model() {
        let output = update(25, &Thresholds::default());
        assert_eq!(output.gate_angle_deg, 0);
        assert_eq!(output.tier, Tier::Safe);

        let output = update(999, &Thresholds::default());
        assert_eq!(output.gate_angle_deg, 0);
    }

    #[test]
    fn test_zero_distance_closes_gate() {
        let output = update(0, &Thresholds::default());
        assert_eq!(output.gate_angle_deg, 90);
        assert!(output.alarm_on);
    }

    #[test]
    fn test_equal_thresholds_step() {
        // alert 17 -> caution (17 + 17) / 2 = 17
        let thresholds = Thresholds::from_alert(17);
        assert_eq!(thresholds.alert(), thresholds.caution());

        assert_eq!(gate_angle(17, &thresholds), 90);
        assert_eq!(gate_angle(16, &thresholds), 90);
        assert_eq!(gate_angle(18, &thresholds), 0);
        assert_eq!(update(17, &thresholds).tier, Tier::Danger);
        assert_eq!(update(18, &thresholds).tier, Tier::Safe);
    }

    #[test]
    fn test_inverted_thresholds_stay_in_range() {
        // alert 30 -> caution 23, caution below alert
        let thresholds = Thresholds::from_alert(30);
        for distance in -5..40 {
            let angle = gate_angle(distance, &thresholds);
            assert!((0..=90).contains(&angle), "angle {} at {}", angle, distance);
        }
        assert!(update(29, &thresholds).alarm_on);
        assert_eq!(update(29, &thresholds).tier, Tier::Danger);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Safe < Tier::Caution);
        assert!(Tier::Caution < Tier::Danger);
    }

    #[test]
    fn test_gate_servo_pulse() {
        let servo = ServoCalibration::GATE;
        assert_eq!(servo.pulse_us(GATE_OPEN_DEG), 500);
        // 500 + 90 * 1900 / 180
        assert_eq!(servo.pulse_us(GATE_CLOSED_DEG), 1450);
        assert_eq!(servo.pulse_us(45), 975);
        assert_eq!(servo.pulse_us(180), 2400);
    }

    #[test]
    fn test_servo_pulse_clamps_to_travel() {
        let servo = ServoCalibration::GATE;
        assert_eq!(servo.pulse_us(-20), 500);
        assert_eq!(servo.pulse_us(400), 2400);

        let stuck = ServoCalibration {
            travel_deg: 0,
            ..servo
        };
        assert_eq!(stuck.pulse_us(90), 500);
    }
}
