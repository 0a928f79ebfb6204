//! Property tests for the filter, the actuation map and the keypad state machine

use flood_gate_core::config::{MAX_HEIGHT_CM, SAMPLES_PER_READING};
use flood_gate_core::engine::{self, Tier};
use flood_gate_core::keypad::Key;
use flood_gate_core::sampler::{trimmed_mean, FilteredDistance};
use flood_gate_core::state::{Confirmation, Reaction, SystemState};
use flood_gate_core::thresholds::Thresholds;
use proptest::prelude::*;

fn readings() -> impl Strategy<Value = [i32; SAMPLES_PER_READING]> {
    prop::array::uniform7(0i32..500)
}

fn key() -> impl Strategy<Value = Key> {
    prop::sample::select(vec![
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', '*', '#',
    ])
    .prop_map(|symbol| Key::from_symbol(symbol).unwrap())
}

proptest! {
    #[test]
    fn trimmed_mean_ignores_extremes(mut values in readings(), low in -1000i32..0, high in 500i32..5000) {
        values.sort_unstable();
        let baseline = trimmed_mean(&values);

        // push the extremes further out; the inner five stay the same
        values[0] = low;
        values[SAMPLES_PER_READING - 1] = high;
        prop_assert_eq!(trimmed_mean(&values), baseline);
    }

    #[test]
    fn trimmed_mean_is_order_independent(values in readings(), rotation in 0usize..SAMPLES_PER_READING) {
        let mut rotated = values;
        rotated.rotate_left(rotation);
        prop_assert_eq!(trimmed_mean(&rotated), trimmed_mean(&values));
    }

    #[test]
    fn filtered_distance_stays_in_model(cm in any::<i32>()) {
        let filtered = FilteredDistance::saturating(cm).cm();
        prop_assert!((1..=MAX_HEIGHT_CM).contains(&filtered));
        if cm <= 0 || cm > MAX_HEIGHT_CM {
            prop_assert_eq!(filtered, MAX_HEIGHT_CM);
        } else {
            prop_assert_eq!(filtered, cm);
        }
    }

    #[test]
    fn angle_is_monotonic_and_clamped(alert in 0i32..MAX_HEIGHT_CM, distance in -50i32..1000) {
        let thresholds = Thresholds::from_alert(alert);
        let angle = engine::gate_angle(distance, &thresholds);
        let next = engine::gate_angle(distance + 1, &thresholds);

        prop_assert!((0..=90).contains(&angle));
        prop_assert!(next <= angle);
        if distance <= alert {
            prop_assert_eq!(angle, 90);
        }
        if distance >= thresholds.caution() && thresholds.caution() > alert {
            prop_assert_eq!(angle, 0);
        }
    }

    #[test]
    fn angle_is_clamped_for_any_thresholds(alert in -100i32..1000, distance in -1000i32..1000) {
        let angle = engine::gate_angle(distance, &Thresholds::from_alert(alert));
        prop_assert!((0..=90).contains(&angle));
    }

    #[test]
    fn alarm_matches_alert_level(alert in -100i32..1000, distance in -1000i32..1000) {
        let thresholds = Thresholds::from_alert(alert);
        let output = engine::update(distance, &thresholds);

        prop_assert_eq!(output.alarm_on, distance <= alert);
        prop_assert_eq!(output.tier == Tier::Danger, distance <= alert);
    }

    #[test]
    fn confirmed_alert_keeps_caution_midpoint(digits in "[0-9]{1,3}") {
        let mut state = SystemState::new();
        state.handle_key(Key::Configure);
        for symbol in digits.chars() {
            state.handle_key(Key::from_symbol(symbol).unwrap());
        }
        let reaction = state.handle_key(Key::Confirm);

        let alert = state.thresholds().alert();
        prop_assert_eq!(state.thresholds().caution(), (MAX_HEIGHT_CM + alert) / 2);

        let typed: i32 = digits.parse().unwrap();
        if typed < MAX_HEIGHT_CM {
            prop_assert_eq!(alert, typed);
            prop_assert!(matches!(reaction, Reaction::Confirmed(Confirmation::AlertSaved(_))));
        } else {
            prop_assert_eq!(*state.thresholds(), Thresholds::default());
            prop_assert!(matches!(reaction, Reaction::Confirmed(Confirmation::AlertRejected(_))));
        }
    }

    #[test]
    fn invariants_hold_for_any_key_sequence(keys in prop::collection::vec(key(), 0..64)) {
        let mut state = SystemState::new();
        for key in keys {
            state.handle_key(key);

            prop_assert!(state.pending().len() <= 3);
            prop_assert!(state.pending().chars().all(|c| c.is_ascii_digit()));
            let thresholds = state.thresholds();
            prop_assert_eq!(thresholds.caution(), (MAX_HEIGHT_CM + thresholds.alert()) / 2);
            prop_assert!(thresholds.alert() < MAX_HEIGHT_CM);

            let output = state.outputs();
            prop_assert!((0..=90).contains(&output.gate_angle_deg));
        }
    }

    #[test]
    fn real_key_is_idempotent(keys in prop::collection::vec(key(), 0..32)) {
        let mut once = SystemState::new();
        for key in keys {
            once.handle_key(key);
        }
        let mut twice = once.clone();

        once.handle_key(Key::Real);
        twice.handle_key(Key::Real);
        twice.handle_key(Key::Real);
        prop_assert_eq!(once, twice);
    }
}
