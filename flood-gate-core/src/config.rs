//! Compile-time configuration
//!
//! The model is a fixed 17cm river bed, so everything here is a constant.
//! Pin assignment is a firmware concern and lives in the firmware resources.

/// Height of the model in centimeters, also the "no water detected" distance
pub const MAX_HEIGHT_CM: i32 = 17;

/// Alert level used at power-up (cm from the sensor to the water surface)
pub const DEFAULT_ALERT_LEVEL_CM: i32 = 8;

/// Valid readings collected per sampling pass
pub const SAMPLES_PER_READING: usize = 7;

/// Upper bound on trigger pulses per sampling pass (5 attempts per reading)
pub const MAX_SAMPLE_ATTEMPTS: usize = SAMPLES_PER_READING * 5;

/// Echo wait budget per trigger pulse, in microseconds
pub const ECHO_TIMEOUT_US: u64 = 25_000;

/// Speed of sound (0.0343 cm/us at roughly 20°C) scaled by 10_000
pub const SPEED_OF_SOUND_CM_PER_US_X10K: u64 = 343;

/// Maximum digits held in the keypad entry buffer
pub const PENDING_INPUT_LEN: usize = 3;

/// Gate fully open
pub const GATE_OPEN_DEG: i32 = 0;

/// Gate fully closed
pub const GATE_CLOSED_DEG: i32 = 90;

/// Gate servo pulse width at 0° (SG90 class servo, measured on the model)
pub const GATE_SERVO_MIN_PULSE_US: u32 = 500;

/// Gate servo pulse width at full travel
pub const GATE_SERVO_MAX_PULSE_US: u32 = 2_400;

/// Gate servo travel in degrees; the gate itself only uses 0-90
pub const GATE_SERVO_TRAVEL_DEG: u32 = 180;

/// Period of the sample/actuate cycle while monitoring
pub const CYCLE_PERIOD_MS: u64 = 300;

/// How long confirmation notices stay on the display before the status returns
pub const NOTICE_HOLD_MS: u64 = 1_500;

/// How long the boot splash is shown before the first status frame
pub const SPLASH_HOLD_MS: u64 = 2_000;
