//! Gate servo
//!
//! Hobby servo driven from a PIO state machine running the embassy PWM
//! program, so no PWM slice is spent on a single 50Hz signal.

use core::time::Duration;
use defmt::trace;
use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::pwm::PioPwm;
use flood_gate_core::engine::ServoCalibration;

/// Servo frame period (50Hz)
const FRAME_PERIOD: Duration = Duration::from_millis(20);

/// Servo on a PIO PWM state machine
pub struct Servo<'d, T: Instance, const SM: usize> {
    pwm: PioPwm<'d, T, SM>,
    calibration: ServoCalibration,
}

impl<'d, T: Instance, const SM: usize> Servo<'d, T, SM> {
    /// Starts the 50Hz frame; the servo holds still until the first angle
    pub fn new(mut pwm: PioPwm<'d, T, SM>, calibration: ServoCalibration) -> Self {
        pwm.set_period(FRAME_PERIOD);
        pwm.start();
        Self { pwm, calibration }
    }

    /// Moves to `angle_deg`, clamped to the servo travel
    pub fn set_angle(&mut self, angle_deg: i32) {
        let pulse_us = self.calibration.pulse_us(angle_deg);
        trace!("servo {}deg, pulse {}us", angle_deg, pulse_us);
        self.pwm.write(Duration::from_micros(u64::from(pulse_us)));
    }
}
