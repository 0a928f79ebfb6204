//! HC-SR04 ultrasonic ranging
//!
//! GPIO side of the echo protocol in `flood_gate_core::ranging`: a 10us
//! trigger pulse, and edge waits on the echo pin bounded by `with_timeout`.

use embassy_rp::gpio::{Input, Output};
use embassy_time::{with_timeout, Duration, Instant, Timer};
use flood_gate_core::ranging::{self, EchoLine};
use flood_gate_core::sampler::{Measurement, RangingInput};

/// Trigger pulse width required by the sensor
const TRIGGER_PULSE: Duration = Duration::from_micros(10);

/// Low time before the trigger pulse, so the rising edge is clean
const TRIGGER_SETTLE: Duration = Duration::from_micros(2);

/// Water level sensor on a trigger/echo pin pair
pub struct Hcsr04<'d> {
    trigger: Output<'d>,
    echo: Input<'d>,
}

impl<'d> Hcsr04<'d> {
    /// Takes the trigger pin (driven low) and the echo pin
    pub fn new(trigger: Output<'d>, echo: Input<'d>) -> Self {
        Self { trigger, echo }
    }
}

impl EchoLine for Hcsr04<'_> {
    async fn trigger(&mut self) {
        self.trigger.set_low();
        Timer::after(TRIGGER_SETTLE).await;
        self.trigger.set_high();
        Timer::after(TRIGGER_PULSE).await;
        self.trigger.set_low();
    }

    async fn wait_for_level(&mut self, high: bool, budget_us: u64) -> Option<u64> {
        let budget = Duration::from_micros(budget_us);
        let started = Instant::now();
        let reached = if high {
            with_timeout(budget, self.echo.wait_for_high()).await
        } else {
            with_timeout(budget, self.echo.wait_for_low()).await
        };
        reached.ok().map(|()| started.elapsed().as_micros())
    }
}

impl RangingInput for Hcsr04<'_> {
    async fn measure(&mut self) -> Measurement {
        ranging::ping(self).await
    }
}
