//! Ultrasonic echo timing
//!
//! The HC-SR04 answers a trigger pulse by holding its echo line high for the
//! round-trip time. Without an echo it still raises the line, for roughly
//! 38ms, which outlasts the 25ms budget. So a ping first waits for any
//! previous pulse to end. Otherwise the tail of a timed-out pulse would be
//! measured as a short, valid echo.
//!
//! # Ping sequence
//! 1. Echo line low (previous pulse over), within the budget
//! 2. Trigger pulse
//! 3. Rising edge, then falling edge, sharing one budget
//!
//! Any timeout yields [`Measurement::no_echo`].

use crate::config::ECHO_TIMEOUT_US;
use crate::sampler::Measurement;

/// Trigger output and echo input of an ultrasonic ranging sensor
#[allow(async_fn_in_trait)]
pub trait EchoLine {
    /// Sends one trigger pulse
    async fn trigger(&mut self);

    /// Waits until the echo line reads `high`, for at most `budget_us`
    ///
    /// Returns the microseconds waited, `None` on timeout. Returns `Some(0)`
    /// if the line already has that level.
    async fn wait_for_level(&mut self, high: bool, budget_us: u64) -> Option<u64>;
}

/// Runs one trigger/echo cycle
pub async fn ping<L: EchoLine>(line: &mut L) -> Measurement {
    if line.wait_for_level(false, ECHO_TIMEOUT_US).await.is_none() {
        return Measurement::no_echo();
    }

    line.trigger().await;

    let Some(rise_us) = line.wait_for_level(true, ECHO_TIMEOUT_US).await else {
        return Measurement::no_echo();
    };
    let remaining = ECHO_TIMEOUT_US.saturating_sub(rise_us);
    match line.wait_for_level(false, remaining).await {
        Some(echo_us) => Measurement::from_echo(u32::try_from(echo_us).unwrap_or(u32::MAX)),
        None => Measurement::no_echo(),
    }
}
