//! Water level sampling
//!
//! Turns raw ultrasonic echo durations into one stable distance reading.
//!
//! # Filter
//! - Collects [`SAMPLES_PER_READING`] valid echoes per pass
//! - Sorts them, drops the lowest and the highest
//! - Averages the remaining readings (integer division)
//!
//! # Fallback
//! A result that is zero, negative or beyond the model height saturates to
//! [`MAX_HEIGHT_CM`], which the rest of the system reads as "no water".
//! A pass that cannot collect enough valid echoes within
//! [`MAX_SAMPLE_ATTEMPTS`] trigger pulses saturates the same way.

use crate::config::{MAX_HEIGHT_CM, MAX_SAMPLE_ATTEMPTS, SAMPLES_PER_READING, SPEED_OF_SOUND_CM_PER_US_X10K};

/// One trigger/echo cycle of the ranging sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Echo high time in microseconds, `None` if the echo never came back
    echo_us: Option<u32>,
}

impl Measurement {
    /// Measurement from an echo pulse width
    pub const fn from_echo(echo_us: u32) -> Self {
        Self { echo_us: Some(echo_us) }
    }

    /// No echo within the timeout window
    pub const fn no_echo() -> Self {
        Self { echo_us: None }
    }

    /// A measurement only counts when the echo pulse had a nonzero width
    pub fn is_valid(&self) -> bool {
        matches!(self.echo_us, Some(us) if us > 0)
    }

    /// Distance in centimeters, `None` for invalid measurements
    pub fn distance_cm(&self) -> Option<i32> {
        if self.is_valid() {
            self.echo_us.map(echo_to_cm)
        } else {
            None
        }
    }
}

/// Converts a round-trip echo time to a one-way distance, truncated to whole cm
pub fn echo_to_cm(echo_us: u32) -> i32 {
    let cm = u64::from(echo_us) * SPEED_OF_SOUND_CM_PER_US_X10K / (10_000 * 2);
    i32::try_from(cm).unwrap_or(i32::MAX)
}

/// Mean of the readings with the single lowest and highest value removed
pub fn trimmed_mean(readings: &[i32; SAMPLES_PER_READING]) -> i32 {
    let mut sorted = *readings;
    sorted.sort_unstable();

    let inner = &sorted[1..SAMPLES_PER_READING - 1];
    let total: i64 = inner.iter().map(|&cm| i64::from(cm)).sum();
    (total / inner.len() as i64) as i32
}

/// Filtered water distance in centimeters, always within `1..=MAX_HEIGHT_CM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilteredDistance(i32);

impl FilteredDistance {
    /// "Nothing detected": the sensor sees the bottom of the model
    pub const CLEAR: Self = Self(MAX_HEIGHT_CM);

    /// Wraps a raw distance, saturating anything outside the model to [`Self::CLEAR`]
    pub fn saturating(cm: i32) -> Self {
        if cm <= 0 || cm > MAX_HEIGHT_CM {
            Self::CLEAR
        } else {
            Self(cm)
        }
    }

    /// Trimmed mean of a full pass, saturated
    pub fn from_readings(readings: &[i32; SAMPLES_PER_READING]) -> Self {
        Self::saturating(trimmed_mean(readings))
    }

    /// Distance in centimeters
    pub fn cm(self) -> i32 {
        self.0
    }
}

/// Source of raw range measurements (an HC-SR04 on the firmware side)
#[allow(async_fn_in_trait)]
pub trait RangingInput {
    /// Fire one trigger pulse and time the echo, bounded by the echo timeout
    async fn measure(&mut self) -> Measurement;
}

/// Bookkeeping of the most recent sampling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassStats {
    /// Valid readings collected
    pub valid: usize,
    /// Trigger pulses fired
    pub attempts: usize,
}

impl PassStats {
    /// Whether the pass collected a full set of readings
    pub fn is_complete(&self) -> bool {
        self.valid == SAMPLES_PER_READING
    }
}

/// Trimmed-mean distance sampler over a ranging input
pub struct DistanceSampler<R> {
    input: R,
    last_pass: PassStats,
}

impl<R: RangingInput> DistanceSampler<R> {
    /// Sampler over `input`, no pass run yet
    pub fn new(input: R) -> Self {
        Self {
            input,
            last_pass: PassStats::default(),
        }
    }

    /// Runs one sampling pass and returns the filtered distance
    ///
    /// Invalid echoes are retried, not counted. If the attempt bound runs out
    /// first, the pass returns [`FilteredDistance::CLEAR`]; [`Self::last_pass`]
    /// tells the two cases apart.
    pub async fn sample(&mut self) -> FilteredDistance {
        let mut readings = [0i32; SAMPLES_PER_READING];
        let mut stats = PassStats::default();

        while stats.valid < SAMPLES_PER_READING && stats.attempts < MAX_SAMPLE_ATTEMPTS {
            stats.attempts += 1;
            if let Some(cm) = self.input.measure().await.distance_cm() {
                readings[stats.valid] = cm;
                stats.valid += 1;
            }
        }

        self.last_pass = stats;

        if stats.is_complete() {
            FilteredDistance::from_readings(&readings)
        } else {
            FilteredDistance::CLEAR
        }
    }

    /// Statistics of the most recent [`Self::sample`] call
    pub fn last_pass(&self) -> PassStats {
        self.last_pass
    }
}
