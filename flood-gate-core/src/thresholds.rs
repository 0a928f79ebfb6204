//! Alert and caution levels
//!
//! Both levels are distances from the sensor to the water surface, so a
//! *smaller* distance means *higher* water. The caution level is never set
//! directly: it is always the midpoint between the model height and the
//! alert level.

use core::fmt;

use crate::config::{DEFAULT_ALERT_LEVEL_CM, MAX_HEIGHT_CM};

/// Errors rejecting a new alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThresholdError {
    /// Alert level at or above the model height would leave no caution band
    AboveMaxHeight {
        /// Rejected level (cm)
        requested: i32,
    },
    /// Alert level below zero
    Negative {
        /// Rejected level (cm)
        requested: i32,
    },
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdError::AboveMaxHeight { requested } => write!(
                f,
                "Alert level {}cm must be below the model height ({}cm)",
                requested, MAX_HEIGHT_CM
            ),
            ThresholdError::Negative { requested } => {
                write!(f, "Alert level {}cm must not be negative", requested)
            }
        }
    }
}

/// Alert/caution pair with `caution == (MAX_HEIGHT_CM + alert) / 2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    alert: i32,
    caution: i32,
}

impl Thresholds {
    /// Builds the pair from an alert level without validating it
    ///
    /// The actuation engine copes with any pair, including equal or inverted
    /// levels; keypad entry goes through [`Thresholds::try_with_alert`].
    pub const fn from_alert(alert: i32) -> Self {
        Self {
            alert,
            caution: caution_for(alert),
        }
    }

    /// Validated replacement of the alert level, recomputing the caution level
    pub fn try_with_alert(&self, alert: i32) -> Result<Self, ThresholdError> {
        if alert < 0 {
            return Err(ThresholdError::Negative { requested: alert });
        }
        if alert >= MAX_HEIGHT_CM {
            return Err(ThresholdError::AboveMaxHeight { requested: alert });
        }
        Ok(Self::from_alert(alert))
    }

    /// Alarm and full gate closure at or below this distance
    pub fn alert(&self) -> i32 {
        self.alert
    }

    /// Gate starts closing at or below this distance
    pub fn caution(&self) -> i32 {
        self.caution
    }
}

impl Default for Thresholds {
    /// alert = 8cm, caution = 12cm
    fn default() -> Self {
        Self::from_alert(DEFAULT_ALERT_LEVEL_CM)
    }
}

/// Midpoint between the model height and the alert level
pub const fn caution_for(alert: i32) -> i32 {
    (MAX_HEIGHT_CM + alert) / 2
}
