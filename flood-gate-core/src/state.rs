//! Control state machine
//!
//! Holds the whole runtime state of the controller: where the distance comes
//! from, whether the operator is editing the alert level, the digits typed so
//! far and the active thresholds. It is owned by the control loop and only
//! changes through [`SystemState::handle_key`] and
//! [`SystemState::apply_reading`].
//!
//! # Transitions
//!
//! | Key | Effect |
//! |-----|--------|
//! | `A` | simulated source, leave configuration, clear digits |
//! | `B` | sensor source, leave configuration, refresh now |
//! | `*` | toggle alert configuration, clear digits |
//! | `#` | apply the digits (alert level or simulated distance), leave configuration |
//! | `0`-`9` | append a digit, up to three |

use heapless::String;

use crate::config::{MAX_HEIGHT_CM, PENDING_INPUT_LEN};
use crate::engine::{self, ActuatorOutput};
use crate::keypad::Key;
use crate::sampler::FilteredDistance;
use crate::thresholds::{ThresholdError, Thresholds};

/// Where the current distance comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceSource {
    /// Ultrasonic sensor, sampled every cycle
    Sensor,
    /// Typed on the keypad
    Manual,
}

/// Combined input and configuration mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    /// Monitoring the sensor
    Real,
    /// Monitoring a typed distance
    Simulated,
    /// Editing the alert level; the control cycle is paused. Remembers the
    /// source to return to.
    ConfiguringAlert(DistanceSource),
}

impl ControlMode {
    fn monitoring(source: DistanceSource) -> Self {
        match source {
            DistanceSource::Sensor => ControlMode::Real,
            DistanceSource::Manual => ControlMode::Simulated,
        }
    }

    /// Where the distance comes from, also while configuring
    pub fn source(self) -> DistanceSource {
        match self {
            ControlMode::Real => DistanceSource::Sensor,
            ControlMode::Simulated => DistanceSource::Manual,
            ControlMode::ConfiguringAlert(source) => source,
        }
    }

    /// Whether the alert level is being edited
    pub fn is_configuring(self) -> bool {
        matches!(self, ControlMode::ConfiguringAlert(_))
    }

    /// Same source, configuration left
    fn normal(self) -> Self {
        Self::monitoring(self.source())
    }
}

/// Outcome of a `#` press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Confirmation {
    /// New alert level accepted
    AlertSaved(Thresholds),
    /// Alert level refused; thresholds unchanged
    AlertRejected(ThresholdError),
    /// Simulated distance replaced (cm)
    DistanceSimulated(i32),
    /// Nothing to apply (no digits, or digits typed while monitoring the sensor)
    Discarded,
}

/// What the control loop should present after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reaction {
    /// Nothing changed
    Ignored,
    /// Digit appended; show the entry buffer
    Echo,
    /// Switched to simulated input; show the entry prompt
    SimulationPrompt,
    /// Switched to the sensor; show a notice, then refresh
    RealMode,
    /// Entered alert configuration; show the entry prompt
    ConfigPrompt,
    /// Left alert configuration without confirming; refresh now
    Refresh,
    /// `#` handled; show the notice (if any), then refresh
    Confirmed(Confirmation),
}

/// Runtime state of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemState {
    /// Current distance (cm), sampled or typed. Typed values are not clamped.
    distance: i32,
    mode: ControlMode,
    thresholds: Thresholds,
    /// Digits typed since the last mode change or confirmation
    pending: String<PENDING_INPUT_LEN>,
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemState {
    /// Power-up state: sensor input, default thresholds, nothing detected yet
    pub fn new() -> Self {
        Self {
            distance: MAX_HEIGHT_CM,
            mode: ControlMode::Real,
            thresholds: Thresholds::default(),
            pending: String::new(),
        }
    }

    /// Current distance in centimeters
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Current mode
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Active alert and caution levels
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Digits typed so far
    pub fn pending(&self) -> &str {
        self.pending.as_str()
    }

    /// Whether the periodic sample/actuate cycle should run
    pub fn cycle_due(&self) -> bool {
        !self.mode.is_configuring()
    }

    /// Whether the distance should come from the sensor this cycle
    pub fn wants_sensor(&self) -> bool {
        self.mode == ControlMode::Real
    }

    /// Stores a sensor reading; ignored unless monitoring the sensor
    pub fn apply_reading(&mut self, reading: FilteredDistance) {
        if self.wants_sensor() {
            self.distance = reading.cm();
        }
    }

    /// Outputs for the current distance and thresholds
    pub fn outputs(&self) -> ActuatorOutput {
        engine::update(self.distance, &self.thresholds)
    }

    /// Applies one key press
    pub fn handle_key(&mut self, key: Key) -> Reaction {
        match key {
            Key::Simulate => {
                self.mode = ControlMode::Simulated;
                self.pending.clear();
                Reaction::SimulationPrompt
            }
            Key::Real => {
                self.mode = ControlMode::Real;
                Reaction::RealMode
            }
            Key::Configure => {
                self.pending.clear();
                if self.mode.is_configuring() {
                    self.mode = self.mode.normal();
                    Reaction::Refresh
                } else {
                    self.mode = ControlMode::ConfiguringAlert(self.mode.source());
                    Reaction::ConfigPrompt
                }
            }
            Key::Confirm => {
                let confirmation = self.confirm();
                self.pending.clear();
                self.mode = self.mode.normal();
                Reaction::Confirmed(confirmation)
            }
            Key::Digit(digit) => {
                let symbol = Key::Digit(digit).symbol();
                match self.pending.push(symbol) {
                    Ok(()) => Reaction::Echo,
                    Err(()) => Reaction::Ignored,
                }
            }
            Key::C | Key::D => Reaction::Ignored,
        }
    }

    fn confirm(&mut self) -> Confirmation {
        let Some(value) = self.parse_pending() else {
            return Confirmation::Discarded;
        };

        match self.mode {
            ControlMode::ConfiguringAlert(_) => match self.thresholds.try_with_alert(value) {
                Ok(thresholds) => {
                    self.thresholds = thresholds;
                    Confirmation::AlertSaved(thresholds)
                }
                Err(e) => Confirmation::AlertRejected(e),
            },
            ControlMode::Simulated => {
                self.distance = value;
                Confirmation::DistanceSimulated(value)
            }
            ControlMode::Real => Confirmation::Discarded,
        }
    }

    fn parse_pending(&self) -> Option<i32> {
        if self.pending.is_empty() {
            return None;
        }
        self.pending.parse().ok()
    }
}
