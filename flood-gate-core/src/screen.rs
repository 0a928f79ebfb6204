//! Display frames
//!
//! Composes what the 16x2 character LCD shows. Frames hold HD44780 character
//! codes rather than UTF-8, so the firmware can push them to the panel as-is.

use core::fmt::{self, Write};

use heapless::Vec;

use crate::config::MAX_HEIGHT_CM;
use crate::engine::ActuatorOutput;
use crate::state::{Confirmation, ControlMode, DistanceSource, SystemState};
use crate::thresholds::ThresholdError;

/// Characters per LCD line
pub const LCD_COLS: usize = 16;

/// Column of the distance readout on the status frame
const DISTANCE_COL: usize = 7;

/// HD44780 ROM code of the degree sign
const GLYPH_DEGREE: u8 = 0xDF;

/// One LCD line of character codes; text past column 16 is dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line(Vec<u8, LCD_COLS>);

impl Line {
    /// Blank line
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Line from text, cut at the panel width
    pub fn from_text(text: &str) -> Self {
        let mut line = Self::new();
        let _ = line.write_str(text);
        line
    }

    /// Pads with spaces up to `col`
    fn pad_to(&mut self, col: usize) {
        while self.0.len() < col.min(LCD_COLS) {
            let _ = self.0.push(b' ');
        }
    }

    /// Character codes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Write for Line {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(glyph(c)).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Maps a char to the HD44780 (A00 ROM) character set
fn glyph(c: char) -> u8 {
    match c {
        // 0x5C and 0x7E/0x7F are yen and arrows on the A00 ROM
        ' '..='[' | ']'..='}' => c as u8,
        '°' => GLYPH_DEGREE,
        _ => b'?',
    }
}

/// A full two-line frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Screen {
    pub top: Line,
    pub bottom: Line,
}

impl Screen {
    fn text(top: &str, bottom: &str) -> Self {
        Self {
            top: Line::from_text(top),
            bottom: Line::from_text(bottom),
        }
    }

    /// Shown while the hardware settles after power-up
    pub fn splash() -> Self {
        Self::text("Starting...", "Flood gate v1")
    }

    /// Periodic status: source and distance, gate angle and alarm
    pub fn status(state: &SystemState, outputs: &ActuatorOutput) -> Self {
        let mut top = Line::new();
        let _ = top.write_str(match state.mode().source() {
            DistanceSource::Sensor => "REAL",
            DistanceSource::Manual => "SIMUL",
        });
        top.pad_to(DISTANCE_COL);
        let _ = write!(top, "D:{}cm", state.distance());

        let mut bottom = Line::new();
        let _ = write!(
            bottom,
            "Gate:{}° Alm:{}",
            outputs.gate_angle_deg,
            if outputs.alarm_on { "ON" } else { "OFF" }
        );

        Self { top, bottom }
    }

    /// Shown after `A`
    pub fn simulation_prompt() -> Self {
        Self::text("SIMULATION MODE", "Type dist + #")
    }

    /// Shown after `B`
    pub fn real_notice() -> Self {
        Self::text("REAL MODE", "")
    }

    /// Shown when alert editing starts
    pub fn config_prompt() -> Self {
        Self::text("New alert (cm):", "Type value + #")
    }

    /// Prompt of the current mode with the typed digits on the second line
    pub fn entry(state: &SystemState) -> Self {
        let mut screen = match state.mode() {
            ControlMode::ConfiguringAlert(_) => Self::config_prompt(),
            ControlMode::Simulated => Self::simulation_prompt(),
            ControlMode::Real => Self::real_notice(),
        };
        screen.bottom = Line::from_text(state.pending());
        screen
    }

    /// Notice for a confirmation, `None` when nothing was applied
    pub fn confirmation(confirmation: &Confirmation) -> Option<Self> {
        let mut bottom = Line::new();
        let top = match confirmation {
            Confirmation::AlertSaved(thresholds) => {
                let _ = write!(bottom, "A:{}cm C:{}cm", thresholds.alert(), thresholds.caution());
                "Alert saved!"
            }
            Confirmation::AlertRejected(ThresholdError::AboveMaxHeight { .. }) => {
                let _ = write!(bottom, "Max {}cm", MAX_HEIGHT_CM - 1);
                "Alert rejected"
            }
            Confirmation::AlertRejected(ThresholdError::Negative { .. }) => {
                let _ = bottom.write_str("Min 0cm");
                "Alert rejected"
            }
            Confirmation::DistanceSimulated(cm) => {
                let _ = write!(bottom, "D:{}cm", cm);
                "Distance set!"
            }
            Confirmation::Discarded => return None,
        };

        Some(Self {
            top: Line::from_text(top),
            bottom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::Key;
    use crate::thresholds::Thresholds;

    fn press(state: &mut SystemState, keys: &str) {
        for symbol in keys.chars() {
            state.handle_key(Key::from_symbol(symbol).unwrap());
        }
    }

    #[test]
    fn test_status_layout() {
        let mut state = SystemState::new();
        state.apply_reading(crate::sampler::FilteredDistance::saturating(10));
        let screen = Screen::status(&state, &state.outputs());

        assert_eq!(screen.top.as_bytes(), b"REAL   D:10cm");
        assert_eq!(screen.bottom.as_bytes(), b"Gate:45\xDF Alm:OFF");
    }

    #[test]
    fn test_status_simulated_alarm() {
        let mut state = SystemState::new();
        press(&mut state, "A3#");
        let screen = Screen::status(&state, &state.outputs());

        assert_eq!(screen.top.as_bytes(), b"SIMUL  D:3cm");
        assert_eq!(screen.bottom.as_bytes(), b"Gate:90\xDF Alm:ON");
    }

    #[test]
    fn test_line_truncates_at_sixteen() {
        let line = Line::from_text("0123456789abcdefXYZ");
        assert_eq!(line.as_bytes(), b"0123456789abcdef");
    }

    #[test]
    fn test_unmapped_chars() {
        let line = Line::from_text("a~b\\é");
        assert_eq!(line.as_bytes(), b"a?b??");
    }

    #[test]
    fn test_entry_echo() {
        let mut state = SystemState::new();
        press(&mut state, "*12");
        let screen = Screen::entry(&state);
        assert_eq!(screen.top.as_bytes(), b"New alert (cm):");
        assert_eq!(screen.bottom.as_bytes(), b"12");

        press(&mut state, "A04");
        let screen = Screen::entry(&state);
        assert_eq!(screen.top.as_bytes(), b"SIMULATION MODE");
        assert_eq!(screen.bottom.as_bytes(), b"04");
    }

    #[test]
    fn test_confirmation_notices() {
        let saved = Screen::confirmation(&Confirmation::AlertSaved(Thresholds::from_alert(6))).unwrap();
        assert_eq!(saved.top.as_bytes(), b"Alert saved!");
        assert_eq!(saved.bottom.as_bytes(), b"A:6cm C:11cm");

        let rejected = Screen::confirmation(&Confirmation::AlertRejected(
            ThresholdError::AboveMaxHeight { requested: 40 },
        ))
        .unwrap();
        assert_eq!(rejected.top.as_bytes(), b"Alert rejected");
        assert_eq!(rejected.bottom.as_bytes(), b"Max 16cm");

        let simulated = Screen::confirmation(&Confirmation::DistanceSimulated(25)).unwrap();
        assert_eq!(simulated.top.as_bytes(), b"Distance set!");
        assert_eq!(simulated.bottom.as_bytes(), b"D:25cm");

        assert_eq!(Screen::confirmation(&Confirmation::Discarded), None);
    }
}
