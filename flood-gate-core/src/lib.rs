//! flood_gate_core - Pure no_std control logic for the flood gate model
//!
//! Everything here is platform-agnostic and testable on the host. The
//! firmware crate owns the pins and peripherals and feeds this crate with
//! echo durations and key presses.
//!
//! # Modules
//!
//! - [`config`]: Compile-time constants (model height, timing, defaults)
//! - [`ranging`]: Echo timing protocol of the ultrasonic sensor
//! - [`sampler`]: Trimmed-mean filter over ultrasonic echo measurements
//! - [`thresholds`]: Alert and caution levels and their invariant
//! - [`engine`]: Distance to gate angle, alarm and risk tier
//! - [`state`]: Control mode state machine and the system state
//! - [`keypad`]: Key symbols, matrix layout and press edge detection
//! - [`screen`]: Composition of the 16x2 display frames

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod engine;
pub mod keypad;
pub mod ranging;
pub mod sampler;
pub mod screen;
pub mod state;
pub mod thresholds;
