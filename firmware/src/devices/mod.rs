//! Device drivers for the flood gate hardware
pub mod hcsr04;
pub mod lcd;
pub mod servo;
