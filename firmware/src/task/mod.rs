pub mod display;
pub mod gate_control;
pub mod keypad_scan;
