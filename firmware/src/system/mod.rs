//! Core system components for the flood gate controller
pub mod event;
pub mod frame;
pub mod resources;
