//! Flood gate firmware entry point
//!
//! Initializes the RP2350 and spawns the control, keypad and display tasks.

#![no_std]
#![no_main]

use crate::task::{display::display, gate_control::gate_control, keypad_scan::keypad_scan};
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{
    AlarmResources, AssignedResources, DisplayResources, GateResources, KeypadResources,
    RangingResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Device drivers
mod devices;
/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups, one owner task each.
    let r = split_resources!(p);

    info!("Flood gate controller starting");

    // Display first so the boot splash has a consumer
    spawner.spawn(display(r.display)).unwrap();
    spawner.spawn(keypad_scan(r.keypad)).unwrap();
    spawner.spawn(gate_control(r.ranging, r.gate, r.alarm)).unwrap();
}
