//! Hardware Resource Management
//!
//! Assigns the Pico 2 pins and peripherals to the tasks that own them.
//! Every resource group is moved into exactly one task, so no peripheral is
//! shared and nothing here needs a mutex.
//!
//! # Resource Groups
//! - Ranging: HC-SR04 trigger and echo pins
//! - Gate: servo signal pin driven by a PIO state machine
//! - Alarm: relay driver line
//! - Keypad: 4x4 matrix rows (outputs) and columns (inputs)
//! - Display: I2C bus to the PCF8574 LCD backpack

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{self, I2C0, PIO0};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;

assign_resources! {
    /// HC-SR04 ultrasonic distance sensor pins
    ranging: RangingResources {
        trigger_pin: PIN_14,
        // 5V echo, level shifted through a resistor divider
        echo_pin: PIN_15,
    },
    /// Gate servo, PWM generated by PIO since it only needs one state machine
    gate: GateResources {
        pin: PIN_16,
        pio: PIO0,
    },
    /// Alarm relay, active high
    alarm: AlarmResources {
        relay_pin: PIN_17,
    },
    /// 4x4 membrane keypad
    keypad: KeypadResources {
        row_0: PIN_6,
        row_1: PIN_7,
        row_2: PIN_8,
        row_3: PIN_9,
        col_0: PIN_10,
        col_1: PIN_11,
        col_2: PIN_12,
        col_3: PIN_13,
    },
    /// 16x2 character LCD behind a PCF8574 I2C backpack
    display: DisplayResources {
        i2c: I2C0,
        sda: PIN_4,
        scl: PIN_5,
    },
}

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
