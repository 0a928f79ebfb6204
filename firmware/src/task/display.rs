//! Display task
//!
//! Owns the I2C LCD and draws every frame signalled by the gate control task.
//! The display is a pure sink: a failed write is logged and the frame dropped,
//! and the panel is re-initialized before the next frame.

use defmt::{info, warn};
use embassy_rp::i2c::{self, I2c};

use crate::devices::lcd::{Lcd, PCF8574_ADDR};
use crate::system::frame;
use crate::system::resources::{DisplayResources, Irqs};

/// Standard mode I2C, plenty for 32 characters
const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Display task, owns the LCD and draws every published frame
#[embassy_executor::task]
pub async fn display(r: DisplayResources) {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY_HZ;
    let bus = I2c::new_async(r.i2c, r.scl, r.sda, Irqs, config);
    let mut lcd = Lcd::new(bus, PCF8574_ADDR);

    let mut ready = false;

    loop {
        let screen = frame::wait().await;

        if !ready {
            match lcd.init().await {
                Ok(()) => {
                    info!("LCD initialized");
                    ready = true;
                }
                Err(e) => {
                    warn!("LCD init failed: {}", e);
                    continue;
                }
            }
        }

        if let Err(e) = lcd.show(&screen).await {
            warn!("LCD write failed, dropping frame: {}", e);
            ready = false;
        }
    }
}
