//! Keypad scanning
//!
//! Scans the 4x4 matrix and turns key presses into events.
//!
//! # Scanning
//! - Rows are outputs, idle high; columns are inputs with pull-ups
//! - Each row is pulled low in turn; a low column means that key is held
//! - Only the first held key is reported (no chords)
//! - Two matching scans (10ms apart) debounce a press

use defmt::debug;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{block_for, Duration, Timer};
use flood_gate_core::keypad::{Key, KeyScanner, COLS, ROWS};

use crate::system::event::{send_event, Events};
use crate::system::resources::KeypadResources;

/// Time between matrix scans
const SCAN_INTERVAL: Duration = Duration::from_millis(10);

/// Settle time after driving a row low, before the columns are read
const ROW_SETTLE: Duration = Duration::from_micros(5);

/// Keypad scanning task
#[embassy_executor::task]
pub async fn keypad_scan(r: KeypadResources) {
    let mut rows: [Output<'static>; ROWS] = [
        Output::new(r.row_0, Level::High),
        Output::new(r.row_1, Level::High),
        Output::new(r.row_2, Level::High),
        Output::new(r.row_3, Level::High),
    ];
    let cols: [Input<'static>; COLS] = [
        Input::new(r.col_0, Pull::Up),
        Input::new(r.col_1, Pull::Up),
        Input::new(r.col_2, Pull::Up),
        Input::new(r.col_3, Pull::Up),
    ];

    let mut scanner = KeyScanner::new();

    loop {
        if let Some(key) = scanner.feed(scan(&mut rows, &cols)) {
            debug!("Key pressed: {}", key.symbol());
            send_event(Events::KeyPressed(key)).await;
        }

        Timer::after(SCAN_INTERVAL).await;
    }
}

/// Returns the first held key, walking rows top to bottom
fn scan(rows: &mut [Output<'static>; ROWS], cols: &[Input<'static>; COLS]) -> Option<Key> {
    for (row, line) in rows.iter_mut().enumerate() {
        line.set_low();
        block_for(ROW_SETTLE);
        let col = cols.iter().position(|input| input.is_low());
        line.set_high();

        if let Some(col) = col {
            return Key::at(row, col);
        }
    }
    None
}
