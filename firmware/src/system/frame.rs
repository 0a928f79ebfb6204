//! Display Frame Signal
//!
//! Hands the latest frame from the gate control task to the display task.
//! A newer frame replaces one that has not been drawn yet, so the control
//! loop never waits on the (slow) I2C display.
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use flood_gate_core::screen::Screen;

/// Latest frame to draw
static FRAME_CHANGED: Signal<CriticalSectionRawMutex, Screen> = Signal::new();

/// Queues a frame for display
pub fn show(screen: Screen) {
    FRAME_CHANGED.signal(screen);
}

/// Waits for the next frame to draw
pub async fn wait() -> Screen {
    FRAME_CHANGED.wait().await
}
