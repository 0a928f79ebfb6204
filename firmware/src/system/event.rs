//! System Events
//!
//! Defines events and the channel carrying them to the gate control task.

use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use flood_gate_core::keypad::Key;

/// Multi-producer, single-consumer event channel with capacity of 8
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Events, 8> = Channel::new();

/// Sends an event to the system channel
pub async fn send_event(event: Events) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Waits for the next event
pub async fn wait() -> Events {
    EVENT_CHANNEL.receiver().receive().await
}

/// Takes the next event if one is queued, without waiting
pub fn try_next() -> Option<Events> {
    EVENT_CHANNEL.receiver().try_receive().ok()
}

/// System-wide events
#[derive(Debug, Clone, Copy, Format)]
pub enum Events {
    /// A key was pressed on the keypad
    KeyPressed(Key),
}
