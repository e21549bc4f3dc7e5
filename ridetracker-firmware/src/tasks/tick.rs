//! Minute tick task
//!
//! Drives the ride timer. Ticks are delivered whether or not a ride is
//! running; the session ignores them while stopped.
//!
//! Ticks count 60 s from boot, not wall-clock minute boundaries; the
//! board has no calendar clock to align to.

use defmt::*;
use embassy_time::{Duration, Ticker};
use ridetracker_core::HostEvent;

use crate::channels::HOST_EVENTS;

/// Tick interval in seconds
pub const TICK_INTERVAL_SECS: u64 = 60;

/// Tick task - sends one `HostEvent::Tick` per minute
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_secs(TICK_INTERVAL_SECS));

    loop {
        ticker.next().await;
        trace!("Minute tick");

        // Never drop a tick; wait for room instead
        HOST_EVENTS.send(HostEvent::Tick).await;
    }
}
