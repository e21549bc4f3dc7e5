//! Bluetooth bridge connection state
//!
//! The bridge drives its STATE pin high while a phone is connected.

use defmt::*;
use embassy_rp::gpio::Input;
use portable_atomic::Ordering;

use crate::channels::CONNECTED;

#[embassy_executor::task]
pub async fn link_state_task(mut state: Input<'static>) {
    info!("Link state task started");

    loop {
        let connected = state.is_high();
        if CONNECTED.swap(connected, Ordering::Relaxed) != connected {
            if connected {
                info!("Phone connected");
            } else {
                info!("Phone disconnected");
            }
        }

        state.wait_for_any_edge().await;
    }
}
