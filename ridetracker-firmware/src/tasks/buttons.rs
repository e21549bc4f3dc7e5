//! Button tasks
//!
//! One task per button. Buttons are active low with pull-ups; a click is
//! reported once the level is still low after the debounce time.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use ridetracker_core::input::Button;
use ridetracker_core::HostEvent;

use crate::channels::HOST_EVENTS;

#[embassy_executor::task(pool_size = 4)]
pub async fn button_task(mut pin: Input<'static>, button: Button, debounce_ms: u16) {
    info!("Button task started: {:?}", button);

    let debounce = Duration::from_millis(debounce_ms as u64);

    loop {
        pin.wait_for_falling_edge().await;
        Timer::after(debounce).await;

        if pin.is_high() {
            // Bounce
            continue;
        }

        debug!("Click: {:?}", button);
        if HOST_EVENTS.try_send(HostEvent::Click(button)).is_err() {
            warn!("Host event channel full, dropping click");
        }

        pin.wait_for_high().await;
        Timer::after(debounce).await;
    }
}
