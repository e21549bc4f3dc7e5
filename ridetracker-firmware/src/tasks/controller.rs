//! Main controller task
//!
//! Owns the ride app. Receives host events, replies to our PUSHes and ACK
//! timeouts, and logs every dropped or failed message.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::{Instant, Timer};

use ridetracker_core::config::RideConfig;
use ridetracker_core::{HostEvent, RideApp};

use crate::channels::{HOST_EVENTS, LINK_REPLIES};
use crate::display::SharedScreen;
use crate::link::BridgeLink;

type App = RideApp<SharedScreen, BridgeLink>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: RideConfig, screen: SharedScreen) {
    info!("Controller task started");

    let link = BridgeLink::new(&config.link);
    let mut app = RideApp::new(&config, screen, link);
    app.start();

    info!("Ride app started, waiting for events");

    loop {
        let deadline = app.link().deadline();

        match select3(HOST_EVENTS.receive(), LINK_REPLIES.receive(), expiry(deadline)).await {
            Either3::First(event) => {
                handle_event(&mut app, event);
            }
            Either3::Second(reply) => match app.link_mut().complete(reply) {
                Some(done) => handle_event(&mut app, done.into()),
                None => debug!("Stale reply: {:?}", reply),
            },
            Either3::Third(()) => {
                if let Some(done) = app.link_mut().expire() {
                    warn!("No reply to PUSH {}", done.transaction_id());
                    handle_event(&mut app, done.into());
                }
            }
        }
    }
}

fn handle_event(app: &mut App, event: HostEvent) {
    let failures = app.stats().total_failures();

    match app.dispatch(event) {
        Some(event) if event.is_user_event() => info!("User event: {:?}", event),
        Some(event) if event.is_link_event() => debug!("Link event: {:?}", event),
        Some(event) => trace!("Event: {:?}", event),
        None => {}
    }

    let stats = app.stats();
    if stats.total_failures() != failures {
        warn!(
            "Message lost: {:?} ({} failures total)",
            stats.last_error,
            stats.total_failures()
        );
    }
}

/// Resolves when the in-flight message times out; never without one
async fn expiry(deadline: Option<Instant>) {
    match deadline {
        Some(at) => Timer::at(at).await,
        None => core::future::pending().await,
    }
}
