//! Display task
//!
//! Renders watch face snapshots to the LCD and keeps VCOM toggling.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use crate::channels::SCREEN_UPDATE;
use crate::display::{Lcd, SharedScreen};

/// VCOM toggle period; the panel needs at least one flip per second
const VCOM_INTERVAL_MS: u64 = 500;

#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, screen: SharedScreen) {
    info!("Display task started");

    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {:?}", e);
    }
    render(&mut lcd, &screen);

    let mut vcom = Ticker::every(Duration::from_millis(VCOM_INTERVAL_MS));

    loop {
        match select(SCREEN_UPDATE.wait(), vcom.next()).await {
            Either::First(()) => render(&mut lcd, &screen),
            Either::Second(()) => {
                if let Err(e) = lcd.toggle_vcom() {
                    warn!("VCOM toggle failed: {:?}", e);
                }
                // Retry a failed render
                if screen.is_dirty() {
                    render(&mut lcd, &screen);
                }
            }
        }
    }
}

fn render(lcd: &mut Lcd, screen: &SharedScreen) {
    let mut frame = screen.snapshot();
    match frame.render(lcd) {
        Ok(true) => trace!("Screen rendered"),
        Ok(false) => {}
        Err(e) => {
            warn!("Screen render failed: {:?}", e);
            screen.invalidate();
        }
    }
}
