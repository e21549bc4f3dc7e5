//! Link UART transmit task
//!
//! Writes queued frames (our PUSHes, ACK/NACK replies) to the bridge.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::LINK_TX;

#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let frame = LINK_TX.receive().await;
        match tx.write_all(&frame).await {
            Ok(()) => trace!("TX: {} bytes", frame.len()),
            Err(e) => warn!("UART write error: {:?}", e),
        }
    }
}
