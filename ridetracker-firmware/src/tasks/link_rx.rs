//! Link UART receive task
//!
//! Receives frames from the Bluetooth bridge, answers inbound PUSHes and
//! dispatches replies to our own PUSHes.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use ridetracker_core::link::{frame_packet, Inbound, Inbox, MessageError};
use ridetracker_core::HostEvent;
use ridetracker_protocol::{Packet, MAX_FRAME_SIZE};

use crate::channels::{LinkFrame, LinkReply, HOST_EVENTS, LINK_REPLIES, LINK_TX};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx, inbox_size: usize) {
    info!("Link RX task started");

    let mut inbox = Inbox::new(inbox_size);
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(inbound) = inbox.feed(byte) {
                        handle_inbound(inbound).await;
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

async fn handle_inbound(inbound: Inbound) {
    match inbound {
        Inbound::Push {
            transaction_id,
            dictionary,
        } => {
            debug!("PUSH {}: {} tuples", transaction_id, dictionary.len());
            if HOST_EVENTS
                .try_send(HostEvent::InboxReceived(dictionary))
                .is_ok()
            {
                reply(Packet::Ack { transaction_id }).await;
            } else {
                warn!("Host event channel full, rejecting PUSH {}", transaction_id);
                reply(Packet::Nack { transaction_id }).await;
                report_drop(MessageError::Busy);
            }
        }
        Inbound::Ack { transaction_id } => {
            trace!("ACK {}", transaction_id);
            LINK_REPLIES.send(LinkReply::Ack(transaction_id)).await;
        }
        Inbound::Nack { transaction_id } => {
            trace!("NACK {}", transaction_id);
            LINK_REPLIES.send(LinkReply::Nack(transaction_id)).await;
        }
        Inbound::Dropped {
            transaction_id,
            reason,
        } => {
            warn!("Inbound message dropped: {:?}", reason);
            if let Some(transaction_id) = transaction_id {
                reply(Packet::Nack { transaction_id }).await;
            }
            report_drop(reason);
        }
    }
}

/// Queue an ACK or NACK
async fn reply(packet: Packet) {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    let frame = frame_packet(&packet, 0, &mut buf)
        .ok()
        .and_then(|len| LinkFrame::from_slice(&buf[..len]).ok());

    match frame {
        Some(frame) => LINK_TX.send(frame).await,
        None => warn!("Failed to encode reply {}", packet.transaction_id()),
    }
}

fn report_drop(reason: MessageError) {
    if HOST_EVENTS
        .try_send(HostEvent::InboxDropped(reason))
        .is_err()
    {
        warn!("Host event channel full, drop not reported");
    }
}
