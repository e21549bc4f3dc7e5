//! Paired-device link over the Bluetooth bridge
//!
//! Outbound PUSH frames go to the link TX task; replies come back from the
//! link RX task through `LINK_REPLIES` and are matched here against the
//! single in-flight message.

use defmt::*;
use embassy_time::{Duration, Instant};
use portable_atomic::Ordering;

use ridetracker_core::config::LinkConfig;
use ridetracker_core::link::{Completion, MessageError, Outbox};
use ridetracker_core::traits::PairedLink;
use ridetracker_protocol::{Dictionary, Packet};

use crate::channels::{LinkFrame, LinkReply, CONNECTED, LINK_TX};

pub struct BridgeLink {
    outbox: Outbox,
    ack_timeout: Duration,
    /// When the in-flight message times out
    deadline: Option<Instant>,
}

impl BridgeLink {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            outbox: Outbox::new(config.outbox_size as usize),
            ack_timeout: Duration::from_millis(config.ack_timeout_ms as u64),
            deadline: None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Match a reply against the in-flight message
    pub fn complete(&mut self, reply: LinkReply) -> Option<Completion> {
        let packet = match reply {
            LinkReply::Ack(transaction_id) => Packet::Ack { transaction_id },
            LinkReply::Nack(transaction_id) => Packet::Nack { transaction_id },
        };
        let done = self.outbox.complete(&packet);
        if done.is_some() {
            self.deadline = None;
        }
        done
    }

    /// Give up on the in-flight message
    pub fn expire(&mut self) -> Option<Completion> {
        self.deadline = None;
        self.outbox.expire()
    }
}

impl PairedLink for BridgeLink {
    fn is_connected(&self) -> bool {
        CONNECTED.load(Ordering::Relaxed)
    }

    fn send(&mut self, dictionary: &Dictionary) -> Result<u8, MessageError> {
        let transaction_id = self.outbox.begin(dictionary)?;

        let queued = LinkFrame::from_slice(self.outbox.frame())
            .map_err(|_| MessageError::BufferOverflow)
            .and_then(|frame| LINK_TX.try_send(frame).map_err(|_| MessageError::Busy));

        if let Err(e) = queued {
            self.outbox.expire();
            return Err(e);
        }

        self.deadline = Some(Instant::now() + self.ack_timeout);
        trace!("PUSH {} queued", transaction_id);
        Ok(transaction_id)
    }
}
