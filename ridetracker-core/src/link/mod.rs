//! App-message link plumbing
//!
//! Transport-independent pieces of the link to the paired device: the
//! single-slot outbox, the inbound frame decoder, result codes and
//! counters. The firmware moves the bytes; everything that decides
//! something lives here.

pub mod inbox;
pub mod outbox;

pub use inbox::{Inbound, Inbox};
pub use outbox::{Completion, Outbox};

use ridetracker_protocol::{encode_frame, DictError, FrameError, Packet, PacketError, MAX_PACKET_SIZE};

/// Outcome codes for app messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// No connection to the paired device
    NotConnected,
    /// A message is already in flight
    Busy,
    /// Message does not fit the inbox or outbox
    BufferOverflow,
    /// No ACK or NACK before the timeout
    SendTimeout,
    /// Paired device answered with NACK
    SendRejected,
    /// Bytes on the wire could not be decoded
    Malformed,
}

impl From<DictError> for MessageError {
    fn from(e: DictError) -> Self {
        match e {
            DictError::BufferTooSmall | DictError::TooManyTuples | DictError::ValueTooLarge => {
                MessageError::BufferOverflow
            }
            _ => MessageError::Malformed,
        }
    }
}

impl From<PacketError> for MessageError {
    fn from(e: PacketError) -> Self {
        match e {
            PacketError::Oversized { .. } | PacketError::BufferTooSmall => {
                MessageError::BufferOverflow
            }
            PacketError::Dictionary(inner) => inner.into(),
            PacketError::Truncated | PacketError::UnknownCommand(_) => MessageError::Malformed,
        }
    }
}

impl From<FrameError> for MessageError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::BufferTooSmall => MessageError::BufferOverflow,
            FrameError::InvalidLength(_) | FrameError::InvalidChecksum => MessageError::Malformed,
        }
    }
}

/// Encode a packet straight into a link frame
///
/// `limit` caps the dictionary size. Returns the number of bytes written.
pub fn frame_packet(packet: &Packet, limit: usize, buffer: &mut [u8]) -> Result<usize, MessageError> {
    let mut body = [0u8; MAX_PACKET_SIZE];
    let len = packet.encode(&mut body, limit)?;
    Ok(encode_frame(&body[..len], buffer)?)
}

/// Link counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Notifications handed to the link
    pub notifications_queued: u32,
    /// Notifications skipped because no connection was available
    pub notifications_dropped: u32,
    /// Notifications the link refused to queue
    pub notifications_rejected: u32,
    /// Outbound messages acknowledged by the paired device
    pub outbox_sent: u32,
    /// Outbound messages that failed after queueing
    pub outbox_failed: u32,
    /// Inbound dictionaries delivered
    pub inbox_received: u32,
    /// Inbound messages dropped
    pub inbox_dropped: u32,
    /// Most recent failure of any kind
    pub last_error: Option<MessageError>,
}

impl LinkStats {
    pub const fn new() -> Self {
        Self {
            notifications_queued: 0,
            notifications_dropped: 0,
            notifications_rejected: 0,
            outbox_sent: 0,
            outbox_failed: 0,
            inbox_received: 0,
            inbox_dropped: 0,
            last_error: None,
        }
    }

    /// Total messages lost in either direction
    pub fn total_failures(&self) -> u32 {
        self.notifications_dropped
            .saturating_add(self.notifications_rejected)
            .saturating_add(self.outbox_failed)
            .saturating_add(self.inbox_dropped)
    }

    pub(crate) fn record_queued(&mut self) {
        self.notifications_queued = self.notifications_queued.saturating_add(1);
    }

    pub(crate) fn record_not_connected(&mut self) {
        self.notifications_dropped = self.notifications_dropped.saturating_add(1);
        self.last_error = Some(MessageError::NotConnected);
    }

    pub(crate) fn record_rejected(&mut self, reason: MessageError) {
        self.notifications_rejected = self.notifications_rejected.saturating_add(1);
        self.last_error = Some(reason);
    }

    pub(crate) fn record_sent(&mut self) {
        self.outbox_sent = self.outbox_sent.saturating_add(1);
    }

    pub(crate) fn record_outbox_failed(&mut self, reason: MessageError) {
        self.outbox_failed = self.outbox_failed.saturating_add(1);
        self.last_error = Some(reason);
    }

    pub(crate) fn record_received(&mut self) {
        self.inbox_received = self.inbox_received.saturating_add(1);
    }

    pub(crate) fn record_inbox_dropped(&mut self, reason: MessageError) {
        self.inbox_dropped = self.inbox_dropped.saturating_add(1);
        self.last_error = Some(reason);
    }
}
