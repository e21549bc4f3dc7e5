//! Paired-device messaging trait

use ridetracker_protocol::Dictionary;

use crate::link::MessageError;

/// Outbound side of the link to the paired device
pub trait PairedLink {
    /// Whether a connection to the paired device is currently available
    fn is_connected(&self) -> bool;

    /// Queue a dictionary for delivery
    ///
    /// Returns the transaction id; the final outcome arrives later as an
    /// outbox-sent or outbox-failed event carrying the same id.
    fn send(&mut self, dictionary: &Dictionary) -> Result<u8, MessageError>;
}
