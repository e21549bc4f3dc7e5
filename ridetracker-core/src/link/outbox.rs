//! Single-slot outbox
//!
//! At most one outbound message is in flight. A PUSH is completed by the
//! ACK or NACK with the same transaction id, or by expiry. There is no
//! retry.

use heapless::Vec;
use ridetracker_protocol::{Dictionary, Packet, MAX_FRAME_SIZE};

use super::{frame_packet, MessageError};

/// Final outcome of an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    Sent { transaction_id: u8 },
    Failed { transaction_id: u8, reason: MessageError },
}

impl Completion {
    pub fn transaction_id(&self) -> u8 {
        match *self {
            Completion::Sent { transaction_id } | Completion::Failed { transaction_id, .. } => {
                transaction_id
            }
        }
    }
}

/// Outbound message slot
#[derive(Debug, Clone)]
pub struct Outbox {
    /// Largest dictionary accepted
    limit: usize,
    next_id: u8,
    in_flight: Option<u8>,
    /// Encoded frame of the in-flight message
    frame: Vec<u8, MAX_FRAME_SIZE>,
}

impl Outbox {
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            next_id: 0,
            in_flight: None,
            frame: Vec::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Encoded link frame for the in-flight message
    ///
    /// Empty when idle.
    pub fn frame(&self) -> &[u8] {
        if self.in_flight.is_some() {
            &self.frame
        } else {
            &[]
        }
    }

    /// Encode a dictionary as the next in-flight message
    ///
    /// Returns the assigned transaction id.
    pub fn begin(&mut self, dictionary: &Dictionary) -> Result<u8, MessageError> {
        if self.is_busy() {
            return Err(MessageError::Busy);
        }

        let transaction_id = self.next_id;
        let packet = Packet::Push {
            transaction_id,
            dictionary: dictionary.clone(),
        };

        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = frame_packet(&packet, self.limit, &mut buf)?;

        self.frame.clear();
        self.frame
            .extend_from_slice(&buf[..len])
            .map_err(|_| MessageError::BufferOverflow)?;

        self.in_flight = Some(transaction_id);
        self.next_id = self.next_id.wrapping_add(1);
        Ok(transaction_id)
    }

    /// Complete from an inbound ACK or NACK
    ///
    /// Returns `None` for PUSH packets and for ids not in flight.
    pub fn complete(&mut self, packet: &Packet) -> Option<Completion> {
        match *packet {
            Packet::Ack { transaction_id } => self.acknowledge(transaction_id),
            Packet::Nack { transaction_id } => self.reject(transaction_id),
            Packet::Push { .. } => None,
        }
    }

    fn acknowledge(&mut self, transaction_id: u8) -> Option<Completion> {
        self.take(transaction_id)?;
        Some(Completion::Sent { transaction_id })
    }

    fn reject(&mut self, transaction_id: u8) -> Option<Completion> {
        self.take(transaction_id)?;
        Some(Completion::Failed {
            transaction_id,
            reason: MessageError::SendRejected,
        })
    }

    /// Give up on the in-flight message
    pub fn expire(&mut self) -> Option<Completion> {
        let transaction_id = self.in_flight.take()?;
        self.frame.clear();
        Some(Completion::Failed {
            transaction_id,
            reason: MessageError::SendTimeout,
        })
    }

    fn take(&mut self, transaction_id: u8) -> Option<()> {
        if self.in_flight != Some(transaction_id) {
            return None;
        }
        self.in_flight = None;
        self.frame.clear();
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridetracker_protocol::packet::CMD_PUSH;
    use ridetracker_protocol::{RunningNotification, LINK_SYNC, OUTBOX_SIZE};

    fn running(value: bool) -> Dictionary {
        RunningNotification::new(value).to_dictionary().unwrap()
    }

    #[test]
    fn test_begin_encodes_push_frame() {
        let mut outbox = Outbox::new(OUTBOX_SIZE);
        assert!(outbox.frame().is_empty());

        let id = outbox.begin(&running(true)).unwrap();
        assert_eq!(id, 0);
        assert!(outbox.is_busy());

        let frame = outbox.frame();
        assert_eq!(frame[0], LINK_SYNC);
        assert_eq!(frame[2], CMD_PUSH);
        assert_eq!(frame[3], id);
    }

    #[test]
    fn test_second_begin_is_busy() {
        let mut outbox = Outbox::new(OUTBOX_SIZE);
        outbox.begin(&running(true)).unwrap();
        assert_eq!(outbox.begin(&running(false)), Err(MessageError::Busy));
    }

    #[test]
    fn test_ack_completes_and_frees_slot() {
        let mut outbox = Outbox::new(OUTBOX_SIZE);
        let id = outbox.begin(&running(true)).unwrap();

        assert_eq!(
            outbox.complete(&Packet::Ack { transaction_id: id }),
            Some(Completion::Sent { transaction_id: id })
        );
        assert!(!outbox.is_busy());

        let next = outbox.begin(&running(false)).unwrap();
        assert_eq!(next, id.wrapping_add(1));
    }

    #[test]
    fn test_nack_fails_with_rejected() {
        let mut outbox = Outbox::new(OUTBOX_SIZE);
        let id = outbox.begin(&running(true)).unwrap();

        let done = outbox.complete(&Packet::Nack { transaction_id: id }).unwrap();
        assert_eq!(
            done,
            Completion::Failed {
                transaction_id: id,
                reason: MessageError::SendRejected
            }
        );
        assert_eq!(done.transaction_id(), id);
    }

    #[test]
    fn test_mismatched_id_ignored() {
        let mut outbox = Outbox::new(OUTBOX_SIZE);
        let id = outbox.begin(&running(true)).unwrap();

        assert_eq!(outbox.acknowledge(id.wrapping_add(7)), None);
        assert!(outbox.is_busy());
        assert_eq!(
            outbox.acknowledge(id),
            Some(Completion::Sent { transaction_id: id })
        );
    }

    #[test]
    fn test_expire() {
        let mut outbox = Outbox::new(OUTBOX_SIZE);
        assert_eq!(outbox.expire(), None);

        let id = outbox.begin(&running(false)).unwrap();
        assert_eq!(
            outbox.expire(),
            Some(Completion::Failed {
                transaction_id: id,
                reason: MessageError::SendTimeout
            })
        );
        assert!(!outbox.is_busy());
        assert!(outbox.frame().is_empty());
    }

    #[test]
    fn test_oversized_dictionary_rejected() {
        let mut outbox = Outbox::new(8);
        assert_eq!(
            outbox.begin(&running(true)),
            Err(MessageError::BufferOverflow)
        );
        assert!(!outbox.is_busy());
    }
}
