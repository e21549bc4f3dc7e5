//! Inbound byte stream decoder

use ridetracker_protocol::packet::CMD_PUSH;
use ridetracker_protocol::{Dictionary, FrameReader, Packet};

use super::MessageError;

/// Something that arrived from the paired device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound {
    /// Dictionary for the app; answer with ACK
    Push {
        transaction_id: u8,
        dictionary: Dictionary,
    },
    /// Reply to our PUSH
    Ack { transaction_id: u8 },
    /// Reply to our PUSH
    Nack { transaction_id: u8 },
    /// Message lost; answer with NACK when the id is known
    Dropped {
        transaction_id: Option<u8>,
        reason: MessageError,
    },
}

/// Turns link bytes into inbound messages
#[derive(Debug, Clone)]
pub struct Inbox {
    reader: FrameReader,
    /// Largest dictionary accepted
    limit: usize,
}

impl Inbox {
    pub const fn new(limit: usize) -> Self {
        Self {
            reader: FrameReader::new(),
            limit,
        }
    }

    /// Feed one byte from the link
    pub fn feed(&mut self, byte: u8) -> Option<Inbound> {
        match self.reader.feed(byte) {
            Ok(None) => None,
            Ok(Some(payload)) => Some(self.decode(&payload)),
            Err(e) => Some(Inbound::Dropped {
                transaction_id: None,
                reason: e.into(),
            }),
        }
    }

    fn decode(&self, payload: &[u8]) -> Inbound {
        match Packet::decode(payload, self.limit) {
            Ok(Packet::Push {
                transaction_id,
                dictionary,
            }) => Inbound::Push {
                transaction_id,
                dictionary,
            },
            Ok(Packet::Ack { transaction_id }) => Inbound::Ack { transaction_id },
            Ok(Packet::Nack { transaction_id }) => Inbound::Nack { transaction_id },
            Err(e) => {
                // Only a PUSH expects a reply
                let transaction_id = match payload {
                    [CMD_PUSH, id, ..] => Some(*id),
                    _ => None,
                };
                Inbound::Dropped {
                    transaction_id,
                    reason: e.into(),
                }
            }
        }
    }
}
