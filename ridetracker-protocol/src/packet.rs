//! App-message packets
//!
//! Packet format:
//! - COMMAND (1 byte): PUSH, ACK or NACK
//! - TRANSACTION (1 byte): transaction id chosen by the sender of the PUSH
//! - DICTIONARY (PUSH only): encoded dictionary
//!
//! Every PUSH is answered by an ACK or NACK carrying the same transaction id.

use crate::dict::{DictError, Dictionary};
use crate::messages::MAX_DICT_SIZE;

pub const CMD_PUSH: u8 = 0x01;
pub const CMD_ACK: u8 = 0xFF;
pub const CMD_NACK: u8 = 0x7F;

/// Packet header size (COMMAND + TRANSACTION)
pub const PACKET_HEADER_LEN: usize = 2;

/// Maximum packet size
pub const MAX_PACKET_SIZE: usize = PACKET_HEADER_LEN + MAX_DICT_SIZE;

/// Errors that can occur during packet parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Packet shorter than its header
    Truncated,
    /// Unknown COMMAND byte
    UnknownCommand(u8),
    /// Dictionary larger than the receiving buffer
    Oversized { len: usize, limit: usize },
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Dictionary could not be encoded or decoded
    Dictionary(DictError),
}

impl From<DictError> for PacketError {
    fn from(e: DictError) -> Self {
        PacketError::Dictionary(e)
    }
}

/// A parsed or constructed packet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    /// Deliver a dictionary
    Push {
        transaction_id: u8,
        dictionary: Dictionary,
    },
    /// Dictionary accepted
    Ack { transaction_id: u8 },
    /// Dictionary rejected
    Nack { transaction_id: u8 },
}

impl Packet {
    pub fn transaction_id(&self) -> u8 {
        match *self {
            Packet::Push { transaction_id, .. }
            | Packet::Ack { transaction_id }
            | Packet::Nack { transaction_id } => transaction_id,
        }
    }

    /// Encode this packet into a byte buffer
    ///
    /// `limit` caps the encoded dictionary size (the sender's outbox).
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8], limit: usize) -> Result<usize, PacketError> {
        if buffer.len() < PACKET_HEADER_LEN {
            return Err(PacketError::BufferTooSmall);
        }

        match self {
            Packet::Push {
                transaction_id,
                dictionary,
            } => {
                let len = dictionary.wire_len();
                if len > limit {
                    return Err(PacketError::Oversized { len, limit });
                }
                buffer[0] = CMD_PUSH;
                buffer[1] = *transaction_id;
                let written = dictionary
                    .encode(&mut buffer[PACKET_HEADER_LEN..])
                    .map_err(|e| match e {
                        DictError::BufferTooSmall => PacketError::BufferTooSmall,
                        other => PacketError::Dictionary(other),
                    })?;
                Ok(PACKET_HEADER_LEN + written)
            }
            Packet::Ack { transaction_id } => {
                buffer[0] = CMD_ACK;
                buffer[1] = *transaction_id;
                Ok(PACKET_HEADER_LEN)
            }
            Packet::Nack { transaction_id } => {
                buffer[0] = CMD_NACK;
                buffer[1] = *transaction_id;
                Ok(PACKET_HEADER_LEN)
            }
        }
    }

    /// Parse a packet
    ///
    /// `limit` caps the dictionary size (the receiver's inbox). An oversized
    /// PUSH is rejected before the dictionary is decoded.
    pub fn decode(bytes: &[u8], limit: usize) -> Result<Self, PacketError> {
        if bytes.len() < PACKET_HEADER_LEN {
            return Err(PacketError::Truncated);
        }

        let transaction_id = bytes[1];
        match bytes[0] {
            CMD_PUSH => {
                let body = &bytes[PACKET_HEADER_LEN..];
                if body.len() > limit {
                    return Err(PacketError::Oversized {
                        len: body.len(),
                        limit,
                    });
                }
                let dictionary = Dictionary::decode(body)?;
                Ok(Packet::Push {
                    transaction_id,
                    dictionary,
                })
            }
            CMD_ACK => Ok(Packet::Ack { transaction_id }),
            CMD_NACK => Ok(Packet::Nack { transaction_id }),
            other => Err(PacketError::UnknownCommand(other)),
        }
    }
}
