//! Paired-device communication protocol
//!
//! This crate defines the messages exchanged between the watch and the
//! paired device (phone companion app), and how they travel over the serial
//! bridge to the Bluetooth module.
//!
//! # Protocol Overview
//!
//! Three layers, innermost first:
//! ```text
//! dictionary:  ┌───────┬────────────────────────────────────────────┐
//!              │ COUNT │ KEY(4) TYPE(1) LENGTH(2) VALUE ... (×COUNT) │
//!              └───────┴────────────────────────────────────────────┘
//! packet:      ┌─────────┬─────────────┬────────────────┐
//!              │ COMMAND │ TRANSACTION │ DICTIONARY     │
//!              └─────────┴─────────────┴────────────────┘
//! link frame:  ┌──────┬────────┬────────────┬──────────┐
//!              │ SYNC │ LENGTH │ PACKET     │ CHECKSUM │
//!              └──────┴────────┴────────────┴──────────┘
//! ```
//!
//! Dictionaries are capped at 64 bytes in each direction. There is no
//! retransmission: a PUSH is answered by exactly one ACK or NACK.

#![no_std]
#![deny(unsafe_code)]

pub mod dict;
pub mod frame;
pub mod messages;
pub mod packet;

pub use dict::{DictError, Dictionary, Tuple, TupleValue};
pub use frame::{encode_frame, FrameError, FrameReader, LINK_SYNC, MAX_FRAME_SIZE};
pub use messages::{
    CompanionMessage, RunningNotification, INBOX_SIZE, KEY_DISTANCE, KEY_OTHER, KEY_RUNNING,
    MAX_DICT_SIZE, OUTBOX_SIZE,
};
pub use packet::{Packet, PacketError, MAX_PACKET_SIZE};
