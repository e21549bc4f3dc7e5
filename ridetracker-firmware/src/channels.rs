//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;
use portable_atomic::AtomicBool;

use ridetracker_core::HostEvent;
use ridetracker_protocol::MAX_FRAME_SIZE;

/// Channel capacity for host events
const HOST_EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound link frames
const LINK_TX_CHANNEL_SIZE: usize = 4;

/// Channel capacity for ACK/NACK replies to our PUSH
const LINK_REPLY_CHANNEL_SIZE: usize = 4;

/// One encoded link frame
pub type LinkFrame = Vec<u8, MAX_FRAME_SIZE>;

/// Reply from the paired device to an outbound PUSH
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkReply {
    Ack(u8),
    Nack(u8),
}

/// Ticks, clicks and inbox events for the controller
pub static HOST_EVENTS: Channel<CriticalSectionRawMutex, HostEvent, HOST_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Frames waiting to be written to the Bluetooth bridge
pub static LINK_TX: Channel<CriticalSectionRawMutex, LinkFrame, LINK_TX_CHANNEL_SIZE> =
    Channel::new();

/// ACK/NACK replies for the controller's outbox
pub static LINK_REPLIES: Channel<CriticalSectionRawMutex, LinkReply, LINK_REPLY_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the watch face has changes to render
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Bluetooth bridge reports a connected phone (updated by link state task)
pub static CONNECTED: AtomicBool = AtomicBool::new(false);
