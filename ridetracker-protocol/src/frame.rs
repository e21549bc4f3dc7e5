//! Link framing for the serial bridge to the paired device.
//!
//! Frame format:
//! - SYNC (1 byte): 0x7E synchronization byte
//! - LENGTH (1 byte): payload length (1-66)
//! - PAYLOAD: one app-message packet
//! - CHECKSUM (1 byte): XOR of LENGTH and all PAYLOAD bytes

use heapless::Vec;

use crate::packet::MAX_PACKET_SIZE;

/// Frame synchronization byte
pub const LINK_SYNC: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_FRAME_PAYLOAD: usize = MAX_PACKET_SIZE;

/// Maximum complete frame size (SYNC + LENGTH + PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + MAX_FRAME_PAYLOAD + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// LENGTH is zero or larger than `MAX_FRAME_PAYLOAD`
    InvalidLength(u8),
    /// Checksum mismatch
    InvalidChecksum,
    /// Buffer too small for encoding
    BufferTooSmall,
}

fn checksum(payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(payload.len() as u8, |acc, &byte| acc ^ byte)
}

/// Wrap a packet in a link frame
///
/// Returns the number of bytes written
pub fn encode_frame(payload: &[u8], buffer: &mut [u8]) -> Result<usize, FrameError> {
    if payload.is_empty() || payload.len() > MAX_FRAME_PAYLOAD {
        return Err(FrameError::InvalidLength(payload.len() as u8));
    }
    let frame_len = payload.len() + 3;
    if buffer.len() < frame_len {
        return Err(FrameError::BufferTooSmall);
    }

    buffer[0] = LINK_SYNC;
    buffer[1] = payload.len() as u8;
    buffer[2..2 + payload.len()].copy_from_slice(payload);
    buffer[2 + payload.len()] = checksum(payload);

    Ok(frame_len)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Sync,
    Length,
    Payload,
    Checksum,
}

/// Incremental frame reader for a byte stream
#[derive(Debug, Clone)]
pub struct FrameReader {
    state: ReadState,
    expected: usize,
    payload: Vec<u8, MAX_FRAME_PAYLOAD>,
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReader {
    pub const fn new() -> Self {
        Self {
            state: ReadState::Sync,
            expected: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next SYNC byte
    pub fn reset(&mut self) {
        self.state = ReadState::Sync;
        self.expected = 0;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(payload))` when a frame completes, `Ok(None)` while
    /// more bytes are needed. On error the reader resynchronizes.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Vec<u8, MAX_FRAME_PAYLOAD>>, FrameError> {
        match self.state {
            ReadState::Sync => {
                if byte == LINK_SYNC {
                    self.state = ReadState::Length;
                }
                Ok(None)
            }
            ReadState::Length => {
                let len = byte as usize;
                if len == 0 || len > MAX_FRAME_PAYLOAD {
                    self.reset();
                    return Err(FrameError::InvalidLength(byte));
                }
                self.expected = len;
                self.payload.clear();
                self.state = ReadState::Payload;
                Ok(None)
            }
            ReadState::Payload => {
                // Capacity is bounded by the LENGTH check above
                let _ = self.payload.push(byte);
                if self.payload.len() == self.expected {
                    self.state = ReadState::Checksum;
                }
                Ok(None)
            }
            ReadState::Checksum => {
                let expected = checksum(&self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }
                let payload = core::mem::take(&mut self.payload);
                self.reset();
                Ok(Some(payload))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(reader: &mut FrameReader, bytes: &[u8]) -> Option<Vec<u8, MAX_FRAME_PAYLOAD>> {
        let mut out = None;
        for &b in bytes {
            if let Ok(Some(payload)) = reader.feed(b) {
                out = Some(payload);
            }
        }
        out
    }

    #[test]
    fn test_encode_ack_frame() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(&[0xFF, 0x02], &mut buf).unwrap();

        assert_eq!(len, 5);
        assert_eq!(&buf[..5], &[LINK_SYNC, 2, 0xFF, 0x02, 2 ^ 0xFF ^ 0x02]);
    }

    #[test]
    fn test_reader_resyncs_after_noise() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(&[0x7F, 0x05], &mut buf).unwrap();

        let mut stream: Vec<u8, 32> = Vec::new();
        stream.extend_from_slice(&[0x00, 0x13, 0x37]).unwrap();
        stream.extend_from_slice(&buf[..len]).unwrap();

        let mut reader = FrameReader::new();
        let payload = feed_all(&mut reader, &stream).unwrap();
        assert_eq!(payload.as_slice(), &[0x7F, 0x05]);
    }

    #[test]
    fn test_reader_rejects_bad_checksum() {
        let mut reader = FrameReader::new();
        assert_eq!(reader.feed(LINK_SYNC), Ok(None));
        assert_eq!(reader.feed(1), Ok(None));
        assert_eq!(reader.feed(0xAA), Ok(None));
        assert_eq!(reader.feed(0x00), Err(FrameError::InvalidChecksum));

        // Next frame still parses
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(&[0xFF, 0x01], &mut buf).unwrap();
        assert!(feed_all(&mut reader, &buf[..len]).is_some());
    }

    #[test]
    fn test_reader_rejects_bad_length() {
        let mut reader = FrameReader::new();
        reader.feed(LINK_SYNC).unwrap();
        assert_eq!(reader.feed(0), Err(FrameError::InvalidLength(0)));

        reader.feed(LINK_SYNC).unwrap();
        assert_eq!(
            reader.feed(MAX_FRAME_PAYLOAD as u8 + 1),
            Err(FrameError::InvalidLength(MAX_FRAME_PAYLOAD as u8 + 1))
        );
    }

    #[test]
    fn test_encode_rejects_empty_payload() {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        assert_eq!(encode_frame(&[], &mut buf), Err(FrameError::InvalidLength(0)));
    }
}
