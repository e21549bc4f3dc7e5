//! Message keys and payloads exchanged with the paired device
//!
//! - Paired device → watch: distance updates (`KEY_DISTANCE`, metres as an
//!   unsigned integer)
//! - Watch → paired device: running notifications (key `0`, C-string
//!   `"true"` or `"false"`)

use crate::dict::{DictError, Dictionary, Tuple};

// Inbound keys
pub const KEY_DISTANCE: u32 = 0;
pub const KEY_OTHER: u32 = 1;

// Outbound keys
pub const KEY_RUNNING: u32 = 0;

/// Inbox buffer size in bytes
pub const INBOX_SIZE: usize = 64;

/// Outbox buffer size in bytes
pub const OUTBOX_SIZE: usize = 64;

/// Largest dictionary either side will ever accept
pub const MAX_DICT_SIZE: usize = 64;

const RUNNING_TRUE: &str = "true";
const RUNNING_FALSE: &str = "false";

/// Messages from the paired device that the watch understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompanionMessage {
    /// Distance travelled so far, in metres
    Distance { metres: u32 },
}

impl CompanionMessage {
    /// Extract the recognised message from an inbound dictionary
    ///
    /// Unknown keys, and a distance tuple that is not an unsigned integer,
    /// yield `None`.
    pub fn from_dictionary(dict: &Dictionary) -> Option<Self> {
        let metres = dict.find(KEY_DISTANCE)?.value.as_unsigned()?;
        Some(CompanionMessage::Distance { metres })
    }

    /// Encode this message into a dictionary (companion side, tests)
    pub fn to_dictionary(&self) -> Result<Dictionary, DictError> {
        let mut dict = Dictionary::new();
        match *self {
            CompanionMessage::Distance { metres } => {
                dict.push(Tuple::uint32(KEY_DISTANCE, metres))?;
            }
        }
        Ok(dict)
    }
}

/// Start/stop notification sent to the paired device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunningNotification {
    pub running: bool,
}

impl RunningNotification {
    pub const fn new(running: bool) -> Self {
        Self { running }
    }

    /// Wire text for this notification
    pub const fn as_str(&self) -> &'static str {
        if self.running {
            RUNNING_TRUE
        } else {
            RUNNING_FALSE
        }
    }

    /// Encode as a single-tuple dictionary
    pub fn to_dictionary(&self) -> Result<Dictionary, DictError> {
        let mut dict = Dictionary::new();
        dict.push(Tuple::cstring(KEY_RUNNING, self.as_str())?)?;
        Ok(dict)
    }

    /// Parse a notification (companion side, tests)
    pub fn from_dictionary(dict: &Dictionary) -> Option<Self> {
        match dict.find(KEY_RUNNING)?.value.as_str()? {
            RUNNING_TRUE => Some(Self::new(true)),
            RUNNING_FALSE => Some(Self::new(false)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::TupleValue;

    #[test]
    fn test_running_notification_encoding() {
        let dict = RunningNotification::new(true).to_dictionary().unwrap();
        assert_eq!(dict.len(), 1);

        let tuple = dict.find(KEY_RUNNING).unwrap();
        assert_eq!(tuple.value.as_str(), Some("true"));

        let mut buf = [0u8; OUTBOX_SIZE];
        let len = dict.encode(&mut buf).unwrap();
        assert_eq!(&buf[len - 5..len], b"true\0");
    }

    #[test]
    fn test_stopped_notification_encoding() {
        let dict = RunningNotification::new(false).to_dictionary().unwrap();
        assert_eq!(dict.find(KEY_RUNNING).unwrap().value.as_str(), Some("false"));
        assert_eq!(
            RunningNotification::from_dictionary(&dict),
            Some(RunningNotification::new(false))
        );
    }

    #[test]
    fn test_distance_extraction() {
        let dict = CompanionMessage::Distance { metres: 42195 }
            .to_dictionary()
            .unwrap();
        assert_eq!(
            CompanionMessage::from_dictionary(&dict),
            Some(CompanionMessage::Distance { metres: 42195 })
        );
    }

    #[test]
    fn test_unrelated_key_ignored() {
        let mut dict = Dictionary::new();
        dict.push(Tuple::uint32(KEY_OTHER, 7)).unwrap();
        assert_eq!(CompanionMessage::from_dictionary(&dict), None);
    }

    #[test]
    fn test_distance_with_wrong_type_ignored() {
        let mut dict = Dictionary::new();
        dict.push(Tuple {
            key: KEY_DISTANCE,
            value: TupleValue::Int32(-5),
        })
        .unwrap();
        assert_eq!(CompanionMessage::from_dictionary(&dict), None);
    }

    #[test]
    fn test_narrow_distance_accepted() {
        let mut dict = Dictionary::new();
        dict.push(Tuple {
            key: KEY_DISTANCE,
            value: TupleValue::Uint16(1500),
        })
        .unwrap();
        assert_eq!(
            CompanionMessage::from_dictionary(&dict),
            Some(CompanionMessage::Distance { metres: 1500 })
        );
    }

    #[test]
    fn test_distance_survives_malformed_neighbour() {
        // KEY_OTHER holds a C-string that is not UTF-8
        let bytes = [
            2, //
            1, 0, 0, 0, 1, 2, 0, 0xE9, 0x00, //
            0, 0, 0, 0, 2, 4, 0, 0xD3, 0xA4, 0x00, 0x00,
        ];
        let dict = Dictionary::decode(&bytes).unwrap();
        assert_eq!(
            CompanionMessage::from_dictionary(&dict),
            Some(CompanionMessage::Distance { metres: 42195 })
        );
    }
}
