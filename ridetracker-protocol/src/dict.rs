//! Key/value dictionary codec
//!
//! Dictionary format:
//! - COUNT (1 byte): number of tuples
//! - per tuple:
//!   - KEY (4 bytes): little-endian u32
//!   - TYPE (1 byte): value type identifier
//!   - LENGTH (2 bytes): little-endian value length
//!   - VALUE (LENGTH bytes)
//!
//! Integers are little-endian and 1, 2 or 4 bytes wide. C-strings carry
//! their NUL terminator on the wire.
//!
//! Only framing errors fail a decode. A value that does not match its
//! TYPE is kept as raw bytes.

use heapless::{String, Vec};

/// Maximum tuples in one dictionary
pub const MAX_TUPLES: usize = 8;

/// Maximum length of a single tuple value in bytes
pub const MAX_VALUE_LEN: usize = 64;

/// Dictionary header size (COUNT)
pub const DICT_HEADER_LEN: usize = 1;

/// Tuple header size (KEY + TYPE + LENGTH)
pub const TUPLE_HEADER_LEN: usize = 4 + 1 + 2;

// Wire format type values
const TYPE_BYTES: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

/// Errors that can occur while encoding or decoding a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// Output buffer too small for the encoded dictionary
    BufferTooSmall,
    /// Input ended in the middle of a tuple
    Truncated,
    /// More tuples than `MAX_TUPLES`
    TooManyTuples,
    /// Value longer than `MAX_VALUE_LEN`
    ValueTooLarge,
}

/// A tuple value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleValue {
    /// Raw byte array
    Bytes(Vec<u8, MAX_VALUE_LEN>),
    /// C-string (stored without its terminator)
    CString(String<MAX_VALUE_LEN>),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Int8(i8),
    Int16(i16),
    Int32(i32),
}

impl TupleValue {
    /// TYPE byte for this value
    fn type_byte(&self) -> u8 {
        match self {
            TupleValue::Bytes(_) => TYPE_BYTES,
            TupleValue::CString(_) => TYPE_CSTRING,
            TupleValue::Uint8(_) | TupleValue::Uint16(_) | TupleValue::Uint32(_) => TYPE_UINT,
            TupleValue::Int8(_) | TupleValue::Int16(_) | TupleValue::Int32(_) => TYPE_INT,
        }
    }

    /// Length of the VALUE field on the wire
    pub fn wire_len(&self) -> usize {
        match self {
            TupleValue::Bytes(bytes) => bytes.len(),
            TupleValue::CString(s) => s.len() + 1,
            TupleValue::Uint8(_) | TupleValue::Int8(_) => 1,
            TupleValue::Uint16(_) | TupleValue::Int16(_) => 2,
            TupleValue::Uint32(_) | TupleValue::Int32(_) => 4,
        }
    }

    /// Read an unsigned integer value of any width
    pub fn as_unsigned(&self) -> Option<u32> {
        match *self {
            TupleValue::Uint8(v) => Some(v as u32),
            TupleValue::Uint16(v) => Some(v as u32),
            TupleValue::Uint32(v) => Some(v),
            _ => None,
        }
    }

    /// Read a C-string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TupleValue::CString(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn write_value(&self, out: &mut [u8]) {
        match self {
            TupleValue::Bytes(bytes) => out.copy_from_slice(bytes),
            TupleValue::CString(s) => {
                let len = s.len();
                out[..len].copy_from_slice(s.as_bytes());
                out[len] = 0;
            }
            TupleValue::Uint8(v) => out[0] = *v,
            TupleValue::Uint16(v) => out.copy_from_slice(&v.to_le_bytes()),
            TupleValue::Uint32(v) => out.copy_from_slice(&v.to_le_bytes()),
            TupleValue::Int8(v) => out[0] = *v as u8,
            TupleValue::Int16(v) => out.copy_from_slice(&v.to_le_bytes()),
            TupleValue::Int32(v) => out.copy_from_slice(&v.to_le_bytes()),
        }
    }

    /// Decode a VALUE field
    ///
    /// Content the type byte does not describe (unknown type, odd integer
    /// width, C-string without NUL or not UTF-8) is kept as raw bytes so
    /// the rest of the dictionary stays readable.
    fn read_value(type_byte: u8, raw: &[u8]) -> Result<Self, DictError> {
        let typed = match type_byte {
            TYPE_CSTRING => read_cstring(raw),
            TYPE_UINT => match *raw {
                [a] => Some(TupleValue::Uint8(a)),
                [a, b] => Some(TupleValue::Uint16(u16::from_le_bytes([a, b]))),
                [a, b, c, d] => Some(TupleValue::Uint32(u32::from_le_bytes([a, b, c, d]))),
                _ => None,
            },
            TYPE_INT => match *raw {
                [a] => Some(TupleValue::Int8(a as i8)),
                [a, b] => Some(TupleValue::Int16(i16::from_le_bytes([a, b]))),
                [a, b, c, d] => Some(TupleValue::Int32(i32::from_le_bytes([a, b, c, d]))),
                _ => None,
            },
            _ => None,
        };

        match typed {
            Some(value) => Ok(value),
            None => {
                let mut bytes = Vec::new();
                bytes
                    .extend_from_slice(raw)
                    .map_err(|_| DictError::ValueTooLarge)?;
                Ok(TupleValue::Bytes(bytes))
            }
        }
    }
}

/// Everything up to the first NUL; an empty field is an empty string
fn read_cstring(raw: &[u8]) -> Option<TupleValue> {
    let end = match raw.iter().position(|&b| b == 0) {
        Some(end) => end,
        None if raw.is_empty() => 0,
        None => return None,
    };
    let text = core::str::from_utf8(&raw[..end]).ok()?;
    let mut s = String::new();
    s.push_str(text).ok()?;
    Some(TupleValue::CString(s))
}

/// A single key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple {
    pub key: u32,
    pub value: TupleValue,
}

impl Tuple {
    /// Create a C-string tuple
    pub fn cstring(key: u32, text: &str) -> Result<Self, DictError> {
        // Terminator must fit as well
        if text.len() + 1 > MAX_VALUE_LEN {
            return Err(DictError::ValueTooLarge);
        }
        let mut s = String::new();
        s.push_str(text).map_err(|_| DictError::ValueTooLarge)?;
        Ok(Self {
            key,
            value: TupleValue::CString(s),
        })
    }

    /// Create a 32-bit unsigned integer tuple
    pub const fn uint32(key: u32, value: u32) -> Self {
        Self {
            key,
            value: TupleValue::Uint32(value),
        }
    }

    /// Size of this tuple on the wire
    pub fn wire_len(&self) -> usize {
        TUPLE_HEADER_LEN + self.value.wire_len()
    }
}

/// An ordered set of tuples
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dictionary {
    tuples: Vec<Tuple, MAX_TUPLES>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub const fn new() -> Self {
        Self { tuples: Vec::new() }
    }

    /// Append a tuple
    pub fn push(&mut self, tuple: Tuple) -> Result<(), DictError> {
        self.tuples.push(tuple).map_err(|_| DictError::TooManyTuples)
    }

    /// Find the first tuple with the given key
    pub fn find(&self, key: u32) -> Option<&Tuple> {
        self.tuples.iter().find(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Total encoded size in bytes
    pub fn wire_len(&self) -> usize {
        DICT_HEADER_LEN + self.tuples.iter().map(Tuple::wire_len).sum::<usize>()
    }

    /// Encode into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, DictError> {
        let total = self.wire_len();
        if buffer.len() < total {
            return Err(DictError::BufferTooSmall);
        }

        buffer[0] = self.tuples.len() as u8;
        let mut pos = DICT_HEADER_LEN;

        for tuple in &self.tuples {
            let value_len = tuple.value.wire_len();
            buffer[pos..pos + 4].copy_from_slice(&tuple.key.to_le_bytes());
            buffer[pos + 4] = tuple.value.type_byte();
            buffer[pos + 5..pos + 7].copy_from_slice(&(value_len as u16).to_le_bytes());
            pos += TUPLE_HEADER_LEN;

            tuple.value.write_value(&mut buffer[pos..pos + value_len]);
            pos += value_len;
        }

        Ok(pos)
    }

    /// Decode a dictionary from bytes
    ///
    /// Bytes after the last tuple are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, DictError> {
        let (&count, mut rest) = bytes.split_first().ok_or(DictError::Truncated)?;
        if count as usize > MAX_TUPLES {
            return Err(DictError::TooManyTuples);
        }

        let mut dict = Dictionary::new();
        for _ in 0..count {
            if rest.len() < TUPLE_HEADER_LEN {
                return Err(DictError::Truncated);
            }
            let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
            let type_byte = rest[4];
            let value_len = u16::from_le_bytes([rest[5], rest[6]]) as usize;
            rest = &rest[TUPLE_HEADER_LEN..];

            if value_len > MAX_VALUE_LEN {
                return Err(DictError::ValueTooLarge);
            }
            if rest.len() < value_len {
                return Err(DictError::Truncated);
            }

            let value = TupleValue::read_value(type_byte, &rest[..value_len])?;
            rest = &rest[value_len..];
            dict.push(Tuple { key, value })?;
        }

        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_cstring_tuple() {
        let mut dict = Dictionary::new();
        dict.push(Tuple::cstring(0, "true").unwrap()).unwrap();

        let mut buf = [0u8; 32];
        let len = dict.encode(&mut buf).unwrap();

        assert_eq!(len, 1 + 7 + 5);
        assert_eq!(buf[0], 1); // count
        assert_eq!(&buf[1..5], &[0, 0, 0, 0]); // key
        assert_eq!(buf[5], TYPE_CSTRING);
        assert_eq!(&buf[6..8], &[5, 0]); // length includes NUL
        assert_eq!(&buf[8..13], b"true\0");
    }

    #[test]
    fn test_decode_uint32_distance() {
        // count=1, key=0, type=uint, len=4, value=42195
        let bytes = [1, 0, 0, 0, 0, TYPE_UINT, 4, 0, 0xD3, 0xA4, 0x00, 0x00];
        let dict = Dictionary::decode(&bytes).unwrap();

        assert_eq!(dict.len(), 1);
        let tuple = dict.find(0).unwrap();
        assert_eq!(tuple.value, TupleValue::Uint32(42195));
        assert_eq!(tuple.value.as_unsigned(), Some(42195));
    }

    #[test]
    fn test_decode_narrow_integers() {
        let bytes = [
            2, //
            7, 0, 0, 0, TYPE_UINT, 2, 0, 0x10, 0x27, // key 7 = 10000u16
            9, 0, 0, 0, TYPE_INT, 1, 0, 0xFF, // key 9 = -1i8
        ];
        let dict = Dictionary::decode(&bytes).unwrap();

        assert_eq!(dict.find(7).unwrap().value.as_unsigned(), Some(10000));
        assert_eq!(dict.find(9).unwrap().value, TupleValue::Int8(-1));
        assert_eq!(dict.find(9).unwrap().value.as_unsigned(), None);
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = [1, 0, 0, 0, 0, TYPE_UINT, 4, 0, 0xD3];
        assert_eq!(Dictionary::decode(&bytes), Err(DictError::Truncated));
        assert_eq!(Dictionary::decode(&[]), Err(DictError::Truncated));
    }

    #[test]
    fn test_mismatched_values_kept_as_bytes() {
        let bad_width = [1, 0, 0, 0, 0, TYPE_UINT, 3, 0, 1, 2, 3];
        let dict = Dictionary::decode(&bad_width).unwrap();
        let mut raw = Vec::new();
        raw.extend_from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(dict.find(0).unwrap().value, TupleValue::Bytes(raw));
        assert_eq!(dict.find(0).unwrap().value.as_unsigned(), None);

        let bad_type = [1, 0, 0, 0, 0, 9, 1, 0, 1];
        let dict = Dictionary::decode(&bad_type).unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_bad_strings_do_not_hide_other_tuples() {
        let bytes = [
            3, //
            1, 0, 0, 0, TYPE_CSTRING, 2, 0, 0xE9, 0x00, // not UTF-8
            2, 0, 0, 0, TYPE_CSTRING, 2, 0, b'h', b'i', // no NUL
            0, 0, 0, 0, TYPE_UINT, 4, 0, 0xD3, 0xA4, 0x00, 0x00, // 42195
        ];
        let dict = Dictionary::decode(&bytes).unwrap();

        assert_eq!(dict.len(), 3);
        assert_eq!(dict.find(1).unwrap().value.as_str(), None);
        assert_eq!(dict.find(2).unwrap().value.as_str(), None);
        assert_eq!(dict.find(0).unwrap().value.as_unsigned(), Some(42195));
    }

    #[test]
    fn test_empty_string_field() {
        let bytes = [1, 5, 0, 0, 0, TYPE_CSTRING, 0, 0];
        let dict = Dictionary::decode(&bytes).unwrap();
        assert_eq!(dict.find(5).unwrap().value.as_str(), Some(""));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut dict = Dictionary::new();
        dict.push(Tuple::uint32(0, 1)).unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(dict.encode(&mut buf), Err(DictError::BufferTooSmall));
    }

    #[test]
    fn test_mixed_dictionary_survives_decode() {
        let mut dict = Dictionary::new();
        dict.push(Tuple::uint32(0, 1500)).unwrap();
        dict.push(Tuple::cstring(1, "hello").unwrap()).unwrap();

        let mut buf = [0u8; 64];
        let len = dict.encode(&mut buf).unwrap();
        assert_eq!(len, dict.wire_len());

        let decoded = Dictionary::decode(&buf[..len]).unwrap();
        assert_eq!(decoded, dict);
        assert_eq!(decoded.find(1).unwrap().value.as_str(), Some("hello"));
    }

    #[test]
    fn test_too_many_tuples() {
        let mut dict = Dictionary::new();
        for key in 0..MAX_TUPLES as u32 {
            dict.push(Tuple::uint32(key, key)).unwrap();
        }
        assert_eq!(
            dict.push(Tuple::uint32(99, 0)),
            Err(DictError::TooManyTuples)
        );
        assert_eq!(
            Dictionary::decode(&[MAX_TUPLES as u8 + 1]),
            Err(DictError::TooManyTuples)
        );
    }
}
