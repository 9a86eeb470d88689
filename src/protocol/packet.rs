//! Fixed-size plant telemetry packet
//!
//! # Wire Format
//!
//! A packet is always exactly 16 bytes:
//! ```text
//! [name: [u8; 15], NUL padded][percent: u8]
//! ```
//!
//! Bytes 0-14 carry the plant name, NUL padded when shorter than 15 bytes.
//! Byte 15 carries the moisture percentage. There is no checksum and no
//! version field; the fixed length and fixed offsets are the entire
//! compatibility contract. Both [`PlantPacket::encode`] and
//! [`PlantPacket::decode`] are total: any 16-byte buffer decodes to some
//! name/percentage pair.

use crate::config::protocol::{NAME_LEN, PACKET_LEN, PERCENT_OFFSET};

/// A plant identifier and moisture percentage, as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantPacket {
    name: [u8; NAME_LEN],
    percent: u8,
}

impl PlantPacket {
    /// Create a packet from a plant name and moisture percentage.
    ///
    /// Names longer than 15 bytes are truncated; shorter names are NUL
    /// padded. The percentage is stored as-is: callers mapping unclamped
    /// readings into the 8-bit field get wrapping, which mirrors the
    /// original firmware.
    pub fn new(name: &str, percent: u8) -> Self {
        let mut field = [0u8; NAME_LEN];
        let bytes = name.as_bytes();
        let len = bytes.len().min(NAME_LEN);
        field[..len].copy_from_slice(&bytes[..len]);
        Self {
            name: field,
            percent,
        }
    }

    /// Serialise to the 16-byte wire form. Never fails.
    pub fn encode(&self) -> [u8; PACKET_LEN] {
        let mut buffer = [0u8; PACKET_LEN];
        buffer[..NAME_LEN].copy_from_slice(&self.name);
        buffer[PERCENT_OFFSET] = self.percent;
        buffer
    }

    /// Deserialise from a 16-byte buffer. Never fails.
    ///
    /// No validation is performed; a buffer that was never produced by a
    /// matching encoder still decodes, to whatever garbage it holds.
    pub fn decode(buffer: &[u8; PACKET_LEN]) -> Self {
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&buffer[..NAME_LEN]);
        Self {
            name,
            percent: buffer[PERCENT_OFFSET],
        }
    }

    /// The plant name, trimmed of NUL padding.
    ///
    /// Returns an empty string if the name bytes are not valid UTF-8,
    /// which can happen when decoding a buffer that was never encoded.
    pub fn name(&self) -> &str {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(NAME_LEN);
        core::str::from_utf8(&self.name[..end]).unwrap_or("")
    }

    /// The raw 15-byte name field, padding included.
    pub fn name_bytes(&self) -> &[u8; NAME_LEN] {
        &self.name
    }

    /// The moisture percentage byte.
    pub fn percent(&self) -> u8 {
        self.percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ivy() {
        let packet = PlantPacket::new("ivy", 62);
        let buffer = packet.encode();

        let mut expected = [0u8; PACKET_LEN];
        expected[0] = b'i';
        expected[1] = b'v';
        expected[2] = b'y';
        expected[15] = 62;
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_decode_ivy() {
        let packet = PlantPacket::new("ivy", 62);
        let decoded = PlantPacket::decode(&packet.encode());

        assert_eq!(decoded.name(), "ivy");
        assert_eq!(decoded.percent(), 62);
    }

    #[test]
    fn test_round_trip_short_names() {
        for (name, percent) in [("", 0u8), ("a", 1), ("oliver", 42), ("基督山伯爵", 100)] {
            let decoded = PlantPacket::decode(&PlantPacket::new(name, percent).encode());
            assert_eq!(decoded.name(), name);
            assert_eq!(decoded.percent(), percent);
        }
    }

    #[test]
    fn test_name_exactly_fifteen_bytes() {
        let name = "exactly15chars!";
        assert_eq!(name.len(), 15);

        let decoded = PlantPacket::decode(&PlantPacket::new(name, 7).encode());
        assert_eq!(decoded.name(), name);
    }

    #[test]
    fn test_long_name_truncated() {
        let packet = PlantPacket::new("monstera deliciosa", 50);
        assert_eq!(packet.name(), "monstera delici");
    }

    #[test]
    fn test_decode_is_total() {
        // An arbitrary buffer still decodes to something
        let buffer: [u8; PACKET_LEN] = [
            0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
            0x0C, 0xC8,
        ];
        let decoded = PlantPacket::decode(&buffer);
        assert_eq!(decoded.percent(), 200);
        // Invalid UTF-8 before the first NUL reads as empty
        assert_eq!(decoded.name(), "");
    }

    #[test]
    fn test_percent_offset_is_byte_fifteen() {
        let buffer = PlantPacket::new("fern", 99).encode();
        assert_eq!(buffer[15], 99);
        assert_eq!(&buffer[..4], b"fern");
        assert!(buffer[4..15].iter().all(|&b| b == 0));
    }
}
