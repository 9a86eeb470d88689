//! COBS framing for telemetry packets on byte-stream links
//!
//! The 16-byte plant packet has no delimiter and no integrity check of its
//! own, which is fine on a radio with fixed-size payloads but not on a
//! serial byte stream. A framed packet is:
//!
//! ```text
//! COBS( [packet: [u8; 16]][crc16: u16 LE] ) [0x00]
//! ```
//!
//! The CRC is CRC-16-XMODEM over the 16 packet bytes. Framing is an
//! additive layer: the raw 16-byte packet stays the compatibility
//! contract, and [`PlantPacket::decode`] still accepts unchecked buffers.

use crate::config::protocol::{FRAME_DELIMITER, MAX_FRAME_SIZE, PACKET_LEN};
use crate::protocol::packet::PlantPacket;
use crc::{Crc, CRC_16_XMODEM};
use heapless::Vec;

const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Length of the payload under the COBS layer: packet plus CRC.
const RAW_FRAME_LEN: usize = PACKET_LEN + 2;

/// Errors raised when decoding a received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// COBS decoding failed
    Cobs,
    /// Decoded payload is not exactly packet + CRC sized
    Length,
    /// CRC-16 checksum mismatch
    Crc,
}

/// Encode a packet as a COBS frame, zero delimiter included.
pub fn encode_frame(packet: &PlantPacket) -> Vec<u8, MAX_FRAME_SIZE> {
    let mut raw = [0u8; RAW_FRAME_LEN];
    raw[..PACKET_LEN].copy_from_slice(&packet.encode());
    let crc = CRC.checksum(&raw[..PACKET_LEN]);
    raw[PACKET_LEN..].copy_from_slice(&crc.to_le_bytes());

    let mut output: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
    output
        .resize(corncobs::max_encoded_len(RAW_FRAME_LEN), 0)
        .ok();
    let len = corncobs::encode_buf(&raw, &mut output);
    output.truncate(len);
    output
}

/// Decode a COBS frame back to a packet, verifying the CRC.
///
/// Accepts the frame with or without its trailing zero delimiter, so it
/// works both on frames returned by [`FrameAccumulator`] (delimiter
/// stripped) and on complete encoded frames.
pub fn decode_frame(frame: &[u8]) -> Result<PlantPacket, FrameError> {
    let mut encoded: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
    encoded
        .extend_from_slice(frame)
        .map_err(|_| FrameError::Length)?;
    if encoded.last() != Some(&FRAME_DELIMITER) {
        encoded.push(FRAME_DELIMITER).map_err(|_| FrameError::Length)?;
    }

    let mut decoded = [0u8; MAX_FRAME_SIZE];
    let len = corncobs::decode_buf(&encoded, &mut decoded).map_err(|_| FrameError::Cobs)?;
    if len != RAW_FRAME_LEN {
        return Err(FrameError::Length);
    }

    let received_crc = u16::from_le_bytes([decoded[PACKET_LEN], decoded[PACKET_LEN + 1]]);
    if CRC.checksum(&decoded[..PACKET_LEN]) != received_crc {
        return Err(FrameError::Crc);
    }

    let mut buffer = [0u8; PACKET_LEN];
    buffer.copy_from_slice(&decoded[..PACKET_LEN]);
    Ok(PlantPacket::decode(&buffer))
}

/// Accumulates incoming bytes and extracts complete COBS frames.
///
/// Frames are delimited by zero bytes. The accumulator buffers non-zero
/// bytes until a delimiter arrives, then hands back the frame body for
/// [`decode_frame`].
pub struct FrameAccumulator {
    buffer: Vec<u8, MAX_FRAME_SIZE>,
}

impl FrameAccumulator {
    /// Create a new empty frame accumulator.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Push a byte into the accumulator.
    ///
    /// Returns `Some(frame)` when a delimiter completes a frame, with the
    /// delimiter stripped. Returns `None` while more bytes are needed;
    /// empty frames and oversized partial frames are dropped silently.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8, MAX_FRAME_SIZE>> {
        if byte == FRAME_DELIMITER {
            if self.buffer.is_empty() {
                // Leading or repeated delimiter, ignore
                return None;
            }
            let frame = core::mem::replace(&mut self.buffer, Vec::new());
            return Some(frame);
        }

        if self.buffer.push(byte).is_err() {
            // Longer than any telemetry frame can be: resynchronise on the
            // next delimiter
            self.buffer.clear();
        }

        None
    }

    /// Discard any partial frame in progress.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Returns true if no partial frame is in progress.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
