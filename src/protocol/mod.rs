//! Telemetry wire protocol
//!
//! [`packet`] holds the fixed 16-byte plant packet, the compatibility
//! contract between sensing nodes and the base station. [`framing`] wraps
//! that packet with CRC and COBS encoding for byte-stream links that need
//! delimiting and integrity checking.

pub mod framing;
pub mod packet;

pub use framing::{decode_frame, encode_frame, FrameAccumulator, FrameError};
pub use packet::PlantPacket;
