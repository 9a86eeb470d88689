//! Telemetry transport boundary
//!
//! The core hands a finished 16-byte packet to a [`Transport`] and learns
//! only whether the send worked. Radio configuration, WiFi association and
//! retry/backoff of individual sends all live behind the trait.

pub mod link;
pub mod traits;

pub use link::init_with_retry;
pub use traits::{Transport, TransportError};
