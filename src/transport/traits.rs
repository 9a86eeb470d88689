//! Transport trait for abstraction and testability
//!
//! This trait defines the interface to whatever link carries telemetry
//! packets to the base station (an nRF24 radio in the original hardware),
//! allowing the driver to be swapped with a mock for testing.

use crate::config::protocol::PACKET_LEN;

/// Errors that can occur during transport operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Link bring-up failed
    InitFailed,
    /// The packet was not acknowledged or could not be written
    SendFailed,
    /// Operation attempted before a successful init
    NotReady,
}

/// Abstract one-way telemetry link.
///
/// The core does not retry sends: a failed send surfaces in the cycle
/// report and the next duty cycle tries again with fresh data. Any
/// per-send retry or backoff belongs inside the implementation.
pub trait Transport {
    /// Bring the link up. Called through [`init_with_retry`] at boot.
    ///
    /// [`init_with_retry`]: crate::transport::link::init_with_retry
    fn init(&mut self) -> Result<(), TransportError>;

    /// Send one fixed-size telemetry packet.
    fn send(&mut self, packet: &[u8; PACKET_LEN]) -> Result<(), TransportError>;
}

#[cfg(test)]
pub mod mock {
    //! Mock transport for testing

    use super::*;
    use std::cell::RefCell;
    use std::vec::Vec;

    /// Mock transport recording sent packets.
    pub struct MockTransport {
        /// Number of init() calls that fail before one succeeds
        init_failures: RefCell<u32>,
        init_calls: RefCell<u32>,
        ready: RefCell<bool>,
        sent: RefCell<Vec<[u8; PACKET_LEN]>>,
        next_send_error: RefCell<Option<TransportError>>,
    }

    impl MockTransport {
        /// Create a mock whose init() succeeds immediately.
        pub fn new() -> Self {
            Self::failing_init(0)
        }

        /// Create a mock whose first `failures` init() calls fail.
        pub fn failing_init(failures: u32) -> Self {
            Self {
                init_failures: RefCell::new(failures),
                init_calls: RefCell::new(0),
                ready: RefCell::new(false),
                sent: RefCell::new(Vec::new()),
                next_send_error: RefCell::new(None),
            }
        }

        /// Set an error to be returned by the next send() call.
        pub fn set_next_send_error(&self, error: TransportError) {
            *self.next_send_error.borrow_mut() = Some(error);
        }

        /// All packets sent so far.
        pub fn sent_packets(&self) -> Vec<[u8; PACKET_LEN]> {
            self.sent.borrow().clone()
        }

        /// Number of init() attempts observed.
        pub fn init_calls(&self) -> u32 {
            *self.init_calls.borrow()
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for MockTransport {
        fn init(&mut self) -> Result<(), TransportError> {
            *self.init_calls.borrow_mut() += 1;
            let mut failures = self.init_failures.borrow_mut();
            if *failures > 0 {
                *failures -= 1;
                return Err(TransportError::InitFailed);
            }
            *self.ready.borrow_mut() = true;
            Ok(())
        }

        fn send(&mut self, packet: &[u8; PACKET_LEN]) -> Result<(), TransportError> {
            if let Some(error) = self.next_send_error.borrow_mut().take() {
                return Err(error);
            }
            if !*self.ready.borrow() {
                return Err(TransportError::NotReady);
            }
            self.sent.borrow_mut().push(*packet);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mock_send_records_packets() {
            let mut transport = MockTransport::new();
            transport.init().unwrap();

            transport.send(&[1u8; PACKET_LEN]).unwrap();
            transport.send(&[2u8; PACKET_LEN]).unwrap();

            let sent = transport.sent_packets();
            assert_eq!(sent.len(), 2);
            assert_eq!(sent[0], [1u8; PACKET_LEN]);
        }

        #[test]
        fn test_mock_send_before_init() {
            let mut transport = MockTransport::new();
            let result = transport.send(&[0u8; PACKET_LEN]);
            assert_eq!(result, Err(TransportError::NotReady));
        }

        #[test]
        fn test_mock_send_error_clears() {
            let mut transport = MockTransport::new();
            transport.init().unwrap();
            transport.set_next_send_error(TransportError::SendFailed);

            assert_eq!(
                transport.send(&[0u8; PACKET_LEN]),
                Err(TransportError::SendFailed)
            );
            // Error cleared, next send succeeds
            transport.send(&[0u8; PACKET_LEN]).unwrap();
        }
    }
}
