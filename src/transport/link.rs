//! Bounded link bring-up
//!
//! Radio modules occasionally miss their first init after a cold boot, so
//! bring-up is retried a small fixed number of times with a short pause in
//! between. Beyond that the node reports the failure and carries on
//! without telemetry rather than halting.

use crate::config::transport::{INIT_ATTEMPTS, INIT_RETRY_DELAY_MS};
use crate::soil::traits::Delay;
use crate::transport::traits::{Transport, TransportError};

/// Initialise the transport, retrying up to `INIT_ATTEMPTS` times.
///
/// Returns the last error once the attempts are exhausted.
pub fn init_with_retry<T, D>(transport: &mut T, delay: &mut D) -> Result<(), TransportError>
where
    T: Transport,
    D: Delay,
{
    let mut last_error = TransportError::InitFailed;
    for attempt in 1..=INIT_ATTEMPTS {
        match transport.init() {
            Ok(()) => {
                log::info!("Transport: link up (attempt {})", attempt);
                return Ok(());
            }
            Err(e) => {
                log::warn!("Transport: init attempt {} failed ({:?})", attempt, e);
                last_error = e;
                if attempt < INIT_ATTEMPTS {
                    delay.delay_ms(INIT_RETRY_DELAY_MS);
                }
            }
        }
    }
    log::warn!("Transport: giving up after {} attempts", INIT_ATTEMPTS);
    Err(last_error)
}
