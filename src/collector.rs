//! Base-station receive path
//!
//! The collector decodes incoming plant packets and hands the result to a
//! [`ReadingSink`]: the database write and the push-notification delivery
//! behind it are somebody else's problem. It also grades each reading into
//! an alert level so the sink can nag the owner of a thirsty plant.

use crate::config::protocol::PACKET_LEN;
use crate::protocol::packet::PlantPacket;

/// How urgently a plant needs water.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// Moisture at or below 50%
    WaterSoon,
    /// Moisture at or below 40%
    WaterNow,
}

/// Grade a moisture percentage into an alert level, most severe first.
pub fn alert_level(percent: u8) -> Option<AlertLevel> {
    if percent <= 40 {
        Some(AlertLevel::WaterNow)
    } else if percent <= 50 {
        Some(AlertLevel::WaterSoon)
    } else {
        None
    }
}

/// Downstream consumer of decoded readings.
pub trait ReadingSink {
    /// Store one reading (database write in the original station).
    fn record(&mut self, plant_name: &str, percent: u8);

    /// Deliver a low-moisture alert for a plant.
    fn notify(&mut self, plant_name: &str, level: AlertLevel);
}

/// Decodes received packets and feeds a [`ReadingSink`].
pub struct Collector<S: ReadingSink> {
    sink: S,
}

impl<S: ReadingSink> Collector<S> {
    /// Create a collector over the given sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Handle one received 16-byte packet.
    ///
    /// Decoding never fails; a buffer that was never encoded by a node
    /// still produces a (garbage) reading, which gets recorded like any
    /// other. The wire format carries no way to tell the difference.
    pub fn on_packet(&mut self, buffer: &[u8; PACKET_LEN]) -> PlantPacket {
        let packet = PlantPacket::decode(buffer);
        log::info!("Received {}: {}%", packet.name(), packet.percent());

        self.sink.record(packet.name(), packet.percent());
        if let Some(level) = alert_level(packet.percent()) {
            self.sink.notify(packet.name(), level);
        }

        packet
    }

    /// Access the sink, mainly for shutdown or inspection.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
