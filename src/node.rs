//! Sensing-node duty cycle
//!
//! Ties the sampler, the irrigation controller and the packet codec
//! together into the sample -> decide -> transmit sequence a node runs once
//! per wake-up. Sleeping between cycles is the caller's concern; the node
//! itself has no notion of scheduling.

use crate::config::protocol::NAME_LEN;
use crate::protocol::packet::PlantPacket;
use crate::soil::calibration::CalibrationRange;
use crate::soil::sampler::{MoistureReading, MoistureSampler};
use crate::soil::traits::{Delay, Pump, SoilProbe};
use crate::soil::watering::{AutoWaterThresholds, IrrigationController, WateringOutcome};
use crate::transport::traits::Transport;
use heapless::String;

/// What one duty cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// The calibrated reading taken at the start of the cycle
    pub reading: MoistureReading,
    /// Irrigation decision for this cycle
    pub watering: WateringOutcome,
    /// Whether the telemetry packet reached the transport successfully
    pub telemetry_sent: bool,
}

/// One sensing node: a named plant, a sampler and a pump controller.
pub struct SensorNode {
    plant_name: String<NAME_LEN>,
    sampler: MoistureSampler,
    controller: IrrigationController,
}

impl SensorNode {
    /// Create a node. Plant names longer than the 15-byte packet field are
    /// truncated up front so the name on the wire matches the name logged.
    pub fn new(
        plant_name: &str,
        calibration: CalibrationRange,
        thresholds: AutoWaterThresholds,
    ) -> Self {
        let mut name = String::new();
        for c in plant_name.chars() {
            if name.push(c).is_err() {
                break;
            }
        }
        Self {
            plant_name: name,
            sampler: MoistureSampler::new(calibration),
            controller: IrrigationController::new(calibration, thresholds),
        }
    }

    /// The plant name as carried in telemetry.
    pub fn plant_name(&self) -> &str {
        &self.plant_name
    }

    /// Recalibrate the sensor; sampler and controller stay in sync.
    pub fn calibrate(&mut self, calibration: CalibrationRange) {
        self.sampler.calibrate(calibration);
        self.controller.calibrate(calibration);
    }

    /// Replace the auto-water thresholds.
    pub fn set_thresholds(&mut self, thresholds: AutoWaterThresholds) {
        self.controller.set_thresholds(thresholds);
    }

    /// Enable or disable auto-watering.
    pub fn set_auto_water(&mut self, enabled: bool) {
        self.controller.set_auto_water(enabled);
    }

    /// Bound or unbound the watering cycle duration.
    pub fn set_max_watering_ms(&mut self, ms: Option<u32>) {
        self.controller.set_max_watering_ms(ms);
    }

    /// Run one duty cycle: sample, water if due, transmit the reading.
    ///
    /// A transport failure is logged and reported but never aborts the
    /// cycle; the plant gets watered whether or not anyone is listening.
    pub fn run_cycle<P, Q, D, T>(
        &mut self,
        probe: &mut P,
        pump: &mut Q,
        delay: &mut D,
        transport: &mut T,
    ) -> CycleReport
    where
        P: SoilProbe,
        Q: Pump,
        D: Delay,
        T: Transport,
    {
        let reading = self.sampler.sample(probe, delay);
        log::info!(
            "{}: moisture {}% (raw {})",
            self.plant_name,
            reading.percent,
            reading.raw
        );

        let watering = self
            .controller
            .on_reading(reading.percent, probe, pump, delay);

        // Out-of-span readings wrap into the 8-bit field, as they always
        // have on the wire
        let packet = PlantPacket::new(&self.plant_name, reading.percent as u8);
        let telemetry_sent = match transport.send(&packet.encode()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{}: telemetry send failed ({:?})", self.plant_name, e);
                false
            }
        };

        CycleReport {
            reading,
            watering,
            telemetry_sent,
        }
    }
}
