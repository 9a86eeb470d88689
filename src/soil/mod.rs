//! Soil moisture sensing and auto-watering
//!
//! Contains the calibration mapping, the averaged moisture sampler and the
//! irrigation state machine, plus the hardware traits they run against.

pub mod calibration;
pub mod sampler;
pub mod traits;
pub mod watering;

pub use calibration::{map_range, CalibrationError, CalibrationRange};
pub use sampler::{MoistureReading, MoistureSampler};
pub use traits::{Delay, Pump, SoilProbe};
pub use watering::{AutoWaterThresholds, IrrigationController, IrrigationState, WateringOutcome};
