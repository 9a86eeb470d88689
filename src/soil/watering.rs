//! Auto-watering state machine with overflow interlock
//!
//! The controller runs the pump when the calibrated moisture level falls
//! below the start threshold and stops it once the raw reading crosses a
//! precomputed raw-domain shutoff threshold. An overflow float sensor acts
//! as a hard interlock: the pump is forced off the instant overflow is
//! observed and stays off until it clears.
//!
//! The watering loop is blocking by design. Irrigation takes priority over
//! telemetry, so the single thread of control polls the probe and the
//! overflow sensor in a tight loop until the cycle ends. There is no exit
//! from a running cycle other than the shutoff threshold, the overflow
//! interlock, or the optional maximum-duration bound.

use crate::config::watering::{OVERFLOW_POLL_MS, RAW_POLL_MS};
use crate::config::autowater_defaults;
use crate::soil::calibration::CalibrationRange;
use crate::soil::traits::{Delay, Pump, SoilProbe};

/// Moisture thresholds driving the pump.
///
/// No ordering between the two is enforced, matching the original
/// firmware. A shutoff at or below the start level makes a watering cycle
/// exit immediately or never, depending on direction; that is a
/// configuration hazard left to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoWaterThresholds {
    /// Watering starts when the percentage drops strictly below this level
    pub start_percent: i32,
    /// Watering stops once the raw reading reaches this level's raw
    /// equivalent
    pub shutoff_percent: i32,
}

impl Default for AutoWaterThresholds {
    fn default() -> Self {
        Self {
            start_percent: autowater_defaults::START_PERCENT,
            shutoff_percent: autowater_defaults::SHUTOFF_PERCENT,
        }
    }
}

/// Controller state, observable between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrrigationState {
    /// No watering cycle in progress
    Idle,
    /// Pump running, polling toward the shutoff threshold
    Watering,
    /// Pump forced off while the overflow sensor reads active
    OverflowPaused,
}

/// Result of handing one moisture reading to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WateringOutcome {
    /// Auto-watering is disabled
    Disabled,
    /// Moisture at or above the start threshold, nothing to do
    NotNeeded,
    /// Cycle ran to the shutoff threshold
    Completed,
    /// Cycle hit the configured maximum duration before shutoff
    MaxDurationExceeded,
}

/// Closed-loop pump controller.
pub struct IrrigationController {
    calibration: CalibrationRange,
    thresholds: AutoWaterThresholds,
    auto_water: bool,
    /// Optional upper bound on a single watering cycle. `None` preserves
    /// the original behaviour: a cycle that never reaches the shutoff
    /// threshold (miscalibration, empty reservoir, probe fault) runs until
    /// something external stops it. That risk is documented, not hidden.
    max_watering_ms: Option<u32>,
    state: IrrigationState,
    /// Shutoff threshold in raw units, computed once per cycle entry
    shutoff_raw: i32,
}

impl IrrigationController {
    /// Create a controller with auto-watering enabled.
    pub fn new(calibration: CalibrationRange, thresholds: AutoWaterThresholds) -> Self {
        Self {
            calibration,
            thresholds,
            auto_water: true,
            max_watering_ms: None,
            state: IrrigationState::Idle,
            shutoff_raw: 0,
        }
    }

    /// Enable or disable auto-watering.
    pub fn set_auto_water(&mut self, enabled: bool) {
        self.auto_water = enabled;
    }

    /// Whether auto-watering is enabled.
    pub fn auto_water(&self) -> bool {
        self.auto_water
    }

    /// Replace the pump thresholds.
    pub fn set_thresholds(&mut self, thresholds: AutoWaterThresholds) {
        self.thresholds = thresholds;
    }

    /// Replace the calibration range used for the raw shutoff threshold.
    pub fn calibrate(&mut self, calibration: CalibrationRange) {
        self.calibration = calibration;
    }

    /// Bound a single watering cycle to at most `ms` milliseconds of
    /// pumping and overflow-pause time, or remove the bound with `None`.
    pub fn set_max_watering_ms(&mut self, ms: Option<u32>) {
        self.max_watering_ms = ms;
    }

    /// Current controller state.
    pub fn state(&self) -> IrrigationState {
        self.state
    }

    /// Handle one calibrated reading; runs a full blocking watering cycle
    /// if one is due.
    ///
    /// A reading exactly at the start threshold does not start watering:
    /// the comparison is strictly below.
    pub fn on_reading<P, Q, D>(
        &mut self,
        percent: i32,
        probe: &mut P,
        pump: &mut Q,
        delay: &mut D,
    ) -> WateringOutcome
    where
        P: SoilProbe,
        Q: Pump,
        D: Delay,
    {
        if !self.auto_water {
            return WateringOutcome::Disabled;
        }
        if percent >= self.thresholds.start_percent {
            return WateringOutcome::NotNeeded;
        }
        self.water(probe, pump, delay)
    }

    /// Advance the state machine by one observation.
    ///
    /// Returns the pump line state to apply for this instant. The overflow
    /// reading wins over everything else: whenever it is true the returned
    /// pump state is false.
    fn step(&mut self, raw: u16, overflow: bool) -> bool {
        match self.state {
            IrrigationState::Idle => false,
            IrrigationState::Watering => {
                if overflow {
                    log::warn!("Watering: overflow detected, pump paused");
                    self.state = IrrigationState::OverflowPaused;
                    false
                } else if i32::from(raw) <= self.shutoff_raw {
                    // Raw falls as the soil wets; at or past the threshold
                    // the cycle is done
                    self.state = IrrigationState::Idle;
                    false
                } else {
                    true
                }
            }
            IrrigationState::OverflowPaused => {
                if overflow {
                    false
                } else {
                    log::info!("Watering: overflow cleared, pump resumed");
                    self.state = IrrigationState::Watering;
                    true
                }
            }
        }
    }

    /// Run one blocking watering cycle to completion.
    fn water<P, Q, D>(&mut self, probe: &mut P, pump: &mut Q, delay: &mut D) -> WateringOutcome
    where
        P: SoilProbe,
        Q: Pump,
        D: Delay,
    {
        self.shutoff_raw = self
            .calibration
            .raw_from_percent(self.thresholds.shutoff_percent);
        self.state = IrrigationState::Watering;
        log::info!(
            "Watering: started, raw shutoff threshold {}",
            self.shutoff_raw
        );

        probe.set_power(true);

        let mut elapsed_ms: u32 = 0;
        let outcome = loop {
            if let Some(max) = self.max_watering_ms {
                if elapsed_ms >= max {
                    log::warn!("Watering: aborted after {}ms without shutoff", elapsed_ms);
                    break WateringOutcome::MaxDurationExceeded;
                }
            }

            // Observe, then act: the pump line always reflects the
            // overflow reading taken in the same iteration before the
            // thread yields.
            let overflow = probe.read_overflow();
            let raw = probe.read_raw();
            let energise = self.step(raw, overflow);
            pump.set_pump(energise);

            if self.state == IrrigationState::Idle {
                break WateringOutcome::Completed;
            }

            let poll_ms = match self.state {
                IrrigationState::OverflowPaused => OVERFLOW_POLL_MS,
                _ => RAW_POLL_MS,
            };
            delay.delay_ms(poll_ms);
            elapsed_ms = elapsed_ms.saturating_add(poll_ms);
        };

        pump.set_pump(false);
        probe.set_power(false);
        self.state = IrrigationState::Idle;
        log::info!("Watering: finished ({:?})", outcome);

        outcome
    }
}
