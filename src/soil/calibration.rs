//! Linear range mapping between raw ADC readings and moisture percentages
//!
//! The probe is calibrated with two raw endpoints: the reading in dry air
//! (0%) and the reading fully submerged (100%). Because the capacitive
//! signal falls as the soil gets wetter, the dry endpoint is normally the
//! numerically larger of the two and the mapping runs over an inverted
//! domain.

use crate::config::calibration_defaults;

/// Errors raised when validating a calibration range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// The dry and wet endpoints are equal, which would divide by zero
    /// when mapping
    ZeroSpan,
}

/// Rescale `value` linearly from `[in_low, in_high]` to `[out_low, out_high]`.
///
/// Division truncates toward zero, matching 32-bit integer arithmetic on
/// the original board. Inverted ranges (`in_low > in_high`) are supported.
/// No clamping is performed: values outside the input range extrapolate
/// outside the output range, and it is the caller's decision whether that
/// is acceptable.
pub fn map_range(value: i32, in_low: i32, in_high: i32, out_low: i32, out_high: i32) -> i32 {
    (value - in_low) * (out_high - out_low) / (in_high - in_low) + out_low
}

/// Raw ADC endpoints for 0% and 100% soil saturation.
///
/// Immutable between calibrations; recalibrating builds a new value so the
/// zero-span check cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationRange {
    raw_dry: i32,
    raw_wet: i32,
}

impl CalibrationRange {
    /// Create a calibration range from the dry (0%) and wet (100%) raw
    /// endpoints.
    ///
    /// Rejects equal endpoints rather than letting the mapper divide by
    /// zero later.
    pub fn new(raw_dry: i32, raw_wet: i32) -> Result<Self, CalibrationError> {
        if raw_dry == raw_wet {
            return Err(CalibrationError::ZeroSpan);
        }
        Ok(Self { raw_dry, raw_wet })
    }

    /// Map a raw reading to a moisture percentage.
    ///
    /// Readings outside the calibrated span produce percentages outside
    /// [0, 100]. That behaviour is kept from the original firmware and is
    /// deliberate; callers that need a bounded value must clamp themselves.
    pub fn percent_from_raw(&self, raw: u16) -> i32 {
        map_range(raw as i32, self.raw_dry, self.raw_wet, 0, 100)
    }

    /// Map a moisture percentage back into raw sensor units.
    ///
    /// Used to precompute a raw-domain shutoff threshold once per watering
    /// cycle instead of converting every reading.
    pub fn raw_from_percent(&self, percent: i32) -> i32 {
        map_range(percent, 0, 100, self.raw_dry, self.raw_wet)
    }

    /// Dry (0%) endpoint
    pub fn raw_dry(&self) -> i32 {
        self.raw_dry
    }

    /// Wet (100%) endpoint
    pub fn raw_wet(&self) -> i32 {
        self.raw_wet
    }
}

impl Default for CalibrationRange {
    fn default() -> Self {
        Self {
            raw_dry: calibration_defaults::RAW_DRY,
            raw_wet: calibration_defaults::RAW_WET,
        }
    }
}
