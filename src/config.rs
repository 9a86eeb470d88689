//! Hardware and protocol configuration constants for the sensing node

/// Soil sensor pins
pub mod soil_pins {
    /// Power rail control for the capacitive probe
    pub const SENSOR_PWR: u8 = 5;
    /// Analog data pin (A0 on the pro mini)
    pub const SENSOR_DATA: u8 = 14;
    pub const PUMP_PWR: u8 = 3;
    /// Float sensor, pullup input, pulled low on overflow
    pub const FLOAT_SENSOR: u8 = 4;
}

/// Default sensor calibration
///
/// Raw ADC endpoints for 0% and 100% saturation. The raw signal *decreases*
/// as the soil becomes wetter, so the dry endpoint is numerically larger.
pub mod calibration_defaults {
    pub const RAW_DRY: i32 = 855;
    pub const RAW_WET: i32 = 490;
}

/// Default auto-water thresholds
pub mod autowater_defaults {
    /// Moisture percentage at which the pump turns on
    pub const START_PERCENT: i32 = 35;
    /// Moisture percentage at which the pump turns off
    pub const SHUTOFF_PERCENT: i32 = 85;
}

/// Sampling parameters
pub mod sampling {
    /// Number of raw readings averaged per sample
    pub const SAMPLE_QUANTITY: u32 = 5;

    /// Settle time after powering the probe, for the sensor to equalise
    pub const SETTLE_DELAY_MS: u32 = 250;

    /// Delay between consecutive raw readings
    pub const SAMPLE_INTERVAL_MS: u32 = 50;
}

/// Watering loop parameters
pub mod watering {
    /// Poll interval while paused on an active overflow condition
    pub const OVERFLOW_POLL_MS: u32 = 500;

    /// Delay between raw readings while the pump is running
    pub const RAW_POLL_MS: u32 = 50;
}

/// Telemetry protocol constants
pub mod protocol {
    /// Fixed wire size of a plant packet
    pub const PACKET_LEN: usize = 16;

    /// Fixed name field size (bytes 0-14, NUL padded)
    pub const NAME_LEN: usize = 15;

    /// Byte offset of the moisture percentage
    pub const PERCENT_OFFSET: usize = 15;

    /// Frame delimiter for COBS encoding on serial links
    pub const FRAME_DELIMITER: u8 = 0x00;

    /// Maximum size of a COBS-encoded telemetry frame
    pub const MAX_FRAME_SIZE: usize = 32;
}

/// Transport link parameters
pub mod transport {
    /// Bounded number of link bring-up attempts
    pub const INIT_ATTEMPTS: u32 = 3;

    /// Delay between bring-up attempts
    pub const INIT_RETRY_DELAY_MS: u32 = 50;
}
