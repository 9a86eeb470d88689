//! Hardware traits for the soil sensing and watering path
//!
//! These traits define the interface to the probe, pump and timing
//! primitives, allowing the real pin drivers to be swapped with mocks for
//! testing. All operations are synchronous: the node runs a single
//! cooperative thread of control (sample, decide, transmit, sleep) and the
//! watering loop deliberately blocks it.

/// Soil probe interface: analog moisture input, power rail control and the
/// overflow float sensor.
///
/// Raw reads are assumed to always produce a value; the underlying ADC
/// primitive has no failure path on the target boards.
pub trait SoilProbe {
    /// Take one raw analog reading from the moisture sensor.
    fn read_raw(&mut self) -> u16;

    /// Switch the probe's power rail.
    ///
    /// The probe is powered only while sampling; leaving a capacitive probe
    /// energised corrodes it through electrolysis.
    fn set_power(&mut self, on: bool);

    /// Read the overflow float sensor. Returns true while the pot is
    /// overflowing.
    ///
    /// The physical sensor is a normally-open switch on a pullup input,
    /// pulled low when floating; adapters translate that to a plain bool.
    fn read_overflow(&mut self) -> bool;
}

/// Water pump output.
pub trait Pump {
    /// Energise or de-energise the pump power line.
    fn set_pump(&mut self, on: bool);
}

/// Blocking delay primitive.
pub trait Delay {
    /// Block the current (only) thread of control for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
