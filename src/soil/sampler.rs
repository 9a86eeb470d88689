//! Averaged moisture sampling
//!
//! One sample cycle powers the probe, lets it settle, averages a handful of
//! raw readings and converts the result to a calibrated percentage. The
//! probe is powered only for the duration of the cycle.

use crate::config::sampling::{SAMPLE_INTERVAL_MS, SAMPLE_QUANTITY, SETTLE_DELAY_MS};
use crate::soil::calibration::CalibrationRange;
use crate::soil::traits::{Delay, SoilProbe};

/// One calibrated moisture measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoistureReading {
    /// Truncating average of the raw samples
    pub raw: u16,
    /// Raw average mapped through the calibration range.
    ///
    /// Not clamped: readings outside the calibrated span map outside
    /// [0, 100].
    pub percent: i32,
}

/// Takes averaged, calibrated moisture readings from a [`SoilProbe`].
pub struct MoistureSampler {
    calibration: CalibrationRange,
}

impl MoistureSampler {
    /// Create a sampler using the given calibration range.
    pub fn new(calibration: CalibrationRange) -> Self {
        Self { calibration }
    }

    /// Replace the calibration range.
    pub fn calibrate(&mut self, calibration: CalibrationRange) {
        self.calibration = calibration;
    }

    /// Current calibration range.
    pub fn calibration(&self) -> CalibrationRange {
        self.calibration
    }

    /// Run one sampling cycle and return the calibrated reading.
    ///
    /// Powers the probe, waits for it to equalise, averages
    /// `SAMPLE_QUANTITY` raw readings taken `SAMPLE_INTERVAL_MS` apart
    /// (integer average, truncating), then powers the probe back down.
    pub fn sample<P: SoilProbe, D: Delay>(&self, probe: &mut P, delay: &mut D) -> MoistureReading {
        probe.set_power(true);
        delay.delay_ms(SETTLE_DELAY_MS);

        let mut sum: u32 = 0;
        for _ in 0..SAMPLE_QUANTITY {
            sum += u32::from(probe.read_raw());
            delay.delay_ms(SAMPLE_INTERVAL_MS);
        }

        probe.set_power(false);

        let raw = (sum / SAMPLE_QUANTITY) as u16;
        let percent = self.calibration.percent_from_raw(raw);
        log::debug!("Sample: raw {} -> {}%", raw, percent);

        MoistureReading { raw, percent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::traits::mock::{BenchEvent, TestBench};

    #[test]
    fn test_average_truncates() {
        // (801 + 802 + 803 + 804 + 806) / 5 = 4016 / 5 = 803.2 -> 803
        let mut bench = TestBench::new(&[801, 802, 803, 804, 806], &[]);
        let sampler = MoistureSampler::new(CalibrationRange::default());

        let reading = sampler.sample(&mut bench.probe, &mut bench.delay);
        assert_eq!(reading.raw, 803);
    }

    #[test]
    fn test_percent_from_calibration() {
        let mut bench = TestBench::new(&[800; 5], &[]);
        let sampler = MoistureSampler::new(CalibrationRange::default());

        let reading = sampler.sample(&mut bench.probe, &mut bench.delay);
        assert_eq!(reading.raw, 800);
        assert_eq!(reading.percent, 15);
    }

    #[test]
    fn test_probe_powered_only_while_sampling() {
        let mut bench = TestBench::new(&[500; 5], &[]);
        let sampler = MoistureSampler::new(CalibrationRange::default());

        sampler.sample(&mut bench.probe, &mut bench.delay);

        let events = bench.events();
        assert_eq!(events.first(), Some(&BenchEvent::PowerSet(true)));
        assert_eq!(events.last(), Some(&BenchEvent::PowerSet(false)));
        assert!(!bench.power_on());
    }

    #[test]
    fn test_settle_and_sample_timing() {
        let mut bench = TestBench::new(&[500; 5], &[]);
        let sampler = MoistureSampler::new(CalibrationRange::default());

        sampler.sample(&mut bench.probe, &mut bench.delay);

        // 250ms settle + 5 * 50ms between readings
        assert_eq!(bench.total_delay_ms(), 250 + 5 * 50);

        // Settle delay comes before the first reading
        let events = bench.events();
        assert!(matches!(events[1], BenchEvent::DelayMs { ms: 250, .. }));
        assert!(matches!(events[2], BenchEvent::RawRead { value: 500, .. }));
    }

    #[test]
    fn test_five_readings_taken() {
        let mut bench = TestBench::new(&[500; 5], &[]);
        let sampler = MoistureSampler::new(CalibrationRange::default());

        sampler.sample(&mut bench.probe, &mut bench.delay);

        let reads = bench
            .events()
            .iter()
            .filter(|e| matches!(e, BenchEvent::RawRead { .. }))
            .count();
        assert_eq!(reads, 5);
    }
}
