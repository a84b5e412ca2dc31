//! Conversion timing for each data rate.

use crate::SamplingRate;

/// Conversion time in milliseconds, indexed by `DR` code, rounded up.
const CONVERSION_TIME_MS: [u32; 8] = [125, 63, 32, 16, 8, 4, 3, 2];

const SAMPLES_PER_SECOND: [u16; 8] = [8, 16, 32, 64, 128, 250, 475, 860];

impl SamplingRate {
    /// Minimum wait after starting a conversion before its result can be clocked out.
    pub const fn conversion_time_ms(self) -> u32 {
        CONVERSION_TIME_MS[self as usize]
    }

    /// Nominal output data rate.
    pub const fn samples_per_second(self) -> u16 {
        SAMPLES_PER_SECOND[self as usize]
    }

    /// Look up a rate by its nominal samples per second, e.g. `128`.
    pub fn from_samples_per_second(sps: u16) -> Option<Self> {
        Self::all().find(|rate| rate.samples_per_second() == sps)
    }
}
