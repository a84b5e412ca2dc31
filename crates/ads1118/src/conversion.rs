//! Decoding of conversion results into physical units.

use crate::FullScaleRange;

/// Temperature sensor resolution in degrees Celsius per code.
pub const CELSIUS_PER_CODE: f32 = 0.03125;

/// Interpret a raw ADC word as a two's complement code.
pub const fn adc_code(raw: u16) -> i16 {
    raw as i16
}

/// Interpret a raw temperature word: the 14-bit result is left justified, the low 2 bits padding.
pub const fn temperature_code(raw: u16) -> i16 {
    (raw as i16) >> 2
}

/// Scale an ADC code to volts for the given range. `i16::MIN` maps to exactly `-range.volts()`.
pub fn code_to_volts(code: i16, range: FullScaleRange) -> f32 {
    code as f32 * range.volts() / 32768.0
}

/// Scale an ADC code to millivolts for the given range.
pub fn code_to_millivolts(code: i16, range: FullScaleRange) -> f32 {
    code_to_volts(code, range) * 1000.0
}

/// Scale a temperature code to degrees Celsius.
pub fn code_to_celsius(code: i16) -> f32 {
    code as f32 * CELSIUS_PER_CODE
}
