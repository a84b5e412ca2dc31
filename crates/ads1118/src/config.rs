//! The ADS1118 config register and its sub-fields.
//!
//! Layout, bit 15 down to bit 0:
//!
//! ```text
//! SS | MUX[2:0] | PGA[2:0] | MODE | DR[2:0] | TS_MODE | PULL_UP_EN | NOP[1:0] | RESERVED
//! ```

use core::fmt;

/// Input multiplexer selection (`MUX` bits).
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InputSelector {
    /// AIN0 - AIN1
    #[default]
    Diff0_1 = 0b000,
    /// AIN0 - AIN3
    Diff0_3 = 0b001,
    /// AIN1 - AIN3
    Diff1_3 = 0b010,
    /// AIN2 - AIN3
    Diff2_3 = 0b011,
    Ain0 = 0b100,
    Ain1 = 0b101,
    Ain2 = 0b110,
    Ain3 = 0b111,
}

impl InputSelector {
    /// Decode the low 3 bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::Diff0_1,
            0b001 => Self::Diff0_3,
            0b010 => Self::Diff1_3,
            0b011 => Self::Diff2_3,
            0b100 => Self::Ain0,
            0b101 => Self::Ain1,
            0b110 => Self::Ain2,
            _ => Self::Ain3,
        }
    }

    /// The field's register code.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// `true` for the four differential pairs, `false` for inputs measured against ground.
    pub const fn is_differential(self) -> bool {
        (self as u8) & 0b100 == 0
    }

    /// Iterate over all input selections.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self::from_bits)
    }
}

impl fmt::Display for InputSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Diff0_1 => "A0-A1",
            Self::Diff0_3 => "A0-A3",
            Self::Diff1_3 => "A1-A3",
            Self::Diff2_3 => "A2-A3",
            Self::Ain0 => "A0-GD",
            Self::Ain1 => "A1-GD",
            Self::Ain2 => "A2-GD",
            Self::Ain3 => "A3-GD",
        })
    }
}

/// Programmable gain amplifier setting (`PGA` bits), i.e. the full-scale range.
///
/// Codes `0b101`, `0b110` and `0b111` all select ±0.256 V.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FullScaleRange {
    /// ±6.144 V, 187.5 µV per LSB. Inputs must stay below VDD + 0.3 V.
    Fsr6144 = 0b000,
    /// ±4.096 V, 125 µV per LSB. Inputs must stay below VDD + 0.3 V.
    Fsr4096 = 0b001,
    /// ±2.048 V, 62.5 µV per LSB.
    Fsr2048 = 0b010,
    /// ±1.024 V, 31.25 µV per LSB.
    Fsr1024 = 0b011,
    /// ±0.512 V, 15.625 µV per LSB.
    Fsr512 = 0b100,
    /// ±0.256 V, selected by code `0b101`.
    Fsr256Code5 = 0b101,
    /// ±0.256 V, selected by code `0b110`.
    Fsr256Code6 = 0b110,
    /// ±0.256 V, 7.8125 µV per LSB.
    #[default]
    Fsr256 = 0b111,
}

impl FullScaleRange {
    const VOLTS: [f32; 8] = [6.144, 4.096, 2.048, 1.024, 0.512, 0.256, 0.256, 0.256];

    /// Decode the low 3 bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::Fsr6144,
            0b001 => Self::Fsr4096,
            0b010 => Self::Fsr2048,
            0b011 => Self::Fsr1024,
            0b100 => Self::Fsr512,
            0b101 => Self::Fsr256Code5,
            0b110 => Self::Fsr256Code6,
            _ => Self::Fsr256,
        }
    }

    /// The field's register code.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Positive full-scale voltage.
    pub fn volts(self) -> f32 {
        Self::VOLTS[self as usize]
    }

    /// Look up a range by its full-scale value in millivolts, e.g. `2048`.
    pub fn from_millivolts(millivolts: u16) -> Option<Self> {
        match millivolts {
            6144 => Some(Self::Fsr6144),
            4096 => Some(Self::Fsr4096),
            2048 => Some(Self::Fsr2048),
            1024 => Some(Self::Fsr1024),
            512 => Some(Self::Fsr512),
            256 => Some(Self::Fsr256),
            _ => None,
        }
    }
}

impl fmt::Display for FullScaleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.volts())
    }
}

/// Data rate (`DR` bits).
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SamplingRate {
    #[default]
    Sps8 = 0b000,
    Sps16 = 0b001,
    Sps32 = 0b010,
    Sps64 = 0b011,
    Sps128 = 0b100,
    Sps250 = 0b101,
    Sps475 = 0b110,
    Sps860 = 0b111,
}

impl SamplingRate {
    /// Decode the low 3 bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::Sps8,
            0b001 => Self::Sps16,
            0b010 => Self::Sps32,
            0b011 => Self::Sps64,
            0b100 => Self::Sps128,
            0b101 => Self::Sps250,
            0b110 => Self::Sps475,
            _ => Self::Sps860,
        }
    }

    /// The field's register code.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Iterate over all data rates, slowest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self::from_bits)
    }
}

impl fmt::Display for SamplingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}SPS", self.samples_per_second())
    }
}

/// Conversion mode (`MODE` bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum OperatingMode {
    /// Convert back to back.
    Continuous = 0,
    /// Convert once per start request, then power down.
    #[default]
    SingleShot = 1,
}

impl OperatingMode {
    /// Decode the `MODE` bit.
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::SingleShot
        } else {
            Self::Continuous
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Continuous => "CONT.",
            Self::SingleShot => "SSHOT",
        })
    }
}

/// What the converter is measuring (`TS_MODE` bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SensorMode {
    /// The inputs selected by [`InputSelector`].
    #[default]
    Adc = 0,
    /// The internal temperature sensor.
    Temperature = 1,
}

impl SensorMode {
    /// Decode the `TS_MODE` bit.
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Temperature
        } else {
            Self::Adc
        }
    }
}

impl fmt::Display for SensorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Adc => "ADC",
            Self::Temperature => "TEMP",
        })
    }
}

/// `NOP` bits. Only [`NoOperation::Valid`] makes the device latch the written word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum NoOperation {
    /// Write ignored.
    Ignore = 0b00,
    /// Write committed to the config register.
    #[default]
    Valid = 0b01,
    /// Write ignored.
    Ignore2 = 0b10,
    /// Write ignored.
    Ignore3 = 0b11,
}

impl NoOperation {
    /// Decode the low 2 bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Ignore,
            0b01 => Self::Valid,
            0b10 => Self::Ignore2,
            _ => Self::Ignore3,
        }
    }

    /// The field's register code.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for NoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "VALID",
            _ => "INVAL",
        })
    }
}

/// The 16-bit config register.
///
/// The reserved bit 0 is not a field: it is always written as `1` and ignored when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Start a conversion (single-shot mode only).
    pub single_start: bool,
    pub input: InputSelector,
    pub range: FullScaleRange,
    pub mode: OperatingMode,
    pub rate: SamplingRate,
    pub sensor: SensorMode,
    /// Internal pull-up on DOUT/DRDY while CS is high.
    pub pull_up: bool,
    pub no_op: NoOperation,
}

impl Config {
    const SINGLE_START: u16 = 1 << 15;
    const MUX_SHIFT: u16 = 12;
    const PGA_SHIFT: u16 = 9;
    const MODE: u16 = 1 << 8;
    const DR_SHIFT: u16 = 5;
    const TS_MODE: u16 = 1 << 4;
    const PULL_UP: u16 = 1 << 3;
    const NOP_SHIFT: u16 = 1;
    const RESERVED: u16 = 1;

    /// Pack into the register value.
    pub const fn to_bits(self) -> u16 {
        let mut bits = Self::RESERVED;

        if self.single_start {
            bits |= Self::SINGLE_START;
        }

        bits |= (self.input as u16) << Self::MUX_SHIFT;
        bits |= (self.range as u16) << Self::PGA_SHIFT;

        if let OperatingMode::SingleShot = self.mode {
            bits |= Self::MODE;
        }

        bits |= (self.rate as u16) << Self::DR_SHIFT;

        if let SensorMode::Temperature = self.sensor {
            bits |= Self::TS_MODE;
        }

        if self.pull_up {
            bits |= Self::PULL_UP;
        }

        bits |= (self.no_op as u16) << Self::NOP_SHIFT;

        bits
    }

    /// Unpack a register value. Every value decodes.
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            single_start: bits & Self::SINGLE_START != 0,
            input: InputSelector::from_bits((bits >> Self::MUX_SHIFT) as u8),
            range: FullScaleRange::from_bits((bits >> Self::PGA_SHIFT) as u8),
            mode: OperatingMode::from_bit(bits & Self::MODE != 0),
            rate: SamplingRate::from_bits((bits >> Self::DR_SHIFT) as u8),
            sensor: SensorMode::from_bit(bits & Self::TS_MODE != 0),
            pull_up: bits & Self::PULL_UP != 0,
            no_op: NoOperation::from_bits((bits >> Self::NOP_SHIFT) as u8),
        }
    }

    /// Bytes in wire order, most significant first.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.to_bits().to_be_bytes()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            single_start: true,
            input: InputSelector::Diff0_1,
            range: FullScaleRange::Fsr256,
            mode: OperatingMode::SingleShot,
            rate: SamplingRate::Sps8,
            sensor: SensorMode::Adc,
            pull_up: true,
            no_op: NoOperation::Valid,
        }
    }
}

impl From<u16> for Config {
    fn from(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl From<Config> for u16 {
    fn from(config: Config) -> Self {
        config.to_bits()
    }
}

/// One column per field, in register order:
/// `START MXSEL PGASL MODES RATES ADTMP PLLUP NOOPE`.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            if self.single_start { "START" } else { "NOINI" },
            self.input,
            self.range,
            self.mode,
            self.rate,
            self.sensor,
            if self.pull_up { "ENABL" } else { "DISAB" },
            self.no_op,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_configs() -> impl Iterator<Item = Config> {
        // Every field combination, reserved bit aside, is one of the 2^15 upper words.
        (0..=u16::MAX >> 1).map(|upper| Config::from_bits(upper << 1))
    }

    #[test]
    fn pack_unpack_is_lossless() {
        for config in all_configs() {
            assert_eq!(Config::from_bits(config.to_bits()), config);
        }
    }

    #[test]
    fn reserved_bit_always_set() {
        for config in all_configs() {
            assert_eq!(config.to_bits() & 1, 1);
        }
    }

    #[test]
    fn default_word() {
        // START, AIN0-AIN1, ±0.256 V, single shot, 8 SPS, ADC, pull-up, valid, reserved.
        assert_eq!(Config::default().to_bits(), 0b1_000_111_1_000_0_1_01_1);
        assert_eq!(Config::default().to_be_bytes(), [0x8F, 0x0B]);
    }

    #[test]
    fn field_positions() {
        let base = Config {
            single_start: false,
            input: InputSelector::Diff0_1,
            range: FullScaleRange::Fsr6144,
            mode: OperatingMode::Continuous,
            rate: SamplingRate::Sps8,
            sensor: SensorMode::Adc,
            pull_up: false,
            no_op: NoOperation::Ignore,
        };

        assert_eq!(base.to_bits(), 0x0001);

        let with = |f: fn(&mut Config)| {
            let mut config = base;
            f(&mut config);
            config.to_bits()
        };

        assert_eq!(with(|c| c.single_start = true), 0x8001);
        assert_eq!(with(|c| c.input = InputSelector::Ain3), 0x7001);
        assert_eq!(with(|c| c.range = FullScaleRange::Fsr256), 0x0E01);
        assert_eq!(with(|c| c.mode = OperatingMode::SingleShot), 0x0101);
        assert_eq!(with(|c| c.rate = SamplingRate::Sps860), 0x00E1);
        assert_eq!(with(|c| c.sensor = SensorMode::Temperature), 0x0011);
        assert_eq!(with(|c| c.pull_up = true), 0x0009);
        assert_eq!(with(|c| c.no_op = NoOperation::Ignore3), 0x0007);
    }

    #[test]
    fn reserved_bit_ignored_when_decoding() {
        assert_eq!(Config::from_bits(0x8F0A), Config::from_bits(0x8F0B));
    }

    #[test]
    fn pga_aliases_share_scale() {
        assert_eq!(FullScaleRange::from_bits(5).volts(), 0.256);
        assert_eq!(FullScaleRange::from_bits(6).volts(), 0.256);
        assert_eq!(FullScaleRange::from_bits(7).volts(), 0.256);
        assert_ne!(FullScaleRange::from_bits(5), FullScaleRange::from_bits(7));
    }

    #[test]
    fn full_scale_table() {
        assert_eq!(FullScaleRange::Fsr6144.volts(), 6.144);
        assert_eq!(FullScaleRange::Fsr4096.volts(), 4.096);
        assert_eq!(FullScaleRange::Fsr2048.volts(), 2.048);
        assert_eq!(FullScaleRange::Fsr1024.volts(), 1.024);
        assert_eq!(FullScaleRange::Fsr512.volts(), 0.512);
        assert_eq!(FullScaleRange::from_millivolts(2048), Some(FullScaleRange::Fsr2048));
        assert_eq!(FullScaleRange::from_millivolts(2000), None);
    }

    #[test]
    fn input_kinds() {
        assert_eq!(InputSelector::all().filter(|i| i.is_differential()).count(), 4);
        assert!(!InputSelector::Ain0.is_differential());
        assert!(InputSelector::Diff2_3.is_differential());
    }

    #[test]
    fn decoded_register() {
        use std::string::ToString;

        assert_eq!(
            Config::default().to_string(),
            "START A0-A1 0.256 SSHOT 8SPS ADC ENABL VALID"
        );
    }
}
