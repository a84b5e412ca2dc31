use ads1118::{FullScaleRange, InputSelector, SamplingRate};
use clap::Parser;

/// Highest SCLK the ADS1118 tolerates.
pub const MAX_CLOCK_HZ: u32 = 4_000_000;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SPI bus the ADS1118 is wired to
    #[arg(long, default_value_t = 0)]
    pub bus: u8,
    /// SCLK frequency in Hz
    #[arg(long, default_value_t = 2_000_000, value_parser = parse_clock)]
    pub clock: u32,
    /// BCM number of the GPIO used as chip select
    #[arg(long, default_value_t = 25)]
    pub cs: u8,
    /// BCM number of a GPIO wired to DOUT/DRDY. Polls for data ready instead of waiting
    #[arg(long)]
    pub drdy: Option<u8>,
    /// Samples per second: 8, 16, 32, 64, 128, 250, 475 or 860
    #[arg(long, default_value = "128", value_parser = parse_rate)]
    pub rate: SamplingRate,
    /// Full-scale range in millivolts: 6144, 4096, 2048, 1024, 512 or 256
    #[arg(long, default_value = "2048", value_parser = parse_range)]
    pub range: FullScaleRange,
    /// Input to sample, may be repeated: a0-a1, a0-a3, a1-a3, a2-a3, a0, a1, a2 or a3
    #[arg(short, long = "input", default_value = "a0", value_parser = parse_input)]
    pub inputs: Vec<InputSelector>,
    /// Also sample the internal temperature sensor
    #[arg(short, long)]
    pub temperature: bool,
    /// Convert continuously instead of single-shot
    #[arg(long)]
    pub continuous: bool,
    /// Disable the internal pull-up on DOUT/DRDY
    #[arg(long)]
    pub no_pullup: bool,
    /// Milliseconds between rounds
    #[arg(long, default_value_t = 500)]
    pub interval: u64,
    /// Stop after this many rounds
    #[arg(long)]
    pub count: Option<u64>,
    /// Print all log messages and register traces
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse_clock(s: &str) -> Result<u32, String> {
    let hz: u32 = s.parse().map_err(|_| format!("`{s}` is not a frequency in Hz"))?;

    if hz == 0 || hz > MAX_CLOCK_HZ {
        return Err(format!("clock must be between 1 and {MAX_CLOCK_HZ} Hz"));
    }

    Ok(hz)
}

pub fn parse_rate(s: &str) -> Result<SamplingRate, String> {
    s.parse()
        .ok()
        .and_then(SamplingRate::from_samples_per_second)
        .ok_or_else(|| format!("`{s}` is not a supported data rate"))
}

pub fn parse_range(s: &str) -> Result<FullScaleRange, String> {
    s.parse()
        .ok()
        .and_then(FullScaleRange::from_millivolts)
        .ok_or_else(|| format!("`{s}` is not a supported full-scale range"))
}

pub fn parse_input(s: &str) -> Result<InputSelector, String> {
    match s.to_ascii_lowercase().as_str() {
        "a0-a1" => Ok(InputSelector::Diff0_1),
        "a0-a3" => Ok(InputSelector::Diff0_3),
        "a1-a3" => Ok(InputSelector::Diff1_3),
        "a2-a3" => Ok(InputSelector::Diff2_3),
        "a0" => Ok(InputSelector::Ain0),
        "a1" => Ok(InputSelector::Ain1),
        "a2" => Ok(InputSelector::Ain2),
        "a3" => Ok(InputSelector::Ain3),
        _ => Err(format!("`{s}` is not an input")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["pi"]).unwrap();

        assert_eq!(args.clock, 2_000_000);
        assert_eq!(args.rate, SamplingRate::Sps128);
        assert_eq!(args.range, FullScaleRange::Fsr2048);
        assert_eq!(args.inputs, vec![InputSelector::Ain0]);
        assert_eq!(args.drdy, None);
        assert!(!args.temperature);
    }

    #[test]
    fn repeated_inputs() {
        let args = Args::try_parse_from(["pi", "-i", "a0-a1", "--input", "A3", "-t"]).unwrap();

        assert_eq!(args.inputs, vec![InputSelector::Diff0_1, InputSelector::Ain3]);
        assert!(args.temperature);
    }

    #[test]
    fn rejects_unsupported_values() {
        assert!(Args::try_parse_from(["pi", "--clock", "8000000"]).is_err());
        assert!(Args::try_parse_from(["pi", "--rate", "100"]).is_err());
        assert!(Args::try_parse_from(["pi", "--range", "5000"]).is_err());
        assert!(Args::try_parse_from(["pi", "-i", "a4"]).is_err());
    }

    #[test]
    fn parses_every_rate() {
        for rate in SamplingRate::all() {
            assert_eq!(parse_rate(&rate.samples_per_second().to_string()), Ok(rate));
        }
    }
}
