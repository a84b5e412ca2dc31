//! One round of readings from an ADS1118, blocking or polled on DRDY.

use ads1118::{Ads1118, Error, InputSelector, Interface, SensorMode, Trace};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::Args;

/// A millivolt reading of one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub input: InputSelector,
    pub millivolts: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Round {
    pub readings: Vec<Reading>,
    pub celsius: Option<f32>,
}

/// Stage the converter settings from the command line.
pub fn configure<IF: Interface, D: DelayNs, T: Trace>(ads: &mut Ads1118<IF, D, T>, args: &Args) {
    ads.set_sampling_rate(args.rate);
    ads.set_full_scale_range(args.range);

    if args.continuous {
        ads.set_continuous_mode();
    } else {
        ads.set_single_shot_mode();
    }

    if args.no_pullup {
        ads.disable_pullup();
    } else {
        ads.enable_pullup();
    }
}

/// Read every input, then the temperature if asked, waiting out each conversion.
pub fn round<IF: Interface, D: DelayNs, T: Trace>(
    ads: &mut Ads1118<IF, D, T>,
    inputs: &[InputSelector],
    temperature: bool,
) -> Result<Round, Error<IF::Error>> {
    let readings = inputs
        .iter()
        .map(|&input| {
            ads.get_millivolts(input)
                .map(|millivolts| Reading { input, millivolts })
        })
        .collect::<Result<_, _>>()?;

    let celsius = temperature.then(|| ads.get_temperature()).transpose()?;

    Ok(Round { readings, celsius })
}

/// Like [`round`], but inputs are read when `drdy` reports a conversion.
///
/// The first conversion after staging an input still belongs to the previous one and is dropped.
pub fn polled_round<IF: Interface, D: DelayNs, T: Trace, P: InputPin>(
    ads: &mut Ads1118<IF, D, T>,
    drdy: &mut P,
    inputs: &[InputSelector],
    temperature: bool,
) -> Result<Round, Error<IF::Error>> {
    let mut readings = Vec::with_capacity(inputs.len());

    for &input in inputs {
        ads.set_sensor_mode(SensorMode::Adc);
        ads.set_input(input);

        nb::block!(ads.try_get_raw_sample(drdy))?;
        let millivolts = nb::block!(ads.try_get_millivolts(drdy))?;

        readings.push(Reading { input, millivolts });
    }

    let celsius = temperature.then(|| ads.get_temperature()).transpose()?;

    Ok(Round { readings, celsius })
}
