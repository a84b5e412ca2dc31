use std::fmt::Debug;
use std::thread;
use std::time::Duration;

use ads1118::{Ads1118, LogTrace, SpiInterface};
use adsmon::{sampler, Args};
use anyhow::{anyhow, bail};
use clap::Parser;
use rppal::gpio::Gpio;
use rppal::hal::Delay;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
use tracing::{info, Level};

fn bus_error<E: Debug>(error: ads1118::Error<E>) -> anyhow::Error {
    anyhow!("ADS1118 communication failed: {error:?}")
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let bus = match args.bus {
        0 => Bus::Spi0,
        1 => Bus::Spi1,
        2 => Bus::Spi2,
        3 => Bus::Spi3,
        4 => Bus::Spi4,
        5 => Bus::Spi5,
        6 => Bus::Spi6,
        other => bail!("There is no SPI bus {other}"),
    };

    let gpio = Gpio::new()?;

    // CS is driven from a plain GPIO so it can stay asserted while DRDY is sampled.
    let spi = Spi::new(bus, SlaveSelect::Ss0, args.clock, Mode::Mode1)?;
    let cs = gpio.get(args.cs)?.into_output_high();

    let mut drdy = match args.drdy {
        Some(pin) => Some(gpio.get(pin)?.into_input()),
        None => None,
    };

    let mut ads =
        Ads1118::with_trace(SpiInterface::new(spi, cs), Delay::new(), LogTrace).map_err(bus_error)?;

    sampler::configure(&mut ads, &args);

    info!(
        "Sampling {:?} at {} every {} ms",
        args.inputs, args.rate, args.interval
    );

    let mut rounds = 0;

    while args.count.map_or(true, |count| rounds < count) {
        let round = match drdy.as_mut() {
            Some(drdy) => sampler::polled_round(&mut ads, drdy, &args.inputs, args.temperature),
            None => sampler::round(&mut ads, &args.inputs, args.temperature),
        }
        .map_err(bus_error)?;

        for reading in &round.readings {
            info!("{}: {:.4} mV", reading.input, reading.millivolts);
        }

        if let Some(celsius) = round.celsius {
            info!("Temperature: {celsius:.3} °C");
        }

        rounds += 1;

        thread::sleep(Duration::from_millis(args.interval));
    }

    Ok(())
}
