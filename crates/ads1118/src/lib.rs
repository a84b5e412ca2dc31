//! Provides a driver for a Texas Instruments ADS1118 ADC via the `embedded-hal` ecosystem.
//!
//! The ADS1118 is a 16-bit delta-sigma converter with a 4 input multiplexer, a programmable gain
//! amplifier and an internal temperature sensor, talking SPI mode 1.
//!
//! ```ignore
//! let mut ads = Ads1118::new(SpiInterface::new(spi, cs), delay)?;
//!
//! ads.set_full_scale_range(FullScaleRange::Fsr2048);
//! ads.set_sampling_rate(SamplingRate::Sps128);
//!
//! let millivolts = ads.get_millivolts(InputSelector::Ain0)?;
//! let celsius = ads.get_temperature()?;
//! ```

#![no_std]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod conversion;
mod device;
pub mod interface;
mod timing;
pub mod trace;

#[cfg(test)]
mod mock;

pub use config::{
    Config, FullScaleRange, InputSelector, NoOperation, OperatingMode, SamplingRate, SensorMode,
};
pub use device::Ads1118;
pub use interface::{Interface, SpiInterface, SpiInterfaceError};
pub use trace::{LogTrace, NoTrace, Trace};

/// Driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The serial interface failed.
    Interface(E),
    /// The data-ready line could not be read.
    DataReady(embedded_hal::digital::ErrorKind),
}
