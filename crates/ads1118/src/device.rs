use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, InputPin};

use crate::conversion::{adc_code, code_to_celsius, code_to_millivolts, temperature_code};
use crate::{
    Config, Error, FullScaleRange, InputSelector, Interface, NoTrace, OperatingMode, SamplingRate,
    SensorMode, Trace,
};

/// ADS1118 driver
///
/// The chip returns the result of the *previous* conversion on every exchange, while latching the
/// config word sent alongside for the next one. A blocking read therefore takes two exchanges when
/// the sensor mode changes, the first result being stale, and one exchange when it stays the same.
pub struct Ads1118<IF, D, T = NoTrace> {
    interface: IF,
    delay: D,
    trace: T,
    config: Config,
    /// Sensor mode the chip is known to be converting in. `None` until the first acquisition.
    last_mode: Option<SensorMode>,
}

impl<IF: Interface, D: DelayNs> Ads1118<IF, D> {
    /// Creates a new driver with the power-on [`Config`]. Releases CS.
    pub fn new(interface: IF, delay: D) -> Result<Self, Error<IF::Error>> {
        Self::with_trace(interface, delay, NoTrace)
    }
}

impl<IF: Interface, D: DelayNs, T: Trace> Ads1118<IF, D, T> {
    /// Creates a new driver reporting to `trace`.
    pub fn with_trace(mut interface: IF, delay: D, mut trace: T) -> Result<Self, Error<IF::Error>> {
        interface.deselect().map_err(Error::Interface)?;

        let config = Config::default();
        trace.configured(&config);

        Ok(Self {
            interface,
            delay,
            trace,
            config,
            last_mode: None,
        })
    }

    /// Sample `input` and return the raw two's complement code.
    ///
    /// Blocks for one or two conversion times of the configured rate.
    pub fn get_raw_sample(&mut self, input: InputSelector) -> Result<i16, Error<IF::Error>> {
        self.config.input = input;
        self.acquire(SensorMode::Adc).map(adc_code)
    }

    /// Sample `input` in millivolts under the configured full-scale range.
    pub fn get_millivolts(&mut self, input: InputSelector) -> Result<f32, Error<IF::Error>> {
        let code = self.get_raw_sample(input)?;
        Ok(code_to_millivolts(code, self.config.range))
    }

    /// Sample the input already held in the config, see [`Self::set_input`].
    pub fn get_millivolts_selected(&mut self) -> Result<f32, Error<IF::Error>> {
        self.get_millivolts(self.config.input)
    }

    /// Sample the internal temperature sensor and return the 14-bit code, 0.03125 °C per LSB.
    pub fn get_temperature_raw(&mut self) -> Result<i16, Error<IF::Error>> {
        self.acquire(SensorMode::Temperature).map(temperature_code)
    }

    /// Sample the internal temperature sensor in degrees Celsius.
    pub fn get_temperature(&mut self) -> Result<f32, Error<IF::Error>> {
        self.get_temperature_raw().map(code_to_celsius)
    }

    /// Read a conversion if the chip signals one is ready on `drdy` (DOUT/DRDY, active low).
    ///
    /// Never waits. The held config word is sent as is, so the input and sensor mode must have been
    /// staged beforehand; the result is decoded as an ADC code.
    pub fn try_get_raw_sample<P: InputPin>(
        &mut self,
        drdy: &mut P,
    ) -> nb::Result<i16, Error<IF::Error>> {
        // DRDY is only driven onto DOUT while selected.
        self.interface.select().map_err(Error::Interface)?;

        let ready = match drdy.is_low() {
            Ok(ready) => ready,
            Err(error) => {
                self.interface.deselect().map_err(Error::Interface)?;
                return Err(nb::Error::Other(Error::DataReady(error.kind())));
            }
        };

        if !ready {
            self.interface.deselect().map_err(Error::Interface)?;
            return Err(nb::Error::WouldBlock);
        }

        // Unknown until the exchange completes: the chip may latch the word even when it fails.
        self.last_mode = None;

        let mut buffer = self.config.to_be_bytes();
        let transferred = self.interface.transfer(&mut buffer);
        let released = self.interface.deselect();

        transferred.map_err(Error::Interface)?;
        released.map_err(Error::Interface)?;

        let raw = u16::from_be_bytes(buffer);

        self.last_mode = Some(self.config.sensor);
        self.trace.sampled(self.config.sensor, &self.config, raw);

        Ok(adc_code(raw))
    }

    /// Non-blocking [`Self::get_millivolts_selected`].
    pub fn try_get_millivolts<P: InputPin>(
        &mut self,
        drdy: &mut P,
    ) -> nb::Result<f32, Error<IF::Error>> {
        let code = self.try_get_raw_sample(drdy)?;
        Ok(code_to_millivolts(code, self.config.range))
    }

    /// Set the data rate, which also sets how long each blocking read waits.
    pub fn set_sampling_rate(&mut self, rate: SamplingRate) {
        self.config.rate = rate;
    }

    /// Set the full-scale range used for the next conversions and for scaling.
    pub fn set_full_scale_range(&mut self, range: FullScaleRange) {
        self.config.range = range;
    }

    /// Select the input used by [`Self::get_millivolts_selected`] and [`Self::try_get_raw_sample`].
    pub fn set_input(&mut self, input: InputSelector) {
        self.config.input = input;
    }

    /// Stage the sensor mode used by [`Self::try_get_raw_sample`].
    pub fn set_sensor_mode(&mut self, sensor: SensorMode) {
        self.config.sensor = sensor;
    }

    /// Set continuous or single-shot conversion.
    pub fn set_operating_mode(&mut self, mode: OperatingMode) {
        self.config.mode = mode;
    }

    /// Convert back to back.
    pub fn set_continuous_mode(&mut self) {
        self.set_operating_mode(OperatingMode::Continuous);
    }

    /// Single-shot conversion and power down.
    pub fn set_single_shot_mode(&mut self) {
        self.set_operating_mode(OperatingMode::SingleShot);
    }

    /// Enable the internal pull-up on DOUT/DRDY.
    pub fn enable_pullup(&mut self) {
        self.config.pull_up = true;
    }

    /// Disable the internal pull-up on DOUT/DRDY.
    pub fn disable_pullup(&mut self) {
        self.config.pull_up = false;
    }

    /// The config word sent on the next exchange.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Sensor mode of the last acquisition, `None` before the first.
    pub fn last_mode(&self) -> Option<SensorMode> {
        self.last_mode
    }

    /// Destroys the driver, returning its parts.
    pub fn release(self) -> (IF, D, T) {
        (self.interface, self.delay, self.trace)
    }

    fn acquire(&mut self, mode: SensorMode) -> Result<u16, Error<IF::Error>> {
        self.config.sensor = mode;

        // Cleared until this acquisition completes so a failed one is never trusted as cached.
        let cycles = if self.last_mode.take() == Some(mode) { 1 } else { 2 };

        let mut raw = 0;
        for _ in 0..cycles {
            raw = self.cycle()?;
        }

        self.last_mode = Some(mode);
        self.trace.sampled(mode, &self.config, raw);

        Ok(raw)
    }

    /// Exchange the config word for the pending result, then wait out the conversion it started.
    fn cycle(&mut self) -> Result<u16, Error<IF::Error>> {
        let raw = self
            .interface
            .exchange(self.config.to_bits())
            .map_err(Error::Interface)?;

        self.delay.delay_ms(self.config.rate.conversion_time_ms());

        Ok(raw)
    }
}
