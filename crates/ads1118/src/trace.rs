//! Hooks for observing the register traffic of a driver.

use crate::{Config, SensorMode};

/// Observer invoked by [`crate::Ads1118`] at fixed points of its protocol.
pub trait Trace {
    /// The driver was initialised with `config`.
    fn configured(&mut self, _config: &Config) {}

    /// An acquisition in `mode` completed; `raw` is the undecoded word clocked out under `config`.
    fn sampled(&mut self, _mode: SensorMode, _config: &Config, _raw: u16) {}
}

/// Observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Trace for NoTrace {}

/// Emits each event as a `debug` level [`log`] record with the decoded register.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn configured(&mut self, config: &Config) {
        log::debug!("configured {:#06x}: {}", config.to_bits(), config);
    }

    fn sampled(&mut self, mode: SensorMode, config: &Config, raw: u16) {
        log::debug!(
            "{} sample {:#06x} under {:#06x}: {}",
            mode,
            raw,
            config.to_bits(),
            config
        );
    }
}

impl<T: Trace + ?Sized> Trace for &mut T {
    fn configured(&mut self, config: &Config) {
        (**self).configured(config)
    }

    fn sampled(&mut self, mode: SensorMode, config: &Config, raw: u16) {
        (**self).sampled(mode, config, raw)
    }
}
