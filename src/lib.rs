//! Periodically sample an ADS1118 and log the readings.

pub mod args;
pub mod sampler;

pub use args::Args;
