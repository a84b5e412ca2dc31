//! The serial link to the ADS1118.
//!
//! The chip latches a config word and shifts out a conversion result in the same full-duplex exchange,
//! framed by CS. It also multiplexes DRDY onto DOUT, which is only observable while CS is asserted,
//! so the driver needs control over CS separately from the data transfer.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Capabilities the driver needs from the host.
pub trait Interface {
    type Error;

    /// Assert CS (drive it low).
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Release CS (drive it high).
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Full-duplex transfer of `words` while selected.
    fn transfer(&mut self, words: &mut [u8]) -> Result<(), Self::Error>;

    /// One CS-framed exchange: send `word` MSB first, return the 16 bits clocked in meanwhile.
    ///
    /// CS is released even when the transfer fails.
    fn exchange(&mut self, word: u16) -> Result<u16, Self::Error> {
        let mut buffer = word.to_be_bytes();

        self.select()?;
        let transferred = self.transfer(&mut buffer);
        let released = self.deselect();

        transferred?;
        released?;

        Ok(u16::from_be_bytes(buffer))
    }
}

/// Error from a [`SpiInterface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiInterfaceError<S, P> {
    /// The bus transfer failed.
    Spi(S),
    /// The chip select pin could not be driven.
    ChipSelect(P),
}

/// [`Interface`] over an `embedded-hal` SPI bus with a GPIO as chip select.
///
/// Please ensure the bus is in SPI mode 1, aka (0, 1), clocked at no more than 4 MHz.
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI: SpiBus, CS: OutputPin> SpiInterface<SPI, CS> {
    /// Wraps a bus and a chip select pin. CS is released by [`crate::Ads1118::new`].
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Give back the bus and the pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI: SpiBus, CS: OutputPin> Interface for SpiInterface<SPI, CS> {
    type Error = SpiInterfaceError<SPI::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(SpiInterfaceError::ChipSelect)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(SpiInterfaceError::ChipSelect)
    }

    fn transfer(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.spi
            .transfer_in_place(words)
            .and_then(|()| self.spi.flush())
            .map_err(SpiInterfaceError::Spi)
    }
}
