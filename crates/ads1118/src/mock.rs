//! Test doubles for the `embedded-hal` traits that record what the driver does to the bus.

use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, SpiBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl spi::Error for MockError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Select,
    Deselect,
    Transfer { sent: u8, received: u8 },
    Flush,
    ReadyPoll,
    WaitMs(u32),
    WaitUs(u32),
    WaitNs(u32),
}

/// Shared, ordered record of bus activity.
#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.borrow_mut())
    }
}

pub struct MockSpi {
    log: Log,
    responses: VecDeque<u8>,
    /// Bytes left to shift before every transfer fails.
    fail_after: Option<usize>,
}

impl MockSpi {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            responses: VecDeque::new(),
            fail_after: None,
        }
    }

    /// Queue bytes the "chip" shifts out, in order. Zeroes once exhausted.
    pub fn respond(&mut self, bytes: &[u8]) {
        self.responses.extend(bytes);
    }

    pub fn fail(&mut self) {
        self.fail_after(0);
    }

    /// Shift `bytes` more bytes, then fail.
    pub fn fail_after(&mut self, bytes: usize) {
        self.fail_after = Some(bytes);
    }

    fn shift(&mut self, sent: u8) -> Result<u8, MockError> {
        match self.fail_after {
            Some(0) => return Err(MockError),
            Some(ref mut left) => *left -= 1,
            None => {}
        }

        let received = self.responses.pop_front().unwrap_or(0);
        self.log.push(Event::Transfer { sent, received });
        Ok(received)
    }
}

impl spi::ErrorType for MockSpi {
    type Error = MockError;
}

impl SpiBus for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words {
            *word = self.shift(0)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            self.shift(word)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        for (index, &word) in write.iter().enumerate() {
            let received = self.shift(word)?;
            if let Some(slot) = read.get_mut(index) {
                *slot = received;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words {
            *word = self.shift(*word)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Flush);
        Ok(())
    }
}

/// Chip select.
pub struct MockPin {
    log: Log,
    /// Successful releases left before releasing fails.
    release_fails_after: Option<usize>,
}

impl MockPin {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            release_fails_after: None,
        }
    }

    /// Release CS `releases` more times, then fail to.
    pub fn fail_release_after(mut self, releases: usize) -> Self {
        self.release_fails_after = Some(releases);
        self
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Select);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        match self.release_fails_after {
            Some(0) => return Err(MockError),
            Some(ref mut left) => *left -= 1,
            None => {}
        }

        self.log.push(Event::Deselect);
        Ok(())
    }
}

/// Active-low data-ready line.
pub struct MockReady {
    log: Log,
    pub ready: bool,
    pub fail: bool,
}

impl MockReady {
    pub fn new(log: &Log, ready: bool) -> Self {
        Self {
            log: log.clone(),
            ready,
            fail: false,
        }
    }
}

impl digital::ErrorType for MockReady {
    type Error = MockError;
}

impl InputPin for MockReady {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.log.push(Event::ReadyPoll);

        if self.fail {
            return Err(MockError);
        }

        Ok(self.ready)
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::WaitNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::WaitUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::WaitMs(ms));
    }
}
