use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::i2c::{Error, ErrorKind, NoAcknowledgeSource, Operation};

use crate::ads1115::{Channel, ResistanceSource, registers};
use crate::clock::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyError {
    NoAcknowledge,
    InvalidTest,
}

impl Error for DummyError {
    fn kind(&self) -> ErrorKind {
        match &self {
            DummyError::NoAcknowledge => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            DummyError::InvalidTest => ErrorKind::Other,
        }
    }
}

/// Register-level model of an ADS1115.
///
/// The conversion register lags one configuration write behind: writing the
/// config register latches the input selected by the *previous* config.
pub struct FakeAdc {
    pub address: u8,
    pub config: u16,
    pub conversion: u16,
    pub inputs: [i16; 4],
    pub config_readable: bool,
    pub config_writes: Vec<u16>,
    pub conversion_reads: usize,
}

impl FakeAdc {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            config: 0x8583,
            conversion: 0,
            inputs: [0; 4],
            config_readable: true,
            config_writes: Vec::new(),
            conversion_reads: 0,
        }
    }

    fn mux(config: u16) -> usize {
        (((config >> 12) & 0x7) as usize).saturating_sub(4)
    }

    fn write_register(&mut self, bytes: &[u8]) -> Result<(), DummyError> {
        match bytes {
            [registers::REG_POINTER_CONFIG, hi, lo] => {
                self.conversion = self.inputs[Self::mux(self.config)] as u16;
                self.config = u16::from_be_bytes([*hi, *lo]);
                self.config_writes.push(self.config);
                Ok(())
            }
            _ => Err(DummyError::InvalidTest),
        }
    }

    fn read_register(&mut self, reg: &[u8], response: &mut [u8]) -> Result<(), DummyError> {
        if response.len() != 2 {
            return Err(DummyError::InvalidTest);
        }

        let value = match reg {
            [registers::REG_POINTER_CONVERT] => {
                self.conversion_reads += 1;
                self.conversion
            }
            [registers::REG_POINTER_CONFIG] if self.config_readable => self.config,
            [registers::REG_POINTER_CONFIG] => return Err(DummyError::NoAcknowledge),
            _ => return Err(DummyError::InvalidTest),
        };

        response.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

impl embedded_hal::i2c::ErrorType for FakeAdc {
    type Error = DummyError;
}

impl embedded_hal::i2c::I2c for FakeAdc {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(DummyError::NoAcknowledge);
        }

        match operations {
            [Operation::Write(reg), Operation::Read(response)] => {
                self.read_register(reg, response)
            }
            [Operation::Write(bytes)] => self.write_register(bytes),
            // Other transactions are invalid
            _ => Err(DummyError::InvalidTest),
        }
    }
}

#[derive(Default)]
pub struct NoDelay {
    pub total_ms: u32,
}

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}

#[derive(Default)]
pub struct FakeClock {
    pub millis: Cell<u64>,
    pub epoch: Cell<u32>,
}

impl FakeClock {
    pub fn at(epoch: u32) -> Self {
        Self {
            millis: Cell::new(0),
            epoch: Cell::new(epoch),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.millis.set(self.millis.get() + ms);
    }

    pub fn advance_secs(&self, secs: u32) {
        self.epoch.set(self.epoch.get() + secs);
    }
}

impl Clock for FakeClock {
    fn millis(&self) -> u64 {
        self.millis.get()
    }

    fn epoch_seconds(&self) -> u32 {
        self.epoch.get()
    }
}

#[derive(Default)]
pub struct HeaterPin {
    pub high: bool,
    pub writes: usize,
}

impl embedded_hal::digital::ErrorType for HeaterPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for HeaterPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

/// Returns a fixed resistance per sensor channel.
#[derive(Default)]
pub struct StubReader {
    pub mq2: f32,
    pub mq7: f32,
    pub calls: usize,
}

impl ResistanceSource for StubReader {
    fn calculate_resistance(&mut self, channel: Channel) -> f32 {
        self.calls += 1;
        match channel {
            Channel::Mq2 => self.mq2,
            Channel::Mq7 => self.mq7,
            Channel::Reference => 0.0,
        }
    }
}
