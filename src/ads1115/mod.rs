use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{debug, trace};

use crate::bus::{Error, RegisterBus};

pub mod registers;

use registers::*;

/// Candidate addresses selected by the ADDR pin strapping.
pub const ADDRESSES: [u8; 4] = [0x48, 0x49, 0x4a, 0x4b];

/// Sensors load resistance, kOhm.
pub const LOAD_RESISTANCE_KOHM: f32 = 10.0;

/// Conversion delay, ms.
pub const CONVERSION_DELAY_MS: u32 = 8;

/// Physical ADS1115 inputs as wired on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Mq2,
    Mq7,
    Reference,
}

impl Channel {
    pub fn index(self) -> u8 {
        match self {
            Channel::Mq2 => 0,
            Channel::Mq7 => 1,
            Channel::Reference => 2,
        }
    }
}

/// Source of sensor resistance readings in kOhm.
///
/// Non-positive values mean there is no usable reading this time.
/// Implementations share one converter, so calls must not overlap.
pub trait ResistanceSource {
    fn calculate_resistance(&mut self, channel: Channel) -> f32;
}

impl<T: ResistanceSource + ?Sized> ResistanceSource for &mut T {
    fn calculate_resistance(&mut self, channel: Channel) -> f32 {
        (**self).calculate_resistance(channel)
    }
}

pub struct Ads1115<I2C, D> {
    bus: RegisterBus<I2C>,
    delay: D,
    address: u8,
    reference: i16,
}

impl<I2C, D> Ads1115<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            bus: RegisterBus::new(i2c),
            delay,
            address: 0,
            reference: 0,
        }
    }

    pub fn initialized(&self) -> bool {
        self.address != 0
    }

    /// Detected bus address, 0 until detection succeeds.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reference input conversion, 0 until first sampled.
    pub fn reference(&self) -> i16 {
        self.reference
    }

    pub fn release(self) -> (I2C, D) {
        (self.bus.release(), self.delay)
    }

    fn config(mux: u8, mode: u16) -> u16 {
        mode | CONFIG_CQUE_NONE
            | CONFIG_CLAT_NONLAT
            | CONFIG_PGA_4_096V
            | CONFIG_CPOL_ACTVLOW
            | CONFIG_CMODE_TRAD
            | CONFIG_DR_860SPS
            | (CONFIG_MUX_SINGLE_0 + CONFIG_MUX_STEP * mux as u16)
    }
}

impl<I2C: I2c, D: DelayNs> Ads1115<I2C, D> {
    /// Probes the candidate addresses and adopts the first one that answers.
    /// Returns 0 if nothing answers; retry on a later tick.
    pub fn detect_address(&mut self) -> u8 {
        if self.address != 0 {
            return self.address;
        }

        for (index, &address) in ADDRESSES.iter().enumerate() {
            if self.probe(address).is_err() {
                continue;
            }

            self.address = address;
            if let Err(err) = self.start_comparator(index as u8, CONFIG_MODE_CONTIN) {
                trace!("MQX: ADS1115 failed to arm continuous mode: {:?}", err);
            }
            debug!("MQX: ADS1115 found at 0x{:02x}", address);
            break;
        }

        self.address
    }

    fn probe(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        self.bus.read_word(address, REG_POINTER_CONVERT)?;
        self.bus.read_word(address, REG_POINTER_CONFIG)?;
        Ok(())
    }

    fn start_comparator(&mut self, mux: u8, mode: u16) -> Result<(), Error<I2C::Error>> {
        if self.address == 0 {
            return Err(Error::NotDetected);
        }
        self.bus
            .write_word(self.address, REG_POINTER_CONFIG, Self::config(mux, mode))
    }

    /// Single-shot conversion on `channel`.
    ///
    /// The conversion register still holds the previous result right after a
    /// mode switch, so the first value is discarded and the channel is read
    /// again in continuous mode.
    pub fn conversion(&mut self, channel: Channel) -> Result<i16, Error<I2C::Error>> {
        let mux = channel.index();

        self.start_comparator(mux, CONFIG_MODE_SINGLE)?;
        self.delay.delay_ms(CONVERSION_DELAY_MS);
        self.bus.read_word(self.address, REG_POINTER_CONVERT)?;

        self.start_comparator(mux, CONFIG_MODE_CONTIN)?;
        self.delay.delay_ms(CONVERSION_DELAY_MS);
        let raw = self.bus.read_word(self.address, REG_POINTER_CONVERT)?;

        Ok(raw as i16)
    }

    fn try_resistance(&mut self, channel: Channel) -> Result<f32, Error<I2C::Error>> {
        let raw = self.conversion(channel)?;
        if raw < 1 {
            return Ok(0.0);
        }

        // Supply is stable after boot, sample the reference once.
        if self.reference == 0 {
            self.reference = self.conversion(Channel::Reference)?;
        }

        let raw = raw as f32;
        Ok(LOAD_RESISTANCE_KOHM * (self.reference as f32 - raw) / raw)
    }
}

impl<I2C: I2c, D: DelayNs> ResistanceSource for Ads1115<I2C, D> {
    /// Sensor resistance in kOhm, 0 when the conversion failed or read nothing.
    fn calculate_resistance(&mut self, channel: Channel) -> f32 {
        match self.try_resistance(channel) {
            Ok(resistance) => resistance,
            Err(err) => {
                trace!("MQX: conversion on {:?} failed: {:?}", channel, err);
                0.0
            }
        }
    }
}
