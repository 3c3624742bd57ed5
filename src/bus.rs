use embedded_hal::i2c::I2c;
use thiserror::Error;

pub type Register = u8;

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord, Error)]
pub enum Error<I2cError> {
    #[error("converter not detected")]
    NotDetected,
    #[error(transparent)]
    I2c(#[from] I2cError),
}

impl<E> embedded_hal::i2c::Error for Error<E>
where
    E: embedded_hal::i2c::Error,
{
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match self {
            Self::I2c(err) => err.kind(),
            _ => embedded_hal::i2c::ErrorKind::Other,
        }
    }
}

/// 16-bit register access on a shared I2C bus.
pub struct RegisterBus<I2C> {
    i2c: I2C,
}

impl<I2C> RegisterBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn encode(reg: Register, value: u16) -> [u8; 3] {
        let [hi, lo] = value.to_be_bytes();
        [reg, hi, lo]
    }
}

impl<I2C: I2c> RegisterBus<I2C> {
    pub fn write_word(
        &mut self,
        addr: u8,
        reg: Register,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(addr, &Self::encode(reg, value))?;
        Ok(())
    }

    pub fn read_word(&mut self, addr: u8, reg: Register) -> Result<u16, Error<I2C::Error>> {
        let mut result = [0u8; 2];

        self.i2c.write_read(addr, &[reg], &mut result)?;

        Ok(u16::from_be_bytes(result))
    }
}
