use embedded_hal::i2c::I2c;
use thiserror::Error;

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord, Error)]
pub enum Error<BusError> {
    #[error("no transport supplied")]
    MissingTransport,
    #[error("device address {0:#04x} is out of range, expected 0x76 or 0x77")]
    AddressOutOfRange(u8),
    #[error("chip id {found:#04x} does not match expected {expected:#04x}")]
    ChipIdMismatch { found: u8, expected: u8 },
    #[error("invalid response")]
    InvalidResponse,
    #[error("driver has been disposed")]
    Disposed,
    #[error(transparent)]
    Transport(#[from] BusError),
}

impl<E> embedded_hal::i2c::Error for Error<E>
where
    E: embedded_hal::i2c::Error,
{
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match self {
            Self::Transport(err) => err.kind(),
            _ => embedded_hal::i2c::ErrorKind::Other,
        }
    }
}

/// A channel to a single device on a register-addressed bus.
///
/// Writes conventionally start with the target register address; reads
/// return data from whatever register the previous write selected.
pub trait Transport {
    type Error;

    /// Bus address of the device this channel talks to.
    fn address(&self) -> u8;

    /// Fills `buffer` from the device. Blocks until all bytes arrive.
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.read(&mut buffer)?;
        Ok(buffer[0])
    }

    fn write(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.write(&[value])
    }

    /// Gives the underlying resource back. Calling it more than once must be harmless.
    fn release(&mut self) {}
}

/// [`Transport`] over an `embedded-hal` I2C bus.
#[derive(Debug)]
pub struct I2cDevice<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C> I2cDevice<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cDevice<I2C> {
    type Error = I2C::Error;

    fn address(&self) -> u8 {
        self.addr
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(self.addr, buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.addr, buffer)
    }
}
