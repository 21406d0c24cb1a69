use core::fmt;

use super::registers::{self, Register};

/// A bit range inside a control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    pub register: Register,
    mask: u8,
    shift: u8,
}

impl Field {
    const fn new(register: Register, mask: u8, shift: u8) -> Self {
        Self {
            register,
            mask,
            shift,
        }
    }

    /// Replaces this field's bits in `prior`, leaving all other bits as they were.
    pub fn insert(self, prior: u8, value: u8) -> u8 {
        (prior & !self.mask) | ((value << self.shift) & self.mask)
    }

    pub fn extract(self, raw: u8) -> u8 {
        (raw & self.mask) >> self.shift
    }
}

pub(crate) const POWER_MODE: Field = Field::new(registers::CTRL_MEAS, 0b0000_0011, 0);
pub(crate) const PRESSURE_OVERSAMPLING: Field = Field::new(registers::CTRL_MEAS, 0b0001_1100, 2);
pub(crate) const TEMPERATURE_OVERSAMPLING: Field =
    Field::new(registers::CTRL_MEAS, 0b1110_0000, 5);
pub(crate) const HUMIDITY_OVERSAMPLING: Field = Field::new(registers::CTRL_HUM, 0b0000_0111, 0);
pub(crate) const FILTER: Field = Field::new(registers::CONFIG, 0b0001_1100, 2);
pub(crate) const NEW_DATA: Field = Field::new(registers::MEAS_STATUS_0, 0b1000_0000, 7);

/// Oversampling settings used to control noise reduction.
///
/// Higher rates lower the noise but lengthen each conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Oversampling {
    /// No measurement; the output register reads 0x8000.
    Skipped = 0b000,
    #[default]
    X1 = 0b001,
    X2 = 0b010,
    X4 = 0b011,
    X8 = 0b100,
    X16 = 0b101,
}

impl Oversampling {
    /// Decodes a 3-bit register value. The chip treats 5, 6 and 7 all as x16.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Oversampling::Skipped,
            1 => Oversampling::X1,
            2 => Oversampling::X2,
            3 => Oversampling::X4,
            4 => Oversampling::X8,
            _ => Oversampling::X16,
        }
    }
}

impl fmt::Display for Oversampling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Sensor power mode, section 3.1 of the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum PowerMode {
    /// No measurements are performed. Minimal power consumption.
    #[default]
    Sleep = 0b00,
    /// A single measurement cycle is performed, after which the sensor
    /// returns to [`PowerMode::Sleep`] on its own.
    Forced = 0b01,
}

impl PowerMode {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(PowerMode::Sleep),
            0b01 => Some(PowerMode::Forced),
            _ => None,
        }
    }
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// IIR filter coefficient applied to temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Filter {
    #[default]
    Off = 0,
    C1 = 1,
    C3 = 2,
    C7 = 3,
    C15 = 4,
    C31 = 5,
    C63 = 6,
    C127 = 7,
}

/// Measurement settings applied in one go by [`super::Bme680::configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub humidity_oversampling: Oversampling,
    pub filter: Filter,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature_oversampling(mut self, level: Oversampling) -> Self {
        self.temperature_oversampling = level;
        self
    }

    pub fn pressure_oversampling(mut self, level: Oversampling) -> Self {
        self.pressure_oversampling = level;
        self
    }

    pub fn humidity_oversampling(mut self, level: Oversampling) -> Self {
        self.humidity_oversampling = level;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}
