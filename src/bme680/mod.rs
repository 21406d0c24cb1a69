use core::fmt;
use log::{debug, trace};

use crate::bus::{Error, Transport};

pub mod calibration;
pub mod registers;
pub mod settings;

use calibration::CalibrationData;
use registers::Register;
use settings::{Config, Field, Filter, Oversampling, PowerMode};

/// Bus address with SDO tied to GND.
pub const DEFAULT_ADDRESS: u8 = 0x76;
/// Bus address with SDO tied to VDDIO.
pub const SECONDARY_ADDRESS: u8 = 0x77;
/// Chip id shared by the BME68x product family.
pub const CHIP_ID: u8 = 0x61;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub temperature_celsius: f64,
    pub pressure_pascals: f64,
    pub humidity_percent: f64,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:.2}°C, {:.2} hPa, {:.1}% RH",
            self.temperature_celsius,
            self.pressure_pascals / 100.0,
            self.humidity_percent
        )
    }
}

/// BME680 temperature, pressure and humidity sensor.
///
/// The driver owns its transport until [`Bme680::dispose`] is called or the
/// driver is dropped, whichever comes first; the transport is released exactly once.
#[derive(Debug)]
pub struct Bme680<T: Transport> {
    transport: Option<T>,
    calibration: CalibrationData,
}

impl<T: Transport> Bme680<T> {
    /// Checks the device address and chip id, then loads the calibration data.
    pub fn new(transport: T) -> Result<Self, Error<T::Error>> {
        Self::from_option(Some(transport))
    }

    /// Like [`Bme680::new`], but reports a missing transport as
    /// [`Error::MissingTransport`].
    ///
    /// Any transport that was passed in is released if construction fails.
    pub fn from_option(transport: Option<T>) -> Result<Self, Error<T::Error>> {
        let transport = transport.ok_or(Error::MissingTransport)?;
        let address = transport.address();

        let mut sensor = Self {
            transport: Some(transport),
            calibration: CalibrationData::default(),
        };

        // Only the two strap addresses lie in this range.
        if !(DEFAULT_ADDRESS..=SECONDARY_ADDRESS).contains(&address) {
            return Err(Error::AddressOutOfRange(address));
        }

        let chip_id = sensor.read8(registers::ID)?;
        if chip_id != CHIP_ID {
            return Err(Error::ChipIdMismatch {
                found: chip_id,
                expected: CHIP_ID,
            });
        }

        sensor.calibration = sensor.read_calibration()?;
        debug!("bme680 at {:#04x}: calibration loaded", address);

        Ok(sensor)
    }

    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration
    }

    /// Releases the transport. Every later operation fails with
    /// [`Error::Disposed`]; disposing again does nothing.
    pub fn dispose(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.release();
            debug!("bme680 at {:#04x}: released", transport.address());
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.transport.is_none()
    }

    /// Reads the chip id register. A live BME680 always answers [`CHIP_ID`].
    pub fn chip_id(&mut self) -> Result<u8, Error<T::Error>> {
        self.read8(registers::ID)
    }

    /// Triggers a soft reset; all registers return to their power-on values.
    pub fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.write(registers::RESET, registers::SOFT_RESET_COMMAND)?;
        debug!("soft reset");
        Ok(())
    }

    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<T::Error>> {
        debug!("power mode {}", mode);
        self.update(settings::POWER_MODE, mode as u8)
    }

    /// Reads the power mode back. The sensor drops to [`PowerMode::Sleep`]
    /// by itself once a forced measurement completes.
    pub fn power_mode(&mut self) -> Result<PowerMode, Error<T::Error>> {
        let bits = self.field(settings::POWER_MODE)?;
        PowerMode::from_bits(bits).ok_or(Error::InvalidResponse)
    }

    pub fn set_temperature_oversampling(
        &mut self,
        level: Oversampling,
    ) -> Result<(), Error<T::Error>> {
        debug!("temperature oversampling {}", level);
        self.update(settings::TEMPERATURE_OVERSAMPLING, level as u8)
    }

    pub fn set_pressure_oversampling(
        &mut self,
        level: Oversampling,
    ) -> Result<(), Error<T::Error>> {
        debug!("pressure oversampling {}", level);
        self.update(settings::PRESSURE_OVERSAMPLING, level as u8)
    }

    pub fn set_humidity_oversampling(
        &mut self,
        level: Oversampling,
    ) -> Result<(), Error<T::Error>> {
        debug!("humidity oversampling {}", level);
        self.update(settings::HUMIDITY_OVERSAMPLING, level as u8)
    }

    pub fn temperature_oversampling(&mut self) -> Result<Oversampling, Error<T::Error>> {
        Ok(Oversampling::from_u8(self.field(settings::TEMPERATURE_OVERSAMPLING)?))
    }

    pub fn pressure_oversampling(&mut self) -> Result<Oversampling, Error<T::Error>> {
        Ok(Oversampling::from_u8(self.field(settings::PRESSURE_OVERSAMPLING)?))
    }

    pub fn humidity_oversampling(&mut self) -> Result<Oversampling, Error<T::Error>> {
        Ok(Oversampling::from_u8(self.field(settings::HUMIDITY_OVERSAMPLING)?))
    }

    pub fn set_filter(&mut self, filter: Filter) -> Result<(), Error<T::Error>> {
        debug!("iir filter {:?}", filter);
        self.update(settings::FILTER, filter as u8)
    }

    /// Applies every setting in `config`. The power mode is left untouched.
    pub fn configure(&mut self, config: &Config) -> Result<(), Error<T::Error>> {
        self.set_humidity_oversampling(config.humidity_oversampling)?;
        self.set_temperature_oversampling(config.temperature_oversampling)?;
        self.set_pressure_oversampling(config.pressure_oversampling)?;
        self.set_filter(config.filter)
    }

    /// Returns true once a measurement has finished and its results have not been read yet.
    pub fn has_new_data(&mut self) -> Result<bool, Error<T::Error>> {
        Ok(self.field(settings::NEW_DATA)? == 1)
    }

    pub fn read_temperature_celsius(&mut self) -> Result<f64, Error<T::Error>> {
        let adc = self.read_adc20(
            registers::TEMP_MSB,
            registers::TEMP_LSB,
            registers::TEMP_XLSB,
        )?;
        Ok(self.calibration.temperature(adc))
    }

    /// Reads the temperature as well, since the pressure formula depends on it.
    pub fn read_pressure_pascals(&mut self) -> Result<f64, Error<T::Error>> {
        let temperature = self.read_temperature_celsius()?;
        let adc = self.read_adc20(
            registers::PRESS_MSB,
            registers::PRESS_LSB,
            registers::PRESS_XLSB,
        )?;
        Ok(self.calibration.pressure(adc, temperature))
    }

    /// Reads the temperature as well, since the humidity formula depends on it.
    pub fn read_humidity_percent(&mut self) -> Result<f64, Error<T::Error>> {
        let temperature = self.read_temperature_celsius()?;
        let adc = self.read_adc16(registers::HUM_MSB, registers::HUM_LSB)?;
        Ok(self.calibration.humidity(adc, temperature))
    }

    /// Reads all three quantities from the latest conversion, sharing one temperature reading.
    pub fn read_measurement(&mut self) -> Result<Measurement, Error<T::Error>> {
        let temperature = self.read_temperature_celsius()?;
        let press_adc = self.read_adc20(
            registers::PRESS_MSB,
            registers::PRESS_LSB,
            registers::PRESS_XLSB,
        )?;
        let hum_adc = self.read_adc16(registers::HUM_MSB, registers::HUM_LSB)?;

        Ok(Measurement {
            temperature_celsius: temperature,
            pressure_pascals: self.calibration.pressure(press_adc, temperature),
            humidity_percent: self.calibration.humidity(hum_adc, temperature),
        })
    }

    fn transport(&mut self) -> Result<&mut T, Error<T::Error>> {
        self.transport.as_mut().ok_or(Error::Disposed)
    }

    pub(crate) fn read8(&mut self, register: Register) -> Result<u8, Error<T::Error>> {
        let transport = self.transport()?;
        transport.write_byte(register)?;
        let value = transport.read_byte()?;

        trace!("read {:#04x} = {:#04x}", register, value);
        Ok(value)
    }

    /// Reads two consecutive registers, lower address first, as a little-endian word.
    pub(crate) fn read16(&mut self, register: Register) -> Result<u16, Error<T::Error>> {
        let mut result = [0u8; 2];

        let transport = self.transport()?;
        transport.write_byte(register)?;
        transport.read(&mut result)?;

        trace!("read {:#04x} = {:02x?}", register, result);
        Ok(u16::from_le_bytes(result))
    }

    pub(crate) fn write(&mut self, register: Register, value: u8) -> Result<(), Error<T::Error>> {
        trace!("write {:#04x} = {:#04x}", register, value);
        self.transport()?.write(&[register, value])?;
        Ok(())
    }

    fn field(&mut self, field: Field) -> Result<u8, Error<T::Error>> {
        Ok(field.extract(self.read8(field.register)?))
    }

    /// Read-modify-write of a single field, so neighbouring fields keep their value.
    fn update(&mut self, field: Field, value: u8) -> Result<(), Error<T::Error>> {
        let prior = self.read8(field.register)?;
        self.write(field.register, field.insert(prior, value))
    }

    fn read_adc20(
        &mut self,
        msb: Register,
        lsb: Register,
        xlsb: Register,
    ) -> Result<u32, Error<T::Error>> {
        let msb = self.read8(msb)? as u32;
        let lsb = self.read8(lsb)? as u32;
        let xlsb = self.read8(xlsb)? as u32;

        Ok((msb << 12) + (lsb << 4) + (xlsb >> 4))
    }

    fn read_adc16(&mut self, msb: Register, lsb: Register) -> Result<u16, Error<T::Error>> {
        let msb = self.read8(msb)?;
        let lsb = self.read8(lsb)?;

        Ok(u16::from_be_bytes([msb, lsb]))
    }
}

impl<T: Transport> Drop for Bme680<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}
