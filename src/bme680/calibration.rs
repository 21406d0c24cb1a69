use super::Bme680;
use super::registers;
use crate::bus::{Error, Transport};

/// Factory-fused compensation coefficients, unique to every chip.
///
/// Field names follow the datasheet (`par_t1`, `par_h3`, ...).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CalibrationData {
    pub par_t1: u16,
    pub par_t2: i16,
    pub par_t3: i8,
    pub par_p1: u16,
    pub par_p2: i16,
    pub par_p3: i8,
    pub par_p4: i16,
    pub par_p5: i16,
    pub par_p6: i8,
    pub par_p7: i8,
    pub par_p8: i16,
    pub par_p9: i16,
    pub par_p10: u8,
    pub par_h1: u16,
    pub par_h2: u16,
    pub par_h3: i8,
    pub par_h4: i8,
    pub par_h5: i8,
    pub par_h6: u8,
    pub par_h7: i8,
}

impl CalibrationData {
    /// Compensated temperature in °C from a 20-bit ADC value.
    ///
    /// Pressure and humidity compensation both take this result as input.
    pub fn temperature(&self, adc: u32) -> f64 {
        let adc = adc as f64;
        let par_t1 = self.par_t1 as f64;

        let var1 = (adc / 16384.0 - par_t1 / 1024.0) * self.par_t2 as f64;
        let var2 = adc / 131072.0 - par_t1 / 8192.0;
        let var2 = var2 * var2 * (self.par_t3 as f64 * 16.0);

        (var1 + var2) / 5120.0
    }

    /// Compensated pressure in Pa from a 20-bit ADC value and the temperature in °C.
    ///
    /// Returns 0 when the calibration data would make the divisor vanish.
    pub fn pressure(&self, adc: u32, temperature: f64) -> f64 {
        let t_fine = temperature * 5120.0;

        let var1 = (t_fine / 2.0) - 64000.0;
        let var2 = var1 * var1 * (self.par_p6 as f64 / 131072.0);
        let var2 = var2 + var1 * self.par_p5 as f64 * 2.0;
        let var2 = (var2 / 4.0) + (self.par_p4 as f64 * 65536.0);
        let var1 = ((self.par_p3 as f64 * var1 * var1) / 16384.0 + self.par_p2 as f64 * var1)
            / 524288.0;
        let var1 = (1.0 + var1 / 32768.0) * self.par_p1 as f64;

        if var1 == 0.0 {
            return 0.0;
        }

        let press = 1048576.0 - adc as f64;
        let press = ((press - var2 / 4096.0) * 6250.0) / var1;
        let var1 = (self.par_p9 as f64 * press * press) / 2147483648.0;
        let var2 = press * (self.par_p8 as f64 / 32768.0);
        let scaled = press / 256.0;
        let var3 = scaled * scaled * scaled * (self.par_p10 as f64 / 131072.0);

        press + (var1 + var2 + var3 + self.par_p7 as f64 * 128.0) / 16.0
    }

    /// Compensated relative humidity in %, clamped to `0.0..=100.0`.
    pub fn humidity(&self, adc: u16, temperature: f64) -> f64 {
        let adc = adc as f64;

        let var1 = adc - (self.par_h1 as f64 * 16.0 + (self.par_h3 as f64 / 2.0) * temperature);
        let var2 = var1
            * ((self.par_h2 as f64 / 262144.0)
                * (1.0
                    + (self.par_h4 as f64 / 16384.0) * temperature
                    + (self.par_h5 as f64 / 1048576.0) * temperature * temperature));
        let var3 = self.par_h6 as f64 / 16384.0;
        let var4 = self.par_h7 as f64 / 2097152.0;

        let humidity = var2 + (var3 + var4 * temperature) * var2 * var2;
        humidity.clamp(0.0, 100.0)
    }
}

impl<T: Transport> Bme680<T> {
    /// Reads every calibration coefficient from its fixed register.
    pub(super) fn read_calibration(&mut self) -> Result<CalibrationData, Error<T::Error>> {
        let hum_cal_1_msb = self.read8(registers::HUM_CAL_1_MSB)?;
        let hum_cal_1_lsb = self.read8(registers::HUM_CAL_1_LSB)?;
        let hum_cal_2_msb = self.read8(registers::HUM_CAL_2_MSB)?;
        let hum_cal_2_lsb = self.read8(registers::HUM_CAL_2_LSB)?;

        Ok(CalibrationData {
            par_t1: self.read16(registers::TEMP_CAL_1)?,
            par_t2: self.read16(registers::TEMP_CAL_2)? as i16,
            par_t3: self.read8(registers::TEMP_CAL_3)? as i8,
            par_p1: self.read16(registers::PRESS_CAL_1)?,
            par_p2: self.read16(registers::PRESS_CAL_2)? as i16,
            par_p3: self.read8(registers::PRESS_CAL_3)? as i8,
            par_p4: self.read16(registers::PRESS_CAL_4)? as i16,
            par_p5: self.read16(registers::PRESS_CAL_5)? as i16,
            par_p6: self.read8(registers::PRESS_CAL_6)? as i8,
            par_p7: self.read8(registers::PRESS_CAL_7)? as i8,
            par_p8: self.read16(registers::PRESS_CAL_8)? as i16,
            par_p9: self.read16(registers::PRESS_CAL_9)? as i16,
            par_p10: self.read8(registers::PRESS_CAL_10)?,
            par_h1: (hum_cal_1_msb as u16) << 4 | (hum_cal_1_lsb & 0x0f) as u16,
            par_h2: (hum_cal_2_msb as u16) << 4 | (hum_cal_2_lsb >> 4) as u16,
            par_h3: self.read8(registers::HUM_CAL_3)? as i8,
            par_h4: self.read8(registers::HUM_CAL_4)? as i8,
            par_h5: self.read8(registers::HUM_CAL_5)? as i8,
            par_h6: self.read8(registers::HUM_CAL_6)?,
            par_h7: self.read8(registers::HUM_CAL_7)? as i8,
        })
    }
}
