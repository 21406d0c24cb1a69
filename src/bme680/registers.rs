//! BME680 memory map, named after the datasheet (section 5.2).

pub type Register = u8;

// Identity and control
pub const ID: Register = 0xd0;
pub const RESET: Register = 0xe0;
pub const CONFIG: Register = 0x75;
pub const CTRL_MEAS: Register = 0x74;
pub const CTRL_HUM: Register = 0x72;
pub const MEAS_STATUS_0: Register = 0x1d;

// Raw measurement output
pub const PRESS_MSB: Register = 0x1f;
pub const PRESS_LSB: Register = 0x20;
pub const PRESS_XLSB: Register = 0x21;
pub const TEMP_MSB: Register = 0x22;
pub const TEMP_LSB: Register = 0x23;
pub const TEMP_XLSB: Register = 0x24;
pub const HUM_MSB: Register = 0x25;
pub const HUM_LSB: Register = 0x26;

// Temperature calibration
pub const TEMP_CAL_1: Register = 0xe9;
pub const TEMP_CAL_2: Register = 0x8a;
pub const TEMP_CAL_3: Register = 0x8c;

// Pressure calibration
pub const PRESS_CAL_1: Register = 0x8e;
pub const PRESS_CAL_2: Register = 0x90;
pub const PRESS_CAL_3: Register = 0x92;
pub const PRESS_CAL_4: Register = 0x94;
pub const PRESS_CAL_5: Register = 0x96;
pub const PRESS_CAL_6: Register = 0x99;
pub const PRESS_CAL_7: Register = 0x98;
pub const PRESS_CAL_8: Register = 0x9c;
pub const PRESS_CAL_9: Register = 0x9e;
pub const PRESS_CAL_10: Register = 0xa0;

// Humidity calibration. Both LSB nibbles live in 0xe2.
pub const HUM_CAL_1_MSB: Register = 0xe3;
pub const HUM_CAL_1_LSB: Register = 0xe2;
pub const HUM_CAL_2_MSB: Register = 0xe1;
pub const HUM_CAL_2_LSB: Register = 0xe2;
pub const HUM_CAL_3: Register = 0xe4;
pub const HUM_CAL_4: Register = 0xe5;
pub const HUM_CAL_5: Register = 0xe6;
pub const HUM_CAL_6: Register = 0xe7;
pub const HUM_CAL_7: Register = 0xe8;

pub const SOFT_RESET_COMMAND: u8 = 0xb6;
