#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bme680;
mod bus;
#[cfg(test)]
mod debug_utils;

pub use bus::{Error, I2cDevice, Transport};
