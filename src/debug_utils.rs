use core::cell::RefCell;
use std::rc::Rc;

use embedded_hal::i2c::{Error, NoAcknowledgeSource, Operation};

use crate::bus::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyError {
    InvalidTest,
    Nack,
}

impl Error for DummyError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match &self {
            DummyError::InvalidTest => embedded_hal::i2c::ErrorKind::Other,
            DummyError::Nack => {
                embedded_hal::i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            }
        }
    }
}

#[derive(Debug)]
struct State {
    registers: [u8; 256],
    pointer: u8,
    writes: Vec<Vec<u8>>,
    releases: usize,
    fail: bool,
}

/// A register file behind a bus. Clones share the same registers so a test
/// can keep a handle after giving one to the driver.
#[derive(Debug, Clone)]
pub struct DummyBus {
    address: u8,
    state: Rc<RefCell<State>>,
}

impl DummyBus {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            state: Rc::new(RefCell::new(State {
                registers: [0; 256],
                pointer: 0,
                writes: Vec::new(),
                releases: 0,
                fail: false,
            })),
        }
    }

    /// A bus answering with the BME680 chip id.
    pub fn bme680(address: u8) -> Self {
        let bus = Self::new(address);
        bus.set(0xd0, 0x61);
        bus
    }

    pub fn set(&self, register: u8, value: u8) {
        self.state.borrow_mut().registers[register as usize] = value;
    }

    pub fn set_many(&self, start: u8, values: &[u8]) {
        for (offset, value) in values.iter().enumerate() {
            self.set(start + offset as u8, *value);
        }
    }

    pub fn get(&self, register: u8) -> u8 {
        self.state.borrow().registers[register as usize]
    }

    /// Every multi-byte write, in order. Single-byte register selects are not recorded.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.borrow().writes.clone()
    }

    pub fn releases(&self) -> usize {
        self.state.borrow().releases
    }

    /// Makes every following bus operation fail with [`DummyError::Nack`].
    pub fn fail(&self) {
        self.state.borrow_mut().fail = true;
    }

    fn do_read(&self, buffer: &mut [u8]) -> Result<(), DummyError> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err(DummyError::Nack);
        }
        for byte in buffer.iter_mut() {
            *byte = state.registers[state.pointer as usize];
            state.pointer = state.pointer.wrapping_add(1);
        }
        Ok(())
    }

    fn do_write(&self, buffer: &[u8]) -> Result<(), DummyError> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err(DummyError::Nack);
        }
        let (register, payload) = buffer.split_first().ok_or(DummyError::InvalidTest)?;
        state.pointer = *register;
        if payload.is_empty() {
            return Ok(());
        }
        for value in payload {
            let pointer = state.pointer;
            state.registers[pointer as usize] = *value;
            state.pointer = pointer.wrapping_add(1);
        }
        state.writes.push(buffer.to_vec());
        Ok(())
    }
}

impl embedded_hal::i2c::ErrorType for DummyBus {
    type Error = DummyError;
}

impl embedded_hal::i2c::I2c for DummyBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [embedded_hal::i2c::Operation],
    ) -> Result<(), Self::Error> {
        match operations {
            [Operation::Write(request)] => self.do_write(request),
            [Operation::Read(response)] => self.do_read(response),
            [Operation::Write(request), Operation::Read(response)] => {
                self.do_write(request)?;
                self.do_read(response)
            }
            // Other transactions are invalid
            _ => Err(DummyError::InvalidTest),
        }
    }
}

impl Transport for DummyBus {
    type Error = DummyError;

    fn address(&self) -> u8 {
        self.address
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.do_read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
        self.do_write(buffer)
    }

    fn release(&mut self) {
        self.state.borrow_mut().releases += 1;
    }
}
