//! # msr
//!
//! Access to model-specific registers (MSRs) used to program and read
//! hardware performance counters. Monitoring code talks to registers only
//! through the [`RegisterAccess`] trait, so the same code drives a real
//! `/dev/cpu/N/msr` device or an in-memory register file.
//!

mod memory_register_file;
#[cfg(target_os = "linux")]
mod msr_device;

pub use memory_register_file::*;
#[cfg(target_os = "linux")]
pub use msr_device::*;

use std::fmt;
use std::io;
use thiserror::Error;

/// Address of a model-specific register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(pub u32);

impl RegisterId {
    /// Returns the raw register address
    pub fn address(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Errors that can occur when accessing registers
#[derive(Error, Debug)]
pub enum MsrError {
    #[error("failed to open msr device {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("failed to read register {register}: {source}")]
    Read { register: RegisterId, source: io::Error },

    #[error("failed to write register {register}: {source}")]
    Write { register: RegisterId, source: io::Error },

    #[error("register access unavailable: {0}")]
    Unavailable(String),
}

/// Privileged channel for reading and writing model-specific registers
pub trait RegisterAccess {
    /// Read the full 64-bit value of a register
    fn read(&mut self, register: RegisterId) -> Result<u64, MsrError>;

    /// Write a 64-bit value to a register
    fn write(&mut self, register: RegisterId, value: u64) -> Result<(), MsrError>;

    /// Read a counter register and reset it to zero.
    ///
    /// The two accesses are not atomic; events counted between the read and
    /// the write are lost.
    fn read_and_clear(&mut self, register: RegisterId) -> Result<u64, MsrError> {
        let value = self.read(register)?;
        self.write(register, 0)?;
        Ok(value)
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for Box<T> {
    fn read(&mut self, register: RegisterId) -> Result<u64, MsrError> {
        (**self).read(register)
    }

    fn write(&mut self, register: RegisterId, value: u64) -> Result<(), MsrError> {
        (**self).write(register, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_id_display() {
        assert_eq!(RegisterId(0x3b0).to_string(), "0x3b0");
        assert_eq!(RegisterId(0x395).address(), 0x395);
    }

    #[test]
    fn test_read_and_clear_through_box() {
        let mut regs: Box<dyn RegisterAccess> = Box::new(MemoryRegisterFile::new());
        regs.write(RegisterId(0x3b0), 42).unwrap();

        assert_eq!(regs.read_and_clear(RegisterId(0x3b0)).unwrap(), 42);
        assert_eq!(regs.read(RegisterId(0x3b0)).unwrap(), 0);
    }
}
