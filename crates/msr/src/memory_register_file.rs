use std::collections::{HashMap, HashSet};
use std::io;

use crate::{MsrError, RegisterAccess, RegisterId};

/// Memory-based register file
///
/// Registers that were never written read as zero. This is useful for tests
/// and for exercising monitoring code without privileged access.
#[derive(Debug, Default)]
pub struct MemoryRegisterFile {
    values: HashMap<RegisterId, u64>,
    failing_reads: HashSet<RegisterId>,
    failing_writes: HashSet<RegisterId>,
    writes: Vec<(RegisterId, u64)>,
}

impl MemoryRegisterFile {
    /// Create an empty register file
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value directly, as hardware would, without recording a write
    pub fn set(&mut self, register: RegisterId, value: u64) {
        self.values.insert(register, value);
    }

    /// Current value of a register
    pub fn get(&self, register: RegisterId) -> u64 {
        self.values.get(&register).copied().unwrap_or(0)
    }

    /// Make every subsequent read of `register` fail (or succeed again)
    pub fn fail_reads(&mut self, register: RegisterId, fail: bool) {
        if fail {
            self.failing_reads.insert(register);
        } else {
            self.failing_reads.remove(&register);
        }
    }

    /// Make every subsequent write of `register` fail (or succeed again)
    pub fn fail_writes(&mut self, register: RegisterId, fail: bool) {
        if fail {
            self.failing_writes.insert(register);
        } else {
            self.failing_writes.remove(&register);
        }
    }

    /// All successful writes, in order
    pub fn writes(&self) -> &[(RegisterId, u64)] {
        &self.writes
    }
}

impl RegisterAccess for MemoryRegisterFile {
    fn read(&mut self, register: RegisterId) -> Result<u64, MsrError> {
        if self.failing_reads.contains(&register) {
            return Err(MsrError::Read {
                register,
                source: io::Error::new(io::ErrorKind::Other, "injected read failure"),
            });
        }
        Ok(self.get(register))
    }

    fn write(&mut self, register: RegisterId, value: u64) -> Result<(), MsrError> {
        if self.failing_writes.contains(&register) {
            return Err(MsrError::Write {
                register,
                source: io::Error::new(io::ErrorKind::Other, "injected write failure"),
            });
        }
        self.values.insert(register, value);
        self.writes.push((register, value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTR: RegisterId = RegisterId(0x3b0);

    #[test]
    fn test_unwritten_register_reads_zero() {
        let mut regs = MemoryRegisterFile::new();
        assert_eq!(regs.read(CTR).unwrap(), 0);
        assert!(regs.writes().is_empty());
    }

    #[test]
    fn test_set_is_not_recorded_as_write() {
        let mut regs = MemoryRegisterFile::new();
        regs.set(CTR, 7);
        regs.write(RegisterId(0x3b2), 0x40_0180).unwrap();

        assert_eq!(regs.read(CTR).unwrap(), 7);
        assert_eq!(regs.writes(), &[(RegisterId(0x3b2), 0x40_0180)]);
    }

    #[test]
    fn test_injected_failures() {
        let mut regs = MemoryRegisterFile::new();
        regs.set(CTR, 5);

        regs.fail_reads(CTR, true);
        match regs.read(CTR) {
            Err(MsrError::Read { register, .. }) => assert_eq!(register, CTR),
            other => panic!("Expected read error, got {:?}", other),
        }

        regs.fail_writes(CTR, true);
        assert!(matches!(regs.write(CTR, 1), Err(MsrError::Write { .. })));
        assert_eq!(regs.get(CTR), 5);

        regs.fail_reads(CTR, false);
        regs.fail_writes(CTR, false);
        assert_eq!(regs.read_and_clear(CTR).unwrap(), 5);
        assert_eq!(regs.get(CTR), 0);
    }

    #[test]
    fn test_failed_clear_keeps_value() {
        let mut regs = MemoryRegisterFile::new();
        regs.set(CTR, 9);
        regs.fail_writes(CTR, true);

        assert!(regs.read_and_clear(CTR).is_err());
        assert_eq!(regs.get(CTR), 9);
    }
}
