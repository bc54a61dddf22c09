#![cfg(target_os = "linux")]

use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::Path;

use log::debug;

use crate::{MsrError, RegisterAccess, RegisterId};

/// Register access through the Linux `msr` driver
///
/// Each register is an 8-byte word at file offset equal to its address in
/// `/dev/cpu/<cpu>/msr`. Uncore registers are package-wide, so any CPU of the
/// package can be used.
pub struct MsrDevice {
    cpu: u32,
    file: File,
}

impl MsrDevice {
    /// Open the msr device for a CPU
    ///
    /// # Arguments
    ///
    /// * `cpu` - Logical CPU whose msr device is opened
    pub fn open(cpu: u32) -> Result<Self, MsrError> {
        let path = format!("/dev/cpu/{}/msr", cpu);

        if !Path::new(&path).exists() {
            return Err(MsrError::Unavailable(format!(
                "{} does not exist (is the msr kernel module loaded?)",
                path
            )));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| MsrError::Open {
                path: path.clone(),
                source,
            })?;

        debug!("opened {}", path);
        Ok(MsrDevice { cpu, file })
    }

    /// The CPU this device was opened for
    pub fn cpu(&self) -> u32 {
        self.cpu
    }
}

impl RegisterAccess for MsrDevice {
    fn read(&mut self, register: RegisterId) -> Result<u64, MsrError> {
        let mut buf = [0u8; 8];
        self.file
            .read_exact_at(&mut buf, u64::from(register.address()))
            .map_err(|source| MsrError::Read { register, source })?;
        Ok(u64::from_le_bytes(buf))
    }

    fn write(&mut self, register: RegisterId, value: u64) -> Result<(), MsrError> {
        self.file
            .write_all_at(&value.to_le_bytes(), u64::from(register.address()))
            .map_err(|source| MsrError::Write { register, source })
    }
}

/// Returns true when the process runs with an effective uid of root, which
/// the msr driver requires for both reads and writes.
pub fn has_msr_privileges() -> bool {
    unsafe { libc::geteuid() == 0 }
}
