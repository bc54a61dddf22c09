//! # Uncore
//!
//! Monitoring units for CPU uncore performance counters.
//!
//! A monitoring unit programs its counter selection registers once, then on
//! every tick reads its counters, turns raw counts into per-interval rates and
//! renders a fixed set of columns. Units implement [`MonitoringConfig`] and are
//! grouped per CPU family in an [`Architecture`].
//!
//! The building blocks are usable on their own:
//!
//! - [`WrappingCounter`] tracks a free-running counter across reads
//! - [`normalize`] scales a count delta by the per-tick factor
//! - [`EventSelect`] packs an event selection register value
//!
//! # Examples
//!
//! ```
//! use msr::MemoryRegisterFile;
//! use uncore::haswell::{self, registers};
//!
//! let mut regs = MemoryRegisterFile::new();
//! let mut arch = haswell::architecture();
//! let config = arch.config_mut(0).unwrap();
//! config.initialize(&mut regs).unwrap();
//!
//! regs.set(registers::UNC_PERF_FIXED_CTR, 1000);
//! regs.set(registers::UNC_ARB_PERFCTR0, 500);
//! regs.set(registers::UNC_ARB_PERFCTR1, 100);
//!
//! let results = config.update(&mut regs, 1.0).unwrap();
//! assert_eq!(results.overall_metrics, vec!["1.00 K", "100.00", "0.50", "5.00 clk"]);
//! ```

pub mod accumulator;
pub mod event_select;
pub mod format;
pub mod haswell;
pub mod monitor;
pub mod normalize;
pub mod registry;

pub use accumulator::*;
pub use event_select::*;
pub use format::*;
pub use monitor::*;
pub use normalize::*;
pub use registry::*;
