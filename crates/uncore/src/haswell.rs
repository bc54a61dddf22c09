//! Haswell client system agent (ARB) monitoring.
//!
//! The arbitration unit has two general-purpose counters, programmed through
//! their own selection registers, and shares the uncore fixed counter, which
//! counts uncore clocks and is never cleared.

use log::{debug, info};
use msr::RegisterAccess;

use crate::{
    format_large_number, normalize, Architecture, EventSelect, MonitorError, MonitorState,
    MonitoringConfig, UpdateResults, WrappingCounter,
};

/// Uncore register addresses
pub mod registers {
    use msr::RegisterId;

    /// Global uncore PMU control
    pub const UNC_PERF_GLOBAL_CTRL: RegisterId = RegisterId(0x391);
    /// Fixed counter control
    pub const UNC_PERF_FIXED_CTRL: RegisterId = RegisterId(0x394);
    /// Fixed counter, uncore clocks
    pub const UNC_PERF_FIXED_CTR: RegisterId = RegisterId(0x395);
    pub const UNC_ARB_PERFCTR0: RegisterId = RegisterId(0x3B0);
    pub const UNC_ARB_PERFCTR1: RegisterId = RegisterId(0x3B1);
    pub const UNC_ARB_PERFEVTSEL0: RegisterId = RegisterId(0x3B2);
    pub const UNC_ARB_PERFEVTSEL1: RegisterId = RegisterId(0x3B3);
}

/// Width of the uncore fixed counter; bits above are reserved
pub const FIXED_COUNTER_WIDTH: u32 = 48;

/// UNC_PERF_GLOBAL_CTRL: enable all uncore counters
const GLOBAL_CTRL_ENABLE: u64 = 1 << 29;
/// UNC_PERF_FIXED_CTRL: enable the fixed counter
const FIXED_CTRL_ENABLE: u64 = 1 << 22;

/// Outstanding requests, incremented every cycle by the queue depth. Counter 0 only.
pub const ARB_TRK_OCCUPANCY: u8 = 0x80;
/// Requests allocated in the arbitration queue
pub const ARB_TRK_REQUESTS: u8 = 0x81;
/// Unit mask selecting all requests (coherent and non-coherent, from cores,
/// graphics and L3)
pub const ARB_ALL_REQUESTS: u8 = 0x01;

const ARCHITECTURE_NAME: &str = "Haswell Client System Agent";

/// Builds the Haswell client system agent architecture and its monitoring configs
pub fn architecture() -> Architecture {
    let mut arch = Architecture::new(ARCHITECTURE_NAME);
    arch.add_config(AllRequests::new());
    arch
}

/// Normalized counter values for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedArbCounterData {
    /// Elapsed uncore clocks
    pub uncore_clock: f64,
    pub ctr0: f64,
    pub ctr1: f64,
}

/// Reads the ARB counters and the uncore fixed counter
#[derive(Debug)]
pub struct ArbCounters {
    uncore_clock: WrappingCounter,
}

impl ArbCounters {
    pub fn new() -> Self {
        Self {
            uncore_clock: WrappingCounter::new(FIXED_COUNTER_WIDTH),
        }
    }

    /// Enable the uncore PMU and the fixed counter
    pub fn enable(&self, regs: &mut dyn RegisterAccess) -> Result<(), MonitorError> {
        regs.write(registers::UNC_PERF_GLOBAL_CTRL, GLOBAL_CTRL_ENABLE)?;
        regs.write(registers::UNC_PERF_FIXED_CTRL, FIXED_CTRL_ENABLE)?;
        Ok(())
    }

    /// Read and clear both general counters, read the fixed counter and
    /// normalize all three with the same factor.
    ///
    /// The fixed counter baseline only advances once its read succeeded.
    pub fn update(
        &mut self,
        regs: &mut dyn RegisterAccess,
        factor: f64,
    ) -> Result<NormalizedArbCounterData, MonitorError> {
        let ctr0 = regs.read_and_clear(registers::UNC_ARB_PERFCTR0)?;
        let ctr1 = regs.read_and_clear(registers::UNC_ARB_PERFCTR1)?;
        let uncore_clock = regs.read(registers::UNC_PERF_FIXED_CTR)?;

        let elapsed_clocks = self.uncore_clock.observe(uncore_clock);
        debug!(
            "arb sample: ctr0={} ctr1={} fixed={} elapsed_clocks={}",
            ctr0, ctr1, uncore_clock, elapsed_clocks
        );

        Ok(NormalizedArbCounterData {
            uncore_clock: normalize(elapsed_clocks, factor),
            ctr0: normalize(ctr0, factor),
            ctr1: normalize(ctr1, factor),
        })
    }
}

impl Default for ArbCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Arbitration queue occupancy and latency over all requests
pub struct AllRequests {
    counters: ArbCounters,
    state: MonitorState,
}

impl AllRequests {
    const COLUMNS: &'static [&'static str] = &["Clk", "Requests", "Q Occupancy", "Req Latency"];

    pub fn new() -> Self {
        Self {
            counters: ArbCounters::new(),
            state: MonitorState::Uninitialized,
        }
    }

    /// Selection for counter 0: outstanding requests per cycle
    pub fn occupancy_select() -> EventSelect {
        EventSelect::enabled(ARB_TRK_OCCUPANCY, ARB_ALL_REQUESTS)
    }

    /// Selection for counter 1: request count
    pub fn requests_select() -> EventSelect {
        EventSelect::enabled(ARB_TRK_REQUESTS, ARB_ALL_REQUESTS)
    }

    /// Renders one tick. Ratios over an idle interval come out as `inf`/`NaN`
    /// and are rendered as such.
    pub fn render(data: &NormalizedArbCounterData) -> Vec<String> {
        let occupancy = data.ctr0 / data.uncore_clock;
        let latency = data.ctr0 / data.ctr1;
        vec![
            format_large_number(data.uncore_clock),
            format_large_number(data.ctr1),
            format!("{:.2}", occupancy),
            format!("{:.2} clk", latency),
        ]
    }
}

impl Default for AllRequests {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitoringConfig for AllRequests {
    fn name(&self) -> &'static str {
        "All MC Requests"
    }

    fn columns(&self) -> &'static [&'static str] {
        Self::COLUMNS
    }

    fn help_text(&self) -> &'static str {
        "Clk - uncore active clocks\n\
         Requests - all requests to the system agent\n\
         Q Occupancy - average arbitration queue occupancy, when a request is pending\n\
         Req Latency - average time each request stayed in the arbitration queue"
    }

    fn state(&self) -> MonitorState {
        self.state
    }

    fn initialize(&mut self, regs: &mut dyn RegisterAccess) -> Result<(), MonitorError> {
        self.counters.enable(regs)?;
        regs.write(registers::UNC_ARB_PERFEVTSEL0, Self::occupancy_select().encode())?;
        regs.write(registers::UNC_ARB_PERFEVTSEL1, Self::requests_select().encode())?;

        info!("programmed {} ({})", self.name(), ARCHITECTURE_NAME);
        self.state = MonitorState::Programmed;
        Ok(())
    }

    fn update(
        &mut self,
        regs: &mut dyn RegisterAccess,
        factor: f64,
    ) -> Result<UpdateResults, MonitorError> {
        if self.state == MonitorState::Uninitialized {
            return Err(MonitorError::NotProgrammed);
        }

        let data = self.counters.update(regs, factor)?;
        self.state = MonitorState::Sampling;

        Ok(UpdateResults {
            unit_metrics: None,
            overall_metrics: Self::render(&data),
        })
    }
}
