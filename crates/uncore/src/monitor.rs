use msr::{MsrError, RegisterAccess};
use thiserror::Error;

/// Errors that can occur while programming or sampling a monitoring unit
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("register access failed: {0}")]
    Register(#[from] MsrError),

    #[error("update called before initialize")]
    NotProgrammed,

    #[error("unknown monitoring config: {0}")]
    UnknownConfig(String),
}

/// Lifecycle of a monitoring unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Selection registers not yet written
    Uninitialized,
    /// Selection registers written, no sample taken
    Programmed,
    /// At least one update completed
    Sampling,
}

/// Rendered values produced by one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateResults {
    /// One row per sub-unit (slice, channel...), `None` if the unit has none
    pub unit_metrics: Option<Vec<Vec<String>>>,
    /// Aggregate row, aligned with [`MonitoringConfig::columns`]
    pub overall_metrics: Vec<String>,
}

/// A named, self-describing set of counters and the metrics derived from them
pub trait MonitoringConfig {
    /// Human-readable name of the metric set
    fn name(&self) -> &'static str;

    /// Column labels, in the order of the values returned by `update`
    fn columns(&self) -> &'static [&'static str];

    /// Description of each column
    fn help_text(&self) -> &'static str;

    /// Current lifecycle state
    fn state(&self) -> MonitorState;

    /// Program the counter selection registers
    fn initialize(&mut self, regs: &mut dyn RegisterAccess) -> Result<(), MonitorError>;

    /// Sample the counters and render the metrics for this tick.
    ///
    /// `factor` scales every raw delta of this tick, typically the
    /// reciprocal of the seconds elapsed since the previous tick.
    fn update(
        &mut self,
        regs: &mut dyn RegisterAccess,
        factor: f64,
    ) -> Result<UpdateResults, MonitorError>;
}
