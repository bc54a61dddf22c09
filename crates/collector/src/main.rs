use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use time::macros::format_description;
use time::OffsetDateTime;

use msr::RegisterAccess;
use uncore::{haswell, MonitorError, MonitoringConfig, UpdateResults};

mod interval;
mod report;

use interval::IntervalClock;

/// Haswell client system agent uncore monitor
#[derive(Debug, Parser)]
struct Command {
    /// Verbose debug output
    #[arg(short, long)]
    verbose: bool,

    /// CPU whose msr device is used for register access
    #[arg(long, default_value = "0")]
    cpu: u32,

    /// Sampling interval in milliseconds
    #[arg(short, long, default_value = "1000")]
    interval_ms: u64,

    /// Track duration in seconds (0 = unlimited)
    #[arg(short, long, default_value = "0")]
    duration: u64,

    /// Monitoring config to run, by name (defaults to the first one)
    #[arg(short, long)]
    config: Option<String>,

    /// List the available monitoring configs and exit
    #[arg(long)]
    list: bool,
}

fn format_time() -> String {
    if let Ok(now) = OffsetDateTime::now_local() {
        let format = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");
        now.format(&format)
            .unwrap_or_else(|_| "00:00:00.000".to_string())
    } else {
        "00:00:00.000".to_string()
    }
}

#[cfg(target_os = "linux")]
fn open_registers(cpu: u32) -> Result<Box<dyn RegisterAccess>> {
    if !msr::has_msr_privileges() {
        warn!("not running as root, msr access will likely be denied");
    }
    let device = msr::MsrDevice::open(cpu)
        .with_context(|| format!("cannot access registers through CPU {}", cpu))?;
    Ok(Box::new(device))
}

#[cfg(not(target_os = "linux"))]
fn open_registers(_cpu: u32) -> Result<Box<dyn RegisterAccess>> {
    anyhow::bail!("register access is only supported on Linux")
}

/// Samples one tick at `now`. The clock only advances when the sample
/// succeeded, keeping it aligned with the fixed counter baseline.
fn sample_at(
    config: &mut dyn MonitoringConfig,
    regs: &mut dyn RegisterAccess,
    clock: &mut IntervalClock,
    now: Instant,
) -> Result<UpdateResults, MonitorError> {
    let results = config.update(regs, clock.factor_at(now))?;
    clock.commit(now);
    Ok(results)
}

/// Runs one tick; a failed tick is reported and skipped, the next tick retries
fn sample(
    config: &mut dyn MonitoringConfig,
    regs: &mut dyn RegisterAccess,
    clock: &mut IntervalClock,
) {
    match sample_at(config, regs, clock, Instant::now()) {
        Ok(results) => {
            println!("{}", report::format_row(&format_time(), config.columns(), &results));
        }
        Err(e) => error!("Failed to sample {}: {}", config.name(), e),
    }
}

fn main() -> Result<()> {
    let opts = Command::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if opts.verbose { "debug" } else { "info" },
    ))
    .init();

    let mut arch = haswell::architecture();

    if opts.list {
        print!("{}", report::describe(&arch));
        return Ok(());
    }

    let config = match &opts.config {
        Some(name) => arch.find(name)?,
        None => arch
            .config_mut(0)
            .context("architecture has no monitoring configs")?,
    };

    let mut regs = open_registers(opts.cpu)?;
    config
        .initialize(&mut *regs)
        .with_context(|| format!("failed to program {}", config.name()))?;

    info!("Sampling {} every {} ms", config.name(), opts.interval_ms);
    println!("{}", config.help_text());
    println!("{}", "-".repeat(60));

    let interval = Duration::from_millis(opts.interval_ms.max(1));
    let duration = Duration::from_secs(opts.duration);
    let start_time = Instant::now();
    let mut clock = IntervalClock::start();

    // Run for the specified duration
    while opts.duration == 0 || start_time.elapsed() < duration {
        thread::sleep(interval);
        sample(&mut **config, &mut *regs, &mut clock);
    }

    Ok(())
}
