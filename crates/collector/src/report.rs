use std::fmt::Write;

use uncore::{Architecture, UpdateResults};

/// Renders one tick as `label=value` pairs, prefixed with the tick time
pub fn format_row(time: &str, columns: &[&str], results: &UpdateResults) -> String {
    let mut line = time.to_string();
    for (label, value) in columns.iter().zip(&results.overall_metrics) {
        let _ = write!(line, "  {}={:<12}", label, value);
    }
    line.truncate(line.trim_end().len());

    if let Some(units) = &results.unit_metrics {
        for (index, unit) in units.iter().enumerate() {
            let _ = write!(line, "\n  unit {}:", index);
            for (label, value) in columns.iter().zip(unit) {
                let _ = write!(line, "  {}={}", label, value);
            }
        }
    }

    line
}

/// Describes an architecture's monitoring configs, their columns and help text
pub fn describe(arch: &Architecture) -> String {
    let mut out = format!("{}\n", arch.name());
    for (index, config) in arch.configs().iter().enumerate() {
        let _ = writeln!(out, "\n[{}] {}", index, config.name());
        let _ = writeln!(out, "  columns: {}", config.columns().join(", "));
        for line in config.help_text().lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}
