/// Formats a count with a K/M/G suffix and two decimals.
///
/// Non-finite values are rendered as-is (`inf`, `NaN`).
pub fn format_large_number(value: f64) -> String {
    if !value.is_finite() {
        value.to_string()
    } else if value >= 1e9 {
        format!("{:.2} G", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2} M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2} K", value / 1e3)
    } else {
        format!("{:.2}", value)
    }
}
