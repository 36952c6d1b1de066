//! Tick label formatting.

const SI_PREFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];

/// Decimal form with trailing zeros trimmed: `2.50` → `"2.5"`, `10.0` → `"10"`.
#[must_use]
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Short SI form for axis labels: `1600` → `"1.6k"`, `2_000_000` → `"2M"`.
///
/// Values below one thousand are printed plainly.
#[must_use]
pub fn format_si(value: f64) -> String {
    let magnitude = value.abs();
    for (scale, suffix) in SI_PREFIXES {
        if magnitude >= scale {
            return format!("{}{suffix}", format_plain(value / scale));
        }
    }
    format_plain(value)
}

/// Milliseconds with a unit, two decimals: `12.3456` → `"12.35 ms"`.
#[must_use]
pub fn format_ms(value: f64) -> String {
    format!("{value:.2} ms")
}
