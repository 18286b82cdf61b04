//! Unit-aware value formatting, shared by the chart tooltip, axis labels,
//! the emphasized-point label, and screen-reader announcements. One
//! implementation so no two surfaces can disagree on rounding.

use crate::series::GLOBAL_FILTER;

/// Format a value according to the dataset's declared unit string.
///
/// `%` units get one decimal, `°C` two decimals with an explicit `+` for
/// positive values, `USD` a `$` prefix with thousands grouping, everything
/// else magnitude suffixes (`B`/`M`/`K`) or plain grouping.
pub fn format_value(value: f64, unit: &str) -> String {
    if unit.contains('%') {
        format!("{:.1}%", value)
    } else if unit.contains("°C") {
        if value > 0.0 {
            format!("+{:.2}°C", value)
        } else {
            format!("{:.2}°C", value)
        }
    } else if unit.contains("USD") {
        format!("${}", group_thousands(value))
    } else if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        group_thousands(value)
    }
}

/// Human-readable announcement for assistive technology, emitted on every
/// index change: year, filter context, value field label, formatted value.
pub fn announcement(year: i64, filter: &str, label: &str, value: f64, unit: &str) -> String {
    let context = if filter == GLOBAL_FILTER {
        String::new()
    } else {
        format!(" in {}", filter)
    };
    format!(
        "Year {}{}, {}: {}",
        year,
        context,
        label,
        format_value(value, unit)
    )
}

/// Locale-style thousands grouping with up to three fractional digits,
/// trailing zeros trimmed.
fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}
