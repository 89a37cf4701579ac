//! Literal grammars for temporal values
//!
//! All patterns use explicit `[0-9]` classes; `\d` would also match
//! non-ASCII digits.

use regex::Regex;
use std::sync::LazyLock;

/// Four-digit year 0001..9999
const YEAR: &str = r"([0-9](?:[0-9](?:[0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)";
const MONTH: &str = r"(0[1-9]|1[0-2])";
const DAY: &str = r"(0[1-9]|[1-2][0-9]|3[0-1])";
const HOUR: &str = r"([01][0-9]|2[0-3])";
const MINUTE: &str = r"([0-5][0-9])";
const SECOND: &str = r"([0-5][0-9]|60)";
const FRACTION: &str = r"(?:\.([0-9]+))?";
const OFFSET: &str = r"(Z|[+-](?:(?:0[0-9]|1[0-3]):[0-5][0-9]|14:00))";

/// Groups: 1 year, 2 month, 3 day
pub static DATE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!("^{YEAR}(?:-{MONTH}(?:-{DAY})?)?$"))
});

/// Groups: 1 year, 2 month, 3 day, 4 hour, 5 minute, 6 second, 7 fraction, 8 offset
pub static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        "^{YEAR}(?:-{MONTH}(?:-{DAY}(?:T{HOUR}:{MINUTE}:{SECOND}{FRACTION}{OFFSET})?)?)?$"
    ))
});

/// Groups: 1 hour, 2 minute, 3 second, 4 fraction
pub static TIME: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!("^{HOUR}:{MINUTE}:{SECOND}{FRACTION}$"))
});

/// Groups: 1 hour, 2 minute, 3 second, 4 fraction
pub static FLUENT_TIME: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!("^{HOUR}(?::{MINUTE}(?::{SECOND}{FRACTION})?)?$"))
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("temporal grammar must compile")
}

/// Numeric value of an optional all-digit capture
pub fn number(caps: &regex::Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

/// Fractional-second digits truncated (never rounded) to nanoseconds
pub fn nanoseconds(fraction: &str) -> u32 {
    let digits = &fraction[..fraction.len().min(9)];
    let value: u32 = digits.parse().unwrap_or(0);
    value * 10u32.pow(9 - digits.len() as u32)
}

/// Offset in seconds east of UTC; `Z` is zero
pub fn offset_seconds(offset: &str) -> i32 {
    let Some(rest) = offset.strip_prefix(['+', '-']) else {
        return 0;
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let seconds = hours.parse::<i32>().unwrap_or(0) * 3600 + minutes.parse::<i32>().unwrap_or(0) * 60;
    if offset.starts_with('-') { -seconds } else { seconds }
}
