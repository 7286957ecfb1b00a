use regex::Regex;
use std::sync::LazyLock;

/// Days assumed when a timeframe string cannot be interpreted.
pub const DEFAULT_TIMEFRAME_DAYS: f64 = 30.0;

static TIMEFRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)(?:-([0-9]+))?\s*(hour|day|week)")
        .expect("timeframe pattern compiles")
});

/// Converts an approval timeframe such as "24-48 hours" or "1 week" into days.
///
/// The midpoint of a range is used; a single value stands for both bounds.
pub fn parse_timeframe_days(text: &str) -> f64 {
    let Some(captures) = TIMEFRAME_RE.captures(text) else {
        return DEFAULT_TIMEFRAME_DAYS;
    };

    let Some(min) = captures
        .get(1)
        .and_then(|value| value.as_str().parse::<f64>().ok())
    else {
        return DEFAULT_TIMEFRAME_DAYS;
    };
    let max = captures
        .get(2)
        .and_then(|value| value.as_str().parse::<f64>().ok())
        .unwrap_or(min);
    let unit = captures
        .get(3)
        .map(|value| value.as_str().to_ascii_lowercase())
        .unwrap_or_default();

    let avg = (min + max) / 2.0;

    match unit.as_str() {
        "hour" => avg / 24.0,
        "day" => avg,
        "week" => avg * 7.0,
        _ => avg,
    }
}
