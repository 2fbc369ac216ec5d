//! Textual durations (`250ms`, `1.5s`, `12µs`) as printed by `Debug`.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;
/// Longest fractional part considered; `Debug` never prints more than 9 digits.
const MAX_FRACTION_DIGITS: usize = 18;

/// Suffixes in match order: `s` must come last since every other suffix ends with it.
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("µs", 1_000),
    ("us", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
];

pub fn format_duration(d: Duration) -> String {
    format!("{:?}", d)
}

/// Parses the output of `format_duration`. Returns `None` for anything else.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    let (number, scale) = UNITS
        .iter()
        .find_map(|(suffix, scale)| text.strip_suffix(suffix).map(|n| (n, *scale)))?;

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let mut nanos = whole.parse::<u128>().ok()?.checked_mul(scale)?;
    if !fraction.is_empty() {
        let digits = fraction.len().min(MAX_FRACTION_DIGITS);
        let value: u128 = fraction[..digits].parse().ok()?;
        nanos = nanos.checked_add(value * scale / 10u128.pow(digits as u32))?;
    }

    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Some(Duration::new(secs, subsec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_like_debug() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::ZERO), "0ns");
    }

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("2s"), Some(Duration::from_secs(2)));
        assert_eq!(parse_duration("0ns"), Some(Duration::ZERO));
        assert_eq!(parse_duration("12µs"), Some(Duration::from_micros(12)));
        assert_eq!(parse_duration("12us"), Some(Duration::from_micros(12)));
        assert_eq!(parse_duration("1.5ms"), Some(Duration::from_micros(1500)));
    }

    #[test]
    fn roundtrip_is_exact() {
        for d in [
            Duration::from_nanos(1_234_567_891),
            Duration::from_micros(987_654),
            Duration::from_nanos(42),
            Duration::from_secs(3600),
        ] {
            assert_eq!(parse_duration(&format_duration(d)), Some(d));
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("fast"), None);
        assert_eq!(parse_duration("-1s"), None);
        assert_eq!(parse_duration("1h"), None);
        assert_eq!(parse_duration(".5s"), None);
        assert_eq!(parse_duration("1.2.3s"), None);
    }
}
