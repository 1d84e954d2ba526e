use std::sync::OnceLock;

use regex::Regex;

/// `M:SS.mmm`, the only form that can be ranked across pilots
const STRICT_LAP_TIME: &str = r"^(\d+):(\d{2})\.(\d{3})$";
/// optional `M:` prefix followed by (decimal) seconds
const LENIENT_LAP_TIME: &str = r"^(?:(\d+):)?(\d+(?:\.\d+)?)$";

fn strict_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(STRICT_LAP_TIME).expect("strict lap time pattern is valid"))
}

fn lenient_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(LENIENT_LAP_TIME).expect("lenient lap time pattern is valid"))
}

/// # parse a lap time
/// parse a lap time in the `M:SS.mmm` format into milliseconds.
///
/// anything else (empty, wrong separators, wrong digit counts) is unrankable
/// and returns `None`. this never fails loudly, malformed times are simply
/// left out of the rankings.
///
/// ## Arguments
/// * `time` - the lap time as entered by the pilot
///
/// ## Returns
/// * `Option<u64>` - the duration in milliseconds
pub fn parse_lap_time(time: &str) -> Option<u64> {
    let captures = strict_pattern().captures(time.trim())?;

    let minutes: u64 = captures.get(1)?.as_str().parse().ok()?;
    let seconds: u64 = captures.get(2)?.as_str().parse().ok()?;
    let millis: u64 = captures.get(3)?.as_str().parse().ok()?;

    minutes
        .checked_mul(60_000)?
        .checked_add(seconds * 1000 + millis)
}

/// # parse a lap time leniently
/// used by the per pilot lap sheet only. accepts the strict format as well as
/// bare seconds (`32.550`) and loose fractions (`1:32.5`).
///
/// ## Arguments
/// * `time` - the lap time as entered by the pilot
///
/// ## Returns
/// * `Option<u64>` - the duration in milliseconds, rounded to the nearest one
pub fn parse_lap_time_lenient(time: &str) -> Option<u64> {
    let captures = lenient_pattern().captures(time.trim())?;

    let minutes: u64 = match captures.get(1) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let seconds: f64 = captures.get(2)?.as_str().parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }

    let seconds_ms = (seconds * 1000.0).round();
    if seconds_ms > u64::MAX as f64 {
        return None;
    }

    minutes.checked_mul(60_000)?.checked_add(seconds_ms as u64)
}

/// format milliseconds back into `M:SS.mmm`
pub fn format_lap_time(ms: u64) -> String {
    format!("{}:{:02}.{:03}", ms / 60_000, (ms / 1000) % 60, ms % 1000)
}

/// format a gap to the best lap as `+X.XXXs`
pub fn format_delta(ms: u64) -> String {
    format!("+{}.{:03}s", ms / 1000, ms % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_lap_times() {
        assert_eq!(parse_lap_time("1:32.550"), Some(92_550));
        assert_eq!(parse_lap_time("0:59.001"), Some(59_001));
        assert_eq!(parse_lap_time("12:00.000"), Some(720_000));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_lap_time("  1:31.999 "), Some(91_999));
    }

    #[test]
    fn components_survive_reconstruction() {
        for (minutes, seconds, millis) in [(0, 0, 0), (1, 31, 999), (2, 5, 7), (59, 59, 999)] {
            let text = format!("{}:{:02}.{:03}", minutes, seconds, millis);
            let ms = parse_lap_time(&text).unwrap();

            assert_eq!(ms / 60_000, minutes);
            assert_eq!((ms % 60_000) / 1000, seconds);
            assert_eq!(ms % 1000, millis);
            assert_eq!(format_lap_time(ms), text);
        }
    }

    #[test]
    fn malformed_lap_times_are_unrankable() {
        for time in [
            "", " ", "1:32", "1:32.55", "1:32.5500", "1:2.550", "1.32.550", "1:32:550", "a:32.550",
            "1:3b.550", "-1:32.550", "32.550", "1:32.550s", "1 :32.550",
        ] {
            assert_eq!(parse_lap_time(time), None, "{time:?} should not parse");
        }
    }

    #[test]
    fn lenient_parser_accepts_bare_seconds() {
        assert_eq!(parse_lap_time_lenient("32.550"), Some(32_550));
        assert_eq!(parse_lap_time_lenient("45"), Some(45_000));
        assert_eq!(parse_lap_time_lenient("1:32.550"), Some(92_550));
        assert_eq!(parse_lap_time_lenient("1:32.5"), Some(92_500));
    }

    #[test]
    fn lenient_parser_still_rejects_garbage() {
        assert_eq!(parse_lap_time_lenient(""), None);
        assert_eq!(parse_lap_time_lenient("fast"), None);
        assert_eq!(parse_lap_time_lenient("1:"), None);
        assert_eq!(parse_lap_time_lenient("1:32.550.1"), None);
    }

    #[test]
    fn formats_deltas() {
        assert_eq!(format_delta(551), "+0.551s");
        assert_eq!(format_delta(3_001), "+3.001s");
        assert_eq!(format_delta(0), "+0.000s");
    }
}
