use chrono::{DateTime, Utc};

/// Parse an RFC 3339 / ISO 8601 timestamp to unix seconds; unparseable
/// input maps to 0.
pub fn parse_iso8601_to_timestamp(date_str: &str) -> i64 {
    if date_str.is_empty() {
        return 0;
    }

    if let Ok(dt) = date_str.parse::<DateTime<Utc>>() {
        return dt.timestamp();
    }

    0
}

/// Parse an ISO 8601 duration string (P1DT2H3M4S) to total seconds.
///
/// Only day/hour/minute/second designators are understood; that covers
/// every duration YouTube reports. Anything unparseable maps to 0.
pub fn parse_iso8601_duration_to_seconds(duration_str: &str) -> i64 {
    let Some(rest) = duration_str.strip_prefix('P') else {
        return 0;
    };

    let mut total_seconds = 0.0;
    let mut in_time_part = false;
    let mut current_number = String::new();

    for ch in rest.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            current_number.push(ch);
        } else if ch == 'T' {
            in_time_part = true;
            current_number.clear();
        } else {
            if let Ok(num) = current_number.parse::<f64>() {
                total_seconds += match ch {
                    'D' if !in_time_part => num * 86_400.0,
                    'H' if in_time_part => num * 3600.0,
                    'M' if in_time_part => num * 60.0,
                    'S' if in_time_part => num,
                    _ => 0.0,
                };
            }
            current_number.clear();
        }
    }

    total_seconds as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timestamps() {
        assert_eq!(parse_iso8601_to_timestamp("2025-01-01T00:00:00Z"), 1735689600);
        assert_eq!(parse_iso8601_to_timestamp(""), 0);
        assert_eq!(parse_iso8601_to_timestamp("yesterday"), 0);
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_iso8601_duration_to_seconds("PT30S"), 30);
        assert_eq!(parse_iso8601_duration_to_seconds("PT1H2M3S"), 3723);
        assert_eq!(parse_iso8601_duration_to_seconds("P1DT1H"), 90000);
        assert_eq!(parse_iso8601_duration_to_seconds("PT0S"), 0);
        assert_eq!(parse_iso8601_duration_to_seconds(""), 0);
        assert_eq!(parse_iso8601_duration_to_seconds("nonsense"), 0);
    }
}
