//! Time formatting helpers.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render a duration in seconds as its non-zero components, largest first.
///
/// `259200` is `"3d"`, `90061` is `"1d 1h 1m 1s"`, zero is `"0s"`.
pub fn format_duration(secs: u64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let mut rest = secs;
    let mut parts = Vec::new();
    for (size, suffix) in UNITS {
        let count = rest / size;
        if count > 0 {
            parts.push(format!("{count}{suffix}"));
            rest %= size;
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_units() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(600), "10m");
        assert_eq!(format_duration(3 * 24 * 3600), "3d");
    }

    #[test]
    fn mixed_units_skip_zeros() {
        assert_eq!(format_duration(90_061), "1d 1h 1m 1s");
        assert_eq!(format_duration(3_605), "1h 5s");
    }
}
