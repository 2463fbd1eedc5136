use std::time::Duration;

/// Short human form of how long a backend round trip took.
///
/// Report generation runs from a few seconds to several minutes, so
/// sub-second precision only matters below ten seconds.
pub fn format_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    match ms {
        0..=999 => format!("{}ms", ms),
        1_000..=9_999 => format!("{:.1}s", elapsed.as_secs_f64()),
        10_000..=59_999 => format!("{}s", elapsed.as_secs()),
        _ => format!("{}m {:02}s", elapsed.as_secs() / 60, elapsed.as_secs() % 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_ranges() {
        assert_eq!(format_elapsed(Duration::from_millis(250)), "250ms");
        assert_eq!(format_elapsed(Duration::from_millis(4_310)), "4.3s");
        assert_eq!(format_elapsed(Duration::from_millis(42_900)), "42s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 05s");
    }
}
