//! Display helpers for money amounts and month labels.

/// Full month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the full name of a 1-based month, or `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Short chart label such as `Jul 2023`.
pub fn month_label(year: i32, month: u32) -> String {
    match month_name(month) {
        Some(name) => format!("{} {}", &name[..3], year),
        None => format!("{}-{}", year, month),
    }
}

/// Rounds half-way cases towards positive infinity, so `-2.5` becomes `-2`
/// and `2.5` becomes `3`. Dashboard figures have always been rounded this way.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    // `value - floor` is exact, unlike `value + 0.5` near the half-way point.
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Rounds to `decimals` places with [`round_half_up`] semantics.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}

/// `₹4.0bn`
pub fn format_billions(value: f64, symbol: &str) -> String {
    format!("{}{:.1}bn", symbol, value / 1_000_000_000.0)
}

/// `$83.1M`
pub fn format_millions(value: f64, symbol: &str) -> String {
    format!("{}{:.1}M", symbol, value / 1_000_000.0)
}

/// `$12.3K`
pub fn format_thousands(value: f64, symbol: &str) -> String {
    format!("{}{:.1}K", symbol, value / 1_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(2023, 7), "Jul 2023");
        assert_eq!(month_label(2024, 13), "2024-13");
    }

    #[test]
    fn test_round_half_up_matches_dashboard_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_to(-2.25, 1), -2.2);
        assert_eq!(round_to(41.234, 1), 41.2);
    }

    #[test]
    fn test_round_half_up_just_below_half() {
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(-0.5000000000000001), -1.0);
        assert_eq!(round_half_up(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(format_billions(3_970_000_000.0, "₹"), "₹4.0bn");
        assert_eq!(format_millions(83_060_635.87, "$"), "$83.1M");
        assert_eq!(format_thousands(12_340.0, "$"), "$12.3K");
    }
}
