//! Number formatting for stat lines and graph headers.

use crate::units::DataUnit;

/// Suffix attached to every value produced by [`format_rate`].
pub const RATE_UNIT: &str = "Mbit/s";

const BITS_PER_MEGABIT: u128 = 1_000_000;

/// Converts bytes per second to whole decimal megabits per second.
///
/// The result is truncated, never rounded: 1,999,999 bit/s reads "1".
pub fn format_rate(bytes_per_sec: u64) -> String {
    let bits = u128::from(bytes_per_sec) * 8;
    (bits / BITS_PER_MEGABIT).to_string()
}

pub fn format_rate_with_unit(bytes_per_sec: u64) -> String {
    format!("{} {RATE_UNIT}", format_rate(bytes_per_sec))
}

const SCALE_UNITS: [(u128, &str); 4] = [
    (1_000_000_000, "Gbit/s"),
    (1_000_000, "Mbit/s"),
    (1_000, "kbit/s"),
    (1, "bit/s"),
];

/// Formats a graph scale in the largest decimal bit unit it reaches, with
/// two truncated decimals: 65,536 B/s reads "524.28 kbit/s".
pub fn format_scale(bytes_per_sec: u64) -> String {
    let bits = u128::from(bytes_per_sec) * 8;
    let (divisor, label) = SCALE_UNITS
        .iter()
        .copied()
        .find(|&(divisor, _)| bits >= divisor)
        .unwrap_or((1, "bit/s"));
    if divisor == 1 {
        return format!("{bits} {label}");
    }
    let hundredths = bits * 100 / divisor;
    format!("{}.{:02} {label}", hundredths / 100, hundredths % 100)
}

/// Formats a cumulative byte count in the unit chosen by `unit`.
pub fn format_volume(bytes: u64, precision: usize, unit: DataUnit) -> String {
    let (label, divisor) = unit.unit_for(bytes);
    format!("{:.*} {}", precision, bytes as f64 / divisor, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_decimal_megabits() {
        assert_eq!(format_rate(1_000_000), "8");
        assert_eq!(format_rate(125_000), "1");
        assert_eq!(format_rate(0), "0");
    }

    #[test]
    fn rate_truncates() {
        // 999,992 bit/s
        assert_eq!(format_rate(124_999), "0");
        // 15,999,992 bit/s
        assert_eq!(format_rate(1_999_999), "15");
    }

    #[test]
    fn rate_survives_u64_max() {
        let expected = (u128::from(u64::MAX) * 8 / 1_000_000).to_string();
        assert_eq!(format_rate(u64::MAX), expected);
    }

    #[test]
    fn rate_with_unit_appends_suffix() {
        assert_eq!(format_rate_with_unit(1_000_000), "8 Mbit/s");
    }

    #[test]
    fn scale_picks_readable_unit() {
        assert_eq!(format_scale(0), "0 bit/s");
        assert_eq!(format_scale(100), "800 bit/s");
        assert_eq!(format_scale(65_536), "524.28 kbit/s");
        assert_eq!(format_scale(1_048_576), "8.38 Mbit/s");
        assert_eq!(format_scale(125_000_000), "1.00 Gbit/s");
        // Gbit/s is the largest unit
        assert!(format_scale(u64::MAX).ends_with(" Gbit/s"));
    }

    #[test]
    fn small_scales_never_read_zero() {
        for bytes in [125, 2_048, 50_000, 124_999] {
            assert!(!format_scale(bytes).starts_with("0"), "{bytes}");
        }
    }

    #[test]
    fn volume_uses_policy_and_precision() {
        assert_eq!(format_volume(1_572_864, 2, DataUnit::MegaByte), "1.50 MByte");
        assert_eq!(format_volume(1_572_864, 0, DataUnit::KiloByte), "1536 kByte");
        assert_eq!(format_volume(512, 1, DataUnit::HumanByte), "512.0 Byte");
        assert_eq!(format_volume(128, 2, DataUnit::HumanBit), "1.00 kBit");
    }
}
