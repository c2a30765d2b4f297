//! Volume unit policy used for cumulative totals.
//!
//! The letters match nload's `-U` option so existing `~/.nload` files keep
//! their meaning.

const BIT_LABELS: [&str; 4] = ["Bit", "kBit", "MBit", "GBit"];
const BYTE_LABELS: [&str; 4] = ["Byte", "kByte", "MByte", "GByte"];
const STEP: f64 = 1024.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataUnit {
    HumanBit, // Auto-scale bits
    HumanByte, // Auto-scale bytes
    Bit,
    Byte,
    KiloBit,
    KiloByte,
    MegaBit,
    #[default]
    MegaByte,
    GigaBit,
    GigaByte,
}

/// Every unit with its letter, in the order `next` cycles through them.
const LETTERS: [(DataUnit, &str); 10] = [
    (DataUnit::HumanBit, "h"),
    (DataUnit::HumanByte, "H"),
    (DataUnit::Bit, "b"),
    (DataUnit::Byte, "B"),
    (DataUnit::KiloBit, "k"),
    (DataUnit::KiloByte, "K"),
    (DataUnit::MegaBit, "m"),
    (DataUnit::MegaByte, "M"),
    (DataUnit::GigaBit, "g"),
    (DataUnit::GigaByte, "G"),
];

impl DataUnit {
    fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn next(&self) -> Self {
        LETTERS[(self.index() + 1) % LETTERS.len()].0
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        LETTERS[self.index()].1
    }

    #[must_use]
    pub fn from_string(s: &str) -> Option<Self> {
        LETTERS
            .iter()
            .find(|(_, letter)| *letter == s)
            .map(|(unit, _)| *unit)
    }

    fn counts_bits(&self) -> bool {
        matches!(
            self,
            Self::HumanBit | Self::Bit | Self::KiloBit | Self::MegaBit | Self::GigaBit
        )
    }

    /// Picks the display unit for a byte count.
    ///
    /// Returns the unit label and the divisor that turns `bytes` into a
    /// value expressed in that unit. Bit units fold the factor of eight
    /// into the divisor.
    #[must_use]
    pub fn unit_for(&self, bytes: u64) -> (&'static str, f64) {
        let bits = self.counts_bits();
        let exponent = match self {
            Self::HumanBit => human_exponent(bytes as f64 * 8.0),
            Self::HumanByte => human_exponent(bytes as f64),
            Self::Bit | Self::Byte => 0,
            Self::KiloBit | Self::KiloByte => 1,
            Self::MegaBit | Self::MegaByte => 2,
            Self::GigaBit | Self::GigaByte => 3,
        };

        let scale = STEP.powi(exponent as i32);
        if bits {
            (BIT_LABELS[exponent], scale / 8.0)
        } else {
            (BYTE_LABELS[exponent], scale)
        }
    }
}

fn human_exponent(mut value: f64) -> usize {
    let mut exponent = 0;
    while value >= STEP && exponent < BYTE_LABELS.len() - 1 {
        value /= STEP;
        exponent += 1;
    }
    exponent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_units_ignore_magnitude() {
        assert_eq!(DataUnit::MegaByte.unit_for(1), ("MByte", 1_048_576.0));
        assert_eq!(DataUnit::Byte.unit_for(u64::MAX), ("Byte", 1.0));
        assert_eq!(DataUnit::KiloBit.unit_for(0), ("kBit", 128.0));
    }

    #[test]
    fn human_byte_picks_largest_unit() {
        assert_eq!(DataUnit::HumanByte.unit_for(1023), ("Byte", 1.0));
        assert_eq!(DataUnit::HumanByte.unit_for(1024), ("kByte", 1024.0));
        assert_eq!(DataUnit::HumanByte.unit_for(5 * 1_073_741_824), ("GByte", 1_073_741_824.0));
        // Nothing above giga
        let (label, _) = DataUnit::HumanByte.unit_for(u64::MAX);
        assert_eq!(label, "GByte");
    }

    #[test]
    fn human_bit_scales_on_bit_count() {
        // 128 bytes is exactly 1 kBit
        assert_eq!(DataUnit::HumanBit.unit_for(128), ("kBit", 128.0));
        assert_eq!(DataUnit::HumanBit.unit_for(127), ("Bit", 0.125));
    }

    #[test]
    fn letters_round_trip_and_cycle() {
        let mut unit = DataUnit::HumanBit;
        for _ in 0..10 {
            assert_eq!(DataUnit::from_string(unit.as_str()), Some(unit));
            unit = unit.next();
        }
        assert_eq!(unit, DataUnit::HumanBit);
        assert_eq!(DataUnit::from_string("x"), None);
    }

    #[test]
    fn letter_table_follows_declaration_order() {
        for (position, (unit, _)) in LETTERS.iter().enumerate() {
            assert_eq!(unit.index(), position);
        }
        assert_eq!(DataUnit::default().as_str(), "M");
        assert_eq!(DataUnit::MegaByte.next(), DataUnit::GigaBit);
        assert_eq!(DataUnit::from_string("k"), Some(DataUnit::KiloBit));
    }
}
