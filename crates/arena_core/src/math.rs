//! Fixed-point math utilities for deterministic combat.
//!
//! Life, magic, damage, durability and luck rolls are all fractional.
//! They use fixed-point arithmetic so a seeded match produces the same
//! numbers on every platform.

use fixed::types::I32F32;

/// Fixed-point number type for all combat math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
/// Range: approximately -2,147,483,648 to 2,147,483,647
/// Precision: approximately 0.00000000023
pub type Fixed = I32F32;

/// Convert a whole-number percentage into a fraction (`40` -> `0.4`).
#[must_use]
pub fn percent(value: i64) -> Fixed {
    Fixed::from_num(value) / Fixed::from_num(100)
}

/// Clamp a value at zero from below.
#[must_use]
pub fn floor_at_zero(value: Fixed) -> Fixed {
    if value < Fixed::ZERO {
        Fixed::ZERO
    } else {
        value
    }
}

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as their raw bit representation (i64)
/// to preserve exact precision across serialization boundaries.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as its raw bit representation.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_bits().serialize(serializer)
    }

    /// Deserialize a fixed-point number from its raw bit representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Fixed::from_bits(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(50), Fixed::from_num(0.5));
        assert_eq!(percent(100), Fixed::ONE);
        assert_eq!(percent(0), Fixed::ZERO);
    }

    #[test]
    fn test_floor_at_zero() {
        assert_eq!(floor_at_zero(Fixed::from_num(-3)), Fixed::ZERO);
        assert_eq!(floor_at_zero(Fixed::from_num(7)), Fixed::from_num(7));
    }

    #[test]
    fn test_fixed_determinism() {
        // Same operations must produce identical results
        let a = Fixed::from_num(1) / Fixed::from_num(3);
        let b = Fixed::from_num(1) / Fixed::from_num(3);
        assert_eq!(a, b);

        let result1 = a * Fixed::from_num(7);
        let result2 = b * Fixed::from_num(7);
        assert_eq!(result1, result2);
    }
}
