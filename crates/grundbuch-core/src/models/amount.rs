//! Monetary amounts as written in section III entries.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::vocabulary::Currency;

/// Largest `decimal_scale` an amount may carry, the limit of `Decimal`.
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// A monetary amount with an explicit number of fractional digits.
///
/// `value` is the amount in minor units: `1.500,50 DM` is
/// `{ value: 150050, decimalScale: 2 }`. Deserialization rejects scales above
/// [`MAX_DECIMAL_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AmountRecord")]
pub struct Amount {
    value: u64,
    decimal_scale: u32,
    currency: Currency,
}

impl Amount {
    pub fn new(value: u64, decimal_scale: u32, currency: Currency) -> Self {
        Self {
            value,
            decimal_scale,
            currency,
        }
    }

    /// Build an amount from German notation split at the decimal comma.
    ///
    /// `integer` may carry `.` or space thousand separators. A `fraction` of
    /// `-`, `--` or nothing yields a whole amount with scale 0.
    pub fn from_german(integer: &str, fraction: &str, currency: Currency) -> Option<Self> {
        let digits: String = integer.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        let integer: u64 = digits.parse().ok()?;

        let fraction = fraction.trim();
        if fraction.is_empty() || fraction.chars().all(|c| c == '-') {
            return Some(Self::new(integer, 0, currency));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let scale = u32::try_from(fraction.len()).ok()?;
        let value = integer
            .checked_mul(10u64.checked_pow(scale)?)?
            .checked_add(fraction.parse().ok()?)?;
        Some(Self::new(value, scale, currency))
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn decimal_scale(&self) -> u32 {
        self.decimal_scale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Whole currency units.
    pub fn major(&self) -> u64 {
        self.value / self.divisor()
    }

    /// Fractional part in minor units of `decimal_scale` digits.
    pub fn minor(&self) -> u64 {
        self.value % self.divisor()
    }

    /// Exact decimal value, `None` when the scale exceeds what `Decimal` holds.
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::try_from_i128_with_scale(i128::from(self.value), self.decimal_scale).ok()
    }

    fn divisor(&self) -> u64 {
        10u64.checked_pow(self.decimal_scale).unwrap_or(u64::MAX)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AmountRecord {
    value: u64,
    decimal_scale: u32,
    currency: Currency,
}

impl TryFrom<AmountRecord> for Amount {
    type Error = String;

    fn try_from(record: AmountRecord) -> Result<Self, Self::Error> {
        if record.decimal_scale > MAX_DECIMAL_SCALE {
            return Err(format!(
                "decimal scale {} exceeds {}",
                record.decimal_scale, MAX_DECIMAL_SCALE
            ));
        }
        Ok(Self::new(record.value, record.decimal_scale, record.currency))
    }
}

/// Group digits in threes with `.` (1500000 -> "1.500.000").
pub fn format_german_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(c);
    }

    formatted
}

impl fmt::Display for Amount {
    /// German register notation, always with at least two fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.decimal_scale.max(2) as usize;
        let minor = if self.decimal_scale < 2 {
            self.minor() * 10u64.pow(2 - self.decimal_scale)
        } else {
            self.minor()
        };
        write!(
            f,
            "{},{:0width$} {}",
            format_german_thousands(self.major()),
            minor,
            self.currency.label(),
            width = width
        )
    }
}
