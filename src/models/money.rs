//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. On disk an amount is written as a decimal number (`-50.0`), so the
//! data file stays readable and compatible with hand-edited ledgers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value, saturating at `i64::MAX`
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Largest magnitude accepted from input or the data file, in cents
    ///
    /// Keeps every amount exactly representable as a JSON decimal and
    /// leaves headroom for report totals.
    pub const MAX_CENTS: i64 = 99_999_999_999_999;

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", ".5".
    /// Extra decimal places are rounded to the nearest cent, half away from
    /// zero, the same rule used when reading amounts from the data file.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if frac.contains('.') || (whole.is_empty() && frac.is_empty()) {
            return Err(invalid());
        }

        let out_of_range = || MoneyParseError::OutOfRange(s.to_string());
        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .filter(|c| *c <= Self::MAX_CENTS)
            .ok_or_else(out_of_range)?;

        if cents == 0 && s.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
            return Err(MoneyParseError::BelowOneCent(s.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Add two amounts, returning `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }

    /// Format with an explicit leading sign, as used in transaction lists
    pub fn format_signed(&self) -> String {
        let sign = if self.is_positive() { '+' } else { '-' };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX_CENTS as f64 {
            return Err(serde::de::Error::custom(format!(
                "amount {} is outside the supported range",
                value
            )));
        }
        Ok(Self(cents as i64))
    }
}

// Arithmetic saturates at the i64 range rather than panicking or wrapping.

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
    BelowOneCent(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount too large: {}", s),
            MoneyParseError::BelowOneCent(s) => {
                write!(f, "Amount rounds to less than one cent: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
    }

    #[test]
    fn test_format_variants() {
        assert_eq!(Money::from_cents(-4550).format_with_symbol("$"), "-$45.50");
        assert_eq!(Money::from_cents(120000).format_signed(), "+1200.00");
        assert_eq!(Money::from_cents(-5).format_signed(), "-0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse(" 45.50 ").unwrap().cents(), 4550);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("12,50").is_err());
    }

    #[test]
    fn test_parse_rounds_to_nearest_cent() {
        assert_eq!(Money::parse("10.999").unwrap().cents(), 1100);
        assert_eq!(Money::parse("10.994").unwrap().cents(), 1099);
        assert_eq!(Money::parse("0.005").unwrap().cents(), 1);
        assert_eq!(Money::parse("-2.345").unwrap().cents(), -235);
        assert_eq!(Money::parse("0.000").unwrap().cents(), 0);

        let from_file: Money = serde_json::from_str("10.999").unwrap();
        assert_eq!(from_file, Money::parse("10.999").unwrap());
    }

    #[test]
    fn test_parse_sub_cent_and_out_of_range() {
        assert_eq!(
            Money::parse("0.004"),
            Err(MoneyParseError::BelowOneCent("0.004".into()))
        );
        assert_eq!(
            Money::parse("999999999999.99").unwrap().cents(),
            Money::MAX_CENTS
        );
        assert!(matches!(
            Money::parse("1000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("50000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));

        assert!(serde_json::from_str::<Money>("1e13").is_err());
        assert!(serde_json::from_str::<Money>("-1e13").is_err());
    }

    #[test]
    fn test_large_totals_do_not_overflow() {
        let max = Money::from_cents(Money::MAX_CENTS);
        assert_eq!((max + max).cents(), Money::MAX_CENTS * 2);

        let huge = Money::from_cents(i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);

        assert_eq!(Money::from_cents(i64::MIN).abs().cents(), i64::MAX);

        let mut total = huge;
        total += Money::from_cents(1);
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization_is_decimal() {
        let m = Money::from_cents(-5000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "-50.0");

        let deserialized: Money = serde_json::from_str("45.55").unwrap();
        assert_eq!(deserialized.cents(), 4555);

        let from_int: Money = serde_json::from_str("12").unwrap();
        assert_eq!(from_int.cents(), 1200);
    }
}
