//! Money type for representing rupee amounts
//!
//! Internally stores amounts in paise (i64) so that statement totals are
//! exact. Order feeds carry amounts as decimal rupee numbers; those are
//! rounded to the nearest paisa on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Largest rupee magnitude accepted from a decimal number
const MAX_RUPEES: f64 = 9.0e15;

/// A monetary amount stored as paise (hundredths of a rupee)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from paise
    ///
    /// # Examples
    /// ```
    /// use dairy_statement::models::Money;
    /// let amount = Money::from_paise(1050); // ₹10.50
    /// assert_eq!(amount.to_fixed(), "10.50");
    /// ```
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create a Money amount from a decimal rupee value, rounding to the
    /// nearest paisa
    pub fn from_rupees(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() || value.abs() > MAX_RUPEES {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        Ok(Self((value * 100.0).round() as i64))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Whole rupees (truncated toward zero)
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Paise portion (0-99)
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Decimal rupee value, for numeric spreadsheet cells
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Fixed two-decimal rendering without a symbol, e.g. `-50.00`
    pub fn to_fixed(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }

    /// Symbol followed by the fixed rendering, e.g. `₹-50.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self.to_fixed())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "Rs. 10.50", "10".
    /// Extra decimal places round to the nearest paisa, like `from_rupees`.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s
            .strip_prefix('₹')
            .or_else(|| s.strip_prefix("Rs."))
            .or_else(|| s.strip_prefix("Rs"))
            .unwrap_or(s)
            .trim();

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let paise = match s.split_once('.') {
            Some((rupees, fraction)) => {
                if fraction.contains('.') || !fraction.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let rupees: i64 = if rupees.is_empty() {
                    0
                } else {
                    rupees.parse().map_err(|_| invalid())?
                };
                let paise: i64 = match fraction.len() {
                    0 => 0,
                    1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => {
                        let kept: i64 = fraction[..2].parse().map_err(|_| invalid())?;
                        let round_up =
                            fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5');
                        kept + i64::from(round_up)
                    }
                };
                rupees
                    .checked_mul(100)
                    .and_then(|r| r.checked_add(paise))
                    .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
            }
            None => s
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?,
        };

        Ok(Self(if negative { -paise } else { paise }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.to_fixed())
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_rupees(value)
    }
}

impl From<Money> for f64 {
    fn from(m: Money) -> Self {
        m.as_f64()
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
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
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Money amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
