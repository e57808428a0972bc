use std::{fmt, str::FromStr};

use crate::{EngineError, ResultEngine};

const NOT_A_NUMBER: &str = "Amount must be a number";

/// A budget amount as entered by the user.
///
/// Amounts are kept as the parsed double and only become text when they are
/// stored or shown, always with exactly two decimal places. The text is the
/// decimal closest to the double; when the double sits exactly halfway
/// between two cents the one farther from zero wins.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!(Amount::new(5.0).unwrap().to_string(), "5.00");
/// assert_eq!("4.5".parse::<Amount>().unwrap().to_string(), "4.50");
/// assert_eq!(Amount::new(0.125).unwrap().to_string(), "0.13");
/// assert!("coffee".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Wraps a double, rejecting `NaN` and infinities.
    pub fn new(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(NOT_A_NUMBER.to_string()));
        }
        // -0.0 would otherwise print as "-0.00"
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }

    /// Returns the raw double.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` when the amount sits exactly between two cents.
    ///
    /// Only odd multiples of 1/8 do: `(2n + 1) / 200` is a dyadic rational
    /// exactly when it reduces to `j / 8` with `j` odd.
    fn is_cent_midpoint(abs: f64) -> bool {
        let eighths = abs * 8.0;
        eighths.fract() == 0.0 && eighths % 2.0 == 1.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.abs();
        if Self::is_cent_midpoint(abs) {
            let sign = if self.0 < 0.0 { "-" } else { "" };
            let cents = (abs * 100.0).ceil() as u128;
            return write!(f, "{sign}{}.{:02}", cents / 100, cents % 100);
        }
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string such as `"4.5"`, `" 12 "` or `"-3.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidAmount(NOT_A_NUMBER.to_string()))?;
        Self::new(value)
    }
}
