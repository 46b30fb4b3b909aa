use std::fmt::{Debug, Display, Formatter};

use crate::{prelude::*, quantity::Quantity};

/// Dollars per kilowatt-hour.
pub type KilowattHourRate = Quantity<f64, -1, -1, 1>;

impl KilowattHourRate {
    /// Parse a currency string with a leading dollar sign, for example `"$0.25"`.
    pub fn parse_dollars(value: &str) -> Result<Self> {
        let stripped = value.trim();
        let stripped = stripped.strip_prefix('$').unwrap_or(stripped);
        let rate: f64 = stripped
            .trim()
            .parse()
            .with_context(|| format!("failed to parse the rate `{value}`"))?;
        ensure!(rate >= 0.0, "rate `{value}` must not be negative");
        Ok(Self(rate))
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}/kWh", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}/kWh", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_parse_dollars() -> Result {
        assert_abs_diff_eq!(KilowattHourRate::parse_dollars("$0.25")?.0, 0.25);
        assert_abs_diff_eq!(KilowattHourRate::parse_dollars("0.08")?.0, 0.08);
        Ok(())
    }

    #[test]
    fn test_parse_dollars_malformed() {
        assert!(KilowattHourRate::parse_dollars("$abc").is_err());
    }

    #[test]
    fn test_parse_dollars_negative() {
        assert!(KilowattHourRate::parse_dollars("$-0.10").is_err());
    }
}
