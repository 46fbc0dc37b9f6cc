use crate::error::{Result, ScopeError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Pixel spacing in millimeters (row, column)
///
/// Physical distance between the centers of adjacent pixels, as carried
/// by the PixelSpacing (0028,0030) attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PixelSpacing {
    pub row: f64,
    pub col: f64,
}

impl PixelSpacing {
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Builds spacing from a decoded multi-valued DS element
    ///
    /// Returns `None` unless exactly two values are present.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        match values {
            [row, col] => Some(Self::new(*row, *col)),
            _ => None,
        }
    }

    /// Parses pixel spacing from its textual form
    ///
    /// Accepts "0.5\\0.5", "0.5 0.5", "[0.5, 0.5]" and exponential notation.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidValue`] if fewer than two numbers are found
    pub fn parse(s: &str) -> Result<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
        });

        let values: Vec<f64> = re
            .find_iter(s)
            .take(2)
            .map(|m| m.as_str().parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ScopeError::InvalidValue(format!("PixelSpacing '{}': {}", s, e)))?;

        Self::from_values(&values)
            .ok_or_else(|| ScopeError::InvalidValue(format!("PixelSpacing '{}'", s)))
    }

    /// Formats both components with a fixed number of decimals
    pub fn format_precise(&self, decimals: usize) -> String {
        format!(
            "{:.*} x {:.*} mm",
            decimals, self.row, decimals, self.col
        )
    }
}

impl fmt::Display for PixelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0.46875\\0.46875", 0.46875, 0.46875)]
    #[case("0.5 0.7", 0.5, 0.7)]
    #[case("[0.1, 0.2]", 0.1, 0.2)]
    #[case("1.5e-1\\1.5e-1", 0.15, 0.15)]
    fn test_parse(#[case] input: &str, #[case] row: f64, #[case] col: f64) {
        let ps = PixelSpacing::parse(input).unwrap();
        assert_eq!(ps, PixelSpacing::new(row, col));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(PixelSpacing::parse("").is_err());
        assert!(PixelSpacing::parse("0.1").is_err());
        assert!(PixelSpacing::parse("spacing").is_err());
    }

    #[test]
    fn test_from_values() {
        assert_eq!(
            PixelSpacing::from_values(&[0.3, 0.4]),
            Some(PixelSpacing::new(0.3, 0.4))
        );
        assert_eq!(PixelSpacing::from_values(&[0.3]), None);
        assert_eq!(PixelSpacing::from_values(&[0.3, 0.4, 0.5]), None);
    }

    #[test]
    fn test_display() {
        let ps = PixelSpacing::new(0.46875, 0.46875);
        assert_eq!(ps.to_string(), "0.46875 x 0.46875 mm");
        assert_eq!(ps.format_precise(3), "0.469 x 0.469 mm");
    }
}
