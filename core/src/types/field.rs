use std::fmt;

/// Display text for an attribute the file does not carry
pub const NOT_AVAILABLE: &str = "N/A";

/// A DICOM attribute value that may be absent
///
/// Unlike a bare `Option`, a `Field` renders its absent state as the
/// `N/A` sentinel and serializes it as `null`.
///
/// # Example
///
/// ```
/// use dicomscope_core::Field;
///
/// let modality: Field<String> = Some("CT".to_string()).into();
/// let missing: Field<i32> = None.into();
///
/// assert_eq!(modality.to_string(), "CT");
/// assert_eq!(missing.to_string(), "N/A");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(untagged))]
pub enum Field<T> {
    Available(T),
    NotAvailable,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::NotAvailable
    }
}

impl<T> Field<T> {
    /// Returns whether the attribute was present
    pub fn is_available(&self) -> bool {
        matches!(self, Field::Available(_))
    }

    /// Borrows the value, if present
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Available(v) => Some(v),
            Field::NotAvailable => None,
        }
    }

    /// Converts into an `Option`, dropping the sentinel
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Available(v) => Some(v),
            Field::NotAvailable => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Available(v) => Field::Available(f(v)),
            Field::NotAvailable => Field::NotAvailable,
        }
    }
}

impl Field<String> {
    /// Borrows the text value; blank strings count as absent
    pub fn as_non_empty(&self) -> Option<&str> {
        self.as_option()
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Renders at most `max_chars` characters followed by `...`
    ///
    /// The sentinel is never truncated or suffixed.
    pub fn truncated(&self, max_chars: usize) -> String {
        match self {
            Field::Available(s) => {
                let head: String = s.chars().take(max_chars).collect();
                format!("{}...", head)
            }
            Field::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Available(v),
            None => Field::NotAvailable,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Available(v) => write!(f, "{}", v),
            Field::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}
