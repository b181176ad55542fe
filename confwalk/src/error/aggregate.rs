//! Aggregation of the conversion errors collected during one walk.

use std::{error::Error, fmt};

use super::ConversionError;

/// Every [`ConversionError`] recorded by a single walk.
///
/// A walk always completes; this error only reports the tags that fell back
/// to their raw literal. `Display` joins the entries with newlines.
#[derive(Debug)]
pub struct WalkError(Vec<ConversionError>);

impl WalkError {
    /// Wrap the collected errors, returning `None` when there are none.
    #[must_use]
    pub fn from_errors(errors: Vec<ConversionError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self(errors))
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &ConversionError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, err) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for WalkError {}

impl<'a> IntoIterator for &'a WalkError {
    type Item = &'a ConversionError;
    type IntoIter = std::slice::Iter<'a, ConversionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for WalkError {
    type Item = ConversionError;
    type IntoIter = std::vec::IntoIter<ConversionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
