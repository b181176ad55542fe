//! Literal decoding failures and their walk-level wrapper.

use std::num::ParseFloatError;

use num_complex::ParseComplexError;
use thiserror::Error;

use crate::value::Value;

/// Failure decoding a tag literal into a declared shape.
#[derive(Debug, Error)]
pub enum LiteralError {
    /// The literal is not valid YAML.
    #[error(transparent)]
    Yaml(#[from] Box<serde_saphyr::Error>),

    /// The decoded YAML does not match the declared shape.
    #[error("cannot unmarshal {found} into {expected}")]
    Mismatch {
        /// Declared type the literal was decoded into.
        expected: String,
        /// Short description of the YAML node that was found.
        found: String,
    },

    /// A number does not fit the declared numeric type.
    #[error("value {value} out of range for {expected}")]
    Range {
        /// Declared numeric type.
        expected: String,
        /// The offending number as written.
        value: String,
    },

    /// The intermediate text did not parse as a complex number.
    #[error("invalid complex number: {source}")]
    Complex {
        /// The decoded intermediate string or string sequence.
        parsed: Value,
        /// Underlying component parse failure.
        #[source]
        source: ParseComplexError<ParseFloatError>,
    },
}

impl LiteralError {
    /// Short description of the failing stage, used in walk diagnostics.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Complex { .. } => "complex parsing",
            _ => "yaml parsing",
        }
    }

    /// Value registered in place of the failed parse.
    ///
    /// Complex failures fall back to the decoded intermediate; every other
    /// failure falls back to the raw literal text.
    #[must_use]
    pub fn fallback(&self, literal: &str) -> Value {
        match self {
            Self::Complex { parsed, .. } => parsed.clone(),
            _ => Value::Scalar(crate::Scalar::String(literal.to_owned())),
        }
    }
}

impl From<serde_saphyr::Error> for LiteralError {
    fn from(err: serde_saphyr::Error) -> Self {
        Self::Yaml(Box::new(err))
    }
}

/// A default tag that failed to decode during a walk.
///
/// The walk continues past it; the fallback value has already been
/// registered at `path` by the time this error is reported.
#[derive(Debug, Error)]
#[error("tag walker - {} [{path}={literal:?}]: {source}", .source.stage())]
pub struct ConversionError {
    /// Path of the field whose tag failed.
    pub path: String,
    /// The tag literal as written.
    pub literal: String,
    /// Underlying decoding failure.
    #[source]
    pub source: LiteralError,
}
