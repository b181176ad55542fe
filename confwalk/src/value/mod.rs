//! Runtime value trees walked by the [`TagWalker`](crate::TagWalker).
//!
//! A [`Value`] is a closed sum type mirroring the shapes a configuration
//! struct can take. [`Value::kind`] is the classifier the walker dispatches
//! on.

mod scalar;
mod serialize;

pub use scalar::Scalar;

use crate::shape::{FieldShape, Shape};

/// Classification of a [`Value`] used to drive traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Untyped absence; never registered.
    Invalid,
    /// An indirection that may be absent.
    Pointer,
    /// A sequence or array.
    Sequence,
    /// A key to value mapping.
    Mapping,
    /// A struct.
    Struct,
    /// A scalar leaf.
    Scalar {
        /// Whether the scalar equals its type's zero value.
        zero: bool,
    },
}

/// A walkable runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Untyped absence, such as a bare `null` root.
    Invalid,
    /// A scalar leaf.
    Scalar(Scalar),
    /// An optional indirection. The pointee shape allows a zero value to be
    /// materialised when the target is absent.
    Pointer {
        /// Declared type behind the pointer.
        pointee: Shape,
        /// The value pointed to, if present.
        target: Option<Box<Self>>,
    },
    /// Sequence or array elements in order.
    Sequence(Vec<Self>),
    /// Mapping entries in iteration order.
    Mapping(Vec<(String, Self)>),
    /// A struct and its walkable fields.
    Struct(StructValue),
}

impl Value {
    /// Classify the value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Invalid => Kind::Invalid,
            Self::Scalar(scalar) => Kind::Scalar {
                zero: scalar.is_zero(),
            },
            Self::Pointer { .. } => Kind::Pointer,
            Self::Sequence(_) => Kind::Sequence,
            Self::Mapping(_) => Kind::Mapping,
            Self::Struct(_) => Kind::Struct,
        }
    }

    /// Resolve a pointer to its target, materialising the pointee's zero
    /// value when the pointer is absent. Other values are returned as is.
    ///
    /// The input is never modified; a materialised value is owned by the
    /// returned [`Cow`](std::borrow::Cow).
    #[must_use]
    pub fn deref_or_zero(&self) -> std::borrow::Cow<'_, Self> {
        match self {
            Self::Pointer {
                target: Some(target),
                ..
            } => std::borrow::Cow::Borrowed(target.as_ref()),
            Self::Pointer {
                pointee,
                target: None,
            } => std::borrow::Cow::Owned(pointee.zero_value()),
            other => std::borrow::Cow::Borrowed(other),
        }
    }

    /// Wrap `target` in a present pointer to `pointee`.
    #[must_use]
    pub fn pointer(pointee: Shape, target: Self) -> Self {
        Self::Pointer {
            pointee,
            target: Some(Box::new(target)),
        }
    }

    /// Return the text of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(text)) => Some(text),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

/// Runtime value of a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    /// Type name of the struct.
    pub name: &'static str,
    /// Walkable fields in declaration order.
    pub fields: Vec<FieldValue>,
}

/// One struct field: its descriptor and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    /// Compile-time descriptor of the field.
    pub shape: FieldShape,
    /// Current value of the field.
    pub value: Value,
}
