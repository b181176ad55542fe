//! Declared types of walkable values.
//!
//! A [`Shape`] describes the type a [`Value`] was produced from. The walker
//! needs it in two places: to materialise a zero value behind an absent
//! pointer, and to steer the literal parser when decoding a default tag.

use std::fmt;

use crate::value::{FieldValue, Scalar, StructValue, Value};

/// Scalar types understood by the walker and the literal parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// Complex number with two `f32` components.
    Complex64,
    /// Complex number with two `f64` components.
    Complex128,
    /// `char`.
    Char,
    /// `String` and other text types.
    String,
    /// Untyped value held as [`serde_json::Value`].
    Any,
}

impl ScalarKind {
    /// Whether this kind is one of the complex number kinds.
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Human readable type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Char => "char",
            Self::String => "string",
            Self::Any => "any",
        }
    }
}

/// Declared type of a walkable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single scalar.
    Scalar(ScalarKind),
    /// An optional indirection to the boxed shape.
    Pointer(Box<Self>),
    /// A growable sequence of elements.
    Sequence(Box<Self>),
    /// A fixed-length array of elements.
    Array(Box<Self>, usize),
    /// A mapping from text keys to elements.
    Mapping(Box<Self>),
    /// A struct with named fields.
    Struct(StructShape),
}

impl Shape {
    /// Builds the zero value of this shape.
    ///
    /// Pointers are absent, sequences and mappings are empty, arrays hold
    /// zero elements, and struct fields hold their own zero values.
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Scalar(kind) => Value::Scalar(Scalar::zero(*kind)),
            Self::Pointer(pointee) => Value::Pointer {
                pointee: pointee.as_ref().clone(),
                target: None,
            },
            Self::Sequence(_) => Value::Sequence(Vec::new()),
            Self::Array(element, len) => {
                Value::Sequence((0..*len).map(|_| element.zero_value()).collect())
            }
            Self::Mapping(_) => Value::Mapping(Vec::new()),
            Self::Struct(shape) => Value::Struct(shape.zero_value()),
        }
    }

    /// Whether the shape is a struct or a pointer to a struct.
    ///
    /// Only these shapes honour the `squash` rename directive.
    #[must_use]
    pub fn is_struct(&self) -> bool {
        match self {
            Self::Struct(_) => true,
            Self::Pointer(pointee) => matches!(pointee.as_ref(), Self::Struct(_)),
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Pointer(pointee) => write!(f, "*{pointee}"),
            Self::Sequence(element) => write!(f, "[]{element}"),
            Self::Array(element, len) => write!(f, "[{len}]{element}"),
            Self::Mapping(element) => write!(f, "map[string]{element}"),
            Self::Struct(shape) => f.write_str(shape.name),
        }
    }
}

/// Shape of a struct: its name and walkable fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructShape {
    /// Type name of the struct.
    pub name: &'static str,
    /// Walkable fields in declaration order.
    pub fields: Vec<FieldShape>,
}

impl StructShape {
    /// Create a struct shape from its name and field descriptors.
    #[must_use]
    pub const fn new(name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self { name, fields }
    }

    /// Look up a field descriptor by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn zero_value(&self) -> StructValue {
        StructValue {
            name: self.name,
            fields: self
                .fields
                .iter()
                .map(|field| FieldValue {
                    shape: *field,
                    value: field.shape().zero_value(),
                })
                .collect(),
        }
    }
}

/// Compile-time descriptor of one struct field.
///
/// Generated by `#[derive(Walkable)]`. The field type is kept as a function
/// so recursive struct definitions do not recurse while building shapes.
#[derive(Clone, Copy)]
pub struct FieldShape {
    /// Field name as declared, without any raw identifier prefix.
    pub name: &'static str,
    /// `(tag name, literal)` pairs attached to the field.
    pub tags: &'static [(&'static str, &'static str)],
    shape: fn() -> Shape,
}

impl FieldShape {
    /// Create a field descriptor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        tags: &'static [(&'static str, &'static str)],
        shape: fn() -> Shape,
    ) -> Self {
        Self { name, tags, shape }
    }

    /// Return the literal of the tag called `name`, if the field carries it.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, literal)| *literal)
    }

    /// Declared shape of the field.
    #[must_use]
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

impl PartialEq for FieldShape {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.tags == other.tags
    }
}

impl fmt::Debug for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldShape")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}
