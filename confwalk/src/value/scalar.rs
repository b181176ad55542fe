//! Scalar leaves of the value tree.

use num_complex::{Complex32, Complex64};

use crate::shape::ScalarKind;

/// A scalar value together with its precise type.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `bool`.
    Bool(bool),
    /// `i8`.
    I8(i8),
    /// `i16`.
    I16(i16),
    /// `i32`.
    I32(i32),
    /// `i64`.
    I64(i64),
    /// `isize`.
    Isize(isize),
    /// `u8`.
    U8(u8),
    /// `u16`.
    U16(u16),
    /// `u32`.
    U32(u32),
    /// `u64`.
    U64(u64),
    /// `usize`.
    Usize(usize),
    /// `f32`.
    F32(f32),
    /// `f64`.
    F64(f64),
    /// Complex number with `f32` components.
    Complex64(Complex32),
    /// Complex number with `f64` components.
    Complex128(Complex64),
    /// `char`.
    Char(char),
    /// Text.
    String(String),
    /// Untyped value.
    Any(serde_json::Value),
}

impl Scalar {
    /// Zero value of `kind`.
    #[must_use]
    pub const fn zero(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::I8 => Self::I8(0),
            ScalarKind::I16 => Self::I16(0),
            ScalarKind::I32 => Self::I32(0),
            ScalarKind::I64 => Self::I64(0),
            ScalarKind::Isize => Self::Isize(0),
            ScalarKind::U8 => Self::U8(0),
            ScalarKind::U16 => Self::U16(0),
            ScalarKind::U32 => Self::U32(0),
            ScalarKind::U64 => Self::U64(0),
            ScalarKind::Usize => Self::Usize(0),
            ScalarKind::F32 => Self::F32(0.0),
            ScalarKind::F64 => Self::F64(0.0),
            ScalarKind::Complex64 => Self::Complex64(Complex32::new(0.0, 0.0)),
            ScalarKind::Complex128 => Self::Complex128(Complex64::new(0.0, 0.0)),
            ScalarKind::Char => Self::Char('\0'),
            ScalarKind::String => Self::String(String::new()),
            ScalarKind::Any => Self::Any(serde_json::Value::Null),
        }
    }

    /// Kind of this scalar.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::Complex64(_) => ScalarKind::Complex64,
            Self::Complex128(_) => ScalarKind::Complex128,
            Self::Char(_) => ScalarKind::Char,
            Self::String(_) => ScalarKind::String,
            Self::Any(_) => ScalarKind::Any,
        }
    }

    /// Whether the scalar equals the zero value of its kind.
    ///
    /// Floats compare bit-exactly against positive zero, so `-0.0` is not
    /// zero. An untyped value is zero only when it is `null`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(value) => !*value,
            Self::I8(value) => *value == 0,
            Self::I16(value) => *value == 0,
            Self::I32(value) => *value == 0,
            Self::I64(value) => *value == 0,
            Self::Isize(value) => *value == 0,
            Self::U8(value) => *value == 0,
            Self::U16(value) => *value == 0,
            Self::U32(value) => *value == 0,
            Self::U64(value) => *value == 0,
            Self::Usize(value) => *value == 0,
            Self::F32(value) => value.to_bits() == 0,
            Self::F64(value) => value.to_bits() == 0,
            Self::Complex64(value) => value.re.to_bits() == 0 && value.im.to_bits() == 0,
            Self::Complex128(value) => value.re.to_bits() == 0 && value.im.to_bits() == 0,
            Self::Char(value) => *value == '\0',
            Self::String(value) => value.is_empty(),
            Self::Any(value) => value.is_null(),
        }
    }
}
