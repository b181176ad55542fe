//! Conversion of Rust values into walkable value trees.
//!
//! Structs implement [`Walkable`] through `#[derive(Walkable)]`; this module
//! covers the standard library types a configuration struct is built from.
//! `Option<T>` is the pointer type: `None` is an absent pointer whose zero
//! pointee is materialised while walking.

use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
};

use camino::Utf8PathBuf;
use num_complex::Complex;

use crate::{
    shape::{ScalarKind, Shape},
    value::{Scalar, Value},
};

/// Types the [`TagWalker`](crate::TagWalker) can traverse.
pub trait Walkable {
    /// Declared shape of the type.
    fn shape() -> Shape;

    /// Snapshot of the current value.
    fn to_value(&self) -> Value;
}

macro_rules! copy_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl Walkable for $ty {
            fn shape() -> Shape {
                Shape::Scalar(ScalarKind::$variant)
            }

            fn to_value(&self) -> Value {
                Value::Scalar(Scalar::$variant(*self))
            }
        }
    )*};
}

copy_scalar!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    Complex<f32> => Complex64,
    Complex<f64> => Complex128,
);

impl Walkable for String {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::String)
    }

    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::String(self.clone()))
    }
}

impl Walkable for PathBuf {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::String)
    }

    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::String(self.to_string_lossy().into_owned()))
    }
}

impl Walkable for Utf8PathBuf {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::String)
    }

    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::String(self.as_str().to_owned()))
    }
}

impl Walkable for serde_json::Value {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Any)
    }

    fn to_value(&self) -> Value {
        Value::Scalar(Scalar::Any(self.clone()))
    }
}

impl<T: Walkable> Walkable for Option<T> {
    fn shape() -> Shape {
        Shape::Pointer(Box::new(T::shape()))
    }

    fn to_value(&self) -> Value {
        Value::Pointer {
            pointee: T::shape(),
            target: self.as_ref().map(|target| Box::new(target.to_value())),
        }
    }
}

impl<T: Walkable> Walkable for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_value(&self) -> Value {
        self.as_ref().to_value()
    }
}

impl<T: Walkable> Walkable for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Walkable::to_value).collect())
    }
}

impl<T: Walkable, const N: usize> Walkable for [T; N] {
    fn shape() -> Shape {
        Shape::Array(Box::new(T::shape()), N)
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Walkable::to_value).collect())
    }
}

impl<K: ToString, V: Walkable> Walkable for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Mapping(Box::new(V::shape()))
    }

    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_value()))
                .collect(),
        )
    }
}

/// Entries are sorted by key so repeated walks register in the same order.
impl<K: ToString, V: Walkable, S> Walkable for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Mapping(Box::new(V::shape()))
    }

    fn to_value(&self) -> Value {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_value()))
            .collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));
        Value::Mapping(entries)
    }
}
