//! Decoding of default tag literals into typed values.
//!
//! A literal is read as a YAML document with `serde-saphyr` and then
//! converted into a [`Value`] of the declared [`Shape`]. YAML has no complex
//! number type, so complex targets take two phases: the literal is first
//! decoded as text (or a sequence of text) and each string is then parsed as
//! `<real>+<imag>i` at the declared component width.

mod complex;
mod decode;
mod node;

use serde_saphyr::Options;

use crate::{
    error::LiteralError,
    shape::{ScalarKind, Shape},
    value::Value,
};

/// Decode `literal` into a value of `shape`.
///
/// Pointer shapes decode their pointee and wrap it in a present pointer.
///
/// # Errors
///
/// Returns [`LiteralError::Yaml`] when the literal is not valid YAML,
/// [`LiteralError::Mismatch`] or [`LiteralError::Range`] when the decoded
/// YAML does not fit the shape, and [`LiteralError::Complex`] when a
/// complex component fails to parse.
///
/// # Panics
///
/// Panics if the substituted complex parse shape produced a value the
/// complex conversion has no case for. This indicates a bug in the parser,
/// not a malformed literal.
///
/// # Examples
///
/// ```
/// use confwalk::{Scalar, ScalarKind, Shape, Value, literal};
/// let shape = Shape::Scalar(ScalarKind::Complex64);
/// let value = literal::parse("64+2i", &shape)?;
/// assert_eq!(
///     value,
///     Value::Scalar(Scalar::Complex64(num_complex::Complex32::new(64.0, 2.0)))
/// );
/// # Ok::<(), confwalk::LiteralError>(())
/// ```
pub fn parse(literal: &str, shape: &Shape) -> Result<Value, LiteralError> {
    let node = read_yaml(literal)?;
    let Some(substitute) = parse_shape(shape) else {
        return decode::decode(&node, shape);
    };
    let parsed = decode::decode(&node, &substitute)?;
    if let (Some(len), Value::Sequence(items)) = (array_len(shape), &parsed)
        && items.len() > len
    {
        return Err(LiteralError::Range {
            expected: shape.to_string(),
            value: format!("sequence of {} elements", items.len()),
        });
    }
    complex::to_complex(&parsed, shape).map_err(|source| LiteralError::Complex { parsed, source })
}

/// Shape the YAML decoder targets in place of `shape`.
///
/// Returns `None` when `shape` decodes directly. Complex scalars decode as
/// text, sequences and arrays of complex numbers as sequences of text, and
/// pointers to either use their pointee's substitute.
#[must_use]
pub fn parse_shape(shape: &Shape) -> Option<Shape> {
    match shape {
        Shape::Scalar(kind) if kind.is_complex() => Some(Shape::Scalar(ScalarKind::String)),
        Shape::Sequence(element) | Shape::Array(element, _) if is_complex(element) => Some(
            Shape::Sequence(Box::new(Shape::Scalar(ScalarKind::String))),
        ),
        Shape::Pointer(pointee) => parse_shape(pointee),
        _ => None,
    }
}

/// Declared length of an array shape, looking through pointers.
fn array_len(shape: &Shape) -> Option<usize> {
    match shape {
        Shape::Array(_, len) => Some(*len),
        Shape::Pointer(pointee) => array_len(pointee),
        _ => None,
    }
}

fn is_complex(shape: &Shape) -> bool {
    matches!(shape, Shape::Scalar(kind) if kind.is_complex())
}

/// Parse YAML with strict boolean semantics so `yes`/`no` stay strings.
///
/// Plain `null` and `~` scalars, at any depth, decode to JSON `null`.
pub(crate) fn read_yaml(literal: &str) -> Result<serde_json::Value, serde_saphyr::Error> {
    serde_saphyr::from_str_with_options::<node::Node>(
        literal,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map(|node::Node(json)| json)
}
