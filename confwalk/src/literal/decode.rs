//! Shape-directed conversion of decoded YAML into value trees.

use std::str::FromStr;

use serde_json::Value as Node;

use crate::{
    error::LiteralError,
    shape::{ScalarKind, Shape, StructShape},
    value::{FieldValue, Scalar, StructValue, Value},
};

/// Convert a YAML node into a value of `shape`.
///
/// `null` decodes to the zero value of any shape. Struct fields match
/// mapping keys case-insensitively; missing fields stay zero and unknown
/// keys are ignored.
pub(super) fn decode(node: &Node, shape: &Shape) -> Result<Value, LiteralError> {
    if node.is_null() {
        return Ok(shape.zero_value());
    }
    match shape {
        Shape::Scalar(kind) => scalar(node, *kind).map(Value::Scalar),
        Shape::Pointer(pointee) => Ok(Value::pointer(
            pointee.as_ref().clone(),
            decode(node, pointee)?,
        )),
        Shape::Sequence(element) => sequence(node, shape, element).map(Value::Sequence),
        Shape::Array(element, len) => {
            let mut items = sequence(node, shape, element)?;
            if items.len() > *len {
                return Err(LiteralError::Range {
                    expected: shape.to_string(),
                    value: format!("sequence of {} elements", items.len()),
                });
            }
            items.resize_with(*len, || element.zero_value());
            Ok(Value::Sequence(items))
        }
        Shape::Mapping(element) => {
            let Node::Object(entries) = node else {
                return Err(mismatch(node, shape));
            };
            entries
                .iter()
                .map(|(key, entry)| Ok((key.clone(), decode(entry, element)?)))
                .collect::<Result<Vec<_>, LiteralError>>()
                .map(Value::Mapping)
        }
        Shape::Struct(struct_shape) => structure(node, shape, struct_shape).map(Value::Struct),
    }
}

fn sequence(node: &Node, shape: &Shape, element: &Shape) -> Result<Vec<Value>, LiteralError> {
    let Node::Array(items) = node else {
        return Err(mismatch(node, shape));
    };
    items.iter().map(|item| decode(item, element)).collect()
}

fn structure(
    node: &Node,
    shape: &Shape,
    struct_shape: &StructShape,
) -> Result<StructValue, LiteralError> {
    let Node::Object(entries) = node else {
        return Err(mismatch(node, shape));
    };
    let fields = struct_shape
        .fields
        .iter()
        .map(|field| {
            let declared = field.shape();
            let value = entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(field.name))
                .map_or_else(
                    || Ok(declared.zero_value()),
                    |(_, entry)| decode(entry, &declared),
                )?;
            Ok(FieldValue {
                shape: *field,
                value,
            })
        })
        .collect::<Result<Vec<_>, LiteralError>>()?;
    Ok(StructValue {
        name: struct_shape.name,
        fields,
    })
}

fn scalar(node: &Node, kind: ScalarKind) -> Result<Scalar, LiteralError> {
    let scalar = match kind {
        ScalarKind::Bool => Scalar::Bool(
            node.as_bool()
                .ok_or_else(|| mismatch(node, &Shape::Scalar(kind)))?,
        ),
        ScalarKind::I8 => Scalar::I8(integer(node, kind)?),
        ScalarKind::I16 => Scalar::I16(integer(node, kind)?),
        ScalarKind::I32 => Scalar::I32(integer(node, kind)?),
        ScalarKind::I64 => Scalar::I64(integer(node, kind)?),
        ScalarKind::Isize => Scalar::Isize(integer(node, kind)?),
        ScalarKind::U8 => Scalar::U8(integer(node, kind)?),
        ScalarKind::U16 => Scalar::U16(integer(node, kind)?),
        ScalarKind::U32 => Scalar::U32(integer(node, kind)?),
        ScalarKind::U64 => Scalar::U64(integer(node, kind)?),
        ScalarKind::Usize => Scalar::Usize(integer(node, kind)?),
        ScalarKind::F32 => Scalar::F32(float(node, kind)?),
        ScalarKind::F64 => Scalar::F64(float(node, kind)?),
        ScalarKind::Char => Scalar::Char(character(node)?),
        ScalarKind::String => Scalar::String(text(node, kind)?),
        ScalarKind::Any => Scalar::Any(node.clone()),
        // Complex targets are decoded as text first; see `parse_shape`.
        ScalarKind::Complex64 | ScalarKind::Complex128 => {
            return Err(mismatch(node, &Shape::Scalar(kind)));
        }
    };
    Ok(scalar)
}

fn integer<T>(node: &Node, kind: ScalarKind) -> Result<T, LiteralError>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    match node {
        Node::Number(number) => {
            let converted = if let Some(signed) = number.as_i64() {
                <T as TryFrom<i64>>::try_from(signed).ok()
            } else if let Some(unsigned) = number.as_u64() {
                <T as TryFrom<u64>>::try_from(unsigned).ok()
            } else {
                return Err(mismatch(node, &Shape::Scalar(kind)));
            };
            converted.ok_or_else(|| LiteralError::Range {
                expected: kind.name().to_owned(),
                value: number.to_string(),
            })
        }
        Node::String(digits) => digits
            .trim()
            .parse()
            .map_err(|_| mismatch(node, &Shape::Scalar(kind))),
        _ => Err(mismatch(node, &Shape::Scalar(kind))),
    }
}

fn float<T: FromStr>(node: &Node, kind: ScalarKind) -> Result<T, LiteralError> {
    let written = match node {
        Node::Number(number) => number.to_string(),
        Node::String(digits) => digits.trim().to_owned(),
        _ => return Err(mismatch(node, &Shape::Scalar(kind))),
    };
    written
        .parse()
        .map_err(|_| mismatch(node, &Shape::Scalar(kind)))
}

fn character(node: &Node) -> Result<char, LiteralError> {
    let shape = Shape::Scalar(ScalarKind::Char);
    match node {
        Node::String(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(single), None) => Ok(single),
                _ => Err(mismatch(node, &shape)),
            }
        }
        Node::Number(number) => number
            .as_u64()
            .and_then(|code| u32::try_from(code).ok())
            .and_then(char::from_u32)
            .ok_or_else(|| LiteralError::Range {
                expected: shape.to_string(),
                value: number.to_string(),
            }),
        _ => Err(mismatch(node, &shape)),
    }
}

fn text(node: &Node, kind: ScalarKind) -> Result<String, LiteralError> {
    match node {
        Node::String(text) => Ok(text.clone()),
        Node::Bool(flag) => Ok(flag.to_string()),
        Node::Number(number) => Ok(number.to_string()),
        _ => Err(mismatch(node, &Shape::Scalar(kind))),
    }
}

fn mismatch(node: &Node, shape: &Shape) -> LiteralError {
    LiteralError::Mismatch {
        expected: shape.to_string(),
        found: describe(node),
    }
}

/// Describe a node the way YAML tags its kind, quoting scalar content.
fn describe(node: &Node) -> String {
    match node {
        Node::Null => "!!null".to_owned(),
        Node::Bool(flag) => format!("!!bool `{flag}`"),
        Node::Number(number) if number.is_f64() => format!("!!float `{number}`"),
        Node::Number(number) => format!("!!int `{number}`"),
        Node::String(text) => format!("!!str `{text}`"),
        Node::Array(_) => "!!seq".to_owned(),
        Node::Object(_) => "!!map".to_owned(),
    }
}
