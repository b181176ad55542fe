//! Second phase of complex number decoding.

use std::num::ParseFloatError;

use num_complex::{Complex32, Complex64, ParseComplexError};

use crate::{
    shape::{ScalarKind, Shape},
    value::{Scalar, Value},
};

type ComplexResult = Result<Value, ParseComplexError<ParseFloatError>>;

/// Convert the text decoded for a complex `shape` into complex numbers.
pub(super) fn to_complex(parsed: &Value, shape: &Shape) -> ComplexResult {
    match shape {
        Shape::Scalar(kind) if kind.is_complex() => number(text(parsed, shape), *kind),
        Shape::Sequence(element) | Shape::Array(element, _) => {
            let Shape::Scalar(kind) = element.as_ref() else {
                unsupported(shape)
            };
            let Value::Sequence(items) = parsed else {
                unsupported(shape)
            };
            let mut numbers = items
                .iter()
                .map(|item| number(text(item, element), *kind))
                .collect::<Result<Vec<_>, _>>()?;
            if let Shape::Array(_, len) = shape {
                numbers.resize_with(*len, || element.zero_value());
            }
            Ok(Value::Sequence(numbers))
        }
        Shape::Pointer(pointee) => Ok(Value::pointer(
            pointee.as_ref().clone(),
            to_complex(parsed, pointee)?,
        )),
        _ => unsupported(shape),
    }
}

/// Parse one complex number, optionally wrapped in parentheses.
///
/// The grammar is `num-complex`'s: `<re>`, `<im>i`, or `<re>±<im>i`, each
/// component parsed as `f32` or `f64`.
fn number(literal: &str, kind: ScalarKind) -> ComplexResult {
    let text = literal.trim();
    let trimmed = text
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .map_or(text, str::trim);
    let scalar = match kind {
        ScalarKind::Complex64 => Scalar::Complex64(trimmed.parse::<Complex32>()?),
        ScalarKind::Complex128 => Scalar::Complex128(trimmed.parse::<Complex64>()?),
        other => unsupported(&Shape::Scalar(other)),
    };
    Ok(Value::Scalar(scalar))
}

fn text<'a>(parsed: &'a Value, shape: &Shape) -> &'a str {
    parsed.as_str().unwrap_or_else(|| unsupported(shape))
}

fn unsupported(shape: &Shape) -> ! {
    panic!("tag walker - unsupported type [<unknown>={shape}]: no complex conversion")
}

#[cfg(test)]
mod tests {
    //! Unit tests for the complex conversion phase.

    use super::*;
    use rstest::rstest;

    fn strings(items: &[&str]) -> Value {
        Value::Sequence(
            items
                .iter()
                .map(|item| Value::Scalar(Scalar::String((*item).to_owned())))
                .collect(),
        )
    }

    #[rstest]
    fn array_is_padded_to_length() {
        let element = Shape::Scalar(ScalarKind::Complex128);
        let shape = Shape::Array(Box::new(element), 3);
        let Ok(Value::Sequence(items)) = to_complex(&strings(&["1+1i"]), &shape) else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(
            items.last(),
            Some(&Value::Scalar(Scalar::Complex128(Complex64::new(0.0, 0.0))))
        );
    }

    #[rstest]
    fn whitespace_is_trimmed() {
        let shape = Shape::Scalar(ScalarKind::Complex64);
        let value = Value::Scalar(Scalar::String("  1+2i ".into()));
        assert_eq!(
            to_complex(&value, &shape).ok(),
            Some(Value::Scalar(Scalar::Complex64(Complex32::new(1.0, 2.0))))
        );
    }

    #[rstest]
    #[should_panic(expected = "unsupported type")]
    fn unsupported_shape_panics() {
        let shape = Shape::Scalar(ScalarKind::I32);
        let value = Value::Scalar(Scalar::String("1".into()));
        assert!(to_complex(&value, &shape).is_err());
    }
}
