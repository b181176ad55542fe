//! Tag-driven traversal of value trees.
//!
//! The [`TagWalker`] visits a [`Value`] depth-first and registers every
//! addressable path with a [`DefaultSink`]. Struct fields contribute the
//! literal of their default tag when their current value is zero, explicit
//! values win over declared defaults, and absent pointers are probed through
//! a materialised zero value so nested paths are always discovered.
//!
//! A failing default literal never stops the walk: the fallback value is
//! registered and the failure is returned once the walk completes.

mod sink;

pub use sink::{DefaultSink, Registration, Registrations};

use crate::{
    error::{ConversionError, WalkError},
    literal, path,
    shape::FieldShape,
    value::{StructValue, Value},
    walkable::Walkable,
};

/// Walks value trees and reports paths with their defaults.
///
/// The walker only holds its configuration. Errors are collected per call,
/// so one walker can be shared and reused freely.
///
/// # Examples
///
/// ```
/// use confwalk::{Registrations, TagWalker, Walkable};
///
/// #[derive(Walkable)]
/// struct Server {
///     #[confwalk(default = "localhost")]
///     host: String,
///     #[confwalk(default = 8080)]
///     port: u16,
/// }
///
/// let server = Server { host: String::new(), port: 9000 };
/// let mut sink = Registrations::default();
/// TagWalker::default().walk_value("server", &server, &mut sink)?;
/// assert_eq!(sink.len(), 2);
/// assert_eq!(
///     sink.get("server.port"),
///     Some(&confwalk::Value::Scalar(confwalk::Scalar::U16(9000)))
/// );
/// # Ok::<(), confwalk::WalkError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWalker {
    default_tag: String,
    map_tag: String,
    zero: bool,
}

impl Default for TagWalker {
    fn default() -> Self {
        Self::new(crate::DEFAULT_TAG, crate::MAP_TAG, false)
    }
}

impl TagWalker {
    /// Create a walker reading literals from `default_tag` and rename
    /// directives from `map_tag`.
    ///
    /// With `zero` set, zero-valued fields without a default literal are
    /// still registered with their zero value.
    #[must_use]
    pub fn new(default_tag: impl Into<String>, map_tag: impl Into<String>, zero: bool) -> Self {
        Self {
            default_tag: default_tag.into(),
            map_tag: map_tag.into(),
            zero,
        }
    }

    /// Name of the tag carrying default literals.
    #[must_use]
    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    /// Name of the tag carrying rename directives.
    #[must_use]
    pub fn map_tag(&self) -> &str {
        &self.map_tag
    }

    /// Whether zero values are reported.
    #[must_use]
    pub const fn zero(&self) -> bool {
        self.zero
    }

    /// Walk `value` below the lower-cased root `path`, registering each
    /// discovered path with `sink`.
    ///
    /// # Errors
    ///
    /// Returns a [`WalkError`] listing every default literal that failed to
    /// decode. The walk still visits every path and registers a fallback for
    /// each failure.
    pub fn walk<S>(&self, path: &str, value: &Value, sink: &mut S) -> Result<(), WalkError>
    where
        S: DefaultSink + ?Sized,
    {
        let mut walk = Walk {
            walker: self,
            sink,
            errors: Vec::new(),
        };
        walk.value(&path.to_lowercase(), value);
        WalkError::from_errors(walk.errors).map_or(Ok(()), Err)
    }

    /// Walk a [`Walkable`] value; see [`TagWalker::walk`].
    ///
    /// # Errors
    ///
    /// Returns a [`WalkError`] listing every default literal that failed to
    /// decode.
    pub fn walk_value<T, S>(&self, path: &str, value: &T, sink: &mut S) -> Result<(), WalkError>
    where
        T: Walkable,
        S: DefaultSink + ?Sized,
    {
        self.walk(path, &value.to_value(), sink)
    }
}

/// State of a single walk.
struct Walk<'a, S: ?Sized> {
    walker: &'a TagWalker,
    sink: &'a mut S,
    errors: Vec<ConversionError>,
}

impl<S: DefaultSink + ?Sized> Walk<'_, S> {
    fn value(&mut self, path: &str, value: &Value) {
        match value {
            Value::Invalid => {}
            Value::Pointer { .. } => self.value(path, &value.deref_or_zero()),
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.value(&path::element(path, &index.to_string()), item);
                }
            }
            Value::Mapping(entries) => {
                for (key, item) in entries {
                    self.value(&path::element(path, key), item);
                }
            }
            Value::Struct(fields) => self.fields(path, fields),
            Value::Scalar(scalar) => {
                if !scalar.is_zero() || self.walker.zero {
                    self.register(path, value.clone());
                }
            }
        }
    }

    fn fields(&mut self, path: &str, value: &StructValue) {
        for field in &value.fields {
            let rename = field.shape.tag(&self.walker.map_tag).unwrap_or_default();
            let is_struct = field.shape.shape().is_struct();
            let field_path = path::field_path(path, field.shape.name, rename, is_struct);
            self.field(&field_path, &field.shape, &field.value);
        }
    }

    fn field(&mut self, path: &str, field: &FieldShape, value: &Value) {
        match value {
            Value::Struct(nested) => {
                if self.literal(field).is_some() {
                    self.call_field(path, field);
                } else {
                    self.fields(path, nested);
                }
            }
            Value::Pointer { .. } => self.field(path, field, &value.deref_or_zero()),
            Value::Sequence(items) => {
                if !items.is_empty() {
                    self.value(path, value);
                }
                self.call_field(path, field);
            }
            Value::Mapping(entries) => {
                if !entries.is_empty() {
                    self.value(path, value);
                }
                self.call_field(path, field);
            }
            Value::Scalar(scalar) => {
                if !scalar.is_zero() {
                    self.register(path, value.clone());
                } else if self.literal(field).is_some() {
                    self.call_field(path, field);
                } else if self.walker.zero {
                    self.register(path, value.clone());
                }
            }
            Value::Invalid => self.call_field(path, field),
        }
    }

    /// Register the decoded default literal of `field`, if it has one.
    fn call_field(&mut self, path: &str, field: &FieldShape) {
        let Some(text) = self.literal(field) else {
            return;
        };
        match literal::parse(text, &field.shape()) {
            Ok(value) => self.register(path, value),
            Err(source) => {
                self.register(path, source.fallback(text));
                self.errors.push(ConversionError {
                    path: path.to_owned(),
                    literal: text.to_owned(),
                    source,
                });
            }
        }
    }

    fn literal(&self, field: &FieldShape) -> Option<&'static str> {
        field
            .tag(&self.walker.default_tag)
            .filter(|literal| !literal.is_empty())
    }

    fn register(&mut self, path: &str, value: Value) {
        self.sink.set_default(path, value);
    }
}
