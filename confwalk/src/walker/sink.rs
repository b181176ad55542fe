//! Receivers for the `(path, value)` pairs discovered by a walk.

use crate::value::Value;

/// Receiver of default registrations.
///
/// Implemented for any `FnMut(&str, Value)` closure, for [`Registrations`],
/// and by [`Reader`](crate::Reader).
pub trait DefaultSink {
    /// Register `value` as the default at `path`.
    fn set_default(&mut self, path: &str, value: Value);
}

impl<F> DefaultSink for F
where
    F: FnMut(&str, Value),
{
    fn set_default(&mut self, path: &str, value: Value) {
        self(path, value);
    }
}

/// One registration made by a walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Dotted path the value was registered at.
    pub path: String,
    /// Registered value.
    pub value: Value,
}

/// Sink recording registrations in the order they were made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registrations(Vec<Registration>);

impl Registrations {
    /// Iterate over the recorded registrations.
    #[must_use = "iterators should be consumed to inspect registrations"]
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.0.iter()
    }

    /// Number of recorded registrations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last value registered at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.0
            .iter()
            .rev()
            .find(|registration| registration.path == path)
            .map(|registration| &registration.value)
    }
}

impl DefaultSink for Registrations {
    fn set_default(&mut self, path: &str, value: Value) {
        self.0.push(Registration {
            path: path.to_owned(),
            value,
        });
    }
}

impl<'a> IntoIterator for &'a Registrations {
    type Item = &'a Registration;
    type IntoIter = std::slice::Iter<'a, Registration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Registrations {
    type Item = Registration;
    type IntoIter = std::vec::IntoIter<Registration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
