//! Shared helpers for integration tests.
//!
//! Not every test binary uses every helper.

#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use anyhow::{Result, anyhow};
use confwalk::{Registrations, TagWalker, Value, WalkError, Walkable};

/// Runs `f` inside a [`figment::Jail`] and returns its output.
///
/// The jail restores the working directory and environment afterwards.
/// Figment errors are converted into `anyhow` errors.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure returned no value"))
}

/// Converts any displayable error into a [`figment::Error`] for use inside
/// jail closures.
pub fn jail_error(err: &impl ToString) -> figment::Error {
    figment::Error::from(err.to_string())
}

/// Walks `value` with the `tag`/`map` tag names and returns the ordered
/// registrations together with the walk outcome.
pub fn walk(value: &Value, zero: bool) -> (Vec<(String, Value)>, Result<(), WalkError>) {
    let walker = TagWalker::new("tag", "map", zero);
    let mut sink = Registrations::default();
    let outcome = walker.walk("", value, &mut sink);
    let registrations = sink
        .into_iter()
        .map(|registration| (registration.path, registration.value))
        .collect();
    (registrations, outcome)
}

/// Expected registration of `value` at `path`.
pub fn reg<T: Walkable + ?Sized>(path: &str, value: &T) -> (String, Value) {
    (path.to_owned(), value.to_value())
}
