//! Environment provider restricted to known configuration keys.
//!
//! Wraps `figment::providers::Env`. Variable names are mapped back onto the
//! dotted keys they stand for, so `APP_LOG_TIME_FORMAT` reaches
//! `log.time_format` rather than `log.time.format`, and each value is typed
//! by the value already known at its key.

use std::{collections::HashMap, sync::Arc};

use figment::{
    Error, Metadata, Profile, Provider,
    providers::Env,
    value::{Dict, Map, Value},
};
use serde_json::{Map as JsonMap, Value as Json};
use uncased::Uncased;

use super::tree;
use crate::literal;

/// Environment variable consulted for `key`: `<PREFIX>_<KEY>` with dots
/// replaced by underscores, upper-cased.
pub(super) fn variable(prefix: &str, key: &str) -> String {
    let name = key.replace('.', "_");
    if prefix.is_empty() {
        name.to_uppercase()
    } else {
        format!("{prefix}_{name}").to_uppercase()
    }
}

/// Environment layer over the leaf keys of a known configuration tree.
///
/// Empty variables count as set and reset non-string keys to their zero
/// value.
#[derive(Clone)]
pub(super) struct KnownEnv {
    inner: Env,
    known: HashMap<String, Json>,
}

impl KnownEnv {
    /// Provider for variables prefixed with `prefix` that name a leaf key of
    /// `known`.
    pub(super) fn new(prefix: &str, known: &Json) -> Self {
        let known: HashMap<String, Json> = tree::leaves(known)
            .into_iter()
            .map(|(key, value)| (key, value.clone()))
            .collect();
        let names: Arc<HashMap<String, String>> = Arc::new(
            known
                .keys()
                .map(|key| (variable("", key).to_lowercase(), key.clone()))
                .collect(),
        );
        let stripped = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}_")
        };
        let inner = Env::prefixed(&stripped).filter_map(move |name| {
            names
                .get(&name.as_str().to_lowercase())
                .map(|key| Uncased::from(key.clone()))
        });
        Self { inner, known }
    }

    fn overlay(&self) -> Json {
        let mut overlay = Json::Object(JsonMap::new());
        for (key, raw) in self.inner.iter() {
            let Some(current) = self.known.get(key.as_str()) else {
                continue;
            };
            let value = typed(&raw, current);
            if !value.is_null() {
                tree::insert(&mut overlay, key.as_str(), value);
            }
        }
        overlay
    }
}

impl Provider for KnownEnv {
    fn metadata(&self) -> Metadata {
        self.inner.metadata()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.inner.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let Some(dict) = Value::serialize(self.overlay())?.into_dict() else {
            return Err(Error::from("environment overlay is not a mapping".to_owned()));
        };
        Ok(self.inner.profile.collect(dict))
    }
}

fn typed(raw: &str, current: &Json) -> Json {
    match current {
        Json::String(_) => Json::String(raw.to_owned()),
        _ if raw.is_empty() => zero_like(current),
        _ => literal::read_yaml(raw)
            .ok()
            .filter(|value| !value.is_null())
            .unwrap_or_else(|| Json::String(raw.to_owned())),
    }
}

fn zero_like(current: &Json) -> Json {
    match current {
        Json::Null => Json::Null,
        Json::Bool(_) => Json::Bool(false),
        Json::Number(_) => Json::from(0),
        Json::String(_) => Json::String(String::new()),
        Json::Array(_) => Json::Array(Vec::new()),
        Json::Object(_) => Json::Object(JsonMap::new()),
    }
}
