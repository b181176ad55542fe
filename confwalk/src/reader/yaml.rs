//! Figment provider for YAML config files, backed by `serde-saphyr`.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};
use serde_saphyr::Options;

#[derive(Debug, Clone)]
enum Source {
    File,
    Inline(String),
}

/// Figment provider reading a YAML mapping.
///
/// Booleans are strict: `yes`, `no`, `on`, and `off` stay strings. An empty
/// document contributes no values.
#[derive(Debug, Clone)]
pub struct SaphyrYaml {
    path: Utf8PathBuf,
    source: Source,
    profile: Profile,
}

impl SaphyrYaml {
    /// Provider reading `path` each time it is queried.
    #[must_use]
    pub fn file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: Source::File,
            profile: Profile::Default,
        }
    }

    /// Provider for in-memory YAML; `path` only labels the metadata.
    #[must_use]
    pub fn string(path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: Source::Inline(contents.into()),
            profile: Profile::Default,
        }
    }

    /// Emit values into `profile` instead of the default profile.
    #[must_use]
    pub fn profile(mut self, profile: impl Into<Profile>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Path this provider reads or reports.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn contents(&self) -> std::io::Result<String> {
        match &self.source {
            Source::File => std::fs::read_to_string(&self.path),
            Source::Inline(contents) => Ok(contents.clone()),
        }
    }

    fn dict(&self, contents: &str) -> Result<Dict, figment::Error> {
        if contents.trim().is_empty() {
            return Ok(Dict::new());
        }
        let value: Option<FigmentValue> = serde_saphyr::from_str_with_options(
            contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
        .map_err(|err| Kind::Message(format!("parsing {}: {err}", self.path)))?;
        let Some(value) = value else {
            return Ok(Dict::new());
        };
        let actual = value.to_actual();
        value
            .into_dict()
            .ok_or_else(|| Kind::InvalidType(actual, "map".into()).into())
    }
}

impl Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::from("YAML file", self.path.as_std_path())
    }

    fn data(&self) -> Result<BTreeMap<Profile, Dict>, figment::Error> {
        let contents = self
            .contents()
            .map_err(|err| Kind::Message(format!("reading {}: {err}", self.path)))?;
        let dict = self.dict(&contents)?;
        Ok(self.profile.collect(dict))
    }
}
