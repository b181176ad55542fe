//! Layered configuration reader.
//!
//! A [`Reader`] merges four layers, lowest precedence first: defaults
//! registered by walking the config struct and by [`Reader::set_default`],
//! the environment specific YAML file, environment variables for every known
//! key, and explicit overrides set with [`Reader::set`]. The merged view is
//! extracted into the config type with figment.

mod env;
mod locate;
mod tree;
mod yaml;

use std::marker::PhantomData;

use camino::{Utf8Path, Utf8PathBuf};
use figment::{Figment, providers::Serialized};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value as Json};
use tracing::{debug, error, warn};

pub use locate::{env_name, normalize};
pub use yaml::SaphyrYaml;

use crate::{
    DEFAULT_TAG, MAP_TAG,
    error::ConfigError,
    value::Value,
    walkable::Walkable,
    walker::{DefaultSink, TagWalker},
};

/// Key of the flag making [`Reader::read_config`] fail on load errors.
pub const STRICT_LOAD: &str = "reader.strict.load";

/// Key of the flag making [`Reader::set_default_config`] fail on literals
/// that do not decode.
pub const STRICT_DEFAULTS: &str = "reader.strict.defaults";

/// Configuration reader for the config type `C`.
///
/// Sequences and mappings without a default literal register no key, so
/// config types should carry `#[serde(default)]` to fall back to their
/// `Default` values for such fields.
///
/// # Examples
///
/// ```rust,no_run
/// use confwalk::{Reader, Walkable};
/// use serde::Deserialize;
///
/// #[derive(Default, Deserialize, Walkable)]
/// #[serde(default)]
/// struct Settings {
///     #[confwalk(default = "localhost")]
///     host: String,
///     #[confwalk(default = 8080)]
///     port: u16,
/// }
///
/// # fn main() -> Result<(), confwalk::ConfigError> {
/// // Reads `app.yaml`, or `app-dev.yaml` when `APP_ENV=dev`, from the
/// // working directory and applies `APP_HOST`/`APP_PORT`.
/// let settings: Settings = Reader::new("APP", "app").load_config("startup")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Reader<C> {
    prefix: String,
    name: String,
    paths: Vec<Utf8PathBuf>,
    file: Option<Utf8PathBuf>,
    defaults: Json,
    overrides: Json,
    config: PhantomData<fn() -> C>,
}

impl<C> Reader<C>
where
    C: Walkable + Default + DeserializeOwned,
{
    /// Create a reader for variables prefixed with `prefix` and config files
    /// named after [`env_name`]`(prefix, name)`, searched in the working
    /// directory.
    ///
    /// Every path of `C::default()` is registered as a default, including
    /// zero values, so the environment overlay knows every key.
    #[must_use]
    pub fn new(prefix: &str, name: &str) -> Self {
        let mut reader = Self {
            prefix: prefix.to_owned(),
            name: env_name(prefix, name),
            paths: Vec::new(),
            file: None,
            defaults: Json::Object(Map::new()),
            overrides: Json::Object(Map::new()),
            config: PhantomData,
        };
        reader.add_config_path(".");
        reader.register_defaults("", &C::default(), true);
        reader
    }

    /// Apply a customisation step, such as registering further defaults.
    pub fn setup(&mut self, setup: impl FnOnce(&mut Self)) -> &mut Self {
        setup(self);
        self
    }

    /// Config file name without extension.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Environment variable prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Normalised config file search paths, in search order.
    #[must_use]
    pub fn config_paths(&self) -> &[Utf8PathBuf] {
        &self.paths
    }

    /// Config file found by the last successful [`Reader::read_config`].
    #[must_use]
    pub const fn config_file(&self) -> Option<&Utf8PathBuf> {
        self.file.as_ref()
    }

    /// Add a config file search path; see [`normalize`].
    pub fn add_config_path(&mut self, path: &str) -> &mut Self {
        let normalized = normalize(path);
        if !self.paths.contains(&normalized) {
            self.paths.push(normalized);
        }
        self
    }

    /// Register `value` as the default at the lower-cased dotted `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Value`] when `value` cannot be represented, or
    /// when `key` descends into a sequence through a non-numeric segment.
    pub fn set_default(
        &mut self,
        key: &str,
        value: impl Serialize,
    ) -> Result<&mut Self, ConfigError> {
        let lowered = key.to_lowercase();
        let json = to_json(&lowered, &value)?;
        if !tree::insert(&mut self.defaults, &lowered, json) {
            return Err(unaddressable(lowered));
        }
        Ok(self)
    }

    /// Register the defaults of `config` below `key`.
    ///
    /// Paths are discovered with a [`TagWalker`] over the `default` and
    /// `mapstructure` tags; with `zero` set, zero values are registered too.
    /// Literals that fail to decode register their fallback. The failures
    /// are logged, or returned when [`STRICT_DEFAULTS`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Defaults`] when literals fail to decode and
    /// [`STRICT_DEFAULTS`] is set.
    pub fn set_default_config<T: Walkable>(
        &mut self,
        key: &str,
        config: &T,
        zero: bool,
    ) -> Result<&mut Self, ConfigError> {
        match self.register_defaults(key, config, zero) {
            Some(err) if self.strict(STRICT_DEFAULTS) => Err(err),
            _ => Ok(self),
        }
    }

    /// Override the value at the lower-cased dotted `key`. Overrides take
    /// precedence over every other layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Value`] when `value` cannot be represented or
    /// `key` cannot be addressed.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<&mut Self, ConfigError> {
        let lowered = key.to_lowercase();
        let json = to_json(&lowered, &value)?;
        if !tree::insert(&mut self.overrides, &lowered, json) {
            return Err(unaddressable(lowered));
        }
        Ok(self)
    }

    /// Locate and validate the environment specific config file.
    ///
    /// The first `<name>.yaml` or `<name>.yml` found in the search paths
    /// becomes the file layer. A missing or unreadable file is logged, or
    /// returned when [`STRICT_LOAD`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] or [`ConfigError::File`] when
    /// loading fails and [`STRICT_LOAD`] is set.
    pub fn read_config(&mut self, context: &str) -> Result<&mut Self, ConfigError> {
        match self.find_file(context) {
            Ok(path) => {
                debug!(context, file = %path, "config file loaded");
                self.file = Some(path);
                Ok(self)
            }
            Err(err) if self.strict(STRICT_LOAD) => Err(err),
            Err(err) => {
                warn!(context, error = %err, "no config file found");
                Ok(self)
            }
        }
    }

    /// Extract the config from the merged layers without reading a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unmarshal`] when the merged layers do not
    /// deserialise into `C`.
    pub fn get_config(&self, context: &str) -> Result<C, ConfigError> {
        let config = self.figment().extract::<C>().map_err(|err| {
            let failure = ConfigError::Unmarshal {
                context: context.to_owned(),
                source: Box::new(err),
            };
            error!(context, error = %failure, "unmarshal config");
            failure
        })?;
        debug!(context, "config loaded");
        Ok(config)
    }

    /// Read the config file and extract the config; see
    /// [`Reader::read_config`] and [`Reader::get_config`].
    ///
    /// # Errors
    ///
    /// Returns the errors of both steps.
    pub fn load_config(&mut self, context: &str) -> Result<C, ConfigError> {
        self.read_config(context)?.get_config(context)
    }

    /// Typed lookup of a single lower-cased dotted `key` in the merged view.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unmarshal`] when the key is missing or does not
    /// deserialise into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.figment()
            .extract_inner::<T>(&key.to_lowercase())
            .map_err(|err| ConfigError::Unmarshal {
                context: key.to_owned(),
                source: Box::new(err),
            })
    }

    /// Merged view of every layer.
    #[must_use]
    pub fn figment(&self) -> Figment {
        let environment = env::KnownEnv::new(&self.prefix, &self.known());
        self.base()
            .merge(environment)
            .merge(Serialized::defaults(&self.overrides))
    }

    /// Defaults merged with the config file.
    fn base(&self) -> Figment {
        let figment = Figment::from(Serialized::defaults(&self.defaults));
        match &self.file {
            Some(path) => figment.merge(SaphyrYaml::file(path.clone())),
            None => figment,
        }
    }

    /// Every key known from the defaults and the config file.
    fn known(&self) -> Json {
        self.base()
            .extract::<Json>()
            .unwrap_or_else(|_| self.defaults.clone())
    }

    fn strict(&self, flag: &str) -> bool {
        self.get::<bool>(flag).unwrap_or(false)
    }

    fn find_file(&self, context: &str) -> Result<Utf8PathBuf, ConfigError> {
        let candidate = self.paths.iter().find_map(|dir| {
            locate::EXTENSIONS
                .iter()
                .map(|extension| dir.join(format!("{}.{extension}", self.name)))
                .find(|path| path.is_file())
        });
        let Some(path) = candidate else {
            return Err(ConfigError::FileNotFound {
                context: context.to_owned(),
                name: self.name.clone(),
                searched: self
                    .paths
                    .iter()
                    .map(Utf8PathBuf::as_path)
                    .map(Utf8Path::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };
        Figment::from(SaphyrYaml::file(path.clone()))
            .extract::<Json>()
            .map_err(|err| ConfigError::File {
                context: context.to_owned(),
                path: path.clone(),
                source: Box::new(err),
            })?;
        Ok(path)
    }

    /// Walk `config` into the defaults, logging conversion failures.
    fn register_defaults<T: Walkable>(
        &mut self,
        key: &str,
        config: &T,
        zero: bool,
    ) -> Option<ConfigError> {
        let walker = TagWalker::new(DEFAULT_TAG, MAP_TAG, zero);
        let source = walker.walk_value(key, config, self).err()?;
        let error = ConfigError::Defaults {
            context: key.to_owned(),
            source,
        };
        warn!(key, error = %error, "creating defaults");
        Some(error)
    }
}

/// Walk registrations become defaults verbatim; the walker has already
/// lower-cased every segment that needs it.
impl<C> DefaultSink for Reader<C> {
    fn set_default(&mut self, path: &str, value: Value) {
        let stored = to_json(path, &value)
            .map(|json| tree::insert(&mut self.defaults, path, json));
        match stored {
            Ok(true) => {}
            Ok(false) => warn!(path, "default path not addressable"),
            Err(err) => warn!(path, error = %err, "default not representable"),
        }
    }
}

fn to_json(key: &str, value: &impl Serialize) -> Result<Json, ConfigError> {
    serde_json::to_value(value).map_err(|source| ConfigError::Value {
        key: key.to_owned(),
        source,
    })
}

fn unaddressable(key: String) -> ConfigError {
    ConfigError::Value {
        source: serde::ser::Error::custom(format!("key `{key}` is not addressable")),
        key,
    }
}
