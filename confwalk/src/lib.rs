//! Core crate for the `confwalk` configuration loader.
//!
//! Configuration structs derive [`Walkable`] and annotate their fields with
//! `#[confwalk(default = "...")]` literals and `#[confwalk(mapstructure =
//! "...")]` rename directives. The [`TagWalker`] traverses such a value and
//! reports every addressable dotted path together with its default, and the
//! [`Reader`] layers those defaults beneath a YAML file, environment
//! variables, and explicit overrides before extracting the typed config.
//!
//! ```rust
//! use confwalk::{Registrations, TagWalker, Walkable};
//!
//! #[derive(Default, Walkable)]
//! struct Calibration {
//!     #[confwalk(default = 1)]
//!     i: i64,
//!     #[confwalk(default = "[1,2,3]")]
//!     s: Vec<i64>,
//! }
//!
//! let walker = TagWalker::new(confwalk::DEFAULT_TAG, confwalk::MAP_TAG, false);
//! let mut sink = Registrations::default();
//! walker.walk_value("", &Calibration::default(), &mut sink)?;
//! let paths: Vec<_> = sink.iter().map(|r| r.path.as_str()).collect();
//! assert_eq!(paths, ["i", "s"]);
//! # Ok::<(), confwalk::WalkError>(())
//! ```

extern crate self as confwalk;

pub use confwalk_macros::Walkable;

mod config;
mod error;
pub mod literal;
pub mod log;
pub mod path;
mod reader;
mod shape;
mod value;
mod walkable;
mod walker;

pub use config::Config;
pub use error::{ConfigError, ConversionError, LiteralError, WalkError};
pub use reader::{Reader, STRICT_DEFAULTS, STRICT_LOAD, SaphyrYaml, env_name, normalize};
pub use shape::{FieldShape, ScalarKind, Shape, StructShape};
pub use value::{FieldValue, Kind, Scalar, StructValue, Value};
pub use walkable::Walkable;
pub use walker::{DefaultSink, Registration, Registrations, TagWalker};

/// Conventional tag carrying a field's default literal.
pub const DEFAULT_TAG: &str = "default";

/// Conventional tag carrying a field's rename, `squash`, and `remain`
/// directives.
pub const MAP_TAG: &str = "mapstructure";
