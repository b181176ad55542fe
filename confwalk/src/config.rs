//! Common application configuration.

use serde::{Deserialize, Serialize};

use crate::{Walkable, log::LogConfig};

/// Configuration shared by services, jobs, and commands.
///
/// Application configs embed it with a squashed field so its keys stay at
/// the top level:
///
/// ```
/// use confwalk::{Config, Registrations, TagWalker, Walkable};
/// use serde::Deserialize;
///
/// #[derive(Default, Deserialize, Walkable)]
/// #[serde(default)]
/// struct Service {
///     #[serde(flatten)]
///     #[confwalk(mapstructure = ",squash")]
///     base: Config,
///     #[confwalk(default = 8080)]
///     port: u16,
/// }
///
/// let mut sink = Registrations::default();
/// TagWalker::default().walk_value("", &Service::default(), &mut sink)?;
/// assert!(sink.get("env").is_some());
/// assert!(sink.get("log.level").is_some());
/// assert!(sink.get("port").is_some());
/// # Ok::<(), confwalk::WalkError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Walkable)]
#[serde(default)]
pub struct Config {
    /// Execution environment, such as `local`, `prod`, or `test`.
    #[confwalk(default = "prod")]
    pub env: String,
    /// Log set-up.
    pub log: LogConfig,
}
