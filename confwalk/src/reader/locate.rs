//! Config file naming and search path normalisation.

use std::env;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Extensions tried, in order, for the config file.
pub(super) const EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Environment specific config file name.
///
/// When `<PREFIX>_ENV` holds a non-empty value the lower-cased value is
/// appended as `<name>-<env>`; otherwise `name` is returned unchanged.
///
/// # Examples
///
/// ```
/// // `EXAMPLE_ENV` is not set in the doctest environment.
/// assert_eq!(confwalk::env_name("EXAMPLE", "app"), "app");
/// ```
#[must_use]
pub fn env_name(prefix: &str, name: &str) -> String {
    match env::var(format!("{prefix}_ENV")) {
        Ok(environment) if !environment.is_empty() => {
            format!("{name}-{}", environment.to_lowercase())
        }
        _ => name.to_owned(),
    }
}

/// Normalise a config search path.
///
/// `$VAR` and `${VAR}` references are expanded (unset variables expand to
/// nothing), relative paths are resolved against the working directory, and
/// `.`/`..` components are removed lexically.
///
/// # Examples
///
/// ```
/// assert_eq!(confwalk::normalize("/etc/./app/../app"), "/etc/app");
/// ```
#[must_use]
pub fn normalize(path: &str) -> Utf8PathBuf {
    let expanded = Utf8PathBuf::from(expand(path));
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        working_dir().map_or_else(|| expanded.clone(), |dir| dir.join(&expanded))
    };
    clean(&absolute)
}

fn working_dir() -> Option<Utf8PathBuf> {
    env::current_dir()
        .ok()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
}

/// Expand `$VAR` and `${VAR}` references.
fn expand(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('$') {
        let (before, tail) = rest.split_at(start);
        expanded.push_str(before);
        let reference = tail.get(1..).unwrap_or_default();
        let (name, after) = if let Some(braced) = reference.strip_prefix('{') {
            match braced.split_once('}') {
                Some((name, after)) => (name, after),
                None => {
                    expanded.push('$');
                    rest = reference;
                    continue;
                }
            }
        } else {
            let end = reference
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(reference.len());
            reference.split_at(end)
        };
        if name.is_empty() && !reference.starts_with('{') {
            expanded.push('$');
        } else {
            expanded.push_str(&env::var(name).unwrap_or_default());
        }
        rest = after;
    }
    expanded.push_str(rest);
    expanded
}

fn clean(path: &Utf8Path) -> Utf8PathBuf {
    let mut cleaned = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match cleaned.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            other => cleaned.push(other),
        }
    }
    if cleaned.as_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
