//! Dotted configuration path construction.
//!
//! Paths address configuration values such as `log.level`. Field names,
//! sequence indices, and mapping keys are lower-cased when appended. An
//! explicit rename from the map tag is appended verbatim, keeping the case
//! the author wrote.

/// Directive that folds a nested struct's fields into its parent path.
pub const SQUASH: &str = "squash";

/// Directive marking a catch-all field; passed through unchanged.
pub const REMAIN: &str = "remain";

/// Join `segment` onto `parent` with a `.` separator.
///
/// An empty parent yields the segment alone.
///
/// # Examples
///
/// ```
/// use confwalk::path::join;
/// assert_eq!(join("", "log"), "log");
/// assert_eq!(join("log", "level"), "log.level");
/// ```
#[must_use]
pub fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_owned()
    } else {
        format!("{parent}.{segment}")
    }
}

/// Append a lower-cased element segment, as used for sequence indices and
/// mapping keys.
#[must_use]
pub fn element(parent: &str, key: &str) -> String {
    join(parent, &key.to_lowercase())
}

/// Parsed form of a rename tag: `name[,directive[,directive...]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rename<'a> {
    /// Explicit name, empty when the field name applies.
    pub name: &'a str,
    directives: &'a str,
}

impl<'a> Rename<'a> {
    /// Split a rename tag into its name and directives.
    #[must_use]
    pub fn parse(tag: &'a str) -> Self {
        match tag.split_once(',') {
            Some((name, directives)) => Self { name, directives },
            None => Self {
                name: tag,
                directives: "",
            },
        }
    }

    /// Whether `directive` follows the name.
    #[must_use]
    pub fn has(&self, directive: &str) -> bool {
        !self.directives.is_empty() && self.directives.split(',').any(|d| d == directive)
    }
}

/// Compute the effective path of a struct field.
///
/// - no rename tag: the lower-cased field name is appended;
/// - `squash` on a struct (or pointer to struct) field: the parent path is
///   kept so the nested fields become siblings;
/// - an explicit name: appended verbatim;
/// - anything else, including `remain` and a lone `,`: the lower-cased field
///   name is appended.
///
/// # Examples
///
/// ```
/// use confwalk::path::field_path;
/// assert_eq!(field_path("", "MyField", "", false), "myfield");
/// assert_eq!(field_path("", "MyField", "MyField", false), "MyField");
/// assert_eq!(field_path("app", "Inner", ",squash", true), "app");
/// ```
#[must_use]
pub fn field_path(parent: &str, field_name: &str, rename_tag: &str, is_struct: bool) -> String {
    if rename_tag.is_empty() {
        return element(parent, field_name);
    }
    let rename = Rename::parse(rename_tag);
    if is_struct && rename.has(SQUASH) {
        parent.to_owned()
    } else if rename.name.is_empty() {
        element(parent, field_name)
    } else {
        join(parent, rename.name)
    }
}
