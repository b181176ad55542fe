//! Serde attribute parsing helpers.
//!
//! A field serde never reads cannot be configured, so `#[serde(skip)]`
//! hides it from the walker as well.

use syn::Attribute;

/// Whether the field carries `#[serde(skip)]`.
pub(crate) fn serde_skip(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
            } else {
                super::discard_unknown(&meta)?;
            }
            Ok(())
        })?;
    }
    Ok(skip)
}
