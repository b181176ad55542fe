//! Runtime crate path used by the generated `Walkable` impls.
//!
//! Shapes and values are built from `confwalk` types. A crate depending on
//! `confwalk` under another name, or re-exporting it, points the derive at
//! that path with `#[confwalk(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// Path prefixing `Shape`, `Value`, and `Walkable` in the expansion.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { confwalk }, |path| quote! { #path })
}
