//! Procedural macros for `confwalk`.
//!
//! `#[derive(Walkable)]` turns a struct with named fields into a walkable
//! shape. Each field becomes a compile-time descriptor carrying its name,
//! its declared type, and the tags listed in `#[confwalk(...)]`:
//!
//! ```rust,ignore
//! #[derive(confwalk::Walkable)]
//! struct Log {
//!     #[confwalk(default = "info")]
//!     level: String,
//!     #[confwalk(mapstructure = ",squash")]
//!     output: Output,
//!     #[confwalk(skip)]
//!     cache: Vec<u8>,
//! }
//! ```
//!
//! Any tag name is accepted; the walker decides which ones it reads. Tag
//! values may be string, integer, float, bool, or char literals and are
//! stored as text.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for the `confwalk::Walkable` trait.
///
/// Supported attributes:
/// - `#[confwalk(crate = "path")]` on the struct re-points generated paths
///   when the runtime crate is renamed;
/// - `#[confwalk(<tag> = <literal>, ...)]` on a field attaches tags;
/// - `#[confwalk(skip)]` or `#[serde(skip)]` on a field hides it.
#[proc_macro_derive(Walkable, attributes(confwalk))]
pub fn derive_walkable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::derive_walkable(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
