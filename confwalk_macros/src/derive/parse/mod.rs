//! Parsing utilities for the `Walkable` derive macro.

use syn::parenthesized;
use syn::{Attribute, Data, DeriveInput, Fields, Token};

mod literals;
mod serde_attrs;

use literals::tag_literal;
use serde_attrs::serde_skip;

/// Struct-level attributes recognised by `#[derive(Walkable)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Walkable)]`.
///
/// - `skip` hides the field from the walker.
/// - every other `key = literal` pair becomes a tag in declaration order.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub skip: bool,
    pub tags: Vec<(String, String)>,
}

/// A named field together with its parsed attributes.
pub(crate) struct WalkField {
    pub field: syn::Field,
    pub attrs: FieldAttrs,
}

/// Iterate all `#[confwalk(...)]` attributes once and apply a callback.
fn parse_confwalk<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("confwalk")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[confwalk(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_confwalk(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let lit = meta.value()?.parse::<syn::LitStr>()?;
            out.crate_path = Some(lit.parse()?);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Extracts the tags and `skip` flag of a field.
///
/// A tag may appear once per field; repeating it is an error so a typo
/// cannot silently replace an earlier default.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs {
        skip: serde_skip(attrs)?,
        tags: Vec::new(),
    };
    parse_confwalk(attrs, |meta| {
        if meta.path.is_ident("skip") {
            out.skip = true;
            return Ok(());
        }
        let Some(key) = meta.path.get_ident().map(|ident| ident.to_string()) else {
            return Err(meta.error("tag names must be plain identifiers"));
        };
        if out.tags.iter().any(|(existing, _)| *existing == key) {
            return Err(meta.error(format!("duplicate `{key}` tag")));
        }
        let value = tag_literal(meta, &key)?;
        out.tags.push((key, value));
        Ok(())
    })?;
    Ok(out)
}

/// Gathers the struct identifier, its walkable fields, and all attribute
/// metadata in one pass so invalid input fails fast.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<(StructAttrs, Vec<WalkField>)> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Walkable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Walkable can only be derived for structs",
            ));
        }
    };

    let mut walk_fields = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        if !attrs.skip {
            walk_fields.push(WalkField { field, attrs });
        }
    }
    Ok((struct_attrs, walk_fields))
}
