//! Code generation for `#[derive(Walkable)]`.

mod crate_path;
mod parse;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, LitStr, ext::IdentExt, parse_quote};

use parse::{WalkField, parse_input};

/// Expand the derive for `input`.
pub(crate) fn derive_walkable(input: &DeriveInput) -> syn::Result<TokenStream> {
    let (struct_attrs, fields) = parse_input(input)?;
    let krate = crate_path::resolve(struct_attrs.crate_path.as_ref());
    let ident = &input.ident;
    let name = LitStr::new(&ident.unraw().to_string(), ident.span());

    let descriptors = fields
        .iter()
        .map(|field| field_descriptor(&krate, field))
        .collect::<syn::Result<Vec<_>>>()?;
    let members = fields.iter().map(|walk| &walk.field.ident);

    let generics = add_bounds(input.generics.clone(), &krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Walkable for #ident #ty_generics #where_clause {
            fn shape() -> #krate::Shape {
                #krate::Shape::Struct(#krate::StructShape::new(
                    #name,
                    ::std::vec![#(#descriptors),*],
                ))
            }

            fn to_value(&self) -> #krate::Value {
                #krate::Value::Struct(#krate::StructValue {
                    name: #name,
                    fields: ::std::vec![#(
                        #krate::FieldValue {
                            shape: #descriptors,
                            value: #krate::Walkable::to_value(&self.#members),
                        }
                    ),*],
                })
            }
        }
    })
}

/// Build the `FieldShape::new(..)` expression describing one field.
fn field_descriptor(krate: &TokenStream, walk: &WalkField) -> syn::Result<TokenStream> {
    let Some(ident) = walk.field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(
            &walk.field,
            "Walkable requires named fields",
        ));
    };
    let name = LitStr::new(&ident.unraw().to_string(), ident.span());
    let ty = &walk.field.ty;
    let tags = walk.attrs.tags.iter().map(|(key, value)| {
        quote! { (#key, #value) }
    });
    Ok(quote! {
        #krate::FieldShape::new(
            #name,
            &[#(#tags),*],
            <#ty as #krate::Walkable>::shape,
        )
    })
}

/// Require `Walkable` of every type parameter.
fn add_bounds(mut generics: Generics, krate: &TokenStream) -> Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#krate::Walkable));
    }
    generics
}
