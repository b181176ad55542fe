//! Literal parsing helpers for tag values.

use syn::{Expr, ExprLit, ExprUnary, Lit, UnOp};

/// Parses the value of a tag into its textual form.
///
/// String literals keep their content; numbers keep their base-10 digits
/// (a leading `-` is accepted); bools and chars are spelled out.
///
/// # Examples
///
/// ```rust,ignore
/// // #[confwalk(default = -2)] yields "-2"
/// // #[confwalk(default = "[1,2,3]")] yields "[1,2,3]"
/// let text = tag_literal(meta, "default")?;
/// ```
pub(crate) fn tag_literal(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<String> {
    let expr = meta.value()?.parse::<Expr>()?;
    let (negative, lit) = match &expr {
        Expr::Lit(ExprLit { lit, .. }) => (false, lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit { lit, .. }) => (true, lit),
            _ => return Err(invalid(&expr, key)),
        },
        _ => return Err(invalid(&expr, key)),
    };
    let text = match lit {
        Lit::Str(s) if !negative => s.value(),
        Lit::Int(i) => i.base10_digits().to_owned(),
        Lit::Float(f) => f.base10_digits().to_owned(),
        Lit::Bool(b) if !negative => b.value.to_string(),
        Lit::Char(c) if !negative => c.value().to_string(),
        _ => return Err(invalid(&expr, key)),
    };
    Ok(if negative { format!("-{text}") } else { text })
}

fn invalid(expr: &Expr, key: &str) -> syn::Error {
    syn::Error::new_spanned(
        expr,
        format!("{key} must be a string, integer, float, bool, or char literal"),
    )
}
