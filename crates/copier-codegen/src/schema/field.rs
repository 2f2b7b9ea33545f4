use super::{ErrorSet, FieldAttr, Ty};

use syn::spanned::Spanned;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Logical name: the `target` override, or the identifier
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: Ty,

    /// Mapping directive, when the field carries `#[copy_field]`
    pub(crate) attr: Option<FieldAttr>,

    pub(crate) span: proc_macro2::Span,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field, directives: bool) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attr = None;

        for a in &field.attrs {
            if !a.path().is_ident("copy_field") {
                continue;
            }

            if !directives {
                errs.push(syn::Error::new_spanned(
                    a,
                    "#[copy_field] requires #[copy_target] on the record",
                ));
            } else if attr.is_some() {
                errs.push(syn::Error::new_spanned(a, "duplicate #[copy_field] attribute"));
            } else {
                attr = errs.check(FieldAttr::from_ast(a));
            }
        }

        let name = attr
            .as_ref()
            .and_then(|attr: &FieldAttr| attr.target.as_ref())
            .map(syn::LitStr::value)
            .unwrap_or_else(|| unraw(ident));

        errs.finish(Self {
            ident: ident.clone(),
            name,
            ty: Ty::from_ast(&field.ty),
            attr,
            span: field.span(),
        })
    }

    /// Directive selecting a mapping strategy, if any.
    pub(crate) fn directive(&self) -> Option<&FieldAttr> {
        self.attr.as_ref().filter(|attr| attr.has_strategy())
    }
}

/// Field name without a raw identifier prefix.
pub(crate) fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(name) => name.to_string(),
        None => name,
    }
}
