use super::field::Fragment;
use super::{Direction, Expand};

use crate::diagnostic::Diagnostic;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_forward(&self) -> TokenStream {
        let source_path = self.source_path;
        let body = self.expand_literal(Direction::Forward, quote!(Self), self.target.fields.len());

        quote! {
            #[allow(unused_variables)]
            fn forward(source: &#source_path) -> Self {
                #body
            }
        }
    }

    pub(super) fn expand_reverse(&self) -> TokenStream {
        let source_path = self.source_path;
        let body = self.expand_literal(
            Direction::Reverse,
            quote!(#source_path),
            self.source.fields.len(),
        );

        quote! {
            #[allow(unused_variables)]
            fn reverse(&self) -> #source_path {
                #body
            }
        }
    }

    /// Struct literal built from every mapping that contributes in
    /// `direction`. Fields left unassigned take their default value.
    fn expand_literal(&self, direction: Direction, ty: TokenStream, total: usize) -> TokenStream {
        let mut fragments: Vec<Fragment> = vec![];

        for mapping in self.mappings {
            let Some(mut fragment) = self.expand_field(mapping, direction) else {
                continue;
            };

            for diagnostic in fragment.diagnostics.drain(..) {
                self.report(
                    diagnostic
                        .in_record(&self.target.ident)
                        .on_field(&mapping.target.ident),
                );
            }

            if !fragment.is_assigned() {
                continue;
            }

            if fragments.iter().any(|f| f.field == fragment.field) {
                self.report(
                    Diagnostic::warning(
                        mapping.target.span,
                        format!(
                            "`{}.{}` is already written back by an earlier field",
                            self.source.ident, fragment.field
                        ),
                    )
                    .in_record(&self.target.ident)
                    .on_field(&mapping.target.ident),
                );
                continue;
            }

            fragments.push(fragment);
        }

        let mut bindings: Vec<(&syn::Ident, &TokenStream)> = vec![];
        for (ident, ty) in fragments.iter().flat_map(|f| &f.bindings) {
            if !bindings.iter().any(|(seen, _)| *seen == ident) {
                bindings.push((ident, ty));
            }
        }

        let lets = bindings.iter().map(|(ident, ty)| {
            quote!(let #ident: #ty = ::core::default::Default::default();)
        });

        let assigns = fragments.iter().map(|fragment| {
            let field = &fragment.field;
            let value = &fragment.value;
            quote!(#field: #value,)
        });

        let rest = if fragments.len() < total {
            quote!(..::core::default::Default::default())
        } else {
            quote!()
        };

        quote! {
            #( #lets )*
            #ty {
                #( #assigns )*
                #rest
            }
        }
    }
}
