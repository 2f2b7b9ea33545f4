use super::{util, Direction, Pairs};

use crate::classify::{self, Category};
use crate::diagnostic::Diagnostic;
use crate::schema::{ContainerFamily, ContainerKind, Ty, TyKind};

use proc_macro2::{Span, TokenStream};
use quote::quote;

/// A value being read: a field of the record (`source.tags`) or a closure or
/// loop binding that already holds a reference.
#[derive(Debug, Clone)]
pub(super) struct Place {
    tokens: TokenStream,
    by_ref: bool,
}

impl Place {
    pub(super) fn field(base: TokenStream, field: &syn::Ident) -> Self {
        Self {
            tokens: quote!(#base.#field),
            by_ref: false,
        }
    }

    fn binding(ident: &syn::Ident) -> Self {
        Self {
            tokens: quote!(#ident),
            by_ref: true,
        }
    }

    /// `&T`
    pub(super) fn reference(&self) -> TokenStream {
        let tokens = &self.tokens;
        if self.by_ref {
            tokens.clone()
        } else {
            quote!(&#tokens)
        }
    }

    /// `T`, for `Copy` values
    pub(super) fn copied(&self) -> TokenStream {
        let tokens = &self.tokens;
        if self.by_ref {
            quote!(*#tokens)
        } else {
            tokens.clone()
        }
    }

    /// Receiver for method calls; auto-deref handles both forms.
    fn receiver(&self) -> &TokenStream {
        &self.tokens
    }
}

/// Builds the expression converting one value into another type. Each
/// field gets its own `Synth`; nothing is shared between fields.
pub(super) struct Synth<'a> {
    pairs: &'a Pairs,
    copier: &'a TokenStream,
    direction: Direction,
    span: Span,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl<'a> Synth<'a> {
    pub(super) fn new(
        pairs: &'a Pairs,
        copier: &'a TokenStream,
        direction: Direction,
        span: Span,
    ) -> Self {
        Self {
            pairs,
            copier,
            direction,
            span,
            diagnostics: vec![],
        }
    }

    pub(super) fn convert(&mut self, from: &Ty, to: &Ty, place: &Place, depth: usize) -> TokenStream {
        tracing::trace!(from = %from.key(), to = %to.key(), depth, "convert");

        let unresolved = |ty: &Ty| {
            matches!(
                classify::classify(ty),
                Category::RawContainer | Category::UnresolvedWildcardContainer
            )
        };

        if unresolved(from) || unresolved(to) {
            self.warning(format!(
                "`{}` has no resolvable element type; copied as a whole without deep copy",
                if unresolved(from) { from.key() } else { to.key() }
            ));

            return if from.same_as(to) {
                self.copy(from, place)
            } else {
                self.fallback_into(place)
            };
        }

        if from.same_as(to) {
            return self.copy(from, place);
        }

        match (&from.kind, &to.kind) {
            (TyKind::Option(from), TyKind::Option(to)) => {
                let e = util::ident(&format!("e{depth}"));
                let value = self.convert(from, to, &Place::binding(&e), depth + 1);
                let recv = place.receiver();
                quote!(#recv.as_ref().map(|#e| #value))
            }
            (_, TyKind::Option(to)) => {
                let value = self.convert(from, to, place, depth);
                quote!(::core::option::Option::Some(#value))
            }
            (TyKind::Option(from), _) => {
                let e = util::ident(&format!("e{depth}"));
                let value = self.convert(from, to, &Place::binding(&e), depth + 1);
                let recv = place.receiver();
                quote!(#recv.as_ref().map(|#e| #value).unwrap_or_default())
            }
            (
                TyKind::Container {
                    container: from_kind,
                    ..
                },
                TyKind::Container {
                    container: to_kind,
                    ..
                },
            ) if from_kind.family() == to_kind.family() => {
                self.container(from, to, *to_kind, place, depth)
            }
            (TyKind::Array(from_elem), TyKind::Array(to_elem)) => {
                let e = util::ident(&format!("e{depth}"));
                let value = self.convert(from_elem, to_elem, &Place::binding(&e), depth + 1);
                let recv = place.receiver();
                quote!(#recv.each_ref().map(|#e| #value))
            }
            (TyKind::Array(from_elem) | TyKind::Slice(from_elem), TyKind::Slice(to_elem)) => {
                self.boxed_slice(from_elem, to_elem, place, depth)
            }
            (TyKind::Record(from_ident), TyKind::Record(to_ident))
                if classify::requires_deep_copy(from) && classify::requires_deep_copy(to) =>
            {
                self.record(from, from_ident, to, to_ident, place)
            }
            _ => {
                self.warning(format!(
                    "no conversion from `{}` to `{}`; falling back to `Into`",
                    from.key(),
                    to.key()
                ));
                self.fallback_into(place)
            }
        }
    }

    fn copy(&self, ty: &Ty, place: &Place) -> TokenStream {
        match classify::classify(ty) {
            Category::Scalar | Category::Boxed => place.copied(),
            _ => {
                let value = place.reference();
                quote!(::core::clone::Clone::clone(#value))
            }
        }
    }

    fn fallback_into(&self, place: &Place) -> TokenStream {
        let value = place.reference();
        quote!(::core::convert::Into::into(::core::clone::Clone::clone(#value)))
    }

    /// Rebuilds a collection with room for every source element, converting
    /// elements, keys and values one level deeper.
    fn container(
        &mut self,
        from: &Ty,
        to: &Ty,
        to_kind: ContainerKind,
        place: &Place,
        depth: usize,
    ) -> TokenStream {
        let (Some(from_args), Some(to_args)) = (resolved_args(from), resolved_args(to)) else {
            return self.fallback_into(place);
        };

        let out = util::ident(&format!("out{depth}"));
        let recv = place.receiver();
        let to_ty = &to.ast;

        let alloc = match to_kind {
            ContainerKind::Vec | ContainerKind::VecDeque | ContainerKind::BinaryHeap => {
                quote!(<#to_ty>::with_capacity(#recv.len()))
            }
            ContainerKind::HashSet
            | ContainerKind::IndexSet
            | ContainerKind::HashMap
            | ContainerKind::IndexMap => quote! {
                <#to_ty>::with_capacity_and_hasher(#recv.len(), ::core::default::Default::default())
            },
            ContainerKind::LinkedList | ContainerKind::BTreeSet | ContainerKind::BTreeMap => {
                quote!(<#to_ty>::new())
            }
        };

        let fill = match to_kind.family() {
            ContainerFamily::Map => {
                let k = util::ident(&format!("k{depth}"));
                let v = util::ident(&format!("v{depth}"));
                let key = self.convert(from_args[0], to_args[0], &Place::binding(&k), depth + 1);
                let value = self.convert(from_args[1], to_args[1], &Place::binding(&v), depth + 1);

                quote! {
                    for (#k, #v) in #recv.iter() {
                        #out.insert(#key, #value);
                    }
                }
            }
            _ => {
                let e = util::ident(&format!("e{depth}"));
                let value = self.convert(from_args[0], to_args[0], &Place::binding(&e), depth + 1);
                let add = match to_kind {
                    ContainerKind::Vec | ContainerKind::BinaryHeap => quote!(push),
                    ContainerKind::VecDeque | ContainerKind::LinkedList => quote!(push_back),
                    _ => quote!(insert),
                };

                quote! {
                    for #e in #recv.iter() {
                        #out.#add(#value);
                    }
                }
            }
        };

        quote! {{
            let mut #out = #alloc;
            #fill
            #out
        }}
    }

    fn boxed_slice(&mut self, from: &Ty, to: &Ty, place: &Place, depth: usize) -> TokenStream {
        let out = util::ident(&format!("out{depth}"));
        let e = util::ident(&format!("e{depth}"));
        let recv = place.receiver();
        let value = self.convert(from, to, &Place::binding(&e), depth + 1);

        quote! {{
            let mut #out = ::std::vec::Vec::with_capacity(#recv.len());
            for #e in #recv.iter() {
                #out.push(#value);
            }
            #out.into_boxed_slice()
        }}
    }

    /// Recurses into the projection declared between two records. When the
    /// pass declares neither order, the direction decides which side is
    /// assumed to be the projection, and the impl must come from elsewhere.
    fn record(
        &mut self,
        from: &Ty,
        from_ident: &syn::Ident,
        to: &Ty,
        to_ident: &syn::Ident,
        place: &Place,
    ) -> TokenStream {
        let copier = self.copier;
        let value = place.reference();
        let (from_ty, to_ty) = (&from.ast, &to.ast);

        let forward = quote!(<#to_ty as #copier::Projection<#from_ty>>::forward(#value));
        let reverse = quote!(<#from_ty as #copier::Projection<#to_ty>>::reverse(#value));

        if self.pairs.contains(to_ident, from_ident) {
            forward
        } else if self.pairs.contains(from_ident, to_ident) {
            reverse
        } else {
            let (source, target) = match self.direction {
                Direction::Forward => (from_ident, to_ident),
                Direction::Reverse => (to_ident, from_ident),
            };

            self.warning(format!(
                "no projection from `{source}` to `{target}` is declared in this input; \
                 `{target}` must implement `Projection<{source}>` elsewhere"
            ));

            match self.direction {
                Direction::Forward => forward,
                Direction::Reverse => reverse,
            }
        }
    }

    fn warning(&mut self, message: String) {
        self.diagnostics.push(Diagnostic::warning(self.span, message));
    }
}

/// Element (and key) arguments of a resolved container.
fn resolved_args(ty: &Ty) -> Option<Vec<&Ty>> {
    classify::type_arguments(ty).into_iter().collect()
}
