use super::value::{Place, Synth};
use super::{util, Direction, Expand};

use crate::classify;
use crate::diagnostic::Diagnostic;
use crate::mapping::{FieldMapping, MappingType};
use crate::registry::Lookup;
use crate::schema::TyKind;

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

/// Assignment of one field in a generated struct literal.
#[derive(Debug)]
pub(super) struct Fragment {
    /// Field of the record being built
    pub(super) field: syn::Ident,

    pub(super) value: TokenStream,

    /// Helper or converter instances the value reads from
    pub(super) bindings: Vec<(syn::Ident, TokenStream)>,

    pub(super) diagnostics: Vec<Diagnostic>,
}

impl Expand<'_> {
    /// Synthesizes one mapping in one direction. `None` means the mapping
    /// has nothing to contribute in that direction.
    pub(super) fn expand_field(
        &self,
        mapping: &FieldMapping<'_>,
        direction: Direction,
    ) -> Option<Fragment> {
        match direction {
            Direction::Forward => self.expand_forward_field(mapping),
            Direction::Reverse => self.expand_reverse_field(mapping),
        }
    }

    fn expand_forward_field(&self, mapping: &FieldMapping<'_>) -> Option<Fragment> {
        let copier = &self.copier;
        let target = mapping.target;
        let mut fragment = Fragment::new(&target.ident);

        let value = match &mapping.ty {
            MappingType::Simple => {
                let source = mapping.source?;
                let mut synth = self.synth(Direction::Forward, target.span);
                let place = Place::field(quote!(source), &source.ident);
                let value = synth.convert(&source.ty, &target.ty, &place, 0);
                fragment.diagnostics.extend(synth.diagnostics);
                value
            }
            MappingType::Converter { converter, format } => {
                let source = mapping.source?;
                let instance = fragment.bind(self.instance(converter), converter);
                let place = Place::field(quote!(source), &source.ident).reference();
                let (from, to) = (&mapping.source_ty.ast, &target.ty.ast);

                quote! {
                    <#converter as #copier::TypeConverter<#from, #to>>::convert(&#instance, #place, #format)
                }
            }
            MappingType::QualifiedByName { method } => {
                let source = mapping.source?;
                let place = Place::field(quote!(source), &source.ident);

                match self.registry.lookup(method, &mapping.source_ty, &target.ty) {
                    Lookup::Method { helper, method } => {
                        let instance = fragment.bind(self.instance(helper), helper);
                        let name = &method.name;
                        let arg = if method.param_by_ref {
                            place.reference()
                        } else if matches!(method.param.kind, TyKind::Scalar(_)) {
                            place.copied()
                        } else {
                            let value = place.reference();
                            quote!(::core::clone::Clone::clone(#value))
                        };

                        quote!(#instance.#name(#arg))
                    }
                    Lookup::Opaque { helper, method } => {
                        let instance = fragment.bind(self.instance(helper), helper);
                        let arg = place.reference();
                        quote!(#instance.#method(#arg))
                    }
                    Lookup::Ambiguous(helpers) => {
                        let helpers = helpers
                            .iter()
                            .map(|path| format!("`{}`", path.to_token_stream()))
                            .collect::<Vec<_>>()
                            .join(", ");

                        fragment.diagnostics.push(Diagnostic::error(
                            method.span,
                            format!(
                                "method `{}` is defined by {helpers}; qualify it as `Helper::{}`",
                                method.method, method.method
                            ),
                        ));
                        return Some(fragment.omitted());
                    }
                    Lookup::Missing => {
                        fragment.diagnostics.push(Diagnostic::warning(
                            method.span,
                            format!("no helper in `uses` defines `{}`", method.method),
                        ));
                        return Some(fragment.omitted());
                    }
                }
            }
            MappingType::Expression { expr } | MappingType::ManyToOne { expr } => {
                expr.to_token_stream()
            }
        };

        fragment.value = value;
        Some(fragment)
    }

    fn expand_reverse_field(&self, mapping: &FieldMapping<'_>) -> Option<Fragment> {
        let copier = &self.copier;
        let target = mapping.target;

        let source = match &mapping.ty {
            MappingType::Simple | MappingType::Converter { .. } => mapping.source?,
            MappingType::Expression { .. } => {
                // best effort: an expression over a single named field copies
                // that field back when the types line up
                let [name] = &mapping.source_names[..] else {
                    return None;
                };
                let source = self.source.field(&name.to_string())?;
                if !classify::is_compatible(&target.ty, &source.ty) {
                    return None;
                }
                source
            }
            MappingType::ManyToOne { .. } | MappingType::QualifiedByName { .. } => {
                tracing::debug!(
                    field = %target.ident,
                    mapping = mapping.ty.name(),
                    "one-way mapping, no reverse"
                );
                return None;
            }
        };

        let mut fragment = Fragment::new(&source.ident);
        let place = Place::field(quote!(self), &target.ident);

        fragment.value = match &mapping.ty {
            MappingType::Converter { converter, format } => {
                let instance = fragment.bind(self.instance(converter), converter);
                let value = place.reference();
                let (from, to) = (&target.ty.ast, &source.ty.ast);

                quote! {
                    <#converter as #copier::TypeConverter<#from, #to>>::convert(&#instance, #value, #format)
                }
            }
            _ => {
                let mut synth = self.synth(Direction::Reverse, target.span);
                let value = synth.convert(&target.ty, &source.ty, &place, 0);
                fragment.diagnostics.extend(synth.diagnostics);
                value
            }
        };

        Some(fragment)
    }

    /// Local holding the instance of `path`. Types whose names snake-case
    /// alike get a numeric suffix.
    fn instance(&self, path: &syn::Path) -> syn::Ident {
        let key = path.to_token_stream().to_string();
        let mut instances = self.instances.borrow_mut();

        if let Some(ident) = instances.get(&key) {
            return ident.clone();
        }

        let base = util::binding(path);
        let mut ident = base.clone();
        let mut n = 1;

        while instances.values().any(|taken| *taken == ident) {
            ident = quote::format_ident!("{base}_{n}");
            n += 1;
        }

        instances.insert(key, ident.clone());
        ident
    }

    fn synth(&self, direction: Direction, span: proc_macro2::Span) -> Synth<'_> {
        Synth::new(self.pairs, &self.copier, direction, span)
    }
}

impl Fragment {
    fn new(field: &syn::Ident) -> Self {
        Self {
            field: field.clone(),
            value: TokenStream::new(),
            bindings: vec![],
            diagnostics: vec![],
        }
    }

    fn bind(&mut self, ident: syn::Ident, path: &syn::Path) -> syn::Ident {
        self.bindings.push((ident.clone(), path.to_token_stream()));
        ident
    }

    /// Carries diagnostics only; the field is not assigned.
    fn omitted(mut self) -> Self {
        self.value = TokenStream::new();
        self.bindings.clear();
        self
    }

    pub(super) fn is_assigned(&self) -> bool {
        !self.value.is_empty()
    }
}
