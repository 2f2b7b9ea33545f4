mod field;
mod projection;
mod util;
mod value;

use crate::diagnostic::Diagnostic;
use crate::mapping::FieldMapping;
use crate::registry::Registry;
use crate::schema::Record;

use indexmap::{IndexMap, IndexSet};
use proc_macro2::TokenStream;
use quote::quote;
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Source record into target record
    Forward,

    /// Target record back into source record
    Reverse,
}

/// Every (target, source) record pair declared in one generation pass.
/// Nested record fields pick `forward` or `reverse` from this set.
#[derive(Debug, Default)]
pub(crate) struct Pairs {
    pairs: IndexSet<(String, String)>,
}

impl Pairs {
    pub(crate) fn insert(&mut self, target: &syn::Ident, source: &syn::Ident) {
        self.pairs.insert((target.to_string(), source.to_string()));
    }

    pub(crate) fn contains(&self, target: &syn::Ident, source: &syn::Ident) -> bool {
        self.pairs
            .contains(&(target.to_string(), source.to_string()))
    }
}

struct Expand<'a> {
    /// The projection target
    target: &'a Record,

    /// The record it projects
    source: &'a Record,

    /// Source type as written in `#[copy_target(source = ..)]`
    source_path: &'a syn::Path,

    /// Resolved field mappings, in target field order
    mappings: &'a [FieldMapping<'a>],

    /// Named helper methods available to the target
    registry: &'a Registry<'a>,

    pairs: &'a Pairs,

    /// Path prefix for runtime types
    copier: TokenStream,

    /// Helper and converter locals, keyed by type path
    instances: RefCell<IndexMap<String, syn::Ident>>,

    /// Reported while expanding
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let copier = &self.copier;
        let target_ident = &self.target.ident;
        let source_path = self.source_path;

        let forward = self.expand_forward();
        let reverse = self.expand_reverse();

        quote! {
            impl #copier::Projection<#source_path> for #target_ident {
                #forward
                #reverse
            }
        }
    }

    /// Both directions walk the same types, so a warning raised by each is
    /// kept once.
    fn report(&self, diagnostic: Diagnostic) {
        let mut diagnostics = self.diagnostics.borrow_mut();

        let seen = diagnostics.iter().any(|d| {
            d.severity == diagnostic.severity
                && d.field == diagnostic.field
                && d.message == diagnostic.message
        });

        if !seen {
            diagnostics.push(diagnostic);
        }
    }
}

/// Generates the `Projection` impl for one resolved target record, along
/// with what was reported while generating it.
pub(crate) fn projection<'a>(
    target: &'a Record,
    source: &'a Record,
    source_path: &'a syn::Path,
    mappings: &'a [FieldMapping<'a>],
    registry: &'a Registry<'a>,
    pairs: &'a Pairs,
) -> (TokenStream, Vec<Diagnostic>) {
    let expand = Expand {
        target,
        source,
        source_path,
        mappings,
        registry,
        pairs,
        copier: quote!(_copier),
        instances: Default::default(),
        diagnostics: Default::default(),
    };

    let tokens = expand.expand();
    (tokens, expand.diagnostics.into_inner())
}

pub(crate) fn wrap_in_const(crate_path: &syn::Path, code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use #crate_path as _copier;
            #code
        };
    }
}
