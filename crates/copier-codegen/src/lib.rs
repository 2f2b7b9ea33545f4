mod classify;
mod config;
pub use config::Config;

mod diagnostic;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};

mod expand;
mod expr;
mod mapping;
mod registry;
mod resolve;
mod schema;

use expand::Pairs;
use registry::Registry;
use schema::{Input, Record, Ty};

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

/// Result of one generation pass.
#[derive(Debug)]
pub struct Output {
    /// Input items with mapping directives removed
    pub items: TokenStream,

    /// One generated unit per target record that could be resolved
    pub projections: Vec<Projection>,

    pub diagnostics: Diagnostics,
}

/// Generated `Projection` impl for one target record.
#[derive(Debug)]
pub struct Projection {
    pub source: String,
    pub target: String,
    pub tokens: TokenStream,
}

impl Output {
    /// Items, projections, and a `compile_error!` for every error diagnostic.
    pub fn into_token_stream(self) -> TokenStream {
        let items = self.items;
        let projections = self.projections.iter().map(|p| &p.tokens);
        let errors = self
            .diagnostics
            .to_syn_error()
            .map(|err| err.to_compile_error());

        quote! {
            #items
            #( #projections )*
            #errors
        }
    }
}

/// Generates projections for every `#[copy_target]` struct in `input`.
///
/// Only unparseable input is an `Err`; everything found while resolving and
/// synthesizing is reported through [`Output::diagnostics`].
pub fn generate(input: TokenStream, config: &Config) -> syn::Result<Output> {
    let file: syn::File = syn::parse2(input)?;
    Ok(generate_items(file.items, config))
}

/// Same as [`generate`], for the text of a Rust source file.
pub fn generate_file(source: &str, config: &Config) -> syn::Result<Output> {
    let file = syn::parse_file(source)?;
    Ok(generate_items(file.items, config))
}

fn generate_items(items: Vec<syn::Item>, config: &Config) -> Output {
    let input = Input::from_items(items);
    let mut diagnostics = Diagnostics::new();
    let mut projections = vec![];

    let mut targets = vec![];
    for item in input.targets() {
        match Record::from_ast(item) {
            Ok(record) => targets.push(record),
            Err(err) => diagnostics.push_syn(err, &item.ident),
        }
    }

    let mut pairs = Pairs::default();
    for target in &targets {
        let Some(attr) = &target.attr else { continue };
        if let Some(source) = attr.source.segments.last() {
            pairs.insert(&target.ident, &source.ident);
        }
    }

    for target in &targets {
        if let Some(projection) = generate_projection(&input, target, &pairs, config, &mut diagnostics) {
            projections.push(projection);
        }
    }

    let items = &input.items;

    Output {
        items: quote!(#( #items )*),
        projections,
        diagnostics,
    }
}

fn generate_projection(
    input: &Input,
    target: &Record,
    pairs: &Pairs,
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Option<Projection> {
    let attr = target.attr.as_ref()?;
    let source_path = &attr.source;

    let Some(item) = input.find_struct(source_path) else {
        diagnostics.push(
            Diagnostic::error(
                source_path.segments.last()?.ident.span(),
                format!(
                    "source type `{}` not found; it must be declared in the same input",
                    source_path.to_token_stream()
                ),
            )
            .in_record(&target.ident),
        );
        return None;
    };

    let source = match Record::from_ast(item) {
        Ok(source) => source,
        Err(err) => {
            diagnostics.push_syn(err, &target.ident);
            return None;
        }
    };

    let source_ty = Ty::from_ast(&syn::Type::Path(syn::TypePath {
        qself: None,
        path: source_path.clone(),
    }));

    let registry = Registry::build(&attr.uses, &input.helpers);
    let mappings = resolve::resolve(&source, &source_ty, target, &attr.ignore, diagnostics);

    if mappings.is_empty() {
        diagnostics.push(
            Diagnostic::warning(
                target.ident.span(),
                format!("no field of `{}` maps onto `{}`", source.ident, target.ident),
            )
            .in_record(&target.ident),
        );
    }

    let (tokens, reported) =
        expand::projection(target, &source, source_path, &mappings, &registry, pairs);
    diagnostics.extend(reported);

    tracing::debug!(
        source = %source.ident,
        target = %target.ident,
        fields = mappings.len(),
        "generated projection"
    );

    Some(Projection {
        source: source.ident.to_string(),
        target: target.ident.to_string(),
        tokens: expand::wrap_in_const(&config.crate_path, tokens),
    })
}
