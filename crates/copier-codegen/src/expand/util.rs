use heck::ToSnakeCase;

/// Creates an identifier prefixed with `__copier_` so generated bindings
/// never collide with names used in user expressions.
pub(crate) fn ident(name: &str) -> syn::Ident {
    quote::format_ident!("__copier_{name}")
}

/// Local holding the instance of a helper or converter type:
/// `fmt::DateFormatter` becomes `__copier_fmt_date_formatter`.
pub(crate) fn binding(path: &syn::Path) -> syn::Ident {
    let name = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string().to_snake_case())
        .collect::<Vec<_>>()
        .join("_");

    ident(&name)
}
