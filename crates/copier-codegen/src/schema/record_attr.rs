/// `#[copy_target(source = User, ignore(password), uses(Helpers))]`
#[derive(Debug)]
pub(crate) struct RecordAttr {
    /// The record this one is projected from
    pub(crate) source: syn::Path,

    /// Target fields that are never populated
    pub(crate) ignore: Vec<syn::Ident>,

    /// Helper types searched for named conversion methods
    pub(crate) uses: Vec<syn::Path>,
}

impl RecordAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut source = None;
        let mut ignore = vec![];
        let mut uses = vec![];

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("source") {
                if source.is_some() {
                    return Err(meta.error("duplicate `source`"));
                }

                source = Some(meta.value()?.parse::<syn::Path>()?);
            } else if meta.path.is_ident("ignore") {
                meta.parse_nested_meta(|meta| {
                    ignore.push(meta.path.require_ident()?.clone());
                    Ok(())
                })?;
            } else if meta.path.is_ident("uses") {
                meta.parse_nested_meta(|meta| {
                    uses.push(meta.path.clone());
                    Ok(())
                })?;
            } else {
                return Err(meta.error("expected `source`, `ignore` or `uses`"));
            }

            Ok(())
        })?;

        let Some(source) = source else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected `source = <type>` in #[copy_target]",
            ));
        };

        Ok(Self {
            source,
            ignore,
            uses,
        })
    }
}
