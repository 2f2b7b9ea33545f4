use proc_macro2::Span;

/// Per-field mapping directive: `#[copy_field(..)]`.
#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    /// Explicit source field names
    pub(crate) source: Vec<syn::Ident>,

    /// Overrides the logical name used for ignore lists and same-name lookup
    pub(crate) target: Option<syn::LitStr>,

    /// Expression evaluated against the whole source record
    pub(crate) expression: Option<syn::LitStr>,

    /// Helper method producing the value
    pub(crate) qualified_by_name: Option<MethodRef>,

    /// `TypeConverter` implementation producing the value
    pub(crate) converter: Option<syn::Path>,

    /// Format string handed to the converter
    pub(crate) format: Option<syn::LitStr>,
}

/// `"method"` or `"Helper::method"`
#[derive(Debug, Clone)]
pub(crate) struct MethodRef {
    pub(crate) helper: Option<syn::Path>,
    pub(crate) method: syn::Ident,
    pub(crate) span: Span,
}

impl FieldAttr {
    pub(crate) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        let mut out = Self::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("source") {
                if !out.source.is_empty() {
                    return Err(meta.error("duplicate `source`"));
                }

                if meta.input.peek(syn::Token![=]) {
                    out.source.push(meta.value()?.parse()?);
                } else {
                    meta.parse_nested_meta(|meta| {
                        out.source.push(meta.path.require_ident()?.clone());
                        Ok(())
                    })?;
                }
            } else if meta.path.is_ident("target") {
                set_once(&mut out.target, meta.value()?.parse()?, &meta, "target")?;
            } else if meta.path.is_ident("expression") {
                set_once(&mut out.expression, meta.value()?.parse()?, &meta, "expression")?;
            } else if meta.path.is_ident("qualified_by_name") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                set_once(
                    &mut out.qualified_by_name,
                    MethodRef::from_lit(&lit)?,
                    &meta,
                    "qualified_by_name",
                )?;
            } else if meta.path.is_ident("converter") {
                set_once(&mut out.converter, meta.value()?.parse()?, &meta, "converter")?;
            } else if meta.path.is_ident("format") {
                set_once(&mut out.format, meta.value()?.parse()?, &meta, "format")?;
            } else {
                return Err(meta.error(
                    "expected `source`, `target`, `expression`, `qualified_by_name`, `converter` or `format`",
                ));
            }

            Ok(())
        })?;

        Ok(out)
    }

    /// The converter, unless it is the `NoOp` placeholder.
    pub(crate) fn converter(&self) -> Option<&syn::Path> {
        self.converter
            .as_ref()
            .filter(|path| path.segments.last().is_some_and(|seg| seg.ident != "NoOp"))
    }

    pub(crate) fn format(&self) -> String {
        self.format.as_ref().map(syn::LitStr::value).unwrap_or_default()
    }

    /// True when the directive selects a strategy. A lone `target` override
    /// still maps by name.
    pub(crate) fn has_strategy(&self) -> bool {
        !self.source.is_empty()
            || self.expression.is_some()
            || self.qualified_by_name.is_some()
            || self.converter().is_some()
    }
}

impl MethodRef {
    fn from_lit(lit: &syn::LitStr) -> syn::Result<Self> {
        let path: syn::Path = lit.parse().map_err(|_| {
            syn::Error::new(lit.span(), "expected `method` or `Helper::method`")
        })?;

        let leading_colon = path.leading_colon;
        let mut segments: Vec<syn::PathSegment> = path.segments.into_iter().collect();

        let Some(last) = segments.pop() else {
            return Err(syn::Error::new(lit.span(), "empty method name"));
        };

        let helper = (!segments.is_empty()).then(|| syn::Path {
            leading_colon,
            segments: segments.into_iter().collect(),
        });

        Ok(Self {
            helper,
            method: last.ident,
            span: lit.span(),
        })
    }
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    meta: &syn::meta::ParseNestedMeta,
    key: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}`")));
    }

    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn parse(attr: syn::Attribute) -> syn::Result<FieldAttr> {
        FieldAttr::from_ast(&attr)
    }

    #[test]
    fn single_and_many_sources() {
        let one = parse(parse_quote!(#[copy_field(source = first_name)])).unwrap();
        assert_eq!(one.source.len(), 1);

        let many = parse(parse_quote!(#[copy_field(source(first, last), expression = "x")])).unwrap();
        assert_eq!(many.source.len(), 2);
        assert!(many.expression.is_some());
    }

    #[test]
    fn noop_converter_is_absent() {
        let attr = parse(parse_quote!(#[copy_field(converter = copier::converter::NoOp)])).unwrap();
        assert!(attr.converter.is_some());
        assert!(attr.converter().is_none());
        assert!(!attr.has_strategy());
    }

    #[test]
    fn qualified_method() {
        let attr = parse(parse_quote!(#[copy_field(qualified_by_name = "Prices::format")])).unwrap();
        let method = attr.qualified_by_name.unwrap();
        assert_eq!(method.method, "format");
        assert!(method.helper.unwrap().is_ident("Prices"));

        let attr = parse(parse_quote!(#[copy_field(qualified_by_name = "format")])).unwrap();
        assert!(attr.qualified_by_name.unwrap().helper.is_none());
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let err = parse(parse_quote!(#[copy_field(format = "a", format = "b")])).unwrap_err();
        assert!(err.to_string().contains("duplicate `format`"));
    }

    #[test]
    fn target_override_alone_has_no_strategy() {
        let attr = parse(parse_quote!(#[copy_field(target = "display_name")])).unwrap();
        assert!(!attr.has_strategy());
        assert_eq!(attr.target.unwrap().value(), "display_name");
    }
}
