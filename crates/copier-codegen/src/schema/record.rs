use super::{ErrorSet, Field, RecordAttr};

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Record fields in declaration order
    pub(crate) fields: Vec<Field>,

    /// Present when the record is a projection target
    pub(crate) attr: Option<RecordAttr>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "record generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut attr = None;

        for a in &ast.attrs {
            if !a.path().is_ident("copy_target") {
                continue;
            }

            if attr.is_some() {
                errs.push(syn::Error::new_spanned(a, "duplicate #[copy_target] attribute"));
            } else {
                attr = errs.check(RecordAttr::from_ast(a));
            }
        }

        let directives = is_target(ast);
        let fields = node
            .named
            .iter()
            .filter_map(|field| errs.check(Field::from_ast(field, directives)))
            .collect();

        errs.finish(Self {
            ident: ast.ident.clone(),
            fields,
            attr,
        })
    }

    pub(crate) fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| super::field::unraw(&field.ident) == name)
    }
}

pub(crate) fn is_target(ast: &syn::ItemStruct) -> bool {
    ast.attrs.iter().any(|a| a.path().is_ident("copy_target"))
}
