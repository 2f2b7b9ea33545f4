use super::Ty;

/// Inherent `impl` block of a type that may supply named conversions.
#[derive(Debug)]
pub(crate) struct Helper {
    /// Last path segment of the helper type
    pub(crate) ident: syn::Ident,

    /// Candidate conversion methods
    pub(crate) methods: Vec<HelperMethod>,
}

#[derive(Debug, Clone)]
pub(crate) struct HelperMethod {
    pub(crate) name: syn::Ident,

    /// Parameter type, with any reference stripped
    pub(crate) param: Ty,

    /// True when the parameter is taken by reference
    pub(crate) param_by_ref: bool,

    /// Return type, `None` for `()`
    pub(crate) ret: Option<Ty>,
}

impl Helper {
    /// Returns `None` for trait impls, generic impls and non-path self types.
    pub(crate) fn from_ast(item: &syn::ItemImpl) -> Option<Self> {
        if item.trait_.is_some() || !item.generics.params.is_empty() {
            return None;
        }

        let syn::Type::Path(path) = &*item.self_ty else {
            return None;
        };

        let ident = path.path.segments.last()?.ident.clone();

        let methods = item
            .items
            .iter()
            .filter_map(|item| match item {
                syn::ImplItem::Fn(f) => HelperMethod::from_ast(f),
                _ => None,
            })
            .collect();

        Some(Self {
            ident,
            methods,
        })
    }
}

impl HelperMethod {
    /// Public `&self` methods taking exactly one argument.
    fn from_ast(f: &syn::ImplItemFn) -> Option<Self> {
        if matches!(f.vis, syn::Visibility::Inherited) || !f.sig.generics.params.is_empty() {
            return None;
        }

        let receiver = f.sig.receiver()?;
        if receiver.reference.is_none() || receiver.mutability.is_some() {
            return None;
        }

        let mut args = f.sig.inputs.iter().skip(1);
        let (Some(syn::FnArg::Typed(arg)), None) = (args.next(), args.next()) else {
            return None;
        };

        let (param, param_by_ref) = match &*arg.ty {
            syn::Type::Reference(r) if r.mutability.is_none() => (Ty::from_ast(&r.elem), true),
            syn::Type::Reference(_) => return None,
            ty => (Ty::from_ast(ty), false),
        };

        let ret = match &f.sig.output {
            syn::ReturnType::Default => None,
            syn::ReturnType::Type(_, ty) => Some(Ty::from_ast(ty)),
        };

        Some(Self {
            name: f.sig.ident.clone(),
            param,
            param_by_ref,
            ret,
        })
    }
}
