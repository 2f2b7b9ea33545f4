use crate::classify;
use crate::schema::{Helper, HelperMethod, MethodRef, Ty};

use indexmap::IndexMap;

/// Named conversions available to one target record, built from its
/// `uses(..)` list and the inherent impls visible in the same input.
#[derive(Debug)]
pub(crate) struct Registry<'a> {
    /// Helpers in `uses` order
    uses: Vec<Registered<'a>>,

    /// Every inherent impl in the input, for qualified references
    visible: &'a IndexMap<String, Helper>,
}

#[derive(Debug)]
struct Registered<'a> {
    path: &'a syn::Path,

    /// `None` when the helper's impl is not part of the input
    helper: Option<&'a Helper>,
}

#[derive(Debug)]
pub(crate) enum Lookup<'a> {
    /// A method whose signature is known
    Method {
        helper: &'a syn::Path,
        method: &'a HelperMethod,
    },

    /// A qualified reference to a helper whose impl cannot be inspected
    Opaque {
        helper: &'a syn::Path,
        method: &'a syn::Ident,
    },

    /// More than one helper defines a matching method
    Ambiguous(Vec<&'a syn::Path>),

    Missing,
}

impl<'a> Registry<'a> {
    pub(crate) fn build(uses: &'a [syn::Path], visible: &'a IndexMap<String, Helper>) -> Self {
        let uses = uses
            .iter()
            .map(|path| Registered {
                path,
                helper: helper_for(visible, path),
            })
            .collect();

        Self { uses, visible }
    }

    /// Candidate methods of every registered helper.
    pub(crate) fn methods(&self) -> impl Iterator<Item = (&'a syn::Path, &'a HelperMethod)> + '_ {
        self.uses.iter().flat_map(|registered| {
            registered
                .helper
                .into_iter()
                .flat_map(|helper| helper.methods.iter())
                .map(move |method| (registered.path, method))
        })
    }

    pub(crate) fn find_by_name(&self, name: &syn::Ident) -> Vec<(&'a syn::Path, &'a HelperMethod)> {
        self.methods().filter(|(_, m)| m.name == *name).collect()
    }

    /// Methods accepting the source type and returning the target type.
    pub(crate) fn find_by_type(&self, source: &Ty, target: &Ty) -> Vec<(&'a syn::Path, &'a HelperMethod)> {
        self.methods()
            .filter(|(_, m)| accepts(m, source, target))
            .collect()
    }

    pub(crate) fn find(
        &self,
        name: &syn::Ident,
        source: &Ty,
        target: &Ty,
    ) -> Vec<(&'a syn::Path, &'a HelperMethod)> {
        self.find_by_type(source, target)
            .into_iter()
            .filter(|(_, m)| m.name == *name)
            .collect()
    }

    /// Binds a method reference for a field of type `source` feeding a field
    /// of type `target`.
    pub(crate) fn lookup(&self, reference: &'a MethodRef, source: &Ty, target: &Ty) -> Lookup<'a> {
        if let Some(path) = &reference.helper {
            let Some(helper) = helper_for(self.visible, path) else {
                return Lookup::Opaque {
                    helper: path,
                    method: &reference.method,
                };
            };

            return match helper.methods.iter().find(|m| m.name == reference.method) {
                Some(method) => Lookup::Method {
                    helper: path,
                    method,
                },
                None => Lookup::Missing,
            };
        }

        let mut candidates = self.find_by_name(&reference.method);

        if candidates.len() > 1 {
            let typed = self.find(&reference.method, source, target);
            if !typed.is_empty() {
                candidates = typed;
            }
        }

        match &candidates[..] {
            [] => Lookup::Missing,
            [(helper, method)] => Lookup::Method {
                helper: *helper,
                method: *method,
            },
            _ => Lookup::Ambiguous(candidates.iter().map(|(helper, _)| *helper).collect()),
        }
    }
}

fn helper_for<'a>(visible: &'a IndexMap<String, Helper>, path: &syn::Path) -> Option<&'a Helper> {
    let ident = &path.segments.last()?.ident;
    visible.get(&ident.to_string())
}

fn accepts(method: &HelperMethod, source: &Ty, target: &Ty) -> bool {
    let Some(ret) = &method.ret else {
        return false;
    };

    classify::is_compatible(&method.param, source) && classify::is_compatible(ret, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldAttr;
    use quote::quote;

    fn helpers() -> IndexMap<String, Helper> {
        let file: syn::File = syn::parse2(quote! {
            impl Prices {
                pub fn format(&self, cents: i64) -> String { todo!() }
                pub fn round(&self, cents: i64) -> i64 { todo!() }
            }

            impl Labels {
                pub fn format(&self, name: &String) -> String { todo!() }
            }
        })
        .unwrap();

        file.items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Impl(item) => Helper::from_ast(item),
                _ => None,
            })
            .map(|helper| (helper.ident.to_string(), helper))
            .collect()
    }

    fn ty(src: &str) -> Ty {
        Ty::from_ast(&syn::parse_str(src).unwrap())
    }

    fn method(src: &str) -> MethodRef {
        use syn::parse::Parser;

        let attrs = syn::Attribute::parse_outer
            .parse_str(&format!("#[copy_field(qualified_by_name = \"{src}\")]"))
            .unwrap();

        FieldAttr::from_ast(&attrs[0])
            .unwrap()
            .qualified_by_name
            .unwrap()
    }

    #[test]
    fn enumerates_registered_helpers_only() {
        let visible = helpers();
        let uses: Vec<syn::Path> = vec![syn::parse_str("Prices").unwrap()];
        let registry = Registry::build(&uses, &visible);

        let names: Vec<_> = registry.methods().map(|(_, m)| m.name.to_string()).collect();
        assert_eq!(names, ["format", "round"]);
    }

    #[test]
    fn unique_name_binds() {
        let visible = helpers();
        let uses: Vec<syn::Path> = vec![syn::parse_str("Prices").unwrap(), syn::parse_str("Labels").unwrap()];
        let registry = Registry::build(&uses, &visible);

        let reference = method("round");
        let Lookup::Method { helper, method } = registry.lookup(&reference, &ty("i64"), &ty("i64")) else {
            panic!("expected a bound method");
        };
        assert!(helper.is_ident("Prices"));
        assert_eq!(method.name, "round");
    }

    #[test]
    fn shared_name_is_narrowed_by_type() {
        let visible = helpers();
        let uses: Vec<syn::Path> = vec![syn::parse_str("Prices").unwrap(), syn::parse_str("Labels").unwrap()];
        let registry = Registry::build(&uses, &visible);

        let reference = method("format");
        let Lookup::Method { helper, .. } = registry.lookup(&reference, &ty("String"), &ty("String")) else {
            panic!("expected a bound method");
        };
        assert!(helper.is_ident("Labels"));

        // no signature fits a bool source, so both helpers remain
        let Lookup::Ambiguous(helpers) = registry.lookup(&reference, &ty("bool"), &ty("String")) else {
            panic!("expected ambiguity");
        };
        assert_eq!(helpers.len(), 2);
    }

    #[test]
    fn qualified_reference() {
        let visible = helpers();
        let uses: Vec<syn::Path> = vec![];
        let registry = Registry::build(&uses, &visible);

        let reference = method("Labels::format");
        assert!(matches!(
            registry.lookup(&reference, &ty("bool"), &ty("String")),
            Lookup::Method { .. }
        ));

        let reference = method("Labels::missing");
        assert!(matches!(
            registry.lookup(&reference, &ty("bool"), &ty("String")),
            Lookup::Missing
        ));

        let reference = method("Remote::format");
        assert!(matches!(
            registry.lookup(&reference, &ty("bool"), &ty("String")),
            Lookup::Opaque { .. }
        ));
    }

    #[test]
    fn unknown_name_is_missing() {
        let visible = helpers();
        let uses: Vec<syn::Path> = vec![syn::parse_str("Prices").unwrap()];
        let registry = Registry::build(&uses, &visible);

        let reference = method("nope");
        assert!(matches!(
            registry.lookup(&reference, &ty("i64"), &ty("i64")),
            Lookup::Missing
        ));
    }
}
