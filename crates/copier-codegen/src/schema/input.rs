use super::{record, Helper};

use indexmap::IndexMap;
use syn::visit_mut::{self, VisitMut};

/// Items handed to one generation pass.
#[derive(Debug)]
pub(crate) struct Input {
    /// Items re-emitted unchanged apart from directive attributes
    pub(crate) items: Vec<syn::Item>,

    /// Every struct in the input, by name, with directives intact
    pub(crate) structs: IndexMap<String, syn::ItemStruct>,

    /// Inherent impls, merged per self type name
    pub(crate) helpers: IndexMap<String, Helper>,
}

impl Input {
    pub(crate) fn from_items(items: Vec<syn::Item>) -> Self {
        let mut structs = IndexMap::new();
        let mut helpers: IndexMap<String, Helper> = IndexMap::new();

        for item in &items {
            match item {
                syn::Item::Struct(item) => {
                    structs.insert(item.ident.to_string(), item.clone());
                }
                syn::Item::Impl(item) => {
                    let Some(helper) = Helper::from_ast(item) else {
                        continue;
                    };

                    match helpers.get_mut(&helper.ident.to_string()) {
                        Some(existing) => existing.methods.extend(helper.methods),
                        None => {
                            helpers.insert(helper.ident.to_string(), helper);
                        }
                    }
                }
                _ => {}
            }
        }

        let mut items = items;
        for item in &mut items {
            StripDirectives.visit_item_mut(item);
        }

        Self {
            items,
            structs,
            helpers,
        }
    }

    /// Structs carrying `#[copy_target]`, in declaration order.
    pub(crate) fn targets(&self) -> impl Iterator<Item = &syn::ItemStruct> {
        self.structs.values().filter(|item| record::is_target(item))
    }

    pub(crate) fn find_struct(&self, path: &syn::Path) -> Option<&syn::ItemStruct> {
        let ident = &path.segments.last()?.ident;
        self.structs.get(&ident.to_string())
    }
}

/// Removes `#[copy_target]` and `#[copy_field]` so the items compile without
/// the derive registering those attributes.
struct StripDirectives;

impl VisitMut for StripDirectives {
    fn visit_item_struct_mut(&mut self, node: &mut syn::ItemStruct) {
        node.attrs.retain(|attr| !attr.path().is_ident("copy_target"));
        visit_mut::visit_item_struct_mut(self, node);
    }

    fn visit_field_mut(&mut self, node: &mut syn::Field) {
        node.attrs.retain(|attr| !attr.path().is_ident("copy_field"));
        visit_mut::visit_field_mut(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn strips_directives_and_merges_impls() {
        let file: syn::File = syn::parse2(quote! {
            struct User { id: i64 }

            #[derive(Default)]
            #[copy_target(source = User)]
            struct UserDto {
                #[copy_field(source = id)]
                key: i64,
            }

            impl Helpers { pub fn a(&self, v: i64) -> i64 { v } }
            impl Helpers { pub fn b(&self, v: i64) -> i64 { v } }
        })
        .unwrap();

        let input = Input::from_items(file.items);
        assert_eq!(input.targets().count(), 1);
        assert_eq!(input.helpers["Helpers"].methods.len(), 2);

        let syn::Item::Struct(dto) = &input.items[1] else {
            panic!("expected struct");
        };
        assert_eq!(dto.attrs.len(), 1);
        let syn::Fields::Named(fields) = &dto.fields else {
            panic!("expected named fields");
        };
        assert!(fields.named[0].attrs.is_empty());

        // directives stay on the retained copy
        assert!(record::is_target(&input.structs["UserDto"]));
    }
}
