/// Options for one generation pass.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the runtime crate as seen from the generated code
    pub crate_path: syn::Path,
}

impl Config {
    pub fn with_crate_path(mut self, crate_path: syn::Path) -> Self {
        self.crate_path = crate_path;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crate_path: syn::parse_quote!(::copier),
        }
    }
}
