extern crate proc_macro;

use proc_macro::TokenStream;

/// Emits the items it is given, plus a `Projection` impl for every struct
/// marked `#[copy_target(source = ..)]`. Source records, targets and helper
/// impls must all appear in the same invocation.
#[proc_macro]
pub fn projections(input: TokenStream) -> TokenStream {
    let input: proc_macro2::TokenStream = input.into();

    match copier_codegen::generate(input, &copier_codegen::Config::default()) {
        Ok(output) => output.into_token_stream().into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Registers `copy_target` and `copy_field` for structs that carry them
/// outside of `projections!`, such as files processed by `copier gen`.
#[proc_macro_derive(CopyTarget, attributes(copy_target, copy_field))]
pub fn derive_copy_target(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}
