#![doc = include_str!("../README.md")]

mod attrs;
mod emit;

#[proc_macro_derive(FormBind, attributes(formbind))]
pub fn formbind_macros(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    emit::derive_formbind(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
