extern crate proc_macro;

mod patchable;

use darling::FromDeriveInput;
use proc_macro::TokenStream;

#[proc_macro_derive(Patchable, attributes(patchable))]
pub fn patchable(token_stream: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(token_stream as syn::DeriveInput);

    match patchable::Input::from_derive_input(&input).and_then(patchable::Patchable::new) {
        Ok(patchable) => patchable.into(),
        Err(e) => e.write_errors().into(),
    }
}
