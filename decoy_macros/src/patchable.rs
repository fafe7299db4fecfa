use darling::{ast, util::Ignored, FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;

#[derive(FromDeriveInput)]
#[darling(attributes(patchable), supports(struct_named))]
pub struct Input {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<Ignored, Field>,
}

#[derive(FromField)]
#[darling(attributes(patchable))]
struct Field {
    ident: Option<syn::Ident>,
    #[darling(default)]
    skip: bool,
    #[darling(default)]
    rename: Option<String>,
}

pub struct Patchable {
    ident: syn::Ident,
    generics: syn::Generics,
    // (field, property name) for every field that is a slot
    slots: Vec<(syn::Ident, String)>,
}

impl Patchable {
    pub fn new(input: Input) -> darling::Result<Self> {
        let Input {
            ident,
            generics,
            data,
        } = input;

        let fields = match data {
            ast::Data::Struct(fields) => fields,
            ast::Data::Enum(_) => {
                return Err(darling::Error::unsupported_shape("enum").with_span(&ident))
            }
        };

        let mut errors = darling::Error::accumulator();
        let mut slots: Vec<(syn::Ident, String)> = vec![];

        for field in fields.fields.into_iter().filter(|field| !field.skip) {
            // named structs only, so every field has an ident
            let Some(field_ident) = field.ident else {
                continue;
            };

            let name = field.rename.unwrap_or_else(|| field_ident.to_string());
            if slots.iter().any(|(_, taken)| *taken == name) {
                errors.push(
                    darling::Error::custom(format!("duplicate property `{}`", name))
                        .with_span(&field_ident),
                );
                continue;
            }

            slots.push((field_ident, name));
        }

        errors.finish()?;

        Ok(Patchable {
            ident,
            generics,
            slots,
        })
    }

    fn expand(&self) -> TokenStream {
        let Patchable {
            ident,
            generics,
            slots,
        } = self;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        let fields: Vec<_> = slots.iter().map(|(field, _)| field).collect();
        let names: Vec<_> = slots.iter().map(|(_, name)| name).collect();

        quote! {
            impl #impl_generics ::decoy::Patchable for #ident #ty_generics #where_clause {
                fn get(&self, property: &str) -> ::core::option::Option<::decoy::Value> {
                    match property {
                        #(#names => ::core::option::Option::Some(::decoy::Slot::get(&self.#fields)),)*
                        _ => ::core::option::Option::None,
                    }
                }

                #[allow(unused_variables)]
                fn set(
                    &self,
                    property: &str,
                    value: ::decoy::Value,
                ) -> ::core::result::Result<::decoy::Value, ::decoy::ConfigError> {
                    match property {
                        #(#names => ::core::result::Result::Ok(::decoy::Slot::replace(&self.#fields, value)),)*
                        _ => ::core::result::Result::Err(::decoy::ConfigError::UnknownProperty {
                            property: ::std::string::ToString::to_string(property),
                        }),
                    }
                }

                fn properties(&self) -> ::std::vec::Vec<::std::string::String> {
                    ::std::vec![#(::std::string::ToString::to_string(#names)),*]
                }
            }
        }
    }
}

impl From<Patchable> for proc_macro::TokenStream {
    fn from(patchable: Patchable) -> Self {
        proc_macro::TokenStream::from(patchable.expand())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(tokens: TokenStream) -> darling::Result<String> {
        let input: syn::DeriveInput = syn::parse2(tokens)?;
        let patchable = Patchable::new(Input::from_derive_input(&input)?)?;
        Ok(patchable.expand().to_string())
    }

    #[test]
    fn renamed_and_skipped_fields() {
        let expanded = expand(quote! {
            struct Mailer {
                #[patchable(rename = "sendMail")]
                send: Slot,
                #[patchable(skip)]
                sent: usize,
            }
        })
        .unwrap();

        assert!(expanded.contains("\"sendMail\""));
        assert!(!expanded.contains("\"send\""));
        assert!(!expanded.contains("sent"));
    }

    #[test]
    fn duplicate_properties_are_rejected() {
        let error = expand(quote! {
            struct Clash {
                load: Slot,
                #[patchable(rename = "load")]
                reload: Slot,
            }
        })
        .unwrap_err();

        assert!(error.to_string().contains("duplicate property `load`"));
    }

    #[test]
    fn only_named_structs() {
        assert!(expand(quote! { struct Tuple(Slot); }).is_err());
        assert!(expand(quote! { enum Choice { A } }).is_err());
    }
}
