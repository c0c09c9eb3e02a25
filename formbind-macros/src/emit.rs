//! Code generation for `#[derive(FormBind)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, Index, Member, parse_quote};

use crate::attrs::{ContainerAttrs, FieldAttrs};

struct RecordField {
    member: Member,
    /// Declared name, `r#` stripped; tuple fields use their position.
    name: String,
    ty: syn::Type,
    attrs: FieldAttrs,
}

pub fn derive_formbind(input: DeriveInput) -> syn::Result<TokenStream> {
    let container = ContainerAttrs::parse(&input.attrs)?;

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "FormBind types must be 'static; lifetime parameters are not supported",
        ));
    }

    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::formbind::FormBind));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let ident = &input.ident;
    let type_identifier = ident.unraw().to_string();

    if container.opaque {
        return Ok(quote! {
            #[automatically_derived]
            impl #impl_generics ::formbind::FormBind for #ident #ty_generics #where_clause {
                const SHAPE: &'static ::formbind::Shape = &const {
                    ::formbind::Shape::new::<Self>(
                        #type_identifier,
                        ::formbind::Def::Scalar(::formbind::ScalarType::Opaque),
                    )
                };

                fn default_value() -> Self {
                    <Self as ::core::default::Default>::default()
                }

                fn poke(&mut self) -> ::formbind::Poke<'_> {
                    ::formbind::Poke::Scalar(self)
                }
            }
        });
    }

    let fields = match &input.data {
        Data::Struct(data) => collect_fields(&data.fields)?,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "FormBind can only be derived for enums marked #[formbind(opaque)]",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "FormBind cannot be derived for unions",
            ));
        }
    };

    let decodable: Vec<&RecordField> = fields.iter().filter(|f| !f.attrs.skip).collect();

    let field_shapes = decodable.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        let tags = static_slice(field.attrs.tags.iter().map(|(key, value)| {
            quote! { ::formbind::FieldTag::new(#key, #value) }
        }));
        quote! {
            ::formbind::Field::new(
                #name,
                ::formbind::shape_of::<#ty>,
                #tags,
            )
        }
    });

    let field_shapes = static_slice(field_shapes);

    let default_fields = fields.iter().map(|field| {
        let member = &field.member;
        let ty = &field.ty;
        if field.attrs.skip {
            quote! { #member: ::core::default::Default::default() }
        } else {
            quote! { #member: <#ty as ::formbind::FormBind>::default_value() }
        }
    });
    let default_value = quote! { Self { #(#default_fields),* } };

    let field_arms = decodable.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        quote! { #index => ::core::option::Option::Some(::formbind::FormBind::poke(&mut self.#member)) }
    });

    // Silence unused-variable lints on records with no decodable fields.
    let index_ident = format_ident!("{}", if decodable.is_empty() { "_index" } else { "index" });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::formbind::FormBind for #ident #ty_generics #where_clause {
            const SHAPE: &'static ::formbind::Shape = &const {
                ::formbind::Shape::new::<Self>(
                    #type_identifier,
                    ::formbind::Def::Record(::formbind::RecordDef::new(#field_shapes)),
                )
            };

            fn default_value() -> Self {
                #default_value
            }

            fn poke(&mut self) -> ::formbind::Poke<'_> {
                ::formbind::Poke::Record(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics ::formbind::RecordSlots for #ident #ty_generics #where_clause {
            fn field_mut(&mut self, #index_ident: usize) -> ::core::option::Option<::formbind::Poke<'_>> {
                match #index_ident {
                    #(#field_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// A `&'static [T]` expression holding `items`.
fn static_slice(items: impl Iterator<Item = TokenStream>) -> TokenStream {
    let items: Vec<TokenStream> = items.collect();
    if items.is_empty() {
        quote! { &[] }
    } else {
        quote! { &const { [#(#items),*] } }
    }
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<RecordField>> {
    let mut out = Vec::with_capacity(fields.len());
    for (position, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(position)), position.to_string()),
        };
        out.push(RecordField {
            member,
            name,
            ty: field.ty.clone(),
            attrs,
        });
    }
    Ok(out)
}
