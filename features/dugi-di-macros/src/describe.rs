//! Implementation of #[derive(Describe)] proc-macro.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    ext::IdentExt, parse_macro_input, parse_quote, Data, DeriveInput, Ident, Index, Member,
    WherePredicate,
};

use crate::attributes::{
    box_inner, mentions_any, option_inner, parse_constructor, parse_inject, ConstructorAttr,
    InjectAttr,
};

pub fn derive_describe_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let type_params: Vec<Ident> = input
        .generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    // Bounds the generated impl needs, only added for generic structs
    let mut bounds: Vec<WherePredicate> = Vec::new();
    if !input.generics.params.is_empty() {
        bounds.push(parse_quote!(Self: ::core::marker::Send + 'static));
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Describe can only be derived for structs",
            ));
        }
    };

    let constructor = match parse_constructor(&input.attrs)? {
        ConstructorAttr::Default => {
            if !input.generics.params.is_empty() {
                bounds.push(parse_quote!(Self: ::core::default::Default));
            }
            quote! {
                .default_constructor(<Self as ::core::default::Default>::default)
            }
        }
        ConstructorAttr::Infallible(path) => quote! { .default_constructor(#path) },
        ConstructorAttr::Fallible(path) => quote! { .try_default_constructor(#path) },
    };

    // Report every broken field at once
    let mut errors: Option<syn::Error> = None;
    let mut points = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let inject = match parse_inject(&field.attrs) {
            Ok(Some(inject)) => inject,
            Ok(None) => continue,
            Err(error) => {
                match errors.as_mut() {
                    Some(errors) => errors.combine(error),
                    None => errors = Some(error),
                }
                continue;
            }
        };

        let (member, point_name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };

        // Option and Box wrappers are filled in by the setter.
        // Registered points keep Box, since the registered type may be a trait object.
        let (optional, ty) = match option_inner(&field.ty) {
            Some(inner) => (true, inner),
            None => (false, &field.ty),
        };
        let boxed = match inject {
            InjectAttr::Described => box_inner(ty),
            InjectAttr::Registered => None,
        };
        let (target, value) = match boxed {
            Some(inner) => (inner, quote! { ::std::boxed::Box::new(value) }),
            None => (ty, quote! { value }),
        };
        let assign = if optional {
            quote! { this.#member = ::core::option::Option::Some(#value) }
        } else {
            quote! { this.#member = #value }
        };

        let (method, bound) = match inject {
            InjectAttr::Described => (quote! { inject }, quote! { ::dugi_di::Describe }),
            InjectAttr::Registered => (
                quote! { inject_registered },
                quote! { ::dugi_di::Injectable },
            ),
        };
        if mentions_any(target, &type_params) {
            bounds.push(parse_quote!(#target: #bound));
        }

        points.push(quote! {
            .#method::<#target>(#point_name, |this: &mut Self, value: #target| {
                #assign;
            })
        });
    }

    if let Some(errors) = errors {
        return Err(errors);
    }

    let mut generics = input.generics.clone();
    generics.make_where_clause().predicates.extend(bounds);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::dugi_di::Describe for #name #ty_generics #where_clause {
            fn describe() -> ::dugi_di::TypeDescriptor {
                ::dugi_di::TypeDescriptor::builder::<Self>()
                    #constructor
                    #(#points)*
                    .build()
            }
        }
    })
}
