//! Parsing of `#[describe(...)]` and `#[inject(...)]`.

use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::{meta::ParseNestedMeta, Attribute, GenericArgument, Ident, Meta, PathArguments, Type};

/// How the zero-argument constructor is produced
pub enum ConstructorAttr {
    /// `Default::default`
    Default,
    /// `#[describe(constructor = "path")]`
    Infallible(syn::Path),
    /// `#[describe(try_constructor = "path")]`
    Fallible(syn::Path),
}

/// Where an injection point gets its recipe from
pub enum InjectAttr {
    /// `#[inject]`
    Described,
    /// `#[inject(registry)]`
    Registered,
}

pub fn parse_constructor(attrs: &[Attribute]) -> syn::Result<ConstructorAttr> {
    let mut constructor = ConstructorAttr::Default;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("describe")) {
        attr.parse_nested_meta(|meta| {
            let fallible = if meta.path.is_ident("constructor") {
                false
            } else if meta.path.is_ident("try_constructor") {
                true
            } else {
                return Err(unknown_key(&meta));
            };

            if !matches!(constructor, ConstructorAttr::Default) {
                return Err(meta.error("only one of `constructor` and `try_constructor` can be set"));
            }

            let value: syn::LitStr = meta.value()?.parse()?;
            let path: syn::Path = value.parse()?;
            constructor = if fallible {
                ConstructorAttr::Fallible(path)
            } else {
                ConstructorAttr::Infallible(path)
            };
            Ok(())
        })?;
    }

    Ok(constructor)
}

/// Returns None for fields which are not injection points
pub fn parse_inject(attrs: &[Attribute]) -> syn::Result<Option<InjectAttr>> {
    let mut inject = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        if inject.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[inject] attribute"));
        }

        let mut kind = InjectAttr::Described;
        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(_) => attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("registry") {
                    kind = InjectAttr::Registered;
                    Ok(())
                } else {
                    Err(unknown_key(&meta))
                }
            })?,
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected #[inject] or #[inject(registry)]",
                ));
            }
        }
        inject = Some(kind);
    }

    Ok(inject)
}

/// `T` for a field of type `Option<T>`
pub fn option_inner(ty: &Type) -> Option<&Type> {
    single_argument(ty, "Option")
}

/// `T` for a field of type `Box<T>`
pub fn box_inner(ty: &Type) -> Option<&Type> {
    single_argument(ty, "Box")
}

fn single_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    if arguments.args.len() != 1 {
        return None;
    }

    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Returns true if `ty` refers to one of the type parameters `params`
pub fn mentions_any(ty: &Type, params: &[Ident]) -> bool {
    fn scan(tokens: TokenStream, params: &[Ident]) -> bool {
        tokens.into_iter().any(|tree| match tree {
            TokenTree::Ident(ident) => params.contains(&ident),
            TokenTree::Group(group) => scan(group.stream(), params),
            _ => false,
        })
    }

    !params.is_empty() && scan(ty.to_token_stream(), params)
}

fn unknown_key(meta: &ParseNestedMeta) -> syn::Error {
    let key = meta
        .path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    meta.error(format!("unknown key: {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn detects_option_fields() {
        let option: Type = parse_quote!(Option<BookRepository>);
        let qualified: Type = parse_quote!(::std::option::Option<u8>);
        let plain: Type = parse_quote!(BookRepository);
        let vec: Type = parse_quote!(Vec<u8>);

        let inner: Type = parse_quote!(BookRepository);
        assert_eq!(option_inner(&option), Some(&inner));
        assert!(option_inner(&qualified).is_some());
        assert!(option_inner(&plain).is_none());
        assert!(option_inner(&vec).is_none());

        let boxed: Type = parse_quote!(Box<BookRepository>);
        assert_eq!(box_inner(&boxed), Some(&inner));
        assert!(box_inner(&option).is_none());
    }

    #[test]
    fn finds_type_parameters() {
        let params: Vec<Ident> = vec![parse_quote!(T), parse_quote!(L)];
        let direct: Type = parse_quote!(T);
        let nested: Type = parse_quote!(Vec<(u8, Box<L>)>);
        let concrete: Type = parse_quote!(BookRepository);
        let similar: Type = parse_quote!(Tree);

        assert!(mentions_any(&direct, &params));
        assert!(mentions_any(&nested, &params));
        assert!(!mentions_any(&concrete, &params));
        assert!(!mentions_any(&similar, &params));
        assert!(!mentions_any(&direct, &[]));
    }

    #[test]
    fn parses_inject_kinds() {
        let described: Vec<Attribute> = vec![parse_quote!(#[inject])];
        let registered: Vec<Attribute> = vec![parse_quote!(#[inject(registry)])];
        let unrelated: Vec<Attribute> = vec![parse_quote!(#[allow(dead_code)])];
        let unknown: Vec<Attribute> = vec![parse_quote!(#[inject(lazy)])];

        assert!(matches!(parse_inject(&described), Ok(Some(InjectAttr::Described))));
        assert!(matches!(parse_inject(&registered), Ok(Some(InjectAttr::Registered))));
        assert!(matches!(parse_inject(&unrelated), Ok(None)));

        let error = parse_inject(&unknown).err().unwrap();
        assert_eq!(error.to_string(), "unknown key: lazy");
    }

    #[test]
    fn parses_constructor_paths() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[describe(try_constructor = "Self::open")])];
        let ConstructorAttr::Fallible(path) = parse_constructor(&attrs).unwrap() else {
            panic!("expected a fallible constructor");
        };
        let expected: syn::Path = parse_quote!(Self::open);
        assert_eq!(path, expected);

        let both: Vec<Attribute> = vec![parse_quote!(
            #[describe(constructor = "Self::new", try_constructor = "Self::open")]
        )];
        assert!(parse_constructor(&both).is_err());
        assert!(matches!(parse_constructor(&[]), Ok(ConstructorAttr::Default)));
    }
}
