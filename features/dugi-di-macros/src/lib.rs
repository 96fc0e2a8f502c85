//! Compile-time descriptor generation for dugi-di.
//!
//! This crate provides `#[derive(Describe)]`, which implements `dugi_di::Describe`
//! from the struct declaration. Use it through the re-export in `dugi-di`.

use proc_macro::TokenStream;

mod attributes;
mod describe;

/// Derive macro generating the `TypeDescriptor` of a struct.
///
/// # Constructor
///
/// The zero-argument constructor defaults to `Default::default`. It can be replaced with
/// `#[describe(constructor = "path")]` (a `fn() -> Self`) or
/// `#[describe(try_constructor = "path")]` (a `fn() -> Result<Self, E>`).
///
/// # Injection points
///
/// Fields marked with `#[inject]` become injection points, in declaration order.
/// - `#[inject]`: the field type must implement `Describe`
/// - `#[inject(registry)]`: the field type must be registered in the container
///
/// A field of type `Option<T>` is injected with `Some(T)`. Any other field is overwritten,
/// so the constructor has to provide a placeholder value for it.
///
/// For `#[inject]` points, `Box<T>` (or `Option<Box<T>>`) resolves `T` and boxes it, which
/// allows self-referencing types. `#[inject(registry)]` points resolve the field type as is,
/// e.g. a registered `Box<dyn Trait>`.
///
/// # Example
///
/// ```ignore
/// use dugi_di::Describe;
///
/// #[derive(Describe, Default)]
/// pub struct BookRepository;
///
/// #[derive(Describe)]
/// #[describe(constructor = "BookService::empty")]
/// pub struct BookService {
///     #[inject]
///     book_repository: Option<BookRepository>,
/// }
///
/// // Generated implementation:
/// // impl dugi_di::Describe for BookService {
/// //     fn describe() -> dugi_di::TypeDescriptor {
/// //         dugi_di::TypeDescriptor::builder::<Self>()
/// //             .default_constructor(BookService::empty)
/// //             .inject::<BookRepository>("book_repository", |this, value| {
/// //                 this.book_repository = Some(value)
/// //             })
/// //             .build()
/// //     }
/// // }
/// ```
#[proc_macro_derive(Describe, attributes(describe, inject))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    describe::derive_describe_impl(input)
}
