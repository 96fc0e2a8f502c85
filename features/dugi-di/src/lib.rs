//! dugi-di resolves fully populated object graphs from type descriptors.
//!
//! The container consists of four parts:
//! 1. [Registry]: recipes registered for requested types
//! 2. [instance_builder]: invokes the zero-argument constructor of a type
//! 3. [InjectionResolver]: fills the injection points of a built instance, recursively
//! 4. [Container]: `resolve::<T>()`, composing the two above
//!
//! Types describe themselves through [Describe], usually derived:
//!
//! ```rust
//! use dugi_di::{Container, Describe};
//!
//! #[derive(Describe, Default)]
//! pub struct BookRepository;
//!
//! #[derive(Describe, Default)]
//! pub struct BookService {
//!     #[inject]
//!     book_repository: Option<BookRepository>,
//! }
//!
//! impl BookService {
//!     pub fn book_repository(&self) -> Option<&BookRepository> {
//!         self.book_repository.as_ref()
//!     }
//! }
//!
//! let container = Container::new();
//! let service = container.resolve::<BookService>().unwrap();
//! assert!(service.book_repository().is_some());
//! ```
//!
//! Every `resolve` call creates a new graph, nothing is cached or shared.
//! Dependency cycles are reported as [CyclicDependencyError].

// Lets the derive macro refer to `::dugi_di` from inside this crate
extern crate self as dugi_di;

pub mod builder;
pub mod container;
pub mod dependency_graph;
pub mod descriptor;
pub mod errors;
pub mod instance_builder;
pub mod registry;
pub mod resolver;
pub mod types;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use dependency_graph::{DependencyGraph, DependencyGraphError, DependencyGraphErrors};
pub use descriptor::{
    Constructor, Describe, InjectionPoint, Recipe, TypeDescriptor, TypeDescriptorBuilder,
};
pub use errors::{
    AssignError, ConstructionError, CyclicDependencyError, InjectionError, InjectionFault,
    ResolveError,
};
pub use registry::Registry;
pub use resolver::{InjectionResolver, ResolutionChain};
pub use types::{DynError, Injectable, Instance, TypeInfo};

pub use dugi_di_macros::Describe;
