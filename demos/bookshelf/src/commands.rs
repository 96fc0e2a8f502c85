//! The two demonstrations run by the `bookshelf` binary.

use std::io::Write;

use dugi_config::{ConfigError, ConfigProvider};
use dugi_di::{
    AssignError, ConstructionError, Container, DependencyGraphErrors, Describe, Instance, Recipe,
    ResolveError, TypeInfo,
};
use thiserror::Error;

use crate::books::{Book, BookService, ShelfError, ShelfSettings};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Graph(#[from] DependencyGraphErrors),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Shelf(#[from] ShelfError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Assign(#[from] AssignError),
    #[error("'{owner}' has no {what} '{name}'")]
    NotDescribed {
        owner: TypeInfo,
        what: &'static str,
        name: String,
    },
    #[error("Failed to write output")]
    Output(#[from] std::io::Error),
}

/// Resolves a `BookService` from a container and shelves a book with it
pub fn inject(settings: ShelfSettings, out: &mut impl Write) -> Result<(), CommandError> {
    let mut provider = ConfigProvider::new();
    provider.add_config(settings)?;

    let container = provider
        .register_into(Container::builder())
        .register::<BookService>()
        .build()?;
    tracing::info!("Container ready with {} recipes", container.registry().len());

    let mut service = container.resolve::<BookService>()?;
    writeln!(out, "Resolved BookService")?;
    writeln!(
        out,
        "BookRepository injected: {}",
        service.book_repository().is_some()
    )?;
    if let Some(settings) = service.settings() {
        writeln!(
            out,
            "Shelf '{}' (capacity {})",
            settings.name, settings.capacity
        )?;
    }

    let book = Book::new("The Rust Programming Language".to_string());
    let title = book.title().to_string();
    let shelved = service.shelve(book)?;
    writeln!(out, "Shelved '{title}' ({shelved} on the shelf)")?;

    Ok(())
}

/// Inspects the `Book` descriptor, then builds a book and writes its private subtitle
pub fn reflect(out: &mut impl Write) -> Result<(), CommandError> {
    let descriptor = Book::describe();
    let owner = descriptor.info();

    writeln!(out, "{}", owner.short_name())?;
    for constructor in descriptor.constructors() {
        let params: Vec<_> = constructor
            .params()
            .iter()
            .map(TypeInfo::short_name)
            .collect();
        writeln!(out, "  constructor({})", params.join(", "))?;
    }
    for point in descriptor.injection_points() {
        let recipe = match point.recipe() {
            Recipe::Described(_) => "described",
            Recipe::Registered => "registered",
        };
        writeln!(
            out,
            "  injection point '{}': {} ({recipe})",
            point.name(),
            point.target().short_name()
        )?;
    }

    let string = TypeInfo::of::<String>();
    let constructor =
        descriptor
            .constructor_for(&[string])
            .ok_or_else(|| CommandError::NotDescribed {
                owner,
                what: "constructor taking",
                name: string.short_name(),
            })?;
    let mut book = constructor.invoke(vec![Instance::new("bBook".to_string())])?;
    let built = book.downcast_ref::<Book>();
    writeln!(
        out,
        "Built with constructor(String): title '{}', subtitle '{}'",
        built.map_or("?", Book::title),
        built.map_or("?", Book::subtitle)
    )?;

    let point = descriptor
        .injection_point("subtitle")
        .ok_or_else(|| CommandError::NotDescribed {
            owner,
            what: "injection point",
            name: "subtitle".to_string(),
        })?;
    point.assign(&mut book, Instance::new("BBBB".to_string()))?;
    writeln!(
        out,
        "Set 'subtitle' through its setter: {}",
        book.downcast_ref::<Book>().map_or("?", Book::subtitle)
    )?;

    Ok(())
}
