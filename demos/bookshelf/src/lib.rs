//! Bookshelf shows dugi-di on a small library domain: a `BookService` resolved with its
//! repository and shelf settings, and a `Book` inspected through its descriptor.

pub mod books;
pub mod commands;
