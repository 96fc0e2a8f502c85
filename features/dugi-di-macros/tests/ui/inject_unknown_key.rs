#![allow(dead_code)]

use dugi_di::Describe;

#[derive(Default)]
struct BookRepository;

#[derive(Describe, Default)]
struct BookService {
    #[inject(lazy)]
    book_repository: Option<BookRepository>,
}

fn main() {}
