#![allow(dead_code)]

use dugi_di::Describe;

#[derive(Describe, Default)]
struct BookService {
    #[inject]
    #[inject(registry)]
    title: Option<String>,
}

fn main() {}
