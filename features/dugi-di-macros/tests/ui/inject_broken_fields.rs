#![allow(dead_code)]

use dugi_di::Describe;

#[derive(Describe, Default)]
struct Shelf {
    #[inject(lazy)]
    first: Option<u8>,
    #[inject = "second"]
    second: Option<u8>,
}

fn main() {}
