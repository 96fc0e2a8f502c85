#![allow(dead_code)]

use dugi_di::Describe;

#[derive(Describe)]
enum Shelf {
    Empty,
    Full,
}

fn main() {}
