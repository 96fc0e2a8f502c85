#![allow(dead_code)]

use dugi_di::Describe;

#[derive(Describe)]
#[describe(constructor = "Shelf::new", try_constructor = "Shelf::open")]
struct Shelf;

fn main() {}
