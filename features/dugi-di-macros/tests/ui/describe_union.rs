#![allow(dead_code)]

use dugi_di::Describe;

#[derive(Describe)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
