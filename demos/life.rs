//! Conway's Game of Life on a wrapped lattice.
//!
//! Run with: cargo run --example life

use caex::prelude::*;

fn main() -> Result<(), ExplorerError> {
    Explorer::new()
        .with_size(256, 160)
        .with_rule("life")
        .with_density(0.2)
        .with_rate(20.0)
        .run()
}
