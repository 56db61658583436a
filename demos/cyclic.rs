//! Cyclic automaton: rock-paper-scissors dynamics that self-organize from
//! noise into rotating spiral waves.
//!
//! Run with: cargo run --example cyclic

use caex::prelude::*;

fn main() -> Result<(), ExplorerError> {
    Explorer::new()
        .with_size(256, 256)
        .with_rule("cyclic")
        .with_palette(Palette::Fire)
        .with_density(1.0)
        .with_rate(25.0)
        .run()
}
