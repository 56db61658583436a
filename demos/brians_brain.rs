//! Brian's Brain: a three-state automaton with waves of firing neurons.
//!
//! Run with: cargo run --example brians_brain

use caex::prelude::*;

fn main() -> Result<(), ExplorerError> {
    Explorer::new()
        .with_size(320, 200)
        .with_rule("brians-brain")
        .with_palette(Palette::Neon)
        .with_density(0.3)
        .with_rate(30.0)
        .run()
}
