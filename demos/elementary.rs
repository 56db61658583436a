//! Wolfram's rule 110 on a one-dimensional lattice.
//!
//! The line topology gives each cell two neighbors; only the single row is
//! shown, so the classic space-time triangles scroll through it.
//!
//! Run with: cargo run --example elementary

use caex::prelude::*;

fn main() -> Result<(), ExplorerError> {
    Explorer::new()
        .with_size(512, 1)
        .with_topology(Topology::Line)
        .with_rule("elementary")
        .with_density(0.5)
        .with_rate(15.0)
        .run()
}
