//! Run an automaton without a window and print analysis reports.
//!
//! Useful for batch experiments: the lattice, rules, and analyses have no
//! dependency on the renderer.
//!
//! Run with: cargo run --example headless_census

use caex::prelude::*;

fn main() {
    let rule = Life::conway();
    let mut lattice = Lattice::new(128, 128, Topology::SquareMoore, Edge::Wrap);
    lattice.seed_random(42, 0.25, rule.state_count());

    let mut analyses: Vec<Box<dyn Analysis>> = vec![
        Box::new(PopulationCensus::default()),
        Box::new(Activity::default()),
        Box::new(Entropy::default()),
    ];

    for analysis in &mut analyses {
        analysis.update(&lattice);
    }

    for _ in 0..500 {
        lattice.step(&rule);
        for analysis in &mut analyses {
            analysis.update(&lattice);
        }
    }

    println!("After {} generations:", lattice.generation());
    for analysis in &analyses {
        println!("  {}", analysis.display_name());
        for (key, value) in analysis.report() {
            println!("    {}: {}", key, value);
        }
    }
}
