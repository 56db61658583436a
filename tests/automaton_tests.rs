//! Integration tests exercising the public API: lattices stepped by
//! registry-instantiated rules, observed by analyses.

use caex::prelude::*;

/// Stamp a glider with its top-left corner at (x, y).
fn place_glider(lattice: &mut Lattice, x: usize, y: usize) {
    lattice.place(x, y, &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]]);
}

fn live_cells(lattice: &Lattice) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for y in 0..lattice.height() {
        for x in 0..lattice.width() {
            if lattice.get(x, y) != 0 {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn test_glider_translates_one_cell_per_four_generations() {
    let registry = RuleRegistry::with_builtins();
    let rule = registry.instantiate("life").unwrap();

    let mut lattice = Lattice::new(32, 32, Topology::SquareMoore, Edge::Wrap);
    place_glider(&mut lattice, 5, 5);
    let start = live_cells(&lattice);

    for _ in 0..4 {
        lattice.step(rule.as_ref());
    }

    // A glider moves (+1, +1) every four generations.
    let moved: Vec<_> = start.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    assert_eq!(live_cells(&lattice), moved);
    assert_eq!(lattice.generation(), 4);
}

#[test]
fn test_glider_wraps_around_the_torus() {
    let registry = RuleRegistry::with_builtins();
    let rule = registry.instantiate("life").unwrap();

    let mut lattice = Lattice::new(16, 16, Topology::SquareMoore, Edge::Wrap);
    place_glider(&mut lattice, 13, 13);

    // 16 * 4 generations brings the glider all the way around the torus
    // back to its starting cells.
    for _ in 0..64 {
        lattice.step(rule.as_ref());
    }
    let mut fresh = Lattice::new(16, 16, Topology::SquareMoore, Edge::Wrap);
    place_glider(&mut fresh, 13, 13);
    assert_eq!(live_cells(&lattice), live_cells(&fresh));
}

#[test]
fn test_builtin_rules_report_matching_ids() {
    let registry = RuleRegistry::with_builtins();
    for id in registry.ids() {
        let rule = registry.instantiate(id).unwrap();
        assert_eq!(rule.id(), id);
        assert!(!rule.display_name().is_empty());
        assert!(!rule.tooltip().is_empty());
        assert!(rule.state_count() >= 2);
        assert!(!rule.compatible_topologies().is_empty());
    }
}

#[test]
fn test_unknown_rule_id_is_an_error() {
    let registry = RuleRegistry::with_builtins();
    let err = registry.instantiate("no-such-rule").err().unwrap();
    assert!(err.to_string().contains("no-such-rule"));
}

#[test]
fn test_custom_rulestring_rule_registers_and_runs() {
    let mut registry = RuleRegistry::new();
    registry
        .register("replicator", || {
            // B1357/S1357 is self-replicating under HighLife-style counting.
            Box::new(Life::from_rulestring("B1357/S1357").unwrap())
        })
        .unwrap();

    let rule = registry.instantiate("replicator").unwrap();
    let mut lattice = Lattice::new(32, 32, Topology::SquareMoore, Edge::Wrap);
    lattice.set(16, 16, 1);
    lattice.step(rule.as_ref());

    // A lone cell with one live neighbor in its Moore neighborhood births.
    assert_eq!(lattice.population(), 8);
}

#[test]
fn test_elementary_rule_requires_line_topology() {
    let registry = RuleRegistry::with_builtins();
    let rule = registry.instantiate("elementary").unwrap();
    assert!(rule.is_compatible(Topology::Line));
    assert!(!rule.is_compatible(Topology::SquareMoore));
}

#[test]
fn test_analyses_track_a_running_simulation() {
    let registry = RuleRegistry::with_builtins();
    let rule = registry.instantiate("brians-brain").unwrap();
    let analyses = AnalysisRegistry::with_builtins();

    let mut lattice = Lattice::new(64, 64, Topology::SquareMoore, Edge::Wrap);
    lattice.seed_random(7, 0.3, rule.state_count());

    let mut population = analyses.instantiate("population").unwrap();
    let mut entropy = analyses.instantiate("entropy").unwrap();
    population.update(&lattice);
    entropy.update(&lattice);

    for _ in 0..10 {
        lattice.step(rule.as_ref());
        population.update(&lattice);
        entropy.update(&lattice);
    }

    let rows = population.report();
    assert!(!rows.is_empty());
    assert_eq!(rows[0].0, "Live cells");

    // A mixed soup has nonzero entropy, bounded by log2(states).
    let (_, value) = &entropy.report()[0];
    let bits: f64 = value
        .trim_end_matches(" bits")
        .parse()
        .expect("entropy report is numeric");
    assert!(bits > 0.0);
    assert!(bits <= (rule.state_count() as f64).log2() + 1e-9);
}

#[test]
fn test_bounded_edge_starves_the_border() {
    let registry = RuleRegistry::with_builtins();
    let rule = registry.instantiate("life").unwrap();

    // A blinker jammed against a bounded edge: the off-lattice neighbors
    // read as dead, so the oscillator still works one cell in.
    let mut lattice = Lattice::new(8, 8, Topology::SquareMoore, Edge::Bounded);
    lattice.set(0, 1, 1);
    lattice.set(1, 1, 1);
    lattice.set(2, 1, 1);

    lattice.step(rule.as_ref());
    // Horizontal blinker flips to vertical around its center (1, 1).
    assert_eq!(lattice.get(1, 0), 1);
    assert_eq!(lattice.get(1, 1), 1);
    assert_eq!(lattice.get(1, 2), 1);
    assert_eq!(lattice.population(), 3);
}

#[test]
fn test_switching_rules_resets_cleanly() {
    let registry = RuleRegistry::with_builtins();
    let life = registry.instantiate("life").unwrap();
    let brain = registry.instantiate("brians-brain").unwrap();

    let mut lattice = Lattice::new(32, 32, Topology::SquareMoore, Edge::Wrap);
    lattice.seed_random(3, 0.25, life.state_count());
    for _ in 0..5 {
        lattice.step(life.as_ref());
    }

    // Reseeding for the new rule resets the generation counter and yields
    // only states the new rule knows about.
    lattice.seed_random(3, 0.25, brain.state_count());
    assert_eq!(lattice.generation(), 0);
    assert!(lattice.cells().iter().all(|&s| s < brain.state_count()));
}
