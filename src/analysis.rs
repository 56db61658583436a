//! Analyses: pluggable statistics over a running simulation.
//!
//! An [`Analysis`] observes the lattice after each generation and reports
//! labeled values for the Analysis panel. Like rules, analyses are selected
//! by id from a registry and handled as boxed trait objects.

use crate::lattice::Lattice;

/// A pluggable observer that derives statistics from the lattice.
pub trait Analysis: Send + Sync {
    /// Stable identifier used as the registry key.
    fn id(&self) -> &'static str;

    /// Name shown in the Analysis panel.
    fn display_name(&self) -> &'static str;

    /// One-line summary shown on hover.
    fn tooltip(&self) -> &'static str;

    /// Drop all accumulated state, e.g. after a reseed or rule change.
    fn reset(&mut self);

    /// Observe the lattice. Called once after every generation and once
    /// when the analysis is first attached.
    fn update(&mut self, lattice: &Lattice);

    /// Current results as (label, value) rows.
    fn report(&self) -> Vec<(String, String)>;
}

/// Counts cells per state and the total live population.
#[derive(Debug, Default)]
pub struct PopulationCensus {
    counts: Vec<usize>,
    total: usize,
}

impl Analysis for PopulationCensus {
    fn id(&self) -> &'static str {
        "population"
    }

    fn display_name(&self) -> &'static str {
        "Population"
    }

    fn tooltip(&self) -> &'static str {
        "Live cell count and a per-state census"
    }

    fn reset(&mut self) {
        self.counts.clear();
        self.total = 0;
    }

    fn update(&mut self, lattice: &Lattice) {
        let max_state = lattice.cells().iter().copied().max().unwrap_or(0);
        self.counts = lattice.census(max_state as usize + 1);
        self.total = lattice.cells().len();
    }

    fn report(&self) -> Vec<(String, String)> {
        let live: usize = self.counts.iter().skip(1).sum();
        let mut rows = vec![("Live cells".to_owned(), live.to_string())];
        if self.total > 0 {
            let density = live as f64 / self.total as f64;
            rows.push(("Density".to_owned(), format!("{:.1}%", density * 100.0)));
        }
        for (state, &count) in self.counts.iter().enumerate().skip(1) {
            rows.push((format!("State {}", state), count.to_string()));
        }
        rows
    }
}

/// Tracks how many cells changed state in the last generation.
///
/// An activity of zero means the pattern has frozen (still life); a small
/// oscillating value usually means it collapsed to blinkers.
#[derive(Debug, Default)]
pub struct Activity {
    previous: Vec<u8>,
    changed: usize,
    peak: usize,
}

impl Analysis for Activity {
    fn id(&self) -> &'static str {
        "activity"
    }

    fn display_name(&self) -> &'static str {
        "Activity"
    }

    fn tooltip(&self) -> &'static str {
        "Cells that changed state in the last generation"
    }

    fn reset(&mut self) {
        self.previous.clear();
        self.changed = 0;
        self.peak = 0;
    }

    fn update(&mut self, lattice: &Lattice) {
        let cells = lattice.cells();
        if self.previous.len() == cells.len() {
            self.changed = self
                .previous
                .iter()
                .zip(cells)
                .filter(|(a, b)| a != b)
                .count();
            self.peak = self.peak.max(self.changed);
        } else {
            self.changed = 0;
            self.peak = 0;
        }
        self.previous.clear();
        self.previous.extend_from_slice(cells);
    }

    fn report(&self) -> Vec<(String, String)> {
        vec![
            ("Changed cells".to_owned(), self.changed.to_string()),
            ("Peak".to_owned(), self.peak.to_string()),
        ]
    }
}

/// Shannon entropy of the cell-state distribution, in bits.
///
/// Zero for a uniform lattice, `log2(state_count)` for a perfectly even
/// mix. A useful single number for "how structured is this soup".
#[derive(Debug, Default)]
pub struct Entropy {
    bits: f64,
}

impl Entropy {
    /// The most recent entropy value in bits.
    pub fn bits(&self) -> f64 {
        self.bits
    }
}

impl Analysis for Entropy {
    fn id(&self) -> &'static str {
        "entropy"
    }

    fn display_name(&self) -> &'static str {
        "Entropy"
    }

    fn tooltip(&self) -> &'static str {
        "Shannon entropy of the state distribution, in bits"
    }

    fn reset(&mut self) {
        self.bits = 0.0;
    }

    fn update(&mut self, lattice: &Lattice) {
        let total = lattice.cells().len() as f64;
        let max_state = lattice.cells().iter().copied().max().unwrap_or(0);
        self.bits = lattice
            .census(max_state as usize + 1)
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum();
    }

    fn report(&self) -> Vec<(String, String)> {
        vec![("Entropy".to_owned(), format!("{:.3} bits", self.bits))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Edge, Lattice, Topology};

    fn small_lattice() -> Lattice {
        Lattice::new(4, 4, Topology::SquareMoore, Edge::Wrap)
    }

    #[test]
    fn test_population_census() {
        let mut lattice = small_lattice();
        lattice.set(0, 0, 1);
        lattice.set(1, 0, 1);
        lattice.set(2, 0, 2);

        let mut census = PopulationCensus::default();
        census.update(&lattice);
        let rows = census.report();

        assert_eq!(rows[0], ("Live cells".to_owned(), "3".to_owned()));
        assert!(rows.iter().any(|(k, v)| k == "State 1" && v == "2"));
        assert!(rows.iter().any(|(k, v)| k == "State 2" && v == "1"));
    }

    #[test]
    fn test_activity_counts_changes() {
        let mut lattice = small_lattice();
        let mut activity = Activity::default();

        // First observation establishes the baseline.
        activity.update(&lattice);
        assert_eq!(activity.changed, 0);

        lattice.set(0, 0, 1);
        lattice.set(3, 3, 1);
        activity.update(&lattice);
        assert_eq!(activity.changed, 2);

        // No further change.
        activity.update(&lattice);
        assert_eq!(activity.changed, 0);
        assert_eq!(activity.peak, 2);
    }

    #[test]
    fn test_activity_reset_after_resize() {
        let mut activity = Activity::default();
        activity.update(&small_lattice());

        // A differently sized lattice must not be diffed against the old one.
        let bigger = Lattice::new(8, 8, Topology::SquareMoore, Edge::Wrap);
        activity.update(&bigger);
        assert_eq!(activity.changed, 0);
    }

    #[test]
    fn test_top_state_does_not_overflow_census() {
        // State 255 is reachable through Lattice::set; `max_state + 1` must
        // not wrap in u8.
        let mut lattice = small_lattice();
        lattice.set(0, 0, 255);

        let mut census = PopulationCensus::default();
        census.update(&lattice);
        let rows = census.report();
        assert_eq!(rows[0], ("Live cells".to_owned(), "1".to_owned()));
        assert!(rows.iter().any(|(k, v)| k == "State 255" && v == "1"));

        let mut entropy = Entropy::default();
        entropy.update(&lattice);
        assert!(entropy.bits() > 0.0);
    }

    #[test]
    fn test_entropy_bounds() {
        let mut entropy = Entropy::default();

        // Uniform lattice: zero bits.
        let lattice = small_lattice();
        entropy.update(&lattice);
        assert!(entropy.bits().abs() < 1e-9);

        // Perfect 50/50 split: exactly one bit.
        let mut half = small_lattice();
        for x in 0..4 {
            for y in 0..2 {
                half.set(x, y, 1);
            }
        }
        entropy.update(&half);
        assert!((entropy.bits() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_reports() {
        let mut lattice = small_lattice();
        lattice.set(0, 0, 1);

        let mut census = PopulationCensus::default();
        census.update(&lattice);
        census.reset();
        assert_eq!(census.report()[0].1, "0");
    }
}
