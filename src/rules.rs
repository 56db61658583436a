//! Built-in cellular-automaton rules.
//!
//! Every rule here implements the [`Rule`] trait and ships pre-registered in
//! [`RuleRegistry::with_builtins`](crate::registry::RuleRegistry::with_builtins):
//!
//! | Id | Rule |
//! |----|------|
//! | `life` | Conway's Game of Life (B3/S23) |
//! | `highlife` | HighLife (B36/S23) |
//! | `seeds` | Seeds (B2/S) |
//! | `day-and-night` | Day & Night (B3678/S34678) |
//! | `elementary` | Elementary one-dimensional rule (Wolfram code) |
//! | `brians-brain` | Brian's Brain three-state automaton |
//! | `cyclic` | Cyclic automaton |
//! | `majority` | Binary majority vote |
//!
//! The totalistic family is a single [`Life`] struct parameterized by birth
//! and survival masks, so arbitrary outer-totalistic rules can be built from
//! a rulestring:
//!
//! ```ignore
//! let replicator = Life::from_rulestring("B1357/S1357")?;
//! ```

use std::fmt;

use crate::lattice::{Neighborhood, Topology};
use crate::rule::Rule;

/// Topologies where neighbor counting makes sense (everything but a line).
const COUNTING_TOPOLOGIES: [Topology; 3] = [
    Topology::SquareMoore,
    Topology::SquareVonNeumann,
    Topology::Hexagonal,
];

/// A rulestring could not be parsed.
#[derive(Debug)]
pub struct RulestringError(String);

impl fmt::Display for RulestringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid rulestring '{}'. Expected the form B<digits>/S<digits>, e.g. B3/S23.", self.0)
    }
}

impl std::error::Error for RulestringError {}

/// Outer-totalistic two-state rule with birth and survival masks.
///
/// Bit `n` of a mask means "with exactly `n` live neighbors". Conway's Life
/// is `birth = 1 << 3`, `survive = 1 << 2 | 1 << 3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Life {
    id: &'static str,
    name: &'static str,
    tooltip: &'static str,
    birth: u16,
    survive: u16,
}

impl Life {
    /// Conway's Game of Life, B3/S23.
    pub fn conway() -> Self {
        Self {
            id: "life",
            name: "Conway's Life",
            tooltip: "The classic B3/S23 rule: birth on 3 live neighbors, survival on 2 or 3",
            birth: mask(&[3]),
            survive: mask(&[2, 3]),
        }
    }

    /// HighLife, B36/S23. Known for its self-replicating pattern.
    pub fn highlife() -> Self {
        Self {
            id: "highlife",
            name: "HighLife",
            tooltip: "B36/S23: Life plus birth on 6 neighbors, home of the replicator",
            birth: mask(&[3, 6]),
            survive: mask(&[2, 3]),
        }
    }

    /// Seeds, B2/S. Every live cell dies each generation.
    pub fn seeds() -> Self {
        Self {
            id: "seeds",
            name: "Seeds",
            tooltip: "B2/S: cells are born on exactly 2 neighbors and never survive",
            birth: mask(&[2]),
            survive: 0,
        }
    }

    /// Day & Night, B3678/S34678. Symmetric between live and dead cells.
    pub fn day_and_night() -> Self {
        Self {
            id: "day-and-night",
            name: "Day & Night",
            tooltip: "B3678/S34678: a rule symmetric under swapping live and dead cells",
            birth: mask(&[3, 6, 7, 8]),
            survive: mask(&[3, 4, 6, 7, 8]),
        }
    }

    /// Parse a `B<digits>/S<digits>` rulestring into a custom rule.
    pub fn from_rulestring(s: &str) -> Result<Self, RulestringError> {
        let err = || RulestringError(s.to_owned());

        let (birth_part, survive_part) = s.split_once('/').ok_or_else(err)?;
        let birth_digits = birth_part.strip_prefix(['B', 'b']).ok_or_else(err)?;
        let survive_digits = survive_part.strip_prefix(['S', 's']).ok_or_else(err)?;

        let parse = |digits: &str| -> Result<u16, RulestringError> {
            let mut m = 0u16;
            for c in digits.chars() {
                let n = c.to_digit(10).ok_or_else(err)?;
                if n > 8 {
                    return Err(err());
                }
                m |= 1 << n;
            }
            Ok(m)
        };

        Ok(Self {
            id: "custom-totalistic",
            name: "Custom totalistic",
            tooltip: "Outer-totalistic rule built from a rulestring",
            birth: parse(birth_digits)?,
            survive: parse(survive_digits)?,
        })
    }

    /// Render the current masks as a `B.../S...` rulestring.
    pub fn rulestring(&self) -> String {
        let digits = |m: u16| -> String {
            (0..=8).filter(|n| m & (1 << n) != 0).map(|n| char::from(b'0' + n)).collect()
        };
        format!("B{}/S{}", digits(self.birth), digits(self.survive))
    }
}

impl Rule for Life {
    fn id(&self) -> &'static str {
        self.id
    }

    fn display_name(&self) -> &'static str {
        self.name
    }

    fn tooltip(&self) -> &'static str {
        self.tooltip
    }

    fn description(&self) -> String {
        format!(
            "{}.\n\nOuter-totalistic rule {}: a dead cell becomes live when its live-neighbor \
             count is in the birth set, a live cell stays live when the count is in the \
             survival set, and every other cell is dead in the next generation.",
            self.tooltip,
            self.rulestring()
        )
    }

    fn family(&self) -> &'static str {
        "Totalistic"
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn compatible_topologies(&self) -> &'static [Topology] {
        &COUNTING_TOPOLOGIES
    }

    fn next_state(&self, current: u8, hood: &Neighborhood) -> u8 {
        let live = hood.live_count() as u16;
        let selected = if current == 0 { self.birth } else { self.survive };
        (selected >> live & 1) as u8
    }

    #[cfg(feature = "egui")]
    fn config_ui(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        ui.label(format!("Rulestring: {}", self.rulestring()));
        for (label, mask) in [("Birth", &mut self.birth), ("Survive", &mut self.survive)] {
            ui.horizontal(|ui| {
                ui.label(label);
                for n in 0..=8u16 {
                    let mut on = *mask & (1 << n) != 0;
                    if ui.checkbox(&mut on, n.to_string()).changed() {
                        *mask ^= 1 << n;
                        changed = true;
                    }
                }
            });
        }
        changed
    }

    fn has_config(&self) -> bool {
        true
    }
}

/// Elementary one-dimensional automaton identified by its Wolfram code.
///
/// The next state of a cell is read from bit `(left << 2) | (self << 1) | right`
/// of the 8-bit code. Rule 110 is the famous Turing-complete one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Elementary {
    code: u8,
}

impl Elementary {
    /// Create an elementary rule from its Wolfram code.
    pub fn new(code: u8) -> Self {
        Self { code }
    }

    /// The Wolfram code of this rule.
    pub fn code(&self) -> u8 {
        self.code
    }
}

impl Default for Elementary {
    fn default() -> Self {
        Self::new(110)
    }
}

impl Rule for Elementary {
    fn id(&self) -> &'static str {
        "elementary"
    }

    fn display_name(&self) -> &'static str {
        "Elementary"
    }

    fn tooltip(&self) -> &'static str {
        "One-dimensional rule selected by its 8-bit Wolfram code"
    }

    fn description(&self) -> String {
        format!(
            "Wolfram rule {}. Each cell's next state is looked up from the \
             (left, self, right) triple in the rule's 8-bit code. Runs on the \
             one-dimensional line topology.",
            self.code
        )
    }

    fn family(&self) -> &'static str {
        "Elementary"
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn compatible_topologies(&self) -> &'static [Topology] {
        &[Topology::Line]
    }

    fn next_state(&self, current: u8, hood: &Neighborhood) -> u8 {
        let states = hood.states();
        let (left, right) = (states[0] & 1, states[1] & 1);
        let idx = (left << 2) | ((current & 1) << 1) | right;
        (self.code >> idx) & 1
    }

    #[cfg(feature = "egui")]
    fn config_ui(&mut self, ui: &mut egui::Ui) -> bool {
        ui.horizontal(|ui| {
            ui.label("Wolfram code:");
            ui.add(egui::DragValue::new(&mut self.code)).changed()
        })
        .inner
    }

    fn has_config(&self) -> bool {
        true
    }
}

/// Brian's Brain: three states, no stable structures.
///
/// States: 0 = ready, 1 = firing, 2 = refractory. A ready cell fires when
/// exactly two neighbors are firing; a firing cell always becomes
/// refractory; a refractory cell always becomes ready.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BriansBrain;

impl Rule for BriansBrain {
    fn id(&self) -> &'static str {
        "brians-brain"
    }

    fn display_name(&self) -> &'static str {
        "Brian's Brain"
    }

    fn tooltip(&self) -> &'static str {
        "Three-state firing/refractory automaton that never settles down"
    }

    fn family(&self) -> &'static str {
        "Spreading"
    }

    fn state_count(&self) -> u8 {
        3
    }

    fn compatible_topologies(&self) -> &'static [Topology] {
        &COUNTING_TOPOLOGIES
    }

    fn next_state(&self, current: u8, hood: &Neighborhood) -> u8 {
        match current {
            0 => {
                if hood.count_of(1) == 2 {
                    1
                } else {
                    0
                }
            }
            1 => 2,
            _ => 0,
        }
    }
}

/// Cyclic automaton: states chase their successor around a color wheel.
///
/// A cell in state `s` advances to `(s + 1) % states` when at least
/// `threshold` neighbors already hold that successor state. Random soup
/// self-organizes into spirals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cyclic {
    states: u8,
    threshold: u8,
}

impl Cyclic {
    /// Create a cyclic rule with the given state count and threshold.
    ///
    /// # Panics
    ///
    /// Panics if `states < 3` or `threshold == 0`.
    pub fn new(states: u8, threshold: u8) -> Self {
        assert!(states >= 3, "Cyclic needs at least 3 states");
        assert!(threshold >= 1, "Cyclic threshold must be at least 1");
        Self { states, threshold }
    }
}

impl Default for Cyclic {
    fn default() -> Self {
        Self::new(12, 1)
    }
}

impl Rule for Cyclic {
    fn id(&self) -> &'static str {
        "cyclic"
    }

    fn display_name(&self) -> &'static str {
        "Cyclic"
    }

    fn tooltip(&self) -> &'static str {
        "States consume their predecessor around a cycle, forming spirals"
    }

    fn family(&self) -> &'static str {
        "Cyclic"
    }

    fn state_count(&self) -> u8 {
        self.states
    }

    fn compatible_topologies(&self) -> &'static [Topology] {
        &COUNTING_TOPOLOGIES
    }

    fn next_state(&self, current: u8, hood: &Neighborhood) -> u8 {
        let successor = (current + 1) % self.states;
        if hood.count_of(successor) >= self.threshold as usize {
            successor
        } else {
            current
        }
    }

    #[cfg(feature = "egui")]
    fn config_ui(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        changed |= ui
            .add(egui::Slider::new(&mut self.states, 3..=16).text("States"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.threshold, 1..=4).text("Threshold"))
            .changed();
        changed
    }

    fn has_config(&self) -> bool {
        true
    }
}

/// Binary majority vote, self included. Ties keep the current state.
///
/// With a Moore neighborhood the electorate is 9 cells, so ties cannot
/// occur; with von Neumann (5 cells) they cannot either. The tie branch
/// matters only for even electorates such as hex grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Majority;

impl Rule for Majority {
    fn id(&self) -> &'static str {
        "majority"
    }

    fn display_name(&self) -> &'static str {
        "Majority Vote"
    }

    fn tooltip(&self) -> &'static str {
        "Each cell adopts the majority state of itself and its neighbors"
    }

    fn family(&self) -> &'static str {
        "Voting"
    }

    fn state_count(&self) -> u8 {
        2
    }

    fn compatible_topologies(&self) -> &'static [Topology] {
        &COUNTING_TOPOLOGIES
    }

    fn next_state(&self, current: u8, hood: &Neighborhood) -> u8 {
        let live = hood.live_count() + usize::from(current != 0);
        let total = hood.len() + 1;
        if live * 2 > total {
            1
        } else if live * 2 < total {
            0
        } else {
            current
        }
    }
}

/// Helper: build a neighbor-count bitmask from a digit list.
fn mask(counts: &[u16]) -> u16 {
    counts.iter().fold(0, |m, &n| m | 1 << n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Neighborhood;

    fn hood(live: usize) -> Neighborhood {
        let mut states = [0u8; 8];
        for s in states.iter_mut().take(live) {
            *s = 1;
        }
        Neighborhood::from_states(&states)
    }

    #[test]
    fn test_conway_birth_and_survival() {
        let life = Life::conway();

        // Dead cell: born only with exactly 3 live neighbors.
        for n in 0..=8 {
            let expected = u8::from(n == 3);
            assert_eq!(life.next_state(0, &hood(n)), expected, "birth with {} neighbors", n);
        }

        // Live cell: survives with 2 or 3 live neighbors.
        for n in 0..=8 {
            let expected = u8::from(n == 2 || n == 3);
            assert_eq!(life.next_state(1, &hood(n)), expected, "survival with {} neighbors", n);
        }
    }

    #[test]
    fn test_seeds_never_survives() {
        let seeds = Life::seeds();
        for n in 0..=8 {
            assert_eq!(seeds.next_state(1, &hood(n)), 0);
        }
        assert_eq!(seeds.next_state(0, &hood(2)), 1);
    }

    #[test]
    fn test_rulestring_parse_and_format() {
        let life = Life::from_rulestring("B3/S23").unwrap();
        assert_eq!(life.rulestring(), "B3/S23");
        assert_eq!(life.next_state(0, &hood(3)), 1);
        assert_eq!(life.next_state(1, &hood(2)), 1);
        assert_eq!(life.next_state(1, &hood(4)), 0);

        // Lowercase and empty survival set are accepted.
        assert_eq!(Life::from_rulestring("b2/s").unwrap().rulestring(), "B2/S");
        assert_eq!(Life::conway().rulestring(), "B3/S23");
        assert_eq!(Life::day_and_night().rulestring(), "B3678/S34678");
    }

    #[test]
    fn test_rulestring_rejects_garbage() {
        assert!(Life::from_rulestring("").is_err());
        assert!(Life::from_rulestring("B3S23").is_err());
        assert!(Life::from_rulestring("3/23").is_err());
        assert!(Life::from_rulestring("B9/S2").is_err());
        assert!(Life::from_rulestring("Bx/S2").is_err());
    }

    #[test]
    fn test_elementary_rule_110() {
        let rule = Elementary::new(110);
        // Rule 110 truth table, patterns (left, self, right) from 111 down to 000:
        // 0 1 1 0 1 1 1 0
        let expect = [
            ((1, 1, 1), 0),
            ((1, 1, 0), 1),
            ((1, 0, 1), 1),
            ((1, 0, 0), 0),
            ((0, 1, 1), 1),
            ((0, 1, 0), 1),
            ((0, 0, 1), 1),
            ((0, 0, 0), 0),
        ];
        for ((l, c, r), out) in expect {
            let hood = Neighborhood::from_states(&[l, r]);
            assert_eq!(rule.next_state(c, &hood), out, "pattern {}{}{}", l, c, r);
        }
    }

    #[test]
    fn test_elementary_rule_90_is_xor() {
        let rule = Elementary::new(90);
        for l in 0..=1u8 {
            for c in 0..=1u8 {
                for r in 0..=1u8 {
                    let hood = Neighborhood::from_states(&[l, r]);
                    assert_eq!(rule.next_state(c, &hood), l ^ r);
                }
            }
        }
    }

    #[test]
    fn test_brians_brain_cycle() {
        let brain = BriansBrain;
        let two_firing = Neighborhood::from_states(&[1, 1, 0, 0, 0, 0, 0, 0]);
        let one_firing = Neighborhood::from_states(&[1, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(brain.next_state(0, &two_firing), 1);
        assert_eq!(brain.next_state(0, &one_firing), 0);
        // Firing and refractory cells advance unconditionally.
        assert_eq!(brain.next_state(1, &two_firing), 2);
        assert_eq!(brain.next_state(2, &two_firing), 0);
    }

    #[test]
    fn test_cyclic_advances_on_successor() {
        let cyclic = Cyclic::new(4, 1);
        let with_successor = Neighborhood::from_states(&[2, 0, 0, 0, 0, 0, 0, 0]);
        let without = Neighborhood::from_states(&[3, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(cyclic.next_state(1, &with_successor), 2);
        assert_eq!(cyclic.next_state(1, &without), 1);

        // Wraps from the last state back to 0.
        let zeros = Neighborhood::from_states(&[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(cyclic.next_state(3, &zeros), 0);
    }

    #[test]
    fn test_majority_flips_minority_cell() {
        let majority = Majority;
        assert_eq!(majority.next_state(0, &hood(5)), 1);
        assert_eq!(majority.next_state(1, &hood(3)), 0);
        // 4 live neighbors + live self = 5 of 9: stays live.
        assert_eq!(majority.next_state(1, &hood(4)), 1);
    }

    #[test]
    fn test_state_counts_and_topologies() {
        assert_eq!(Life::conway().state_count(), 2);
        assert_eq!(BriansBrain.state_count(), 3);
        assert_eq!(Cyclic::default().state_count(), 12);
        assert!(Elementary::default().is_compatible(Topology::Line));
        assert!(!Life::conway().is_compatible(Topology::Line));
    }
}
