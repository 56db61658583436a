//! The `Rule` capability trait.
//!
//! A rule is a pluggable strategy that computes a cell's next state from its
//! current state and its [`Neighborhood`]. Rules also carry the display
//! metadata the explorer UI queries: a stable id, a display name, a tooltip,
//! a longer description, the number of cell states, and the lattice
//! topologies the rule runs on.
//!
//! Rules are selected by id from a [`RuleRegistry`](crate::registry::RuleRegistry)
//! and handled as boxed trait objects. Implement this trait and register a
//! factory to add a rule:
//!
//! ```ignore
//! let mut registry = RuleRegistry::with_builtins();
//! registry.register("my-rule", || Box::new(MyRule::default()))?;
//! let rule = registry.instantiate("my-rule")?;
//! ```

use crate::lattice::{Neighborhood, Topology};

/// A pluggable cell-state transition strategy.
///
/// `next_state` is called once per cell per generation and must be pure: the
/// same inputs always produce the same output. Configuration changes happen
/// between generations through [`Rule::config_ui`].
pub trait Rule: Send + Sync {
    /// Stable identifier used as the registry key. Lowercase, hyphenated.
    fn id(&self) -> &'static str;

    /// Name shown in the rule browser.
    fn display_name(&self) -> &'static str;

    /// One-line summary shown on hover.
    fn tooltip(&self) -> &'static str;

    /// Longer text for the Description panel.
    ///
    /// The default falls back to the tooltip, so a rule without prose still
    /// shows something meaningful.
    fn description(&self) -> String {
        self.tooltip().to_owned()
    }

    /// Grouping header in the rule browser.
    fn family(&self) -> &'static str {
        "General"
    }

    /// Number of distinct cell states, including the quiescent state 0.
    ///
    /// Must be at least 2. `next_state` only ever sees states below this
    /// count and must return a state below it.
    fn state_count(&self) -> u8;

    /// Lattice topologies this rule runs on.
    fn compatible_topologies(&self) -> &'static [Topology];

    /// Whether this rule runs on the given topology.
    fn is_compatible(&self, topology: Topology) -> bool {
        self.compatible_topologies().contains(&topology)
    }

    /// Compute the next state of a cell.
    fn next_state(&self, current: u8, hood: &Neighborhood) -> u8;

    /// Render the rule's extra configuration panel, if it has one.
    ///
    /// Returns `true` if any setting changed. The default renders nothing,
    /// which hides the panel.
    #[cfg(feature = "egui")]
    fn config_ui(&mut self, _ui: &mut egui::Ui) -> bool {
        false
    }

    /// Whether the rule has an extra configuration panel.
    ///
    /// Used to decide if the Properties tab shows a rule section at all.
    fn has_config(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Neighborhood;

    struct Bare;

    impl Rule for Bare {
        fn id(&self) -> &'static str {
            "bare"
        }
        fn display_name(&self) -> &'static str {
            "Bare"
        }
        fn tooltip(&self) -> &'static str {
            "A rule with only the required methods"
        }
        fn state_count(&self) -> u8 {
            2
        }
        fn compatible_topologies(&self) -> &'static [Topology] {
            &[Topology::SquareMoore]
        }
        fn next_state(&self, current: u8, _hood: &Neighborhood) -> u8 {
            current
        }
    }

    #[test]
    fn test_description_falls_back_to_tooltip() {
        let rule = Bare;
        assert_eq!(rule.description(), rule.tooltip());
    }

    #[test]
    fn test_compatibility_check() {
        let rule = Bare;
        assert!(rule.is_compatible(Topology::SquareMoore));
        assert!(!rule.is_compatible(Topology::Line));
    }

    #[test]
    fn test_defaults() {
        let rule = Bare;
        assert_eq!(rule.family(), "General");
        assert!(!rule.has_config());
    }

    #[test]
    fn test_trait_object_usable() {
        let rule: Box<dyn Rule> = Box::new(Bare);
        let hood = Neighborhood::from_states(&[0, 1, 0]);
        assert_eq!(rule.next_state(1, &hood), 1);
    }
}
