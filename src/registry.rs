//! Named factory tables for rules and analyses.
//!
//! The explorer discovers its plugins through these registries: a stable
//! string id maps to a factory producing a boxed trait object. The built-ins
//! are registered at startup and callers can add their own before the
//! explorer runs. Ids are listed in sorted order so the UI gets a stable
//! listing for free.
//!
//! ```ignore
//! let mut rules = RuleRegistry::with_builtins();
//! rules.register("my-rule", || Box::new(MyRule::default()))?;
//!
//! let rule = rules.instantiate("my-rule")?;
//! println!("{}", rule.display_name());
//! ```
//!
//! Instantiating an unknown id is an error, not a panic; the GUI surfaces it
//! as a modal warning and keeps the previous rule running.

use std::collections::BTreeMap;

use crate::analysis::{Activity, Analysis, Entropy, PopulationCensus};
use crate::error::RegistryError;
use crate::rule::Rule;
use crate::rules::{BriansBrain, Cyclic, Elementary, Life, Majority};

/// Factory table for [`Rule`] implementations, keyed by id.
pub struct RuleRegistry {
    factories: BTreeMap<&'static str, Box<dyn Fn() -> Box<dyn Rule> + Send + Sync>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry pre-populated with every built-in rule.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [(&'static str, Box<dyn Fn() -> Box<dyn Rule> + Send + Sync>); 8] = [
            ("life", Box::new(|| Box::new(Life::conway()) as Box<dyn Rule>)),
            ("highlife", Box::new(|| Box::new(Life::highlife()) as Box<dyn Rule>)),
            ("seeds", Box::new(|| Box::new(Life::seeds()) as Box<dyn Rule>)),
            ("day-and-night", Box::new(|| Box::new(Life::day_and_night()) as Box<dyn Rule>)),
            ("elementary", Box::new(|| Box::new(Elementary::default()) as Box<dyn Rule>)),
            ("brians-brain", Box::new(|| Box::new(BriansBrain) as Box<dyn Rule>)),
            ("cyclic", Box::new(|| Box::new(Cyclic::default()) as Box<dyn Rule>)),
            ("majority", Box::new(|| Box::new(Majority) as Box<dyn Rule>)),
        ];
        for (id, factory) in builtins {
            // Ids are distinct literals, so registration cannot fail here.
            registry
                .factories
                .insert(id, factory);
        }
        registry
    }

    /// Register a rule factory under `id`.
    pub fn register<F>(&mut self, id: &'static str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Rule> + Send + Sync + 'static,
    {
        if self.factories.contains_key(id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.factories.insert(id, Box::new(factory));
        Ok(())
    }

    /// Instantiate a fresh rule by id.
    pub fn instantiate(&self, id: &str) -> Result<Box<dyn Rule>, RegistryError> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::Unknown(id.to_owned()))
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Factory table for [`Analysis`] implementations, keyed by id.
pub struct AnalysisRegistry {
    factories: BTreeMap<&'static str, Box<dyn Fn() -> Box<dyn Analysis> + Send + Sync>>,
}

impl AnalysisRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry pre-populated with every built-in analysis.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [(&'static str, Box<dyn Fn() -> Box<dyn Analysis> + Send + Sync>); 3] = [
            ("population", Box::new(|| Box::new(PopulationCensus::default()) as Box<dyn Analysis>)),
            ("activity", Box::new(|| Box::new(Activity::default()) as Box<dyn Analysis>)),
            ("entropy", Box::new(|| Box::new(Entropy::default()) as Box<dyn Analysis>)),
        ];
        for (id, factory) in builtins {
            registry.factories.insert(id, factory);
        }
        registry
    }

    /// Register an analysis factory under `id`.
    pub fn register<F>(&mut self, id: &'static str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Analysis> + Send + Sync + 'static,
    {
        if self.factories.contains_key(id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.factories.insert(id, Box::new(factory));
        Ok(())
    }

    /// Instantiate a fresh analysis by id.
    pub fn instantiate(&self, id: &str) -> Result<Box<dyn Analysis>, RegistryError> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::Unknown(id.to_owned()))
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Number of registered analyses.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for AnalysisRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Neighborhood, Topology};

    struct Noop;

    impl Rule for Noop {
        fn id(&self) -> &'static str {
            "noop"
        }
        fn display_name(&self) -> &'static str {
            "No-op"
        }
        fn tooltip(&self) -> &'static str {
            "Keeps every cell as it is"
        }
        fn state_count(&self) -> u8 {
            2
        }
        fn compatible_topologies(&self) -> &'static [Topology] {
            Topology::all()
        }
        fn next_state(&self, current: u8, _hood: &Neighborhood) -> u8 {
            current
        }
    }

    #[test]
    fn test_builtin_rules_present() {
        let registry = RuleRegistry::with_builtins();
        for id in ["life", "highlife", "seeds", "elementary", "brians-brain", "cyclic", "majority"] {
            assert!(registry.contains(id), "missing builtin '{}'", id);
        }
    }

    #[test]
    fn test_instantiate_returns_matching_id() {
        let registry = RuleRegistry::with_builtins();
        for id in registry.ids().collect::<Vec<_>>() {
            let rule = registry.instantiate(id).unwrap();
            assert_eq!(rule.id(), id, "factory id mismatch for '{}'", id);
        }
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let registry = RuleRegistry::with_builtins();
        let err = registry.instantiate("does-not-exist").err().unwrap();
        assert!(matches!(err, RegistryError::Unknown(ref id) if id == "does-not-exist"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register("noop", || Box::new(Noop)).unwrap();
        let err = registry.register("noop", || Box::new(Noop)).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate("noop")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_are_sorted() {
        let registry = RuleRegistry::with_builtins();
        let ids: Vec<_> = registry.ids().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_instantiate_is_fresh_each_time() {
        let registry = RuleRegistry::with_builtins();
        let a = registry.instantiate("life").unwrap();
        let b = registry.instantiate("life").unwrap();
        // Two distinct boxes, not a shared instance.
        assert!(!std::ptr::eq(a.as_ref(), b.as_ref()));
    }

    #[test]
    fn test_builtin_analyses_present() {
        let registry = AnalysisRegistry::with_builtins();
        for id in ["population", "activity", "entropy"] {
            assert!(registry.contains(id), "missing builtin '{}'", id);
        }
        let analysis = registry.instantiate("entropy").unwrap();
        assert_eq!(analysis.id(), "entropy");
    }
}
