//! # caex - Cellular Automaton Explorer
//!
//! An interactive laboratory for cellular automata: pluggable rules,
//! live analyses, and a GPU-rendered lattice you can paint on.
//!
//! The explorer handles the windowing, rendering, and timing plumbing so
//! you can focus on the automaton itself: implement [`Rule`] for new
//! dynamics, [`Analysis`] for new instrumentation, and register them
//! alongside the built-ins.
//!
//! ## Quick Start
//!
//! ```ignore
//! use caex::prelude::*;
//!
//! fn main() -> Result<(), ExplorerError> {
//!     Explorer::new()
//!         .with_size(256, 256)
//!         .with_rule("brians-brain")
//!         .with_rate(30.0)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Lattice
//!
//! A [`Lattice`] is a rectangular grid of `u8` cell states with a
//! [`Topology`] (which cells are neighbors) and an [`Edge`] behavior
//! (wrap around, or read out-of-range cells as quiescent). Stepping is
//! double-buffered: every cell sees the previous generation.
//!
//! ### Rules
//!
//! A [`Rule`] maps a cell's current state and its [`Neighborhood`] to the
//! next state, and carries its own metadata (name, tooltip, description,
//! state count, compatible topologies). Built-ins:
//!
//! | Id | Rule |
//! |----|------|
//! | `life` | Conway's Game of Life (B3/S23) |
//! | `highlife` | HighLife (B36/S23) |
//! | `seeds` | Seeds (B2/S) |
//! | `day-and-night` | Day & Night (B3678/S34678) |
//! | `elementary` | Wolfram elementary automata on a line |
//! | `brians-brain` | Brian's Brain (ready / firing / refractory) |
//! | `cyclic` | Cyclic automaton (rock-paper-scissors waves) |
//! | `majority` | Majority vote |
//!
//! ### Analyses
//!
//! An [`Analysis`] observes each generation and reports key/value
//! statistics to the inspector panel: population census, activity,
//! entropy. Attach your own with [`Explorer::register_analysis`].
//!
//! ### Registries
//!
//! Rules and analyses are created through [`RuleRegistry`] and
//! [`AnalysisRegistry`]: flat factory tables keyed by a string id.
//! Everything the UI lists comes from a registry, so custom plugins and
//! built-ins are indistinguishable once registered.
//!
//! ### Facade mode
//!
//! For demos and kiosks the control surface can be reduced to transport
//! controls and the rule description. Facade mode never changes the
//! simulation itself, only what is shown.

pub mod analysis;
pub mod clock;
pub mod error;
mod explorer;
mod gpu;
pub mod input;
pub mod lattice;
#[cfg(feature = "egui")]
pub mod panels;
pub mod registry;
pub mod rule;
pub mod rules;
mod shader;
pub mod snapshot;
pub mod visuals;

pub use analysis::{Activity, Analysis, Entropy, PopulationCensus};
pub use clock::Clock;
pub use error::{ExplorerError, GpuError, RegistryError, SnapshotError};
pub use explorer::Explorer;
pub use input::{Input, Key, MouseButton};
pub use lattice::{Edge, Lattice, Neighborhood, Topology};
pub use registry::{AnalysisRegistry, RuleRegistry};
pub use rule::Rule;
pub use rules::{BriansBrain, Cyclic, Elementary, Life, Majority, RulestringError};
pub use visuals::Palette;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use caex::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analysis::{Activity, Analysis, Entropy, PopulationCensus};
    pub use crate::error::{ExplorerError, RegistryError};
    pub use crate::explorer::Explorer;
    pub use crate::lattice::{Edge, Lattice, Neighborhood, Topology};
    pub use crate::registry::{AnalysisRegistry, RuleRegistry};
    pub use crate::rule::Rule;
    pub use crate::rules::{BriansBrain, Cyclic, Elementary, Life, Majority};
    pub use crate::visuals::Palette;
    #[cfg(feature = "egui")]
    pub use egui;
}
