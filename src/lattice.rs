//! Lattices: the grid and topology over which cells are arranged.
//!
//! A [`Lattice`] owns the cell states for one simulation. Stepping is
//! double-buffered: every next state is computed from the previous generation
//! before any cell is overwritten, so rule evaluation order never matters.
//!
//! # Topologies
//!
//! - [`Topology::SquareMoore`] - square grid, 8 neighbors
//! - [`Topology::SquareVonNeumann`] - square grid, 4 orthogonal neighbors
//! - [`Topology::Hexagonal`] - hex grid (odd-row offset coordinates), 6 neighbors
//! - [`Topology::Line`] - one-dimensional row, 2 neighbors
//!
//! # Edges
//!
//! [`Edge::Wrap`] closes the lattice into a torus (a ring for [`Topology::Line`]).
//! [`Edge::Bounded`] treats every out-of-range neighbor as state 0.
//!
//! # Example
//!
//! ```ignore
//! use caex::prelude::*;
//!
//! let mut lattice = Lattice::new(256, 256, Topology::SquareMoore, Edge::Wrap);
//! lattice.seed_random(42, 0.3, 2);
//!
//! let rule = Life::conway();
//! lattice.step(&rule);
//! assert_eq!(lattice.generation(), 1);
//! ```

use std::fmt;

use crate::rule::Rule;

/// Maximum neighbors any supported topology produces (Moore: 8).
pub const MAX_NEIGHBORS: usize = 8;

/// Neighborhood shape of a lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Topology {
    /// Square grid, 8 surrounding neighbors.
    #[default]
    SquareMoore,
    /// Square grid, 4 orthogonal neighbors.
    SquareVonNeumann,
    /// Hexagonal grid with odd-row offset coordinates, 6 neighbors.
    Hexagonal,
    /// One-dimensional row of cells, left and right neighbors.
    Line,
}

impl Topology {
    /// Number of neighbors a cell has under this topology.
    pub fn neighbor_count(&self) -> usize {
        match self {
            Topology::SquareMoore => 8,
            Topology::SquareVonNeumann => 4,
            Topology::Hexagonal => 6,
            Topology::Line => 2,
        }
    }

    /// Human-readable name for labels and tooltips.
    pub fn display_name(&self) -> &'static str {
        match self {
            Topology::SquareMoore => "Square (Moore)",
            Topology::SquareVonNeumann => "Square (von Neumann)",
            Topology::Hexagonal => "Hexagonal",
            Topology::Line => "One-dimensional",
        }
    }

    /// All supported topologies, in UI listing order.
    pub fn all() -> &'static [Topology] {
        &[
            Topology::SquareMoore,
            Topology::SquareVonNeumann,
            Topology::Hexagonal,
            Topology::Line,
        ]
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Behavior at the lattice boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Edge {
    /// Opposite edges are glued together (toroidal).
    #[default]
    Wrap,
    /// Out-of-range neighbors read as state 0.
    Bounded,
}

impl Edge {
    /// Human-readable name for labels and tooltips.
    pub fn display_name(&self) -> &'static str {
        match self {
            Edge::Wrap => "Wrapping",
            Edge::Bounded => "Bounded",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The states of one cell's neighbors, gathered for a single rule evaluation.
///
/// Neighbor order is fixed per topology. For [`Topology::Line`] the order is
/// `[left, right]`, which elementary rules rely on.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood {
    states: [u8; MAX_NEIGHBORS],
    len: u8,
}

impl Neighborhood {
    /// Build a neighborhood from a slice of neighbor states.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_NEIGHBORS`] states are supplied.
    pub fn from_states(states: &[u8]) -> Self {
        assert!(states.len() <= MAX_NEIGHBORS, "Too many neighbors for a neighborhood");
        let mut buf = [0u8; MAX_NEIGHBORS];
        buf[..states.len()].copy_from_slice(states);
        Self {
            states: buf,
            len: states.len() as u8,
        }
    }

    /// Neighbor states in topology order.
    #[inline]
    pub fn states(&self) -> &[u8] {
        &self.states[..self.len as usize]
    }

    /// Number of neighbors.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the neighborhood is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Count neighbors in a specific state.
    #[inline]
    pub fn count_of(&self, state: u8) -> usize {
        self.states().iter().filter(|&&s| s == state).count()
    }

    /// Count neighbors in any nonzero state.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.states().iter().filter(|&&s| s != 0).count()
    }
}

// Offset tables, (dx, dy). Hex uses odd-row offset coordinates, so the
// diagonal pairs differ between even and odd rows.
const MOORE: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];
const VON_NEUMANN: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const HEX_EVEN: [(i32, i32); 6] = [(-1, -1), (0, -1), (-1, 0), (1, 0), (-1, 1), (0, 1)];
const HEX_ODD: [(i32, i32); 6] = [(0, -1), (1, -1), (-1, 0), (1, 0), (0, 1), (1, 1)];
const LINE: [(i32, i32); 2] = [(-1, 0), (1, 0)];

/// A grid of cell states with a topology, an edge behavior, and a generation
/// counter.
#[derive(Clone, Debug)]
pub struct Lattice {
    width: usize,
    height: usize,
    topology: Topology,
    edge: Edge,
    cells: Vec<u8>,
    scratch: Vec<u8>,
    generation: u64,
}

impl Lattice {
    /// Create a lattice with every cell in state 0.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero, or if a [`Topology::Line`] lattice
    /// is given a height other than 1.
    pub fn new(width: usize, height: usize, topology: Topology, edge: Edge) -> Self {
        assert!(width > 0 && height > 0, "Lattice dimensions must be nonzero");
        assert!(
            topology != Topology::Line || height == 1,
            "A one-dimensional lattice must have height 1"
        );
        Self {
            width,
            height,
            topology,
            edge,
            cells: vec![0; width * height],
            scratch: vec![0; width * height],
            generation: 0,
        }
    }

    /// Convenience constructor for a one-dimensional lattice.
    pub fn line(width: usize, edge: Edge) -> Self {
        Self::new(width, 1, Topology::Line, edge)
    }

    /// Lattice width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lattice height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The neighborhood shape of this lattice.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The boundary behavior of this lattice.
    #[inline]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Generations stepped since the last seed or clear.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Raw cell states, row-major.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Read one cell. Coordinates must be in range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.cells[y * self.width + x]
    }

    /// Write one cell. Coordinates must be in range.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, state: u8) {
        debug_assert!(x < self.width && y < self.height);
        self.cells[y * self.width + x] = state;
    }

    /// Reset every cell to state 0 and the generation counter to 0.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.generation = 0;
    }

    /// Seed the lattice with deterministic pseudo-random cells.
    ///
    /// Each cell independently becomes live with probability `density`, and a
    /// live cell picks uniformly among states `1..state_count`. The same seed
    /// always produces the same pattern. Resets the generation counter.
    pub fn seed_random(&mut self, seed: u32, density: f32, state_count: u8) {
        let density = density.clamp(0.0, 1.0);
        let live_states = state_count.max(2) - 1;
        for y in 0..self.height {
            for x in 0..self.width {
                let h = cell_hash(x as u32, y as u32, seed);
                let roll = (h & 0xFFFF) as f32 / 65535.0;
                let state = if roll < density {
                    1 + ((h >> 16) % live_states as u32) as u8
                } else {
                    0
                };
                self.cells[y * self.width + x] = state;
            }
        }
        self.generation = 0;
    }

    /// Stamp a row-major pattern with its top-left corner at `(x, y)`.
    ///
    /// Rows may have different lengths; cells that would fall outside the
    /// lattice are skipped.
    pub fn place(&mut self, x: usize, y: usize, pattern: &[&[u8]]) {
        for (dy, row) in pattern.iter().enumerate() {
            for (dx, &state) in row.iter().enumerate() {
                let (cx, cy) = (x + dx, y + dy);
                if cx < self.width && cy < self.height {
                    self.cells[cy * self.width + cx] = state;
                }
            }
        }
    }

    /// Number of cells in a nonzero state.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&s| s != 0).count()
    }

    /// Per-state cell counts, indexed by state.
    pub fn census(&self, state_count: usize) -> Vec<usize> {
        let mut counts = vec![0usize; state_count.max(1)];
        for &s in &self.cells {
            if (s as usize) < counts.len() {
                counts[s as usize] += 1;
            }
        }
        counts
    }

    /// Clamp every cell to at most `max`. Needed when a rule edit shrinks
    /// the state count below what the lattice currently holds.
    pub fn clamp_states(&mut self, max: u8) {
        for cell in &mut self.cells {
            if *cell > max {
                *cell = max;
            }
        }
    }

    /// Gather the neighborhood of the cell at `(x, y)`.
    pub fn neighborhood(&self, x: usize, y: usize) -> Neighborhood {
        let offsets: &[(i32, i32)] = match self.topology {
            Topology::SquareMoore => &MOORE,
            Topology::SquareVonNeumann => &VON_NEUMANN,
            Topology::Hexagonal => {
                if y % 2 == 0 {
                    &HEX_EVEN
                } else {
                    &HEX_ODD
                }
            }
            Topology::Line => &LINE,
        };

        let mut states = [0u8; MAX_NEIGHBORS];
        for (i, &(dx, dy)) in offsets.iter().enumerate() {
            states[i] = self.neighbor_state(x as i32 + dx, y as i32 + dy);
        }
        Neighborhood {
            states,
            len: offsets.len() as u8,
        }
    }

    #[inline]
    fn neighbor_state(&self, x: i32, y: i32) -> u8 {
        let (w, h) = (self.width as i32, self.height as i32);
        match self.edge {
            Edge::Wrap => {
                let x = x.rem_euclid(w) as usize;
                let y = y.rem_euclid(h) as usize;
                self.cells[y * self.width + x]
            }
            Edge::Bounded => {
                if x < 0 || y < 0 || x >= w || y >= h {
                    0
                } else {
                    self.cells[y as usize * self.width + x as usize]
                }
            }
        }
    }

    /// Advance the lattice one generation under `rule`.
    ///
    /// All next states are computed from the current generation before the
    /// buffers swap, then the generation counter increments by one.
    pub fn step(&mut self, rule: &dyn Rule) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let hood = self.neighborhood(x, y);
                self.scratch[idx] = rule.next_state(self.cells[idx], &hood);
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }
}

/// Deterministic per-cell hash used for seeding.
fn cell_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1013904223));
    n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    n ^ (n >> 16)
}
