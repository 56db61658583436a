//! State coloring for lattice rendering and snapshots.
//!
//! A [`Palette`] maps cell states to RGBA colors. State 0 (quiescent) always
//! renders as the background color; live states are spread evenly across the
//! palette's gradient, so two-state rules get the brightest stop and
//! many-state rules (cyclic, Brian's Brain) get distinct hues.

/// Pre-defined color palettes for cell states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Viridis - perceptually uniform, colorblind-friendly (purple to yellow).
    #[default]
    Viridis,

    /// Fire - deep red through orange to near-white.
    Fire,

    /// Ice - deep blue through teal to white.
    Ice,

    /// Neon - vibrant magenta/cyan/green on black.
    Neon,

    /// Grayscale - dark gray to white.
    Grayscale,
}

/// Background color for quiescent cells, near-black like the render clear color.
const BACKGROUND: [u8; 4] = [8, 8, 14, 255];

impl Palette {
    /// All palettes, in UI listing order.
    pub fn all() -> &'static [Palette] {
        &[
            Palette::Viridis,
            Palette::Fire,
            Palette::Ice,
            Palette::Neon,
            Palette::Grayscale,
        ]
    }

    /// Human-readable name for the palette picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Palette::Viridis => "Viridis",
            Palette::Fire => "Fire",
            Palette::Ice => "Ice",
            Palette::Neon => "Neon",
            Palette::Grayscale => "Grayscale",
        }
    }

    /// Gradient stops for this palette (5 colors, dark to bright).
    fn stops(&self) -> [[u8; 3]; 5] {
        match self {
            Palette::Viridis => [
                [68, 1, 84],
                [72, 36, 117],
                [32, 144, 140],
                [94, 201, 98],
                [253, 231, 37],
            ],
            Palette::Fire => [
                [40, 3, 3],
                [120, 20, 8],
                [220, 70, 20],
                [250, 160, 50],
                [255, 240, 180],
            ],
            Palette::Ice => [
                [8, 24, 58],
                [22, 70, 120],
                [50, 130, 180],
                [130, 200, 225],
                [240, 250, 255],
            ],
            Palette::Neon => [
                [60, 0, 90],
                [180, 0, 160],
                [255, 40, 120],
                [0, 220, 220],
                [120, 255, 120],
            ],
            Palette::Grayscale => [
                [50, 50, 50],
                [100, 100, 100],
                [150, 150, 150],
                [200, 200, 200],
                [255, 255, 255],
            ],
        }
    }

    /// Sample the gradient at `t` in 0..=1.
    pub fn sample(&self, t: f32) -> [u8; 3] {
        let stops = self.stops();
        let t = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
        let i = (t as usize).min(stops.len() - 2);
        let frac = t - i as f32;
        let (a, b) = (stops[i], stops[i + 1]);
        [
            lerp_u8(a[0], b[0], frac),
            lerp_u8(a[1], b[1], frac),
            lerp_u8(a[2], b[2], frac),
        ]
    }

    /// Build the per-state color table for a rule with `state_count` states.
    ///
    /// Index 0 is the background; states `1..state_count` sample the gradient
    /// from brightest (state 1) downward, so the "most alive" state pops.
    pub fn state_colors(&self, state_count: u8) -> Vec<[u8; 4]> {
        let state_count = state_count.max(2);
        let mut colors = Vec::with_capacity(state_count as usize);
        colors.push(BACKGROUND);
        let live_states = state_count - 1;
        for state in 1..state_count {
            let t = if live_states == 1 {
                1.0
            } else {
                1.0 - (state - 1) as f32 / (live_states - 1) as f32
            };
            let [r, g, b] = self.sample(t);
            colors.push([r, g, b, 255]);
        }
        colors
    }

    /// Render raw cell states into an RGBA pixel buffer.
    pub fn rasterize(&self, cells: &[u8], state_count: u8) -> Vec<u8> {
        let table = self.state_colors(state_count);
        let mut pixels = Vec::with_capacity(cells.len() * 4);
        for &state in cells {
            let color = table.get(state as usize).copied().unwrap_or(BACKGROUND);
            pixels.extend_from_slice(&color);
        }
        pixels
    }
}

/// Linear interpolation of u8 channel values.
fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round() as u8
}
