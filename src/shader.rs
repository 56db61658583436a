//! WGSL source and uniform layout for the lattice renderer.
//!
//! The lattice is drawn as a single textured quad: the CPU rasterizes cell
//! states into an RGBA texture ([`crate::visuals::Palette::rasterize`]) and
//! the shader samples it with nearest filtering so cells stay crisp at any
//! zoom. `scale` letterboxes the quad so cells stay square regardless of the
//! viewport aspect ratio.

use bytemuck::{Pod, Zeroable};

/// Uniforms for the grid quad.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct GridUniforms {
    /// Per-axis quad scale in clip space (letterboxing).
    pub scale: [f32; 2],
    pub _padding: [f32; 2],
}

impl GridUniforms {
    /// Compute the letterbox scale that fits a `grid_w` x `grid_h` cell grid
    /// into a viewport of the given pixel size, preserving square cells.
    pub fn fit(grid_w: u32, grid_h: u32, viewport_w: u32, viewport_h: u32) -> Self {
        let grid_aspect = grid_w.max(1) as f32 / grid_h.max(1) as f32;
        let view_aspect = viewport_w.max(1) as f32 / viewport_h.max(1) as f32;
        let scale = if view_aspect > grid_aspect {
            [grid_aspect / view_aspect, 1.0]
        } else {
            [1.0, view_aspect / grid_aspect]
        };
        Self {
            scale,
            _padding: [0.0; 2],
        }
    }
}

/// Render shader for the lattice quad.
pub const GRID_SHADER: &str = r#"
struct GridUniforms {
    scale: vec2<f32>,
    _padding: vec2<f32>,
};

@group(0) @binding(0)
var grid_tex: texture_2d<f32>;

@group(0) @binding(1)
var grid_sampler: sampler;

@group(0) @binding(2)
var<uniform> uniforms: GridUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad[vertex_index];

    var out: VertexOutput;
    out.clip_position = vec4<f32>(corner * uniforms.scale, 0.0, 1.0);
    out.uv = vec2<f32>(corner.x * 0.5 + 0.5, 0.5 - corner.y * 0.5);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(grid_tex, grid_sampler, in.uv);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_viewport_letterboxes_x() {
        let u = GridUniforms::fit(100, 100, 200, 100);
        assert!((u.scale[0] - 0.5).abs() < 1e-6);
        assert!((u.scale[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_tall_viewport_letterboxes_y() {
        let u = GridUniforms::fit(100, 100, 100, 200);
        assert!((u.scale[0] - 1.0).abs() < 1e-6);
        assert!((u.scale[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fit_matching_aspect_fills() {
        let u = GridUniforms::fit(128, 64, 256, 128);
        assert!((u.scale[0] - 1.0).abs() < 1e-6);
        assert!((u.scale[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_zero_sizes_do_not_divide_by_zero() {
        let u = GridUniforms::fit(0, 0, 0, 0);
        assert!(u.scale[0].is_finite() && u.scale[1].is_finite());
    }

    #[test]
    fn test_grid_shader_is_valid_wgsl() {
        let module = naga::front::wgsl::parse_str(GRID_SHADER)
            .unwrap_or_else(|e| panic!("WGSL parse error: {:?}", e));

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        );
        validator
            .validate(&module)
            .unwrap_or_else(|e| panic!("WGSL validation error: {:?}", e));
    }

    #[test]
    fn test_grid_shader_entry_points() {
        let module = naga::front::wgsl::parse_str(GRID_SHADER).unwrap();
        let names: Vec<_> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }
}
