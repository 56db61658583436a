//! Egui context and winit glue for the explorer's control surface.
//!
//! Available when the `egui` feature is enabled. [`Overlay`] owns the egui
//! context and the winit event translation; one [`Overlay::run`] call per
//! frame builds and tessellates the UI. The wgpu side lives in
//! [`GpuState`](super::GpuState), which paints the resulting
//! [`OverlayFrame`] in the same render pass as the lattice quad.

use std::sync::Arc;

use winit::window::Window;

/// Egui context plus the winit translation around it.
pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
}

/// Tessellated output of one UI frame, ready for
/// [`GpuState::render`](super::GpuState::render).
pub struct OverlayFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl Overlay {
    pub fn new(window: &Arc<Window>) -> Self {
        let ctx = egui::Context::default();

        // Dark theme to match the near-black lattice background.
        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        Self { ctx, state }
    }

    /// Feed a winit event to egui. Returns true if egui consumed it, in
    /// which case it must not also drive cell painting or shortcuts.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Run one UI frame: gather input, build the panels via `build`, apply
    /// platform output (clipboard, cursor icon, IME), and tessellate the
    /// result for painting.
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> OverlayFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, build);

        self.state
            .handle_platform_output(window, output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(output.shapes, output.pixels_per_point);

        OverlayFrame {
            paint_jobs,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }
}
