//! Explorer builder and runner.
//!
//! [`Explorer`] is the front door of the crate: configure a lattice, a rule,
//! and a set of analyses with method chaining, then call
//! [`Explorer::run`] to open the window. This blocks until the window is
//! closed.
//!
//! ```ignore
//! use caex::Explorer;
//!
//! Explorer::new()
//!     .with_size(256, 256)
//!     .with_rule("brians-brain")
//!     .with_analysis("population")
//!     .with_rate(30.0)
//!     .run()?;
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::analysis::Analysis;
use crate::clock::Clock;
use crate::error::{ExplorerError, RegistryError};
use crate::gpu::{GpuState, Viewport};
use crate::input::{Input, Key, MouseButton};
use crate::lattice::{Edge, Lattice, Topology};
use crate::registry::{AnalysisRegistry, RuleRegistry};
use crate::rule::Rule;
use crate::shader::GridUniforms;
use crate::snapshot;
use crate::visuals::Palette;

#[cfg(feature = "egui")]
use crate::gpu::overlay::Overlay;
#[cfg(feature = "egui")]
use crate::panels::{self, RuleListing, UiState};

/// An explorer session builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Explorer {
    width: usize,
    height: usize,
    topology: Topology,
    edge: Edge,
    rule_id: String,
    analysis_ids: Vec<String>,
    seed: u32,
    density: f32,
    rate: f32,
    facade: bool,
    palette: Palette,
    rules: RuleRegistry,
    analyses: AnalysisRegistry,
}

impl Explorer {
    /// Create an explorer with default settings: a 192x128 wrapped Moore
    /// lattice running Conway's Life at 10 generations per second, with all
    /// built-in analyses attached.
    pub fn new() -> Self {
        Self {
            width: 192,
            height: 128,
            topology: Topology::SquareMoore,
            edge: Edge::Wrap,
            rule_id: "life".to_owned(),
            analysis_ids: Vec::new(),
            seed: 1,
            density: 0.25,
            rate: 10.0,
            facade: false,
            palette: Palette::default(),
            rules: RuleRegistry::with_builtins(),
            analyses: AnalysisRegistry::with_builtins(),
        }
    }

    /// Set the lattice dimensions in cells.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the lattice topology. A [`Topology::Line`] lattice always has
    /// height 1 regardless of [`Explorer::with_size`].
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Set the edge behavior (wrap or bounded).
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    /// Select the starting rule by registry id.
    pub fn with_rule(mut self, id: impl Into<String>) -> Self {
        self.rule_id = id.into();
        self
    }

    /// Attach the named analysis. By default every built-in analysis is
    /// attached; the first call to this switches to an explicit list.
    pub fn with_analysis(mut self, id: impl Into<String>) -> Self {
        self.analysis_ids.push(id.into());
        self
    }

    /// Set the random seed for the initial soup.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the live-cell density of the initial soup (0 to 1).
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set the starting generation rate in generations per second.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Start in facade mode: a reduced control surface for demos and kiosks.
    pub fn with_facade(mut self, facade: bool) -> Self {
        self.facade = facade;
        self
    }

    /// Set the color palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Register a custom rule factory under `id`, alongside the built-ins.
    pub fn register_rule<F>(mut self, id: &'static str, factory: F) -> Result<Self, RegistryError>
    where
        F: Fn() -> Box<dyn Rule> + Send + Sync + 'static,
    {
        self.rules.register(id, factory)?;
        Ok(self)
    }

    /// Register a custom analysis factory under `id`.
    pub fn register_analysis<F>(
        mut self,
        id: &'static str,
        factory: F,
    ) -> Result<Self, RegistryError>
    where
        F: Fn() -> Box<dyn Analysis> + Send + Sync + 'static,
    {
        self.analyses.register(id, factory)?;
        self.analysis_ids.push(id.to_owned());
        Ok(self)
    }

    /// Open the window and run. This blocks until the window is closed.
    pub fn run(self) -> Result<(), ExplorerError> {
        let rule = self.rules.instantiate(&self.rule_id)?;
        if !rule.is_compatible(self.topology) {
            return Err(ExplorerError::IncompatibleTopology {
                rule: rule.display_name().to_owned(),
                topology: self.topology,
            });
        }

        let height = match self.topology {
            Topology::Line => 1,
            _ => self.height,
        };
        let mut lattice = Lattice::new(self.width, height, self.topology, self.edge);
        lattice.seed_random(self.seed, self.density, rule.state_count());

        let analysis_ids: Vec<String> = if self.analysis_ids.is_empty() {
            self.analyses.ids().map(str::to_owned).collect()
        } else {
            self.analysis_ids.clone()
        };
        let mut analyses = Vec::with_capacity(analysis_ids.len());
        for id in &analysis_ids {
            analyses.push(self.analyses.instantiate(id)?);
        }
        for analysis in &mut analyses {
            analysis.update(&lattice);
        }

        // Metadata snapshot for the rule browser; every id comes from the
        // registry itself, so instantiation cannot miss.
        #[cfg(feature = "egui")]
        let listings: Vec<RuleListing> = self
            .rules
            .ids()
            .filter_map(|id| self.rules.instantiate(id).ok())
            .map(|rule| RuleListing {
                id: rule.id(),
                display_name: rule.display_name(),
                family: rule.family(),
                tooltip: rule.tooltip(),
            })
            .collect();

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            window: None,
            gpu: None,
            #[cfg(feature = "egui")]
            overlay: None,
            #[cfg(feature = "egui")]
            ui: UiState {
                facade: self.facade,
                palette: self.palette,
                ..Default::default()
            },
            #[cfg(feature = "egui")]
            listings,
            #[cfg(not(feature = "egui"))]
            palette: self.palette,
            lattice,
            rule,
            analyses,
            registry: self.rules,
            clock: Clock::new(self.rate),
            input: Input::new(),
            seed: self.seed,
            density: self.density,
            viewport: Viewport::full(1, 1),
            fatal: None,
        };
        event_loop.run_app(&mut app)?;

        match app.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    #[cfg(feature = "egui")]
    overlay: Option<Overlay>,
    #[cfg(feature = "egui")]
    ui: UiState,
    #[cfg(feature = "egui")]
    listings: Vec<RuleListing>,
    #[cfg(not(feature = "egui"))]
    palette: Palette,
    lattice: Lattice,
    rule: Box<dyn Rule>,
    analyses: Vec<Box<dyn Analysis>>,
    registry: RuleRegistry,
    clock: Clock,
    input: Input,
    seed: u32,
    density: f32,
    /// Window region the lattice was last drawn into, physical pixels.
    viewport: Viewport,
    fatal: Option<ExplorerError>,
}

impl App {
    fn palette(&self) -> Palette {
        #[cfg(feature = "egui")]
        {
            self.ui.palette
        }
        #[cfg(not(feature = "egui"))]
        {
            self.palette
        }
    }

    /// Map a cursor position (physical pixels) to lattice coordinates,
    /// accounting for the letterboxed quad inside the viewport.
    fn cell_at(&self, cursor: (f64, f64)) -> Option<(usize, usize)> {
        let (grid_w, grid_h) = (self.lattice.width(), self.lattice.height());
        let uniforms = GridUniforms::fit(
            grid_w as u32,
            grid_h as u32,
            self.viewport.width as u32,
            self.viewport.height as u32,
        );
        let quad_w = self.viewport.width * uniforms.scale[0];
        let quad_h = self.viewport.height * uniforms.scale[1];
        let origin_x = self.viewport.x + (self.viewport.width - quad_w) / 2.0;
        let origin_y = self.viewport.y + (self.viewport.height - quad_h) / 2.0;

        let u = (cursor.0 as f32 - origin_x) / quad_w;
        let v = (cursor.1 as f32 - origin_y) / quad_h;
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        Some((
            ((u * grid_w as f32) as usize).min(grid_w - 1),
            ((v * grid_h as f32) as usize).min(grid_h - 1),
        ))
    }

    fn reseed(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.lattice
            .seed_random(self.seed, self.density, self.rule.state_count());
        self.reset_analyses();
    }

    fn reset_analyses(&mut self) {
        for analysis in &mut self.analyses {
            analysis.reset();
            analysis.update(&self.lattice);
        }
    }

    fn step_generations(&mut self, count: u32) {
        for _ in 0..count {
            self.lattice.step(self.rule.as_ref());
            for analysis in &mut self.analyses {
                analysis.update(&self.lattice);
            }
        }
    }

    fn save_snapshot(&mut self) {
        let path = snapshot::default_path(self.rule.id(), self.lattice.generation());
        let result = snapshot::save_png(
            &path,
            &self.lattice,
            self.palette(),
            self.rule.state_count(),
        );
        if let Err(err) = result {
            #[cfg(feature = "egui")]
            {
                self.ui.error = Some(err.to_string());
            }
            #[cfg(not(feature = "egui"))]
            eprintln!("Snapshot failed: {}", err);
        } else {
            println!("Saved {}", path.display());
        }
    }

    /// Replace the running rule by registry id. On failure the current rule
    /// keeps running and the error surfaces in the UI.
    fn switch_rule(&mut self, id: &str) {
        match self.registry.instantiate(id) {
            Ok(rule) if !rule.is_compatible(self.lattice.topology()) => {
                #[cfg(feature = "egui")]
                {
                    self.ui.error = Some(format!(
                        "{} does not run on a {} lattice",
                        rule.display_name(),
                        self.lattice.topology()
                    ));
                }
            }
            Ok(rule) => {
                self.rule = rule;
                self.lattice
                    .seed_random(self.seed, self.density, self.rule.state_count());
                self.reset_analyses();
            }
            Err(err) => {
                #[cfg(feature = "egui")]
                {
                    self.ui.error = Some(err.to_string());
                }
                #[cfg(not(feature = "egui"))]
                eprintln!("{}", err);
            }
        }
    }

    fn handle_shortcuts(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_pressed(Key::Escape) {
            event_loop.exit();
        }
        if self.input.key_pressed(Key::Space) {
            self.clock.toggle_pause();
        }
        if self.input.key_pressed(Key::N) {
            self.step_generations(1);
        }
        if self.input.key_pressed(Key::R) {
            self.reseed();
        }
        if self.input.key_pressed(Key::C) {
            self.lattice.clear();
            self.reset_analyses();
        }
        if self.input.key_pressed(Key::P) {
            self.save_snapshot();
        }
        if self.input.key_pressed(Key::Up) {
            self.clock.set_rate((self.clock.rate() * 1.25).clamp(0.5, 120.0));
        }
        if self.input.key_pressed(Key::Down) {
            self.clock.set_rate((self.clock.rate() / 1.25).clamp(0.5, 120.0));
        }
        #[cfg(feature = "egui")]
        if self.input.key_pressed(Key::F) {
            self.ui.facade = !self.ui.facade;
        }
    }

    fn paint_cells(&mut self) {
        let Some(cursor) = self.input.cursor() else {
            return;
        };
        let state = if self.input.mouse_held(MouseButton::Left) {
            1
        } else if self.input.mouse_held(MouseButton::Right) {
            0
        } else {
            return;
        };
        if let Some((x, y)) = self.cell_at(cursor) {
            self.lattice.set(x, y, state);
        }
    }

    #[cfg(feature = "egui")]
    fn apply_ui_response(&mut self, response: panels::UiResponse, event_loop: &ActiveEventLoop) {
        if let Some(id) = response.selected_rule {
            self.switch_rule(&id);
        }
        if response.toggle_pause {
            self.clock.toggle_pause();
        }
        if response.step_once {
            self.step_generations(1);
        }
        if response.reseed {
            self.reseed();
        }
        if response.clear {
            self.lattice.clear();
            self.reset_analyses();
        }
        if response.snapshot {
            self.save_snapshot();
        }
        if let Some(rate) = response.rate {
            self.clock.set_rate(rate);
        }
        if response.rule_edited {
            // A shrunk state count would leave cells the rule never expects
            // to see; pull them back into range and restart the analyses.
            self.lattice.clamp_states(self.rule.state_count().saturating_sub(1));
            self.reset_analyses();
        }
        if response.quit {
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.handle_shortcuts(event_loop);
        self.paint_cells();
        self.input.begin_frame();

        let due = self.clock.tick();
        self.step_generations(due);

        let Some(window) = self.window.clone() else {
            return;
        };
        let pixels = self
            .palette()
            .rasterize(self.lattice.cells(), self.rule.state_count());

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.set_grid_size(self.lattice.width() as u32, self.lattice.height() as u32);
        gpu.upload_grid(&pixels);

        #[cfg(feature = "egui")]
        let frame = if let Some(overlay) = self.overlay.as_mut() {
            let status = panels::Status {
                rule_name: self.rule.display_name(),
                width: self.lattice.width(),
                height: self.lattice.height(),
                topology: self.lattice.topology(),
                generation: self.lattice.generation(),
                population: self.lattice.population(),
                paused: self.clock.is_paused(),
                rate: self.clock.rate(),
                fps: self.clock.fps(),
            };

            let mut response = None;
            let mut lattice_rect = None;
            let frame = overlay.run(&window, |ctx| {
                response = Some(panels::draw(
                    ctx,
                    &mut self.ui,
                    self.rule.as_mut(),
                    &self.listings,
                    &self.analyses,
                    &status,
                ));
                // The lattice draws into whatever the panels left free.
                lattice_rect = Some(ctx.available_rect());
            });

            if let Some(rect) = lattice_rect {
                let ppp = frame.pixels_per_point;
                self.viewport = Viewport {
                    x: rect.min.x * ppp,
                    y: rect.min.y * ppp,
                    width: rect.width() * ppp,
                    height: rect.height() * ppp,
                };
            }
            if let Some(response) = response {
                self.apply_ui_response(response, event_loop);
            }
            Some(frame)
        } else {
            None
        };

        #[cfg(not(feature = "egui"))]
        {
            self.viewport = Viewport::full(gpu.config.width, gpu.config.height);
        }

        let gpu = match self.gpu.as_mut() {
            Some(gpu) => gpu,
            None => return,
        };

        #[cfg(feature = "egui")]
        let result = gpu.render(self.viewport, frame.as_ref());
        #[cfg(not(feature = "egui"))]
        let result = gpu.render(self.viewport);

        match result {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let size = winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                };
                gpu.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => eprintln!("Render error: {:?}", e),
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Cellular Automaton Explorer")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.fatal = Some(err.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.lattice.width() as u32,
            self.lattice.height() as u32,
        ));
        let gpu = match gpu {
            Ok(gpu) => gpu,
            Err(err) => {
                self.fatal = Some(err.into());
                event_loop.exit();
                return;
            }
        };

        self.viewport = Viewport::full(gpu.config.width, gpu.config.height);

        #[cfg(feature = "egui")]
        {
            self.overlay = Some(Overlay::new(&window));
        }

        self.gpu = Some(gpu);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        let consumed = match (self.overlay.as_mut(), self.window.as_ref()) {
            (Some(overlay), Some(window)) => overlay.on_window_event(window, &event),
            _ => false,
        };
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        if !consumed {
            self.input.handle_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
