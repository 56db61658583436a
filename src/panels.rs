//! The explorer's egui control surface.
//!
//! One [`draw`] call per frame builds the whole UI: a toolbar, a rule
//! browser on the left, an inspector (description / analysis / properties)
//! on the right, and a status bar. The function returns a [`UiResponse`]
//! describing what the user asked for; the explorer applies it afterwards,
//! so the UI never mutates the simulation directly.
//!
//! Facade mode strips the surface down for demo or kiosk use: the inspector
//! collapses to the rule description and the toolbar keeps only the basic
//! transport controls.

use std::collections::BTreeMap;

use crate::analysis::Analysis;
use crate::lattice::Topology;
use crate::rule::Rule;
use crate::visuals::Palette;

/// Inspector tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Description,
    Analysis,
    Properties,
}

/// Persistent UI state, owned by the explorer across frames.
#[derive(Debug, Default)]
pub struct UiState {
    pub facade: bool,
    pub tab: Tab,
    /// When set, a modal error dialog covers the UI until dismissed. The
    /// simulation keeps running behind it.
    pub error: Option<String>,
    pub show_about: bool,
    pub palette: Palette,
}

/// Metadata line for one registered rule, captured at startup so the rule
/// browser does not have to instantiate rules every frame.
#[derive(Debug, Clone, Copy)]
pub struct RuleListing {
    pub id: &'static str,
    pub display_name: &'static str,
    pub family: &'static str,
    pub tooltip: &'static str,
}

/// What the user requested this frame.
#[derive(Debug, Default)]
pub struct UiResponse {
    /// Switch to the rule with this registry id.
    pub selected_rule: Option<String>,
    pub toggle_pause: bool,
    pub step_once: bool,
    pub reseed: bool,
    pub clear: bool,
    pub snapshot: bool,
    /// New generation rate from the slider.
    pub rate: Option<f32>,
    /// The rule's configuration panel changed a parameter.
    pub rule_edited: bool,
    pub quit: bool,
}

/// Read-only simulation facts for the status bar and toolbar.
pub struct Status<'a> {
    pub rule_name: &'a str,
    pub width: usize,
    pub height: usize,
    pub topology: Topology,
    pub generation: u64,
    pub population: usize,
    pub paused: bool,
    pub rate: f32,
    pub fps: f32,
}

/// Build the full UI for one frame.
pub fn draw(
    ctx: &egui::Context,
    state: &mut UiState,
    rule: &mut dyn Rule,
    listings: &[RuleListing],
    analyses: &[Box<dyn Analysis>],
    status: &Status<'_>,
) -> UiResponse {
    let mut response = UiResponse::default();

    toolbar(ctx, state, status, &mut response);
    status_bar(ctx, status);
    rule_browser(ctx, rule.id(), listings, &mut response);
    inspector(ctx, state, rule, analyses, &mut response);

    if state.show_about {
        about_window(ctx, state);
    }
    if state.error.is_some() {
        error_modal(ctx, state);
    }

    response
}

fn toolbar(ctx: &egui::Context, state: &mut UiState, status: &Status<'_>, response: &mut UiResponse) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let pause_label = if status.paused { "\u{25b6} Run" } else { "\u{23f8} Pause" };
            if ui.button(pause_label).clicked() {
                response.toggle_pause = true;
            }
            if ui.button("Step").clicked() {
                response.step_once = true;
            }
            if ui.button("Reseed").clicked() {
                response.reseed = true;
            }
            if ui.button("Clear").clicked() {
                response.clear = true;
            }

            ui.separator();

            let mut rate = status.rate;
            ui.label("Rate");
            if ui
                .add(
                    egui::Slider::new(&mut rate, 0.5..=120.0)
                        .logarithmic(true)
                        .suffix(" gen/s"),
                )
                .changed()
            {
                response.rate = Some(rate);
            }

            if !state.facade {
                ui.separator();

                egui::ComboBox::from_id_salt("palette")
                    .selected_text(state.palette.display_name())
                    .show_ui(ui, |ui| {
                        for &palette in Palette::all() {
                            ui.selectable_value(&mut state.palette, palette, palette.display_name());
                        }
                    });

                if ui.button("Snapshot").clicked() {
                    response.snapshot = true;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("About").clicked() {
                    state.show_about = true;
                }
                ui.toggle_value(&mut state.facade, "Facade");
            });
        });
    });
}

fn status_bar(ctx: &egui::Context, status: &Status<'_>) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(status.rule_name);
            ui.separator();
            ui.label(format!(
                "{}x{} {}",
                status.width, status.height, status.topology
            ));
            ui.separator();
            ui.label(format!("Gen {}", status.generation));
            ui.separator();
            ui.label(format!("Pop {}", status.population));
            ui.separator();
            ui.label(format!("{:.1} gen/s", status.rate));
            ui.separator();
            ui.label(format!("{:.0} fps", status.fps));
            if status.paused {
                ui.separator();
                ui.colored_label(egui::Color32::YELLOW, "PAUSED");
            }
        });
    });
}

fn rule_browser(
    ctx: &egui::Context,
    current_id: &str,
    listings: &[RuleListing],
    response: &mut UiResponse,
) {
    // Group by family, both levels sorted for a stable browser.
    let mut families: BTreeMap<&str, Vec<&RuleListing>> = BTreeMap::new();
    for listing in listings {
        families.entry(listing.family).or_default().push(listing);
    }

    egui::SidePanel::left("rule_browser")
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Rules");
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (family, entries) in &families {
                    egui::CollapsingHeader::new(*family)
                        .default_open(true)
                        .show(ui, |ui| {
                            for entry in entries {
                                let selected = entry.id == current_id;
                                let label = ui
                                    .selectable_label(selected, entry.display_name)
                                    .on_hover_text(entry.tooltip);
                                if label.clicked() && !selected {
                                    response.selected_rule = Some(entry.id.to_owned());
                                }
                            }
                        });
                }
            });
        });
}

fn inspector(
    ctx: &egui::Context,
    state: &mut UiState,
    rule: &mut dyn Rule,
    analyses: &[Box<dyn Analysis>],
    response: &mut UiResponse,
) {
    egui::SidePanel::right("inspector")
        .default_width(240.0)
        .show(ctx, |ui| {
            if state.facade {
                state.tab = Tab::Description;
            } else {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut state.tab, Tab::Description, "Description");
                    ui.selectable_value(&mut state.tab, Tab::Analysis, "Analysis");
                    ui.selectable_value(&mut state.tab, Tab::Properties, "Properties");
                });
                ui.separator();
            }

            egui::ScrollArea::vertical().show(ui, |ui| match state.tab {
                Tab::Description => {
                    ui.heading(rule.display_name());
                    ui.label(rule.description());
                }
                Tab::Analysis => {
                    if analyses.is_empty() {
                        ui.label("No analyses attached.");
                    }
                    for analysis in analyses {
                        egui::CollapsingHeader::new(analysis.display_name())
                            .default_open(true)
                            .show(ui, |ui| {
                                egui::Grid::new(analysis.id()).num_columns(2).show(ui, |ui| {
                                    for (key, value) in analysis.report() {
                                        ui.label(key);
                                        ui.label(value);
                                        ui.end_row();
                                    }
                                });
                            });
                    }
                }
                Tab::Properties => {
                    if rule.has_config() {
                        response.rule_edited |= rule.config_ui(ui);
                    } else {
                        ui.label("This rule has no adjustable properties.");
                    }
                }
            });
        });
}

fn about_window(ctx: &egui::Context, state: &mut UiState) {
    egui::Window::new("About")
        .open(&mut state.show_about)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading("Cellular Automaton Explorer");
            ui.label(format!("caex {}", env!("CARGO_PKG_VERSION")));
            ui.add_space(4.0);
            ui.label(
                "An interactive laboratory for cellular automata: pick a rule, \
                 seed the lattice, and watch it evolve.",
            );
        });
}

/// Dim the screen and float the error on top. The backdrop swallows input,
/// so the panels behind stay disabled until the dialog is dismissed.
/// Dismissing it does not touch the simulation; whatever rule was running
/// keeps running.
fn error_modal(ctx: &egui::Context, state: &mut UiState) {
    let Some(message) = state.error.clone() else {
        return;
    };

    let mut dismissed = false;
    let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
        ui.heading("Error");
        ui.label(message);
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });
    if dismissed || modal.should_close() {
        state.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Life;

    #[test]
    fn test_draw_runs_headless() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        state.error = Some("boom".to_owned());
        let mut rule = Life::conway();
        let listings = [RuleListing {
            id: "life",
            display_name: "Conway's Life",
            family: "Life-like",
            tooltip: "B3/S23",
        }];
        let status = Status {
            rule_name: "Conway's Life",
            width: 64,
            height: 64,
            topology: Topology::SquareMoore,
            generation: 0,
            population: 0,
            paused: false,
            rate: 10.0,
            fps: 60.0,
        };

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let response = draw(ctx, &mut state, &mut rule, &listings, &[], &status);
            assert!(response.selected_rule.is_none());
        });
    }

    #[test]
    fn test_error_modal_blocks_the_toolbar() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        state.error = Some("boom".to_owned());
        let mut rule = Life::conway();
        let status = Status {
            rule_name: "Conway's Life",
            width: 64,
            height: 64,
            topology: Topology::SquareMoore,
            generation: 0,
            population: 0,
            paused: false,
            rate: 10.0,
            fps: 60.0,
        };

        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let sized_input = || egui::RawInput {
            screen_rect: Some(screen),
            ..Default::default()
        };
        let mut run_frame = |input: egui::RawInput, state: &mut UiState| {
            let mut response = None;
            let _ = ctx.run(input, |ctx| {
                response = Some(draw(ctx, state, &mut rule, &[], &[], &status));
            });
            response.unwrap()
        };

        // Lay out once so hit testing knows where everything is.
        run_frame(sized_input(), &mut state);

        // Move the pointer into place first; egui hit-tests from the
        // pointer state at frame start, so the press needs a prior move.
        let move_to = |pos: egui::Pos2| {
            let mut input = sized_input();
            input.events.push(egui::Event::PointerMoved(pos));
            input
        };

        // Click where the toolbar's pause button sits. The modal backdrop
        // sits on top, so the button must not fire.
        let click_at = |pos: egui::Pos2, pressed: bool| {
            let mut input = sized_input();
            input.events.push(egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                modifiers: egui::Modifiers::NONE,
            });
            input
        };
        let button_pos = egui::pos2(30.0, 15.0);
        run_frame(move_to(button_pos), &mut state);
        run_frame(click_at(button_pos, true), &mut state);
        let response = run_frame(click_at(button_pos, false), &mut state);

        assert!(!response.toggle_pause);
        assert!(!response.step_once);
        assert!(!response.reseed);
        assert!(!response.clear);
        // Clicking the backdrop dismisses the dialog.
        assert!(state.error.is_none());
    }

    #[test]
    fn test_facade_forces_description_tab() {
        let ctx = egui::Context::default();
        let mut state = UiState {
            facade: true,
            tab: Tab::Properties,
            ..Default::default()
        };
        let mut rule = Life::conway();
        let status = Status {
            rule_name: "Conway's Life",
            width: 64,
            height: 64,
            topology: Topology::SquareMoore,
            generation: 0,
            population: 0,
            paused: true,
            rate: 10.0,
            fps: 60.0,
        };

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            draw(ctx, &mut state, &mut rule, &[], &[], &status);
        });
        assert_eq!(state.tab, Tab::Description);
    }
}
