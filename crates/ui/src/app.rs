use eframe::egui;
use minkowski_core::model::{DiagramSession, FrameState, Layout, ParameterSubmission, TICK_PERIOD};
use minkowski_protocol::RenderCommand;

use crate::renderer::{self, Placement};
use crate::theme::ThemeMode;

/// Control values as shown in the toolbar. They only reach the session when
/// the user submits.
struct Controls {
    rotation: bool,
    relativity: bool,
    inverse: bool,
    speed: String,
}

impl Controls {
    fn from_state(state: &FrameState) -> Self {
        Self {
            rotation: state.rotation,
            relativity: state.relativity,
            inverse: state.inverse,
            speed: state.speed.to_string(),
        }
    }

    fn submission(&self) -> ParameterSubmission {
        ParameterSubmission::complete(
            self.rotation,
            self.relativity,
            self.inverse,
            self.speed.as_str(),
        )
    }
}

/// Main application state.
pub struct MinkowskiApp {
    session: DiagramSession,
    controls: Controls,
    theme_mode: ThemeMode,
    /// Commands of the frame currently on screen.
    commands: Vec<RenderCommand>,
    /// `egui` input time of the last animation tick, in seconds.
    last_tick: f64,
    /// Message from the last rejected submission.
    error: Option<String>,
}

impl MinkowskiApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme_mode = ThemeMode::Light;
        cc.egui_ctx.set_visuals(theme_mode.visuals());

        let mut session = DiagramSession::new(Layout::default());
        // The painter is available from the first frame on.
        session.start();
        let commands = session.render();

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&"minkowski: animation started".into());

        Self {
            controls: Controls::from_state(session.frame_state()),
            session,
            theme_mode,
            commands,
            last_tick: 0.0,
            error: None,
        }
    }

    fn submit(&mut self) {
        match self.session.submit(&self.controls.submission()) {
            Ok(commands) => {
                self.commands = commands;
                self.error = None;
            }
            Err(err) => {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::warn_1(&format!("minkowski: {err}").into());
                self.error = Some(err.to_string());
            }
        }
    }

    fn advance_clock(&mut self, now: f64) {
        if now - self.last_tick < TICK_PERIOD.as_secs_f64() {
            return;
        }
        self.last_tick = now;
        if let Some(commands) = self.session.tick() {
            self.commands = commands;
        }
    }
}

impl eframe::App for MinkowskiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.advance_clock(now);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("minkowski");
                ui.separator();

                ui.checkbox(&mut self.controls.rotation, "Rotation");
                ui.checkbox(&mut self.controls.relativity, "Relativity");
                ui.checkbox(&mut self.controls.inverse, "Inverse");
                ui.separator();

                ui.label("v/c");
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut self.controls.speed).desired_width(64.0),
                );
                let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Submit").clicked() || entered {
                    self.submit();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.theme_mode {
                        ThemeMode::Dark => "🌙 Dark",
                        ThemeMode::Light => "☀ Light",
                    };
                    if ui.button(theme_label).clicked() {
                        self.theme_mode = self.theme_mode.toggled();
                        ctx.set_visuals(self.theme_mode.visuals());
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                } else {
                    let transforms = self.session.transforms();
                    ui.label(format!(
                        "t = {} | {:?} | γ = {:.4} | {} view",
                        self.session.clock().index(),
                        transforms.mode,
                        transforms.gamma,
                        if transforms.inverse { "primed" } else { "rest" },
                    ));
                }
            });
        });

        // Central panel: the diagram
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            let placement = Placement::fit(available, self.session.layout());
            let painter = ui.painter_at(available);
            renderer::render_commands(&painter, &self.commands, placement, self.theme_mode);
        });

        ctx.request_repaint_after(TICK_PERIOD);
    }
}
