#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod page;

use minkowski_core::model::{AnimationClock, DiagramSession, Layout, ParameterSubmission};
use minkowski_protocol::RenderCommand;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use page::{PageHandle, run_page};

fn to_json(commands: &[RenderCommand]) -> Result<String, JsError> {
    serde_json::to_string(commands).map_err(|e| JsError::new(&e.to_string()))
}

/// A diagram session driven from JavaScript. Every method that produces a
/// frame returns its render commands as JSON.
#[wasm_bindgen]
pub struct Diagram {
    session: DiagramSession,
}

#[wasm_bindgen]
impl Diagram {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Diagram {
        Diagram {
            session: DiagramSession::new(Layout::with_size(width, height)),
        }
    }

    /// Begin animating; ticks before this are ignored.
    pub fn start(&mut self) {
        self.session.start();
    }

    /// Advance one time step. `undefined` while not started.
    pub fn tick(&mut self) -> Result<Option<String>, JsError> {
        self.session.tick().map(|cmds| to_json(&cmds)).transpose()
    }

    /// Apply control values. A missing control (`undefined`) other than
    /// `inverse`, or a speed that is not a number, is ignored and returns
    /// `undefined`.
    pub fn submit(
        &mut self,
        rotation: Option<bool>,
        relativity: Option<bool>,
        inverse: Option<bool>,
        speed: Option<String>,
    ) -> Result<Option<String>, JsError> {
        let submission = ParameterSubmission {
            rotation,
            relativity,
            inverse,
            speed,
        };
        self.session
            .submit(&submission)
            .ok()
            .map(|cmds| to_json(&cmds))
            .transpose()
    }

    /// Render the current frame without advancing time.
    pub fn render_json(&self) -> Result<String, JsError> {
        to_json(&self.session.render())
    }

    /// Jump to a time step (0-9, wrapped).
    pub fn seek(&mut self, time: u32) {
        self.session.seek(AnimationClock::at(time));
    }

    pub fn time(&self) -> u8 {
        self.session.clock().index()
    }

    pub fn gamma(&self) -> f64 {
        self.session.transforms().gamma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagram_ticks_only_after_start() {
        let mut diagram = Diagram::new(800.0, 600.0);
        assert!(matches!(diagram.tick(), Ok(None)));
        diagram.start();
        let Ok(Some(json)) = diagram.tick() else {
            panic!("started diagram must render");
        };
        assert!(json.starts_with(r#"[{"Clear""#));
        assert_eq!(diagram.time(), 1);
    }

    #[test]
    fn submit_without_speed_is_ignored() {
        let mut diagram = Diagram::new(800.0, 600.0);
        assert!(matches!(
            diagram.submit(Some(false), Some(true), None, None),
            Ok(None)
        ));
        assert_eq!(diagram.gamma(), 1.0);

        assert!(matches!(
            diagram.submit(Some(false), Some(true), None, Some("0.6".into())),
            Ok(Some(_))
        ));
        assert!((diagram.gamma() - 1.25).abs() < 1e-12);
    }
}
