use minkowski_protocol::RenderCommand;
use serde::{Deserialize, Serialize};

use super::{
    AnimationClock, AnimationDriver, FrameState, FrameTransforms, Layout, ParameterSubmission,
    SubmitError,
};
use crate::views::{Scene, render_scene};

/// One running diagram: layout, UI parameters and the animation driver.
///
/// Hosts call [`start`](Self::start) once a drawing surface exists, then
/// forward timer ticks and control submissions. Both return the commands for
/// the next frame when a redraw is due.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramSession {
    layout: Layout,
    state: FrameState,
    driver: AnimationDriver,
}

impl DiagramSession {
    pub fn new(layout: Layout) -> Self {
        Self::with_state(layout, FrameState::default())
    }

    pub fn with_state(layout: Layout, state: FrameState) -> Self {
        Self {
            layout,
            state,
            driver: AnimationDriver::new(),
        }
    }

    /// Begin animating. Until this is called ticks are ignored.
    pub fn start(&mut self) {
        self.driver.start();
    }

    /// Advance one time step and render. `None` while the driver is idle.
    pub fn tick(&mut self) -> Option<Vec<RenderCommand>> {
        self.driver.on_tick().then(|| self.render())
    }

    /// Apply new control values and render at once.
    ///
    /// A missing control or a speed that does not parse leaves the session
    /// untouched and nothing needs redrawing. The time index is never changed.
    pub fn submit(
        &mut self,
        submission: &ParameterSubmission,
    ) -> Result<Vec<RenderCommand>, SubmitError> {
        if let Err(err) = self.state.apply(submission) {
            log::debug!("submission ignored: {err}");
            return Err(err);
        }
        log::debug!("parameters applied: {:?}", self.state);
        Ok(self.render())
    }

    pub fn transforms(&self) -> FrameTransforms {
        FrameTransforms::derive(&self.state)
    }

    pub fn scene(&self) -> Scene {
        Scene::build(&self.transforms(), self.driver.clock(), &self.layout)
    }

    pub fn render(&self) -> Vec<RenderCommand> {
        render_scene(&self.scene())
    }

    pub fn frame_state(&self) -> &FrameState {
        &self.state
    }

    pub fn clock(&self) -> AnimationClock {
        self.driver.clock()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Resize the diagram. The next render uses the new layout.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Jump to a time step without animating (still exports).
    pub fn seek(&mut self, clock: AnimationClock) {
        self.driver.seek(clock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_session_ignores_ticks() {
        let mut session = DiagramSession::default();
        assert!(session.tick().is_none());
        assert_eq!(session.clock().index(), 0);
    }

    #[test]
    fn ticks_advance_and_render() {
        let mut session = DiagramSession::default();
        session.start();
        for expected in 1..=3 {
            assert!(session.tick().is_some());
            assert_eq!(session.clock().index(), expected);
        }
    }

    #[test]
    fn submit_keeps_time_index() {
        let mut session = DiagramSession::default();
        session.start();
        session.tick();
        session.tick();
        let cmds = session.submit(&ParameterSubmission::complete(false, true, false, "0.6"));
        assert!(cmds.is_ok());
        assert_eq!(session.clock().index(), 2);
        assert!(session.frame_state().relativity);
        assert!((session.transforms().gamma - 1.25).abs() < 1e-12);
    }

    #[test]
    fn bad_submission_changes_nothing() {
        let mut session = DiagramSession::default();
        let before = session.render();
        assert_eq!(
            session.submit(&ParameterSubmission::complete(true, true, true, "fast")),
            Err(SubmitError::InvalidSpeed("fast".into()))
        );
        assert_eq!(session.frame_state(), &FrameState::default());
        assert_eq!(session.render(), before);
    }

    #[test]
    fn set_layout_resizes_next_frame() {
        let mut session = DiagramSession::default();
        session.set_layout(Layout::with_size(1000.0, 700.0));
        assert_eq!(session.scene().fixed.space_axis.tip().x, 800.0);
    }
}
