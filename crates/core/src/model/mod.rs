pub mod clock;
pub mod frame;
pub mod layout;
pub mod session;

pub use clock::{AnimationClock, AnimationDriver, DriverState, TICK_PERIOD, TIME_STEPS};
pub use frame::{
    FrameState, FrameTransforms, MAX_BOOST_SPEED, ParameterSubmission, ROTATION_ANGLE,
    SubmitError, TransformMode, lorentz_factor, parse_speed,
};
pub use layout::{GRID_DIVISIONS, Layout};
pub use session::DiagramSession;
