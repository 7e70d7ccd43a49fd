pub mod render;
pub mod scene;

pub use render::{CommandList, render_scene};
pub use scene::{Observer, Scene};
