//! Transform engine, scene builder and render adapter for the minkowski
//! spacetime diagram.
//!
//! Hosts own a [`model::DiagramSession`], feed it timer ticks and parameter
//! submissions, and draw the [`minkowski_protocol::RenderCommand`] lists it
//! returns, either directly or through [`surface::replay`].

pub mod geometry;
pub mod model;
pub mod palette;
pub mod surface;
pub mod svg;
pub mod views;
