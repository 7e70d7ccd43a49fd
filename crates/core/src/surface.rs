//! Canvas-style drawing surface and command replay.
//!
//! Hosts with an immediate-mode 2-D context (an HTML canvas, a test recorder)
//! implement [`DrawingSurface`] and hand command lists to [`replay`].

use std::f64::consts::TAU;
use std::ops::{Deref, DerefMut};

use minkowski_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::geometry::AffineMatrix;

/// A 2-D context with a settable pixel transform.
///
/// `set_pixel_transform` replaces the whole transform; it does not compose.
pub trait DrawingSurface {
    type Error;

    fn clear(&mut self, rect: Rect) -> Result<(), Self::Error>;
    fn begin_path(&mut self) -> Result<(), Self::Error>;
    fn move_to(&mut self, p: Point) -> Result<(), Self::Error>;
    fn line_to(&mut self, p: Point) -> Result<(), Self::Error>;
    fn stroke(&mut self) -> Result<(), Self::Error>;
    fn fill(&mut self) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, rect: Rect) -> Result<(), Self::Error>;
    /// Add a circular arc to the current path.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64)
    -> Result<(), Self::Error>;
    fn fill_text(&mut self, text: &str, position: Point, align: TextAlign)
    -> Result<(), Self::Error>;

    fn set_stroke_style(
        &mut self,
        color: ThemeToken,
        width: f64,
        dashed: bool,
    ) -> Result<(), Self::Error>;
    fn set_fill_style(&mut self, color: ThemeToken) -> Result<(), Self::Error>;
    fn set_font(&mut self, size: f64) -> Result<(), Self::Error>;

    fn set_pixel_transform(&mut self, coefficients: [f64; 6]) -> Result<(), Self::Error>;
    fn reset_pixel_transform(&mut self) -> Result<(), Self::Error>;
}

/// Resets the surface to the identity transform when dropped.
struct IdentityGuard<'a, S: DrawingSurface> {
    surface: &'a mut S,
}

impl<S: DrawingSurface> Deref for IdentityGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface> DerefMut for IdentityGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface> Drop for IdentityGuard<'_, S> {
    fn drop(&mut self) {
        if self.surface.reset_pixel_transform().is_err() {
            log::warn!("failed to reset pixel transform after replay");
        }
    }
}

/// Draw `commands` onto `surface`.
///
/// Nested transforms are composed here and pushed to the surface as absolute
/// matrices. The surface is back at identity when this returns, including
/// when a surface call fails part way through.
pub fn replay<S: DrawingSurface>(commands: &[RenderCommand], surface: &mut S) -> Result<(), S::Error> {
    let mut surface = IdentityGuard { surface };
    let mut stack = vec![AffineMatrix::IDENTITY];

    for cmd in commands {
        match cmd {
            RenderCommand::Clear { rect } => surface.clear(*rect)?,
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
                dashed,
            } => {
                surface.set_stroke_style(*color, *width, *dashed)?;
                surface.begin_path()?;
                surface.move_to(*from)?;
                surface.line_to(*to)?;
                surface.stroke()?;
            }
            RenderCommand::FillRect { rect, color } => {
                surface.set_fill_style(*color)?;
                surface.fill_rect(*rect)?;
            }
            RenderCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                surface.set_fill_style(*color)?;
                surface.begin_path()?;
                surface.arc(*center, *radius, 0.0, TAU)?;
                surface.fill()?;
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                surface.set_fill_style(*color)?;
                surface.set_font(*font_size)?;
                surface.fill_text(text, *position, *align)?;
            }
            RenderCommand::PushTransform { coefficients } => {
                let parent = stack.last().copied().unwrap_or(AffineMatrix::IDENTITY);
                let current = parent.compose(&AffineMatrix::new(*coefficients));
                surface.set_pixel_transform(current.coefficients())?;
                stack.push(current);
            }
            RenderCommand::PopTransform => {
                if stack.len() > 1 {
                    stack.pop();
                } else {
                    log::warn!("unbalanced PopTransform ignored");
                }
                match stack.last() {
                    Some(top) if *top != AffineMatrix::IDENTITY => {
                        surface.set_pixel_transform(top.coefficients())?;
                    }
                    _ => surface.reset_pixel_transform()?,
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
    Ok(())
}
