//! `<canvas>` 2-D context as a drawing surface.

use js_sys::Array;
use minkowski_core::palette::Palette;
use minkowski_core::surface::DrawingSurface;
use minkowski_protocol::{Point, Rect, TextAlign, ThemeToken};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const DASH_PATTERN: [f64; 2] = [4.0, 4.0];

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    palette: Palette,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Bind the canvas' 2-D context. Fails when the browser has none.
    pub fn new(canvas: &HtmlCanvasElement, palette: Palette) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("missing 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            palette,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

impl DrawingSurface for CanvasSurface {
    type Error = JsValue;

    fn clear(&mut self, rect: Rect) -> Result<(), JsValue> {
        self.ctx.clear_rect(rect.x, rect.y, rect.w, rect.h);
        Ok(())
    }

    fn begin_path(&mut self) -> Result<(), JsValue> {
        self.ctx.begin_path();
        Ok(())
    }

    fn move_to(&mut self, p: Point) -> Result<(), JsValue> {
        self.ctx.move_to(p.x, p.y);
        Ok(())
    }

    fn line_to(&mut self, p: Point) -> Result<(), JsValue> {
        self.ctx.line_to(p.x, p.y);
        Ok(())
    }

    fn stroke(&mut self) -> Result<(), JsValue> {
        self.ctx.stroke();
        Ok(())
    }

    fn fill(&mut self) -> Result<(), JsValue> {
        self.ctx.fill();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), JsValue> {
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
        Ok(())
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        self.ctx.arc(center.x, center.y, radius, start, end)
    }

    fn fill_text(&mut self, text: &str, position: Point, align: TextAlign) -> Result<(), JsValue> {
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text(text, position.x, position.y)
    }

    fn set_stroke_style(&mut self, color: ThemeToken, width: f64, dashed: bool) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(self.palette.css(color));
        self.ctx.set_line_width(width);
        let dash = Array::new();
        if dashed {
            for v in DASH_PATTERN {
                dash.push(&JsValue::from_f64(v));
            }
        }
        self.ctx.set_line_dash(&dash)
    }

    fn set_fill_style(&mut self, color: ThemeToken) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(self.palette.css(color));
        Ok(())
    }

    fn set_font(&mut self, size: f64) -> Result<(), JsValue> {
        self.ctx.set_font(&format!("{size}px sans-serif"));
        Ok(())
    }

    fn set_pixel_transform(&mut self, coefficients: [f64; 6]) -> Result<(), JsValue> {
        let [a, b, c, d, e, f] = coefficients;
        self.ctx.set_transform(a, b, c, d, e, f)
    }

    fn reset_pixel_transform(&mut self) -> Result<(), JsValue> {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}
