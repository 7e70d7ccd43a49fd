//! Page mode: the diagram draws itself onto a `<canvas>` and reads the
//! page's form controls.

use std::cell::RefCell;
use std::rc::Rc;

use minkowski_core::model::{DiagramSession, Layout, ParameterSubmission, TICK_PERIOD};
use minkowski_core::palette::Palette;
use minkowski_core::surface::replay;
use minkowski_protocol::RenderCommand;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, Window};

use crate::canvas::CanvasSurface;

const CANVAS_ID: &str = "scratch";
const ROTATION_ID: &str = "RotationCheck";
const RELATIVITY_ID: &str = "RelativeCheck";
const INVERSE_ID: &str = "InverseCheck";
const SPEED_ID: &str = "CEdit";

fn js_error(err: JsValue) -> JsError {
    JsError::new(&format!("{err:?}"))
}

struct Page {
    session: DiagramSession,
    surface: CanvasSurface,
}

impl Page {
    fn draw(&mut self, commands: &[RenderCommand]) {
        if let Err(err) = replay(commands, &mut self.surface) {
            web_sys::console::error_1(&err);
        }
    }
}

fn checkbox(document: &Document, id: &str) -> Option<bool> {
    let input = document.get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()?;
    Some(input.checked())
}

/// Read the form controls. A control missing from the page reads as `None`.
fn read_controls(document: &Document) -> ParameterSubmission {
    ParameterSubmission {
        rotation: checkbox(document, ROTATION_ID),
        relativity: checkbox(document, RELATIVITY_ID),
        inverse: checkbox(document, INVERSE_ID),
        speed: document
            .get_element_by_id(SPEED_ID)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value()),
    }
}

/// Running page diagram. Dropping it stops the timer.
#[wasm_bindgen]
pub struct PageHandle {
    window: Window,
    document: Document,
    page: Rc<RefCell<Page>>,
    interval_id: i32,
    _tick: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl PageHandle {
    /// Read the form controls and redraw. Returns `false` when the values
    /// were rejected and nothing changed.
    pub fn submit_controls(&self) -> bool {
        let submission = read_controls(&self.document);
        let mut page = self.page.borrow_mut();
        match page.session.submit(&submission) {
            Ok(commands) => {
                page.draw(&commands);
                true
            }
            Err(err) => {
                web_sys::console::warn_1(&format!("minkowski: submission ignored: {err}").into());
                false
            }
        }
    }

    pub fn time(&self) -> u8 {
        self.page.borrow().session.clock().index()
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.interval_id);
    }
}

/// Bind the page's canvas and start the animation.
///
/// Fails, and starts nothing, when the canvas or its 2-D context is missing.
#[wasm_bindgen]
pub fn run_page() -> Result<PageHandle, JsError> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsError::new(&format!("no canvas element with id '{CANVAS_ID}'")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsError::new(&format!("element '{CANVAS_ID}' is not a canvas")))?;
    let surface = CanvasSurface::new(&canvas, Palette::Light).map_err(js_error)?;

    let (width, height) = surface.size();
    let mut session = DiagramSession::new(Layout::with_size(width, height));
    session.start();

    let page = Rc::new(RefCell::new(Page { session, surface }));
    {
        let mut first = page.borrow_mut();
        let commands = first.session.render();
        first.draw(&commands);
    }

    let ticking = Rc::clone(&page);
    let tick = Closure::<dyn FnMut()>::new(move || {
        let mut page = ticking.borrow_mut();
        if let Some(commands) = page.session.tick() {
            page.draw(&commands);
        }
    });
    let period = i32::try_from(TICK_PERIOD.as_millis()).unwrap_or(i32::MAX);
    let interval_id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            period,
        )
        .map_err(js_error)?;

    log_line(&format!("minkowski: animating {width}x{height} canvas"));
    Ok(PageHandle {
        window,
        document,
        page,
        interval_id,
        _tick: tick,
    })
}

fn log_line(message: &str) {
    web_sys::console::log_1(&message.into());
}
