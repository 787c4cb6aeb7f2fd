#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use viewstate_core::{
    Clock, ElementQuery, FrameSize, MarkerSet, RenderSurface, Result, ScrollOffset, Selector,
    ViewstateError, Viewport,
};
use viewstate_runtime::{
    DebounceConfig, MonotonicClock, ResizeChannel, ResponsiveSession, StateReconciler, ViewstateConfig,
};

fn js_number(value: core::result::Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

fn to_js(err: ViewstateError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The live page: markers go on `<body>`, sizes come from `<body>` and the
/// window frame.
#[derive(Debug, Clone)]
pub struct DomDocument {
    window: Window,
    document: web_sys::Document,
    body: Option<HtmlElement>,
}

impl DomDocument {
    /// Bind to the global window.
    ///
    /// Fails with [`ViewstateError::SurfaceUnavailable`] outside a browsing
    /// context. A missing `<body>` is reported later through
    /// [`RenderSurface::is_available`].
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or(ViewstateError::SurfaceUnavailable)?;
        let document = window
            .document()
            .ok_or(ViewstateError::SurfaceUnavailable)?;
        let body = document.body();
        Ok(Self {
            window,
            document,
            body,
        })
    }

    /// The bound window.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl RenderSurface for DomDocument {
    fn viewport(&self) -> Viewport {
        let Some(body) = &self.body else {
            return Viewport::default();
        };
        Viewport::from_client(body.client_width(), body.client_height()).unwrap_or_else(|err| {
            warn!(%err, "body reported an invalid client size");
            Viewport::default()
        })
    }

    fn outer_frame_size(&self) -> FrameSize {
        FrameSize::new(
            js_number(self.window.outer_width()),
            js_number(self.window.outer_height()),
        )
    }

    fn document_content_size(&self) -> FrameSize {
        match &self.body {
            Some(body) => FrameSize::new(
                f64::from(body.client_width()),
                f64::from(body.client_height()),
            ),
            None => FrameSize::default(),
        }
    }

    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn is_available(&self) -> bool {
        self.body.is_some()
    }
}

impl MarkerSet for DomDocument {
    fn add_marker(&mut self, name: &str) {
        if let Some(body) = &self.body
            && let Err(err) = body.class_list().add_1(name)
        {
            warn!(marker = name, error = ?err, "failed to add marker");
        }
    }

    fn remove_marker(&mut self, name: &str) {
        if let Some(body) = &self.body
            && let Err(err) = body.class_list().remove_1(name)
        {
            warn!(marker = name, error = ?err, "failed to remove marker");
        }
    }

    fn has_marker(&self, name: &str) -> bool {
        self.body
            .as_ref()
            .is_some_and(|body| body.class_list().contains(name))
    }
}

impl ElementQuery for DomDocument {
    type Element = HtmlElement;

    fn query_all(&self, selector: &Selector) -> Vec<HtmlElement> {
        let list = match self.document.query_selector_all(selector.as_str()) {
            Ok(list) => list,
            Err(err) => {
                warn!(selector = selector.as_str(), error = ?err, "query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn set_height(&mut self, element: &HtmlElement, px: f64) {
        if let Err(err) = element.style().set_property("height", &format!("{px}px")) {
            warn!(error = ?err, "failed to set panel height");
        }
    }
}

struct Inner {
    window: Window,
    session: ResponsiveSession<DomDocument>,
    channel: ResizeChannel,
    clock: MonotonicClock,
    tick_fn: Option<Function>,
    timer: Option<i32>,
}

impl Inner {
    fn reschedule(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let (Some(deadline), Some(tick_fn)) = (self.channel.next_deadline(), &self.tick_fn) else {
            return;
        };
        let delay = deadline.saturating_sub(self.clock.now_mono());
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(tick_fn, delay_ms)
        {
            Ok(handle) => self.timer = Some(handle),
            Err(err) => warn!(error = ?err, "failed to arm debounce timer"),
        }
    }

    fn on_resize(&mut self) {
        let now = self.clock.now_mono();
        self.channel.notify(now);
        self.reschedule();
    }

    fn on_timer(&mut self) {
        self.timer = None;
        let now = self.clock.now_mono();
        self.channel.tick(now);
        self.reschedule();
    }
}

fn with_inner(weak: &Weak<RefCell<Inner>>, f: impl FnOnce(&mut Inner)) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    match inner.try_borrow_mut() {
        Ok(mut inner) => f(&mut inner),
        Err(_) => warn!("viewstate callback re-entered; skipped"),
    };
}

/// Responsive page state driven by `window.onresize`.
///
/// Replaces any existing `window.onresize` handler.
#[wasm_bindgen]
pub struct ViewstateWeb {
    inner: Rc<RefCell<Inner>>,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_timer: Option<Closure<dyn FnMut()>>,
}

impl ViewstateWeb {
    fn start(config: ViewstateConfig) -> Result<Self> {
        let document = DomDocument::from_window()?;
        let window = document.window().clone();
        let mut channel = ResizeChannel::new();
        let session = StateReconciler::new(document, config).initialize(&mut channel)?;

        let inner = Rc::new(RefCell::new(Inner {
            window: window.clone(),
            session,
            channel,
            clock: MonotonicClock::new(),
            tick_fn: None,
            timer: None,
        }));

        let weak = Rc::downgrade(&inner);
        let on_timer = Closure::<dyn FnMut()>::new(move || with_inner(&weak, Inner::on_timer));
        let weak = Rc::downgrade(&inner);
        let on_resize = Closure::<dyn FnMut()>::new(move || with_inner(&weak, Inner::on_resize));

        inner.borrow_mut().tick_fn = Some(on_timer.as_ref().unchecked_ref::<Function>().clone());
        window.set_onresize(Some(on_resize.as_ref().unchecked_ref()));

        Ok(Self {
            inner,
            on_resize: Some(on_resize),
            on_timer: Some(on_timer),
        })
    }
}

#[wasm_bindgen]
impl ViewstateWeb {
    /// Reconcile the page and start listening for resizes with the default
    /// 50 ms trailing debounce.
    #[wasm_bindgen(constructor)]
    pub fn new() -> core::result::Result<ViewstateWeb, JsValue> {
        Self::start(ViewstateConfig::default()).map_err(to_js)
    }

    /// Like the constructor, with an explicit debounce delay and leading edge.
    #[wasm_bindgen(js_name = withDebounce)]
    pub fn with_debounce(
        delay_ms: u32,
        leading: bool,
    ) -> core::result::Result<ViewstateWeb, JsValue> {
        let config = ViewstateConfig::default().with_debounce(
            DebounceConfig::default()
                .with_delay(core::time::Duration::from_millis(u64::from(delay_ms)))
                .with_leading(leading),
        );
        Self::start(config).map_err(to_js)
    }

    /// Reconcile immediately, bypassing the debounce.
    pub fn recompute(&self) {
        self.inner.borrow().session.recompute();
    }

    /// Label of the active breakpoint.
    pub fn breakpoint(&self) -> String {
        self.inner
            .borrow()
            .session
            .reconciler()
            .classify_current()
            .label()
            .to_owned()
    }

    /// Current viewport width.
    #[wasm_bindgen(js_name = viewportWidth)]
    pub fn viewport_width(&self) -> u32 {
        self.inner.borrow().session.reconciler().viewport_width()
    }

    /// Current viewport height.
    #[wasm_bindgen(js_name = viewportHeight)]
    pub fn viewport_height(&self) -> u32 {
        self.inner.borrow().session.reconciler().viewport_height()
    }

    /// Horizontal page scroll offset.
    #[wasm_bindgen(js_name = scrollX)]
    pub fn scroll_x(&self) -> f64 {
        self.inner.borrow().session.reconciler().scroll_x()
    }

    /// Vertical page scroll offset.
    #[wasm_bindgen(js_name = scrollY)]
    pub fn scroll_y(&self) -> f64 {
        self.inner.borrow().session.reconciler().scroll_y()
    }

    /// Most recent reconcile report as JSON.
    #[wasm_bindgen(js_name = lastReport)]
    pub fn last_report(&self) -> core::result::Result<String, JsValue> {
        serde_json::to_string(&self.inner.borrow().session.last_report())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Detach from `window.onresize` and cancel any armed timer.
    pub fn destroy(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.window.set_onresize(None);
        if let Some(handle) = inner.timer.take() {
            inner.window.clear_timeout_with_handle(handle);
        }
        inner.tick_fn = None;
        inner.channel.clear_resize_handler();
        drop(inner);
        self.on_resize = None;
        self.on_timer = None;
    }
}
