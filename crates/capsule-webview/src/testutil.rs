//! Mock native bridge and host UI for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use capsule_common::{BridgeError, Rect, Result, ViewId};
use tokio::sync::broadcast;

use crate::bridge::{NativeBridge, NativeCreateArgs, NativeEvent};
use crate::config::ResolvedConfig;
use crate::host::{ElementRef, HostUi, ObserverGuard, ObserverSink};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BridgeCall {
    Create {
        id: ViewId,
        config: ResolvedConfig,
        force_create: bool,
    },
    LoadUrl {
        id: ViewId,
        url: String,
    },
    EvaluateJavascript {
        id: ViewId,
        script: String,
    },
    Destroy(ViewId),
    Show(ViewId),
    Hide(ViewId),
    EnableTouch(ViewId),
    DisableTouch(ViewId),
    GetCookie {
        url: String,
        key: Option<String>,
    },
    SetCookie {
        url: String,
        key: String,
        value: String,
    },
    RemoveAllCookies,
    HasCookies,
    OnScroll {
        id: ViewId,
        bounds: Rect,
    },
    OnResize {
        id: ViewId,
        bounds: Rect,
    },
    OnDisplay {
        id: ViewId,
        bounds: Rect,
    },
    DispatchWebViewEvent {
        id: ViewId,
        focus: bool,
    },
}

/// Records every outbound call and lets tests inject inbound events.
pub(crate) struct MockBridge {
    calls: Mutex<Vec<BridgeCall>>,
    events: broadcast::Sender<NativeEvent>,
    pub fail_create: AtomicBool,
    pub fail_bounds: AtomicBool,
    pub fail_dispatch: AtomicBool,
    pub has_cookies: AtomicBool,
    pub cookie: Mutex<Option<String>>,
}

impl MockBridge {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            calls: Mutex::new(Vec::new()),
            events,
            fail_create: AtomicBool::new(false),
            fail_bounds: AtomicBool::new(false),
            fail_dispatch: AtomicBool::new(false),
            has_cookies: AtomicBool::new(false),
            cookie: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Publish an inbound native event to all subscribers.
    pub fn emit(&self, event: NativeEvent) {
        let _ = self.events.send(event);
    }

    fn record(&self, call: BridgeCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn bounds_result(&self) -> Result<()> {
        if self.fail_bounds.load(Ordering::SeqCst) {
            return Err(BridgeError::NativeCall("bounds update rejected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl NativeBridge for MockBridge {
    async fn create(&self, args: NativeCreateArgs) -> Result<()> {
        self.record(BridgeCall::Create {
            id: args.id,
            config: args.config,
            force_create: args.force_create,
        });
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(BridgeError::NativeCall("create rejected".into()));
        }
        Ok(())
    }

    async fn load_url(&self, id: &ViewId, url: &str) -> Result<()> {
        self.record(BridgeCall::LoadUrl {
            id: id.clone(),
            url: url.to_string(),
        });
        Ok(())
    }

    async fn evaluate_javascript(
        &self,
        id: &ViewId,
        script: &str,
    ) -> Result<Option<serde_json::Value>> {
        self.record(BridgeCall::EvaluateJavascript {
            id: id.clone(),
            script: script.to_string(),
        });
        Ok(Some(serde_json::Value::String("ok".into())))
    }

    async fn destroy(&self, id: &ViewId) -> Result<()> {
        self.record(BridgeCall::Destroy(id.clone()));
        Ok(())
    }

    async fn show(&self, id: &ViewId) -> Result<()> {
        self.record(BridgeCall::Show(id.clone()));
        Ok(())
    }

    async fn hide(&self, id: &ViewId) -> Result<()> {
        self.record(BridgeCall::Hide(id.clone()));
        Ok(())
    }

    async fn enable_touch(&self, id: &ViewId) -> Result<()> {
        self.record(BridgeCall::EnableTouch(id.clone()));
        Ok(())
    }

    async fn disable_touch(&self, id: &ViewId) -> Result<()> {
        self.record(BridgeCall::DisableTouch(id.clone()));
        Ok(())
    }

    async fn get_cookie(&self, url: &str, key: Option<&str>) -> Result<Option<String>> {
        self.record(BridgeCall::GetCookie {
            url: url.to_string(),
            key: key.map(str::to_string),
        });
        Ok(self.cookie.lock().unwrap().clone())
    }

    async fn set_cookie(&self, url: &str, key: &str, value: &str) -> Result<()> {
        self.record(BridgeCall::SetCookie {
            url: url.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn remove_all_cookies(&self) -> Result<()> {
        self.record(BridgeCall::RemoveAllCookies);
        Ok(())
    }

    async fn has_cookies(&self) -> Result<bool> {
        self.record(BridgeCall::HasCookies);
        Ok(self.has_cookies.load(Ordering::SeqCst))
    }

    async fn on_scroll(&self, id: &ViewId, bounds: Rect) -> Result<()> {
        self.record(BridgeCall::OnScroll {
            id: id.clone(),
            bounds,
        });
        self.bounds_result()
    }

    async fn on_resize(&self, id: &ViewId, bounds: Rect) -> Result<()> {
        self.record(BridgeCall::OnResize {
            id: id.clone(),
            bounds,
        });
        self.bounds_result()
    }

    async fn on_display(&self, id: &ViewId, bounds: Rect) -> Result<()> {
        self.record(BridgeCall::OnDisplay {
            id: id.clone(),
            bounds,
        });
        self.bounds_result()
    }

    async fn dispatch_web_view_event(&self, id: &ViewId, focus: bool) -> Result<()> {
        self.record(BridgeCall::DispatchWebViewEvent {
            id: id.clone(),
            focus,
        });
        if self.fail_dispatch.load(Ordering::SeqCst) {
            return Err(BridgeError::NativeCall("dispatch rejected".into()));
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<NativeEvent> {
        self.events.subscribe()
    }
}

/// Scriptable host: measurements, hit regions, tags, and capturable
/// observer sinks.
pub(crate) struct MockHost {
    script: Mutex<VecDeque<Rect>>,
    current: Mutex<HashMap<ElementRef, Rect>>,
    tags: Mutex<HashMap<ElementRef, ViewId>>,
    hit_regions: Mutex<Vec<(Rect, ElementRef)>>,
    dpr: f64,
    page_container: bool,
    pub measures: AtomicU32,
    released: Arc<AtomicUsize>,
    resize_sinks: Mutex<Vec<ObserverSink>>,
    scroll_sinks: Mutex<Vec<ObserverSink>>,
    orientation_sinks: Mutex<Vec<ObserverSink>>,
    page_sinks: Mutex<Vec<ObserverSink>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            current: Mutex::new(HashMap::new()),
            tags: Mutex::new(HashMap::new()),
            hit_regions: Mutex::new(Vec::new()),
            dpr: 2.0,
            page_container: false,
            measures: AtomicU32::new(0),
            released: Arc::new(AtomicUsize::new(0)),
            resize_sinks: Mutex::new(Vec::new()),
            scroll_sinks: Mutex::new(Vec::new()),
            orientation_sinks: Mutex::new(Vec::new()),
            page_sinks: Mutex::new(Vec::new()),
        }
    }

    /// A host whose placeholders sit inside a managed page container.
    pub fn with_page_container() -> Self {
        Self {
            page_container: true,
            ..Self::new()
        }
    }

    /// Set the current measurement for an element.
    pub fn set_rect(&self, element: ElementRef, rect: Rect) {
        self.current.lock().unwrap().insert(element, rect);
    }

    /// Queue a measurement consumed before the per-element rects.
    pub fn push_measurement(&self, rect: Rect) {
        self.script.lock().unwrap().push_back(rect);
    }

    pub fn add_hit_region(&self, rect: Rect, element: ElementRef) {
        self.hit_regions.lock().unwrap().push((rect, element));
    }

    pub fn sink_count(&self) -> usize {
        self.resize_sinks.lock().unwrap().len()
            + self.scroll_sinks.lock().unwrap().len()
            + self.orientation_sinks.lock().unwrap().len()
            + self.page_sinks.lock().unwrap().len()
    }

    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn fire_resize(&self) {
        for sink in self.resize_sinks.lock().unwrap().iter() {
            sink();
        }
    }

    pub fn fire_scroll(&self) {
        for sink in self.scroll_sinks.lock().unwrap().iter() {
            sink();
        }
    }

    pub fn fire_orientation(&self) {
        for sink in self.orientation_sinks.lock().unwrap().iter() {
            sink();
        }
    }

    pub fn fire_page_enter(&self) {
        for sink in self.page_sinks.lock().unwrap().iter() {
            sink();
        }
    }

    fn release_guard(&self) -> ObserverGuard {
        let released = Arc::clone(&self.released);
        ObserverGuard::new(move || {
            released.fetch_add(1, Ordering::SeqCst);
        })
    }
}

impl HostUi for MockHost {
    fn measure(&self, element: &ElementRef) -> Rect {
        self.measures.fetch_add(1, Ordering::SeqCst);
        if let Some(rect) = self.script.lock().unwrap().pop_front() {
            self.current.lock().unwrap().insert(*element, rect);
            return rect;
        }
        self.current
            .lock()
            .unwrap()
            .get(element)
            .copied()
            .unwrap_or_default()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn hit_test(&self, x: f64, y: f64) -> Option<ElementRef> {
        self.hit_regions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(rect, _)| {
                x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
            })
            .map(|(_, element)| *element)
    }

    fn tag_element(&self, element: &ElementRef, id: &ViewId) {
        self.tags.lock().unwrap().insert(*element, id.clone());
    }

    fn view_tag(&self, element: &ElementRef) -> Option<ViewId> {
        self.tags.lock().unwrap().get(element).cloned()
    }

    fn observe_resize(&self, _element: &ElementRef, sink: ObserverSink) -> ObserverGuard {
        self.resize_sinks.lock().unwrap().push(sink);
        self.release_guard()
    }

    fn observe_container_scroll(&self, sink: ObserverSink) -> ObserverGuard {
        self.scroll_sinks.lock().unwrap().push(sink);
        self.release_guard()
    }

    fn observe_orientation(&self, sink: ObserverSink) -> ObserverGuard {
        self.orientation_sinks.lock().unwrap().push(sink);
        self.release_guard()
    }

    fn observe_page_enter(
        &self,
        _element: &ElementRef,
        sink: ObserverSink,
    ) -> Option<ObserverGuard> {
        if !self.page_container {
            return None;
        }
        self.page_sinks.lock().unwrap().push(sink);
        Some(self.release_guard())
    }
}
