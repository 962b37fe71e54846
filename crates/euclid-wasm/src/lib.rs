//! WASM bridge for Euclid: exposes the canvas session and journaling
//! editor to the browser host.
//!
//! Compiled via `wasm-pack build --target web`. The JS side owns the DOM:
//! it forwards pointer, wheel and keyboard events here and paints whatever
//! `frame_json` / `drawer_json` describe.

mod journal;
mod text;

pub use journal::JournalPanel;

use euclid_core::config::CanvasConfig;
use euclid_core::id::{NodeId, SuffixGenerator};
use euclid_core::store::NodeStore;
use euclid_editor::drawer::drawer_view;
use euclid_editor::input::{InputEvent, Modifiers};
use euclid_editor::render::{RenderSurface, hit_test};
use euclid_editor::session::CanvasSession;
use euclid_editor::shortcuts::{ShortcutAction, ShortcutMap};
use euclid_editor::sidebar::SidebarComposer;
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// Holds the session, the memoized render surface and the sidebar
/// composer. All canvas interaction from JS goes through this struct.
#[wasm_bindgen]
pub struct EuclidCanvas {
    session: CanvasSession,
    surface: RenderSurface,
    composer: SidebarComposer,
    /// Card under the last pointer-down, for click synthesis.
    pressed_id: Option<NodeId>,
}

#[wasm_bindgen]
impl EuclidCanvas {
    /// Create an empty canvas laid out for a container of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self::build(NodeStore::new(), width, height)
    }

    /// Create a canvas preloaded with the demo board.
    pub fn with_sample(width: f64, height: f64) -> Self {
        let store = match NodeStore::sample() {
            Ok(store) => store,
            Err(e) => {
                log::debug!("canvas: sample board rejected: {e}");
                NodeStore::new()
            }
        };
        Self::build(store, width, height)
    }

    /// Container resized. Only the first layout recenters.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.set_container_size(width, height);
    }

    // ─── Pointer API ─────────────────────────────────────────────────────

    /// Mouse down at container-relative `(x, y)`. Returns true if anything
    /// changed.
    pub fn handle_mouse_down(&mut self, x: f64, y: f64) -> bool {
        let hit = self.hit_test(x, y);
        self.pressed_id = hit;
        self.session.handle_input(&InputEvent::pointer_down(x, y), hit)
    }

    pub fn handle_mouse_move(&mut self, x: f64, y: f64) -> bool {
        self.session.handle_input(&InputEvent::pointer_move(x, y), None)
    }

    /// Mouse up. A release over the card that was pressed also counts as a
    /// click on it, unless the gesture turned into a drag.
    pub fn handle_mouse_up(&mut self, x: f64, y: f64) -> bool {
        let mut changed = self.session.handle_input(&InputEvent::PointerUp, None);
        let pressed = self.pressed_id.take();
        if pressed.is_some() && self.hit_test(x, y) == pressed {
            changed |= self.session.handle_input(&InputEvent::Click, pressed);
        }
        changed
    }

    pub fn handle_mouse_leave(&mut self) -> bool {
        self.pressed_id = None;
        self.session.handle_input(&InputEvent::PointerLeave, None)
    }

    /// Wheel event. The host should always `preventDefault()`; the return
    /// value only says whether the view changed.
    pub fn handle_wheel(&mut self, dx: f64, dy: f64, ctrl: bool, meta: bool) -> bool {
        let modifiers = Modifiers {
            ctrl,
            meta,
            ..Modifiers::NONE
        };
        self.session.handle_input(&InputEvent::wheel(dx, dy, modifiers), None)
    }

    /// Topmost node id at a container point, or an empty string.
    pub fn node_at(&mut self, x: f64, y: f64) -> String {
        self.hit_test(x, y).map(|id| id.as_str().to_string()).unwrap_or_default()
    }

    // ─── Selection & drawer ──────────────────────────────────────────────

    /// Select a node by id (e.g. from the drawer's connection list).
    pub fn select_node(&mut self, node_id: &str) -> bool {
        self.session.handle_input(&InputEvent::Click, Some(NodeId::intern(node_id)))
    }

    pub fn selected_id(&self) -> String {
        self.session
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn is_drawer_open(&self) -> bool {
        self.session.is_drawer_open()
    }

    pub fn close_drawer(&mut self) {
        self.session.set_drawer_open(false);
    }

    /// Drawer contents for the selection as JSON, or `null`.
    pub fn drawer_json(&self) -> String {
        if !self.session.is_drawer_open() {
            return "null".to_string();
        }
        match drawer_view(&self.session.store, self.session.selected()) {
            Some(view) => serde_json::to_string(&view).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.session.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.session.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.session.reset_view();
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.session.view.zoom * 100.0).round() as u32
    }

    /// Everything needed to paint the canvas, as JSON.
    pub fn frame_json(&mut self) -> String {
        serde_json::to_string(self.surface.frame(&self.session)).unwrap_or_else(|_| "{}".to_string())
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Derive the three platform drafts from `node_id`. Returns their ids
    /// as a JSON array (empty for unknown nodes).
    pub fn generate_for(&mut self, node_id: &str) -> String {
        match self.session.generate_for(NodeId::intern(node_id)) {
            Ok(Some(ids)) => {
                let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
            }
            Ok(None) => "[]".to_string(),
            Err(e) => {
                log::debug!("canvas: generate failed: {e}");
                "[]".to_string()
            }
        }
    }

    pub fn set_sidebar_entry(&mut self, text: &str) {
        self.composer.set_entry(text);
    }

    pub fn sidebar_entry(&self) -> String {
        self.composer.entry().to_string()
    }

    /// "Process Entry": commit the sidebar text as a journal node plus its
    /// drafts. Returns the journal node id, or an empty string if nothing
    /// was committed.
    pub fn process_sidebar_entry(&mut self) -> String {
        match self.composer.process(&mut self.session) {
            Ok(Some(id)) => id.as_str().to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                log::debug!("canvas: process entry failed: {e}");
                String::new()
            }
        }
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>"}`. Queued generation is
    /// reported but left to the host's focused `JournalPanel`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let action = match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
            Some(a) => a,
            None => return r#"{"changed":false,"action":"none"}"#.to_string(),
        };

        let changed = self.dispatch_action(action);
        let action_name = action_to_name(action);
        format!(r#"{{"changed":{changed},"action":"{action_name}"}}"#)
    }
}

impl EuclidCanvas {
    fn build(store: NodeStore, width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();

        let ids = SuffixGenerator::seeded(seed());
        let mut session = CanvasSession::new(store, CanvasConfig::default(), ids);
        session.set_container_size(width, height);

        Self {
            session,
            surface: RenderSurface::new(),
            composer: SidebarComposer::new(),
            pressed_id: None,
        }
    }

    fn hit_test(&mut self, x: f64, y: f64) -> Option<NodeId> {
        hit_test(self.surface.frame(&self.session), x, y)
    }

    fn dispatch_action(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::ZoomIn => {
                self.session.zoom_in();
                true
            }
            ShortcutAction::ZoomOut => {
                self.session.zoom_out();
                true
            }
            ShortcutAction::ResetView => {
                self.session.reset_view();
                true
            }
            ShortcutAction::CloseDrawer => {
                let was_open = self.session.is_drawer_open();
                self.session.set_drawer_open(false);
                was_open
            }
            ShortcutAction::CommitEntry => !self.process_sidebar_entry().is_empty(),
            // Handled by the focused JournalPanel.
            ShortcutAction::QueueGeneration => false,
        }
    }
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::QueueGeneration => "queueGeneration",
        ShortcutAction::CommitEntry => "commitEntry",
        ShortcutAction::ZoomIn => "zoomIn",
        ShortcutAction::ZoomOut => "zoomOut",
        ShortcutAction::ResetView => "resetView",
        ShortcutAction::CloseDrawer => "closeDrawer",
    }
}

/// Seed for node id suffixes.
fn seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        journal::now().timestamp_nanos_opt().unwrap_or_default() as u64
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

pub(crate) fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Euclid WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
