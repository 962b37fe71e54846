//! Canvas session: the authoritative canvas state behind one canvas view.
//!
//! Holds the node store, the view, the interaction controller and the
//! transient selection/drawer state. Input flows in through `handle_input`,
//! the controller turns it into `CanvasMutation`s, and `apply_mutation`
//! is the single place where view and nodes change.

use crate::input::InputEvent;
use crate::interaction::{CanvasMutation, InteractionController};
use euclid_core::config::CanvasConfig;
use euclid_core::generation::generate_artifacts;
use euclid_core::id::{NodeId, SuffixGenerator};
use euclid_core::model::{CanvasLink, CanvasNode, NodeKind, View};
use euclid_core::store::{NodeStore, StoreError};

/// Status label given to journal nodes committed from the sidebar.
pub const JOURNAL_STATUS: &str = "Captured";

const TITLE_MAX_CHARS: usize = 48;
const SUMMARY_MAX_CHARS: usize = 140;

pub struct CanvasSession {
    pub store: NodeStore,
    pub view: View,
    pub config: CanvasConfig,
    controller: InteractionController,
    ids: SuffixGenerator,
    selected: Option<NodeId>,
    drawer_open: bool,
    /// Container size once the host has laid out; `None` before that.
    container: Option<(f64, f64)>,
}

impl CanvasSession {
    pub fn new(store: NodeStore, config: CanvasConfig, ids: SuffixGenerator) -> Self {
        Self {
            store,
            view: View::default(),
            controller: InteractionController::new(&config),
            config,
            ids,
            selected: None,
            drawer_open: false,
            container: None,
        }
    }

    /// Empty canvas, default config, entropy-seeded ids.
    pub fn empty() -> Self {
        Self::new(NodeStore::new(), CanvasConfig::default(), SuffixGenerator::from_entropy())
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    /// Record the container size. The first call recenters the view; later
    /// calls (resizes) leave the camera where the user put it.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        if self.container.is_none() {
            self.view = View::recentered(width, height, &self.config);
            log::debug!("session: recentered to {:?}", self.view);
        }
        self.container = Some((width, height));
    }

    pub fn container_size(&self) -> Option<(f64, f64)> {
        self.container
    }

    /// Status-bar "Reset View".
    pub fn reset_view(&mut self) {
        self.view = View::default();
    }

    /// Toolbar "+".
    pub fn zoom_in(&mut self) {
        let step = self.config.zoom_step;
        self.view.zoom_by(step, &self.config);
    }

    /// Toolbar "−".
    pub fn zoom_out(&mut self) {
        let step = self.config.zoom_step;
        self.view.zoom_by(-step, &self.config);
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event through the controller and apply the result.
    /// Returns `true` if anything visible changed.
    pub fn handle_input(&mut self, event: &InputEvent, hit_node: Option<NodeId>) -> bool {
        let mutations = self.controller.handle(event, hit_node, &self.view);
        let mut changed = false;
        for mutation in mutations {
            changed |= self.apply_mutation(mutation);
        }
        changed
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Apply a single mutation. Unknown node ids are ignored.
    pub fn apply_mutation(&mut self, mutation: CanvasMutation) -> bool {
        match mutation {
            CanvasMutation::Pan { dx, dy } => {
                self.view.pan(dx, dy);
                true
            }
            CanvasMutation::Zoom { delta } => {
                let before = self.view.zoom;
                self.view.zoom_by(delta, &self.config);
                self.view.zoom != before
            }
            CanvasMutation::MoveNode { id, dx, dy } => {
                let moved = self.store.move_node(id, dx, dy);
                if !moved {
                    log::debug!("session: move of unknown node {id} ignored");
                }
                moved
            }
            CanvasMutation::Select { id } => {
                if !self.store.contains(id) {
                    log::debug!("session: select of unknown node {id} ignored");
                    return false;
                }
                self.selected = Some(id);
                self.drawer_open = true;
                true
            }
        }
    }

    // ─── Selection & drawer ──────────────────────────────────────────────

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&CanvasNode> {
        self.selected.and_then(|id| self.store.get(id))
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Open or close the drawer. The selection survives a close so the
    /// card keeps its highlight.
    pub fn set_drawer_open(&mut self, open: bool) {
        self.drawer_open = open && self.selected.is_some();
    }

    // ─── Node creation ───────────────────────────────────────────────────

    /// Canvas point currently under the container centre (origin before
    /// the first layout).
    pub fn viewport_center(&self) -> (f64, f64) {
        match self.container {
            Some((w, h)) => self.view.screen_to_canvas(w / 2.0, h / 2.0),
            None => (0.0, 0.0),
        }
    }

    /// Commit a journal entry as a new journal node centred in the viewport.
    pub fn commit_entry(&mut self, text: &str) -> Result<NodeId, StoreError> {
        let (x, y) = self.viewport_center();
        let id = self.ids.next_id("journal");
        let node = CanvasNode::new(id, NodeKind::Journal, entry_title(text), x, y)
            .with_summary(truncate_chars(text.trim(), SUMMARY_MAX_CHARS))
            .with_status(JOURNAL_STATUS)
            .with_content(text);
        self.store.append(node)?;
        log::debug!("session: committed journal node {id}");
        Ok(id)
    }

    /// Generate the platform drafts for `source`, append them and link
    /// source → draft. Returns the new ids, or `None` for unknown sources.
    pub fn generate_for(&mut self, source: NodeId) -> Result<Option<[NodeId; 3]>, StoreError> {
        let Some(node) = self.store.get(source) else {
            log::debug!("session: generate for unknown node {source} ignored");
            return Ok(None);
        };
        let drafts = generate_artifacts(node, &mut self.ids, &self.config);
        let ids = drafts.each_ref().map(|d| d.id);
        self.store.append_all(drafts)?;
        for id in ids {
            self.store
                .append_link(CanvasLink::new(format!("link-{source}-{id}"), source, id));
        }
        log::debug!("session: generated {} drafts from {source}", ids.len());
        Ok(Some(ids))
    }

    /// Commit an entry and immediately derive its drafts ("Process Entry").
    pub fn process_entry(&mut self, text: &str) -> Result<NodeId, StoreError> {
        let id = self.commit_entry(text)?;
        self.generate_for(id)?;
        Ok(id)
    }
}

/// First non-blank line, shortened for the card title.
fn entry_title(text: &str) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    truncate_chars(line, TITLE_MAX_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => format!("{}…", s[..end].trim_end()),
        None => s.to_string(),
    }
}
