//! Canvas interaction controller.
//!
//! Translates pointer and wheel input into `CanvasMutation` commands that the
//! `CanvasSession` applies. The controller owns only gesture state; the view
//! and node store live in the session.
//!
//! ## Gestures
//!
//! | Input | Idle | DraggingCanvas | DraggingNode |
//! |-------|------|----------------|--------------|
//! | **Down on node** | → DraggingNode | · | · |
//! | **Down on canvas** | → DraggingCanvas | · | · |
//! | **Move** | ignored | pan by Δ | move node by Δ / zoom |
//! | **Up / Leave** | → Idle | → Idle | → Idle |
//! | **Wheel + ⌘/Ctrl** | zoom | zoom | zoom |
//! | **Wheel** | pan by −Δ | pan by −Δ | pan by −Δ |

use crate::input::InputEvent;
use euclid_core::config::CanvasConfig;
use euclid_core::id::NodeId;
use euclid_core::model::View;
use smallvec::{SmallVec, smallvec};

/// A state change requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMutation {
    /// Pan the view by screen-pixel deltas.
    Pan { dx: f64, dy: f64 },
    /// Add `delta` to the zoom factor (clamped by the view).
    Zoom { delta: f64 },
    /// Move a node by canvas-space deltas.
    MoveNode { id: NodeId, dx: f64, dy: f64 },
    /// Select a node and open the detail drawer.
    Select { id: NodeId },
}

pub type Mutations = SmallVec<[CanvasMutation; 1]>;

/// What the pointer is currently doing. Canvas pan and node drag are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingCanvas,
    DraggingNode(NodeId),
}

pub struct InteractionController {
    state: DragState,
    /// Last pointer position seen during the gesture; move deltas are taken
    /// from here, not from the origin.
    last_x: f64,
    last_y: f64,
    /// Pointer-down position of the current gesture.
    origin_x: f64,
    origin_y: f64,
    /// Latched once the pointer strays past the drag threshold. Reset on
    /// every pointer-down; read by the click that follows the release.
    dragged: bool,
    drag_threshold: f64,
    wheel_zoom_sensitivity: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl InteractionController {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            state: DragState::Idle,
            last_x: 0.0,
            last_y: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            dragged: false,
            drag_threshold: config.drag_threshold,
            wheel_zoom_sensitivity: config.wheel_zoom_sensitivity,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging_canvas(&self) -> bool {
        self.state == DragState::DraggingCanvas
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.state {
            DragState::DraggingNode(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the most recent gesture travelled past the drag threshold.
    pub fn was_drag(&self) -> bool {
        self.dragged
    }

    /// Handle an input event. `hit_node` is the card under the pointer, if
    /// any; `view` supplies the current zoom for node-drag scaling.
    pub fn handle(&mut self, event: &InputEvent, hit_node: Option<NodeId>, view: &View) -> Mutations {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.last_x = *x;
                self.last_y = *y;
                self.origin_x = *x;
                self.origin_y = *y;
                self.dragged = false;
                self.state = match hit_node {
                    Some(id) => DragState::DraggingNode(id),
                    None => DragState::DraggingCanvas,
                };
                log::debug!("interaction: pointer down → {:?}", self.state);
                SmallVec::new()
            }
            InputEvent::PointerMove { x, y } => {
                if self.state == DragState::Idle {
                    return SmallVec::new();
                }

                let dx = x - self.last_x;
                let dy = y - self.last_y;
                self.last_x = *x;
                self.last_y = *y;

                if !self.dragged {
                    let dist = (x - self.origin_x).hypot(y - self.origin_y);
                    if dist > self.drag_threshold {
                        self.dragged = true;
                    }
                }

                log::trace!("interaction: move Δ=({dx}, {dy}) in {:?}", self.state);
                match self.state {
                    DragState::DraggingCanvas => smallvec![CanvasMutation::Pan { dx, dy }],
                    DragState::DraggingNode(id) => smallvec![CanvasMutation::MoveNode {
                        id,
                        dx: dx / view.zoom,
                        dy: dy / view.zoom,
                    }],
                    DragState::Idle => SmallVec::new(),
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if self.state != DragState::Idle {
                    log::debug!("interaction: release {:?} (drag: {})", self.state, self.dragged);
                }
                self.state = DragState::Idle;
                SmallVec::new()
            }
            InputEvent::Wheel { dx, dy, modifiers } => {
                if modifiers.command() {
                    smallvec![CanvasMutation::Zoom {
                        delta: -dy * self.wheel_zoom_sensitivity,
                    }]
                } else {
                    smallvec![CanvasMutation::Pan { dx: -dx, dy: -dy }]
                }
            }
            InputEvent::Click => match hit_node {
                // A click that ends a drag must not select.
                Some(id) if !self.dragged => smallvec![CanvasMutation::Select { id }],
                _ => SmallVec::new(),
            },
        }
    }
}
