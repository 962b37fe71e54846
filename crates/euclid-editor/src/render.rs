//! Render surface: derives what the host should draw from the view, the
//! node store and the selection. Owns no state beyond a memoized frame.
//!
//! Cards are centred on their canvas position. Links are emitted in canvas
//! space (the host applies the view transform to the link layer as a
//! whole), and links with a missing endpoint are skipped.

use crate::session::CanvasSession;
use euclid_core::config::CanvasConfig;
use euclid_core::id::NodeId;
use euclid_core::model::{CanvasNode, NodeKind, View};
use euclid_core::store::NodeStore;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::Serialize;

/// The camera as an affine map from canvas space to screen space.
pub fn view_transform(view: &View) -> Affine {
    Affine::translate(Vec2::new(view.x, view.y)) * Affine::scale(view.zoom)
}

/// Dot-grid background: spacing scales with zoom, origin follows the pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPattern {
    pub spacing: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPlacement {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub tag: &'static str,
    pub title: String,
    pub summary: String,
    pub status: String,
    /// Canvas-space centre.
    pub x: f64,
    pub y: f64,
    /// Nominal canvas-space footprint.
    pub width: f64,
    pub height: f64,
    pub surface: bool,
    pub highlighted: bool,
    pub selected: bool,
    /// Status dot colour: live statuses get the "live" dot.
    pub live: bool,
}

impl CardPlacement {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSegment {
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub view: View,
    /// `[a, b, c, d, e, f]` coefficients of the canvas → screen transform.
    pub transform: [f64; 6],
    pub grid: GridPattern,
    pub links: Vec<LinkSegment>,
    /// Bottom-most first.
    pub cards: Vec<CardPlacement>,
    pub node_count: usize,
}

/// Nominal canvas-space size of a card.
pub fn card_size(node: &CanvasNode, config: &CanvasConfig) -> Size {
    if node.is_surface() {
        let rem = node.surface_width_rem.unwrap_or(config.surface_width_rem);
        Size::new(rem * config.rem, config.surface_height)
    } else {
        Size::new(config.card_size.0, config.card_size.1)
    }
}

pub fn build_frame(store: &NodeStore, view: &View, selected: Option<NodeId>, config: &CanvasConfig) -> RenderFrame {
    let links = store
        .resolved_links()
        .map(|(link, from, to)| LinkSegment {
            id: link.id.clone(),
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        })
        .collect();

    let cards = store
        .nodes()
        .iter()
        .map(|node| {
            let size = card_size(node, config);
            CardPlacement {
                id: node.id,
                kind: node.kind,
                tag: node.kind.card_tag(),
                title: node.title.clone(),
                summary: node.summary.clone(),
                status: node.status.clone(),
                x: node.x,
                y: node.y,
                width: size.width,
                height: size.height,
                surface: node.is_surface(),
                highlighted: node.is_highlighted(),
                selected: selected == Some(node.id),
                live: node.status.contains("Live"),
            }
        })
        .collect();

    RenderFrame {
        view: *view,
        transform: view_transform(view).as_coeffs(),
        grid: GridPattern {
            spacing: config.grid_spacing * view.zoom,
            offset_x: view.x,
            offset_y: view.y,
        },
        links,
        cards,
        node_count: store.len(),
    }
}

/// Topmost card under the screen point `(sx, sy)`, if any.
pub fn hit_test(frame: &RenderFrame, sx: f64, sy: f64) -> Option<NodeId> {
    let canvas_point = view_transform(&frame.view).inverse() * Point::new(sx, sy);
    // Last painted = topmost
    frame
        .cards
        .iter()
        .rev()
        .find(|card| card.bounds().contains(canvas_point))
        .map(|card| card.id)
}

#[derive(Debug, Clone, PartialEq)]
struct FrameKey {
    version: u64,
    view: View,
    selected: Option<NodeId>,
}

/// Memoizes `build_frame` on (store version, view, selection).
#[derive(Default)]
pub struct RenderSurface {
    cached: Option<(FrameKey, RenderFrame)>,
    builds: u64,
}

impl RenderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many frames have been built so far.
    pub fn build_count(&self) -> u64 {
        self.builds
    }

    pub fn frame(&mut self, session: &CanvasSession) -> &RenderFrame {
        let key = FrameKey {
            version: session.store.version(),
            view: session.view,
            selected: session.selected(),
        };
        if self.cached.as_ref().is_none_or(|(k, _)| *k != key) {
            self.cached = None;
            self.builds += 1;
        }
        let (_, frame) = self.cached.get_or_insert_with(|| {
            log::trace!("render: rebuilding frame for store v{}", key.version);
            let frame = build_frame(&session.store, &session.view, key.selected, &session.config);
            (key, frame)
        });
        frame
    }
}
