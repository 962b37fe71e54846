//! Core data model for the canvas.
//!
//! The canvas holds an ordered list of node cards and a list of links
//! between them. Node positions live in canvas space; the `View` is the
//! camera (pan offset in screen pixels plus a zoom factor) that maps canvas
//! space onto the screen.

use crate::config::CanvasConfig;
use crate::id::NodeId;
use serde::{Deserialize, Serialize};

// ─── Nodes ───────────────────────────────────────────────────────────────

/// What a node card represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Journal,
    AiDraft,
    Idea,
}

impl NodeKind {
    /// Long label shown in the detail drawer badge.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Journal => "Journal Entry",
            NodeKind::AiDraft => "AI Draft",
            NodeKind::Idea => "Branch Idea",
        }
    }

    /// Short tag printed on the card header.
    pub fn card_tag(self) -> &'static str {
        match self {
            NodeKind::Journal => "Journal",
            NodeKind::AiDraft => "AI Draft",
            NodeKind::Idea => "Branch",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Journal => "journal",
            NodeKind::AiDraft => "ai-draft",
            NodeKind::Idea => "idea",
        }
    }
}

/// How a node is presented: a compact card or a large embedded editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeVariant {
    Surface,
    #[default]
    Default,
}

/// A card on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub title: String,
    pub summary: String,
    /// Free-text status label ("Live", "Draft", ...).
    pub status: String,
    /// Canvas-space position of the card centre.
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<NodeVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_width_rem: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl CanvasNode {
    pub fn new(id: NodeId, kind: NodeKind, title: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            summary: String::new(),
            status: String::new(),
            x,
            y,
            highlight: None,
            variant: None,
            surface_width_rem: None,
            content: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_surface(&self) -> bool {
        self.variant == Some(NodeVariant::Surface)
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.unwrap_or(false)
    }

    /// Content text, empty when the node carries none.
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

// ─── Links ───────────────────────────────────────────────────────────────

/// A directed connection between two nodes. Either end may dangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasLink {
    pub id: String,
    pub from: NodeId,
    pub to: NodeId,
}

impl CanvasLink {
    pub fn new(id: impl Into<String>, from: NodeId, to: NodeId) -> Self {
        Self {
            id: id.into(),
            from,
            to,
        }
    }
}

// ─── View ────────────────────────────────────────────────────────────────

/// Camera over canvas space: `screen = canvas * zoom + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl View {
    /// Pan by screen-pixel deltas. Unbounded.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Add `delta` to the zoom factor, clamped to the configured bounds.
    ///
    /// Zoom is anchored at the canvas origin, not the pointer, so content
    /// under the cursor shifts while zooming.
    pub fn zoom_by(&mut self, delta: f64, config: &CanvasConfig) {
        if delta.is_nan() {
            return;
        }
        self.zoom = config.clamp_zoom(self.zoom + delta);
    }

    /// Centre the recenter anchor inside a container of the given size.
    pub fn recentered(width: f64, height: f64, config: &CanvasConfig) -> Self {
        Self {
            x: width / 2.0 - config.recenter_anchor,
            y: height / 2.0 - config.recenter_anchor,
            zoom: 1.0,
        }
    }

    pub fn canvas_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.zoom + self.x, y * self.zoom + self.y)
    }

    pub fn screen_to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.x) / self.zoom, (y - self.y) / self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zoom_stays_within_bounds() {
        let config = CanvasConfig::default();
        for delta in [-1e9, -4.0, -0.95, -0.001, 0.0, 0.5, 3.99, 12.0, f64::INFINITY] {
            let mut view = View::default();
            view.zoom_by(delta, &config);
            assert!(
                (0.1..=5.0).contains(&view.zoom),
                "delta {delta} produced zoom {}",
                view.zoom
            );
        }
    }

    #[test]
    fn nan_zoom_delta_is_ignored() {
        let config = CanvasConfig::default();
        let mut view = View::default();
        view.zoom_by(f64::NAN, &config);
        assert_eq!(view.zoom, 1.0);
    }

    #[test]
    fn pan_is_unbounded() {
        let mut view = View::default();
        view.pan(1e12, -1e12);
        assert_eq!((view.x, view.y), (1e12, -1e12));
    }

    #[test]
    fn recenter_puts_anchor_mid_container() {
        let view = View::recentered(800.0, 600.0, &CanvasConfig::default());
        assert_eq!(view, View { x: -600.0, y: -700.0, zoom: 1.0 });
        assert_eq!(view.canvas_to_screen(1000.0, 1000.0), (400.0, 300.0));
    }

    #[test]
    fn screen_canvas_inverse() {
        let view = View { x: 40.0, y: -10.0, zoom: 2.5 };
        let (sx, sy) = view.canvas_to_screen(12.0, 8.0);
        let (cx, cy) = view.screen_to_canvas(sx, sy);
        assert!((cx - 12.0).abs() < 1e-9);
        assert!((cy - 8.0).abs() < 1e-9);
    }

    #[test]
    fn node_json_shape() {
        let node = CanvasNode::new(NodeId::intern("n1"), NodeKind::AiDraft, "Draft", 1.0, 2.0)
            .with_status("Draft");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "n1",
                "type": "ai-draft",
                "title": "Draft",
                "summary": "",
                "status": "Draft",
                "x": 1.0,
                "y": 2.0,
            })
        );
    }

    #[test]
    fn surface_node_fields_use_camel_case() {
        let mut node = CanvasNode::new(NodeId::intern("s1"), NodeKind::Journal, "S", 0.0, 0.0);
        node.variant = Some(NodeVariant::Surface);
        node.surface_width_rem = Some(58.0);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["variant"], "surface");
        assert_eq!(json["surfaceWidthRem"], 58.0);
        assert!(node.is_surface());
    }
}
