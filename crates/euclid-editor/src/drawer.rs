//! Detail drawer: the selected node with its sources and derived outputs.

use euclid_core::id::NodeId;
use euclid_core::model::{CanvasNode, NodeKind};
use euclid_core::store::NodeStore;
use serde::Serialize;

/// Compact view of a connected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedNode {
    pub id: NodeId,
    pub label: &'static str,
    pub title: String,
    pub summary: String,
    pub status: String,
}

impl From<&CanvasNode> for ConnectedNode {
    fn from(node: &CanvasNode) -> Self {
        Self {
            id: node.id,
            label: node.kind.label(),
            title: node.title.clone(),
            summary: node.summary.clone(),
            status: node.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerView {
    pub id: NodeId,
    pub label: &'static str,
    pub title: String,
    pub summary: String,
    pub status: String,
    /// Content preview; journal entries have none.
    pub preview_heading: Option<&'static str>,
    pub preview: Option<String>,
    pub sources: Vec<ConnectedNode>,
    pub derived: Vec<ConnectedNode>,
    pub actions: &'static [&'static str],
}

/// Drawer actions offered for each node type.
pub fn actions_for(kind: NodeKind) -> &'static [&'static str] {
    match kind {
        NodeKind::Journal => &["Generate AI Draft", "Create Branch"],
        NodeKind::AiDraft => &["Publish", "Regenerate", "Edit"],
        NodeKind::Idea => &["Generate Draft", "Refine Idea"],
    }
}

fn preview(node: &CanvasNode) -> Option<(&'static str, String)> {
    let (heading, adjective) = match node.kind {
        NodeKind::Journal => return None,
        NodeKind::AiDraft => ("AI-Generated Content", "AI-generated"),
        NodeKind::Idea => ("Draft Content", "draft"),
    };
    let text = format!(
        "This is a preview of the {adjective} content for \"{}\".\n\n\
         The full content would be displayed here, showing the complete text \
         that was generated or written for this node.\n\n{}",
        node.title, node.summary
    );
    Some((heading, text))
}

/// Build the drawer for `selected`. `None` when nothing is selected or
/// the id no longer resolves.
pub fn drawer_view(store: &NodeStore, selected: Option<NodeId>) -> Option<DrawerView> {
    let node = store.get(selected?)?;
    let (preview_heading, preview) = match preview(node) {
        Some((h, p)) => (Some(h), Some(p)),
        None => (None, None),
    };

    Some(DrawerView {
        id: node.id,
        label: node.kind.label(),
        title: node.title.clone(),
        summary: node.summary.clone(),
        status: node.status.clone(),
        preview_heading,
        preview,
        sources: store.source_nodes(node.id).into_iter().map(ConnectedNode::from).collect(),
        derived: store.derived_nodes(node.id).into_iter().map(ConnectedNode::from).collect(),
        actions: actions_for(node.kind),
    })
}
