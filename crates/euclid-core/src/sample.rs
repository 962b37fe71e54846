//! Demo board used by the host when it starts without user content.

use crate::id::NodeId;
use crate::model::{CanvasLink, CanvasNode, NodeKind, NodeVariant};
use crate::store::{NodeStore, StoreError};

pub fn sample_nodes() -> Vec<CanvasNode> {
    let mut journal = CanvasNode::new(NodeId::intern("node-journal"), NodeKind::Journal, "Journal surface", 35.0, 58.0)
        .with_summary("Canvas-native writing + drafting")
        .with_status("Live");
    journal.highlight = Some(true);
    journal.variant = Some(NodeVariant::Surface);
    journal.surface_width_rem = Some(58.0);

    vec![
        journal,
        CanvasNode::new(NodeId::intern("node-linkedin"), NodeKind::AiDraft, "LinkedIn draft", 74.0, 24.0)
            .with_summary("Highlights focus sprints + leadership notes.")
            .with_status("AI draft · Needs review"),
        CanvasNode::new(NodeId::intern("node-thread"), NodeKind::Idea, "Thread branch", 78.0, 66.0)
            .with_summary("Break entry into 5-s part mini-insights.")
            .with_status("Manual tweaks in progress"),
        CanvasNode::new(NodeId::intern("node-voice"), NodeKind::AiDraft, "Voice summary", 20.0, 25.0)
            .with_summary("Warm + direct tone kit synced last night.")
            .with_status("Voice profile ready"),
    ]
}

pub fn sample_links() -> Vec<CanvasLink> {
    vec![
        CanvasLink::new(
            "link-journal-linkedin",
            NodeId::intern("node-journal"),
            NodeId::intern("node-linkedin"),
        ),
        CanvasLink::new(
            "link-journal-thread",
            NodeId::intern("node-journal"),
            NodeId::intern("node-thread"),
        ),
    ]
}

impl NodeStore {
    /// The four-card demo board with its two links.
    pub fn sample() -> Result<Self, StoreError> {
        NodeStore::from_parts(sample_nodes(), sample_links())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_board_is_wired() {
        let store = NodeStore::sample().unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.links().len(), 2);
        let derived = store.derived_nodes(NodeId::intern("node-journal"));
        assert_eq!(derived.len(), 2);
        assert!(store.get(NodeId::intern("node-journal")).is_some_and(|n| n.is_surface()));
    }

    #[test]
    fn duplicate_sample_ids_are_rejected() {
        let mut nodes = sample_nodes();
        nodes.push(nodes[1].clone());
        let err = NodeStore::from_parts(nodes, sample_links()).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(NodeId::intern("node-linkedin")));
    }
}
