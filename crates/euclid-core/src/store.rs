//! Ordered node collection with an O(1) id lookup, plus the link list.
//!
//! Node order is append order and only matters for render stacking.
//! Nodes are never removed; the only in-place mutation is moving a node.
//! Every change bumps `version`, which derived data (render frames, drawer
//! lookups) use as a memoization key.

use crate::id::NodeId;
use crate::model::{CanvasLink, CanvasNode};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Connection lists are almost always tiny (0–3 entries).
pub type Connections<'a, T> = SmallVec<[&'a T; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A node with this id is already in the store.
    DuplicateId(NodeId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateId(id) => write!(f, "node id `{id}` is already in use"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<CanvasNode>,
    index: HashMap<NodeId, usize>,
    links: Vec<CanvasLink>,
    version: u64,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing nodes and links, rejecting duplicate ids.
    pub fn from_parts(nodes: Vec<CanvasNode>, links: Vec<CanvasLink>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for node in nodes {
            store.append(node)?;
        }
        store.links = links;
        Ok(store)
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[CanvasNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[CanvasLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&CanvasNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Stacking position of a node (0 = bottom).
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    // ─── Writes ──────────────────────────────────────────────────────────

    /// Append a node on top of the stack. Existing nodes are untouched.
    pub fn append(&mut self, node: CanvasNode) -> Result<(), StoreError> {
        if self.index.contains_key(&node.id) {
            return Err(StoreError::DuplicateId(node.id));
        }
        log::debug!("store: append {} ({})", node.id, node.kind.as_str());
        self.index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        self.version += 1;
        Ok(())
    }

    /// Append a batch atomically: either every node is added or none is.
    pub fn append_all(&mut self, nodes: impl IntoIterator<Item = CanvasNode>) -> Result<(), StoreError> {
        let batch: Vec<CanvasNode> = nodes.into_iter().collect();
        let mut seen = HashSet::with_capacity(batch.len());
        for node in &batch {
            if self.index.contains_key(&node.id) || !seen.insert(node.id) {
                return Err(StoreError::DuplicateId(node.id));
            }
        }
        for node in batch {
            self.append(node)?;
        }
        Ok(())
    }

    pub fn append_link(&mut self, link: CanvasLink) {
        self.links.push(link);
        self.version += 1;
    }

    /// Translate a node in canvas space. Returns `false` for unknown ids.
    pub fn move_node(&mut self, id: NodeId, dx: f64, dy: f64) -> bool {
        let Some(&i) = self.index.get(&id) else {
            return false;
        };
        let node = &mut self.nodes[i];
        node.x += dx;
        node.y += dy;
        self.version += 1;
        true
    }

    // ─── Connections ─────────────────────────────────────────────────────

    /// Links pointing at `id` (its sources).
    pub fn incoming(&self, id: NodeId) -> Connections<'_, CanvasLink> {
        self.links.iter().filter(|l| l.to == id).collect()
    }

    /// Links leaving `id` (its derived outputs).
    pub fn outgoing(&self, id: NodeId) -> Connections<'_, CanvasLink> {
        self.links.iter().filter(|l| l.from == id).collect()
    }

    /// Existing nodes that link to `id`, in store order.
    pub fn source_nodes(&self, id: NodeId) -> Connections<'_, CanvasNode> {
        let incoming = self.incoming(id);
        self.nodes
            .iter()
            .filter(|n| incoming.iter().any(|l| l.from == n.id))
            .collect()
    }

    /// Existing nodes that `id` links to, in store order.
    pub fn derived_nodes(&self, id: NodeId) -> Connections<'_, CanvasNode> {
        let outgoing = self.outgoing(id);
        self.nodes
            .iter()
            .filter(|n| outgoing.iter().any(|l| l.to == n.id))
            .collect()
    }

    /// Links whose both ends resolve, paired with their endpoints.
    pub fn resolved_links(&self) -> impl Iterator<Item = (&CanvasLink, &CanvasNode, &CanvasNode)> {
        self.links.iter().filter_map(|link| {
            let from = self.get(link.from)?;
            let to = self.get(link.to)?;
            Some((link, from, to))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;
    use pretty_assertions::assert_eq;

    fn node(id: &str, x: f64, y: f64) -> CanvasNode {
        CanvasNode::new(NodeId::intern(id), NodeKind::Idea, id, x, y)
    }

    #[test]
    fn append_keeps_order_and_lookup() {
        let mut store = NodeStore::new();
        store.append(node("a", 0.0, 0.0)).unwrap();
        store.append(node("b", 5.0, 5.0)).unwrap();

        let order: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert_eq!(store.get(NodeId::intern("b")).map(|n| n.x), Some(5.0));
        assert_eq!(store.position(NodeId::intern("a")), Some(0));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut store = NodeStore::new();
        store.append(node("dup", 0.0, 0.0)).unwrap();
        let err = store.append(node("dup", 1.0, 1.0)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(NodeId::intern("dup")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(NodeId::intern("dup")).map(|n| n.x), Some(0.0));
    }

    #[test]
    fn batch_append_is_all_or_nothing() {
        let mut store = NodeStore::new();
        store.append(node("x1", 0.0, 0.0)).unwrap();
        let result = store.append_all([node("x2", 0.0, 0.0), node("x1", 0.0, 0.0)]);
        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert!(!store.contains(NodeId::intern("x2")));
    }

    #[test]
    fn move_bumps_version() {
        let mut store = NodeStore::new();
        store.append(node("m", 1.0, 1.0)).unwrap();
        let before = store.version();
        assert!(store.move_node(NodeId::intern("m"), 2.0, -3.0));
        assert!(store.version() > before);
        let n = store.get(NodeId::intern("m")).unwrap();
        assert_eq!((n.x, n.y), (3.0, -2.0));
        assert!(!store.move_node(NodeId::intern("missing-node"), 1.0, 1.0));
    }

    #[test]
    fn connections_skip_dangling_ends() {
        let mut store = NodeStore::new();
        store.append(node("src", 0.0, 0.0)).unwrap();
        store.append(node("dst", 0.0, 0.0)).unwrap();
        store.append_link(CanvasLink::new("l1", NodeId::intern("src"), NodeId::intern("dst")));
        store.append_link(CanvasLink::new("l2", NodeId::intern("ghost"), NodeId::intern("dst")));

        assert_eq!(store.incoming(NodeId::intern("dst")).len(), 2);
        let sources: Vec<&str> = store
            .source_nodes(NodeId::intern("dst"))
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(sources, vec!["src"]);
        let derived: Vec<&str> = store
            .derived_nodes(NodeId::intern("src"))
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(derived, vec!["dst"]);
        assert_eq!(store.resolved_links().count(), 1);
    }
}
