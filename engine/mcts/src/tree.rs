//! Node table with arena allocation.
//!
//! Nodes live in a contiguous Vec and are referenced by NodeId indices. A
//! second map resolves an information-state key to its node, so every path
//! that reaches the same information state shares one set of statistics. The
//! table is the sole owner of every node; edges store handles.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use engine_core::InfoKey;

use crate::node::{NodeId, RaveNode};

/// Information-state keyed arena of search nodes.
///
/// Grows monotonically and survives across decisions so knowledge accumulates
/// over a game. Call [`NodeTable::clear`] between independent games.
#[derive(Debug, Clone)]
pub struct NodeTable<A> {
    /// Arena storing all nodes
    nodes: Vec<RaveNode<A>>,

    index: HashMap<InfoKey, NodeId>,
}

impl<A> Default for NodeTable<A> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<A: Clone + Eq + Hash> NodeTable<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the node for `key`, creating it if needed, and make sure `legal`
    /// is registered at it.
    pub fn get_or_insert(&mut self, key: InfoKey, legal: &[A]) -> NodeId {
        if let Some(&id) = self.index.get(&key) {
            self.get_mut(id).ensure_actions(legal);
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RaveNode::from_legal(key, legal));
        self.index.insert(key, id);
        id
    }

    #[inline]
    pub fn lookup(&self, key: InfoKey) -> Option<NodeId> {
        self.index.get(&key).copied()
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &RaveNode<A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut RaveNode<A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RaveNode<A>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    /// Push one simulation's reward up its path.
    ///
    /// `path` lists (node, action taken at that node) from the root down. The
    /// walk runs from the deepest step to the root. Each step credits its own
    /// edge, then credits the AMAF statistics of every action seen deeper in
    /// the path that is registered at this node. The step's own action joins
    /// the deeper set afterwards.
    pub fn backpropagate(&mut self, path: &[(NodeId, A)], reward: f64) {
        let mut seen_after: HashSet<A> = HashSet::with_capacity(path.len());

        for (id, action) in path.iter().rev() {
            let node = self.get_mut(*id);
            node.backprop_edge(action, reward);
            for later in &seen_after {
                node.backprop_amaf(later, reward);
            }
            seen_after.insert(action.clone());
        }
    }

    /// Get statistics about the table for debugging.
    pub fn stats(&self) -> TableStats {
        TableStats {
            total_nodes: self.nodes.len(),
            total_visits: self.nodes.iter().map(|n| n.visits() as u64).sum(),
            total_edges: self.nodes.iter().map(|n| n.num_actions()).sum(),
        }
    }
}

/// Statistics about a node table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
    pub total_nodes: usize,
    pub total_visits: u64,
    pub total_edges: usize,
}
