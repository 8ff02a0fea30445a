//! Search node representation.
//!
//! One node per information state. A node keeps, for every action ever legal
//! at it, the classic edge statistics (visits, reward sum) used for `Q` and the
//! AMAF statistics used for the RAVE estimate. Children are handles into the
//! owning [`NodeTable`](crate::tree::NodeTable), never owned links.

use std::collections::HashMap;
use std::hash::Hash;

use engine_core::InfoKey;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Statistics of one (node, action) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeStats {
    /// Simulations that took this action at this node.
    pub visits: u32,

    /// Sum of rewards of those simulations.
    pub reward_sum: f64,

    /// Simulations in which this action occurred later in the path.
    pub amaf_visits: u32,

    /// Sum of rewards of those simulations.
    pub amaf_reward_sum: f64,

    /// Node reached by this action, once expanded.
    pub child: Option<NodeId>,
}

impl EdgeStats {
    /// `Q = reward_sum / visits`, or 0 when never taken.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / self.visits as f64
        }
    }

    /// `AMAF = amaf_reward_sum / amaf_visits`, or 0 when never credited.
    #[inline]
    pub fn amaf_mean(&self) -> f64 {
        if self.amaf_visits == 0 {
            0.0
        } else {
            self.amaf_reward_sum / self.amaf_visits as f64
        }
    }
}

/// AMAF blend weight `k / (k + max(1, n))`.
///
/// Close to 1 while a node is young and decays toward 0 as it accumulates
/// visits, handing control from the AMAF estimate to the per-edge mean.
#[inline]
pub fn rave_weight(rave_k: f64, node_visits: u32) -> f64 {
    rave_k / (rave_k + node_visits.max(1) as f64)
}

/// UCB1 exploration bonus `c * sqrt(ln(max(1, N)) / n_a)`.
///
/// Infinite for an untaken edge, so every action is tried once before
/// exploitation has any say. Uses raw edge visits, never the blended value.
#[inline]
pub fn exploration_bonus(exploration: f64, node_visits: u32, edge_visits: u32) -> f64 {
    if edge_visits == 0 {
        return f64::INFINITY;
    }
    let ln_n = (node_visits.max(1) as f64).ln();
    exploration * (ln_n / edge_visits as f64).sqrt()
}

/// A node in the search tree, keyed by information state.
#[derive(Debug, Clone)]
pub struct RaveNode<A> {
    key: InfoKey,

    /// Total visits, equal to the sum of edge visits.
    visits: u32,

    /// Actions in order of first registration. Selection scans in this order.
    actions: Vec<A>,

    /// Statistics parallel to `actions`.
    edges: Vec<EdgeStats>,

    index: HashMap<A, usize>,

    /// Registered actions not yet expanded.
    untried: Vec<A>,
}

impl<A: Clone + Eq + Hash> RaveNode<A> {
    /// Create an empty node for `key`.
    pub fn new(key: InfoKey) -> Self {
        Self {
            key,
            visits: 0,
            actions: Vec::new(),
            edges: Vec::new(),
            index: HashMap::new(),
            untried: Vec::new(),
        }
    }

    /// Create a node whose untried set is `legal`.
    pub fn from_legal(key: InfoKey, legal: &[A]) -> Self {
        let mut node = Self::new(key);
        node.ensure_actions(legal);
        node
    }

    /// Register actions not seen before at this node as untried.
    ///
    /// Determinizations can expose different legal moves at the same
    /// information state, so this runs on every visit, not only at creation.
    pub fn ensure_actions(&mut self, legal: &[A]) {
        for action in legal {
            if !self.index.contains_key(action) {
                self.insert(action.clone());
                self.untried.push(action.clone());
            }
        }
    }

    fn insert(&mut self, action: A) -> usize {
        let slot = self.actions.len();
        self.index.insert(action.clone(), slot);
        self.actions.push(action);
        self.edges.push(EdgeStats::default());
        slot
    }

    fn slot_or_insert(&mut self, action: &A) -> usize {
        match self.index.get(action) {
            Some(&slot) => slot,
            None => self.insert(action.clone()),
        }
    }

    #[inline]
    pub fn key(&self) -> InfoKey {
        self.key
    }

    #[inline]
    pub fn visits(&self) -> u32 {
        self.visits
    }

    #[inline]
    pub fn has_untried(&self) -> bool {
        !self.untried.is_empty()
    }

    pub fn untried(&self) -> &[A] {
        &self.untried
    }

    #[inline]
    pub fn has_action(&self, action: &A) -> bool {
        self.index.contains_key(action)
    }

    /// Number of registered actions.
    #[inline]
    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Registered actions with their statistics, in registration order.
    pub fn edges(&self) -> impl Iterator<Item = (&A, &EdgeStats)> {
        self.actions.iter().zip(self.edges.iter())
    }

    pub fn edge(&self, action: &A) -> Option<&EdgeStats> {
        self.index.get(action).map(|&slot| &self.edges[slot])
    }

    pub fn edge_mut(&mut self, action: &A) -> Option<&mut EdgeStats> {
        match self.index.get(action) {
            Some(&slot) => Some(&mut self.edges[slot]),
            None => None,
        }
    }

    /// Remove and return a uniformly random untried action.
    pub fn pop_untried(&mut self, rng: &mut ChaCha20Rng) -> Option<A> {
        if self.untried.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.untried.len());
        Some(self.untried.remove(idx))
    }

    /// Like [`pop_untried`](Self::pop_untried), restricted to actions in
    /// `legal`. Untried actions that are not legal right now stay untried.
    pub fn pop_untried_legal(&mut self, legal: &[A], rng: &mut ChaCha20Rng) -> Option<A> {
        let candidates: Vec<usize> = (0..self.untried.len())
            .filter(|&i| legal.contains(&self.untried[i]))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let idx = candidates[rng.gen_range(0..candidates.len())];
        Some(self.untried.remove(idx))
    }

    pub fn link_child(&mut self, action: &A, child: NodeId) {
        let slot = self.slot_or_insert(action);
        self.edges[slot].child = Some(child);
    }

    pub fn child_of(&self, action: &A) -> Option<NodeId> {
        self.edge(action).and_then(|edge| edge.child)
    }

    /// Mean edge reward, 0 for unknown or untaken actions.
    pub fn q(&self, action: &A) -> f64 {
        self.edge(action).map_or(0.0, EdgeStats::mean_reward)
    }

    /// Mean AMAF reward, 0 for unknown or uncredited actions.
    pub fn amaf(&self, action: &A) -> f64 {
        self.edge(action).map_or(0.0, EdgeStats::amaf_mean)
    }

    /// `Qmix = (1 - alpha) * Q + alpha * AMAF` at the current visit count.
    pub fn qmix(&self, action: &A, rave_k: f64) -> f64 {
        let alpha = rave_weight(rave_k, self.visits);
        (1.0 - alpha) * self.q(action) + alpha * self.amaf(action)
    }

    /// UCB1 over the RAVE-blended value.
    ///
    /// Score is `Qmix(a) + U(a)`; the first maximum in registration order
    /// wins. If nothing scores (NaN everywhere) a registered action is drawn
    /// uniformly. Returns `None` only for a node with no actions at all.
    pub fn select_action(
        &self,
        exploration: f64,
        rave_k: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<A> {
        self.select_where(|_| true, exploration, rave_k, rng)
    }

    /// [`select_action`](Self::select_action) over the registered actions
    /// that are also in `legal`.
    pub fn select_legal(
        &self,
        legal: &[A],
        exploration: f64,
        rave_k: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<A> {
        self.select_where(|action| legal.contains(action), exploration, rave_k, rng)
    }

    fn select_where(
        &self,
        allowed: impl Fn(&A) -> bool,
        exploration: f64,
        rave_k: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<A> {
        let alpha = rave_weight(rave_k, self.visits);

        let mut best: Option<usize> = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut candidates = Vec::new();
        for (slot, edge) in self.edges.iter().enumerate() {
            if !allowed(&self.actions[slot]) {
                continue;
            }
            candidates.push(slot);
            let qmix = (1.0 - alpha) * edge.mean_reward() + alpha * edge.amaf_mean();
            let score = qmix + exploration_bonus(exploration, self.visits, edge.visits);
            if score > best_score {
                best_score = score;
                best = Some(slot);
            }
        }

        match best {
            Some(slot) => Some(self.actions[slot].clone()),
            None if candidates.is_empty() => None,
            None => {
                let slot = candidates[rng.gen_range(0..candidates.len())];
                Some(self.actions[slot].clone())
            }
        }
    }

    /// Credit a simulation that took `action` here.
    pub fn backprop_edge(&mut self, action: &A, reward: f64) {
        let slot = self.slot_or_insert(action);
        self.visits += 1;
        let edge = &mut self.edges[slot];
        edge.visits += 1;
        edge.reward_sum += reward;
    }

    /// Credit `action` as played later in a simulation through this node.
    ///
    /// Only actions this node could itself have chosen are credited; returns
    /// whether the credit was applied.
    pub fn backprop_amaf(&mut self, action: &A, reward: f64) -> bool {
        match self.edge_mut(action) {
            Some(edge) => {
                edge.amaf_visits += 1;
                edge.amaf_reward_sum += reward;
                true
            }
            None => false,
        }
    }
}
