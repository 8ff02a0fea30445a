//! Search controller.
//!
//! Each decision runs iterations until the budget is spent:
//! 1. Determinize: sample a concrete state consistent with the observation
//! 2. Selection/Expansion: descend by UCB1 + RAVE, adding one node
//! 3. Rollout: play out with the epsilon-greedy heuristic policy
//! 4. Backpropagation: update edge and AMAF statistics along the path
//!
//! The recommended action is the most visited legal root action.

use std::time::{Duration, Instant};

use engine_core::{Determinizer, ForwardModel, GameState, Heuristic, Player, PlayerError, PlayerId};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::node::NodeId;
use crate::rollout::RolloutPolicy;
use crate::tree::NodeTable;

/// Errors that can occur during search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal actions available")]
    NoLegalActions,

    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

impl From<SearchError> for PlayerError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::NoLegalActions => PlayerError::NoLegalActions,
            other => PlayerError::Search(other.to_string()),
        }
    }
}

/// Result of one decision.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Recommended action
    pub action: A,

    /// Iterations completed within the budget
    pub iterations: u32,

    /// Wall-clock time spent, including the final recommendation
    pub elapsed: Duration,

    /// Root visits after the search, including earlier decisions
    pub root_visits: u32,

    /// Mean edge reward of the recommended action
    pub value: f64,
}

/// Search agent: owns the node table, the RNG and the collaborators.
///
/// One agent per seat. The node table is mutated without synchronization, so
/// agents must not share it.
#[derive(Debug)]
pub struct MctsAgent<S: GameState, F, D, H> {
    id: PlayerId,
    config: SearchConfig,
    rollout: RolloutPolicy,
    model: F,
    determinizer: D,
    heuristic: H,
    table: NodeTable<S::Action>,
    rng: ChaCha20Rng,
}

impl<S, F, D, H> MctsAgent<S, F, D, H>
where
    S: GameState,
    F: ForwardModel<S>,
    D: Determinizer<S>,
    H: Heuristic<S>,
{
    /// Create an agent for seat `id`.
    pub fn new(
        id: PlayerId,
        config: SearchConfig,
        model: F,
        determinizer: D,
        heuristic: H,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            id,
            rollout: RolloutPolicy::from_config(&config),
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            config,
            model,
            determinizer,
            heuristic,
            table: NodeTable::new(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn table(&self) -> &NodeTable<S::Action> {
        &self.table
    }

    /// Forget everything learned so far. Call between independent games.
    pub fn clear_table(&mut self) {
        self.table.clear();
    }

    /// Search from `observation` and recommend one of `legal`.
    pub fn search(
        &mut self,
        observation: &S,
        legal: &[S::Action],
    ) -> Result<SearchResult<S::Action>, SearchError> {
        if legal.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let root = self.table.get_or_insert(observation.info_key(self.id), legal);
        let started = Instant::now();
        let mut iterations = 0u32;

        while !self.config.budget.is_exhausted(started, iterations) {
            let mut state = self
                .determinizer
                .determinize(observation, self.id, &mut self.rng);
            let mut model = self.model.clone();
            self.simulate(root, &mut state, &mut model);
            iterations += 1;
        }

        let action = self.recommend(root, legal);
        let node = self.table.get(root);
        let result = SearchResult {
            value: node.q(&action),
            root_visits: node.visits(),
            action,
            iterations,
            elapsed: started.elapsed(),
        };

        debug!(
            player = self.id,
            iterations,
            elapsed_ms = result.elapsed.as_millis() as u64,
            root_visits = result.root_visits,
            value = result.value,
            table_nodes = self.table.len(),
            action = ?result.action,
            "search complete"
        );

        Ok(result)
    }

    /// Run one iteration rooted at `root` on a determinized `state`.
    /// Returns the reward that was backpropagated.
    pub fn simulate(&mut self, root: NodeId, state: &mut S, model: &mut F) -> f64 {
        let mut path: Vec<(NodeId, S::Action)> = Vec::new();
        let mut current = root;

        while !state.is_terminal() {
            let legal = model.compute_available_actions(state);
            let node = self.table.get_mut(current);
            node.ensure_actions(&legal);

            if let Some(action) = node.pop_untried_legal(&legal, &mut self.rng) {
                model.next(state, &action);
                let child_legal = model.compute_available_actions(state);
                let child = self
                    .table
                    .get_or_insert(state.info_key(self.id), &child_legal);
                self.table.get_mut(current).link_child(&action, child);
                path.push((current, action));
                break;
            }

            let Some(action) = node.select_legal(
                &legal,
                self.config.exploration,
                self.config.rave_k,
                &mut self.rng,
            ) else {
                break;
            };
            model.next(state, &action);
            let child = self.table.get(current).child_of(&action);
            path.push((current, action));
            match child {
                Some(child) => current = child,
                None => break,
            }
        }

        let reward = self
            .rollout
            .rollout(state, model, &self.heuristic, self.id, &mut self.rng);
        self.table.backpropagate(&path, reward);

        trace!(depth = path.len(), reward, "simulation complete");
        reward
    }

    /// Most visited legal root action, ties broken by higher mean reward.
    /// Uniformly random when no legal action has been taken yet.
    fn recommend(&mut self, root: NodeId, legal: &[S::Action]) -> S::Action {
        let node = self.table.get(root);

        let mut best: Option<(&S::Action, u32, f64)> = None;
        for action in legal {
            let visits = node.edge(action).map_or(0, |edge| edge.visits);
            let q = node.q(action);
            let better = match best {
                None => true,
                Some((_, best_visits, best_q)) => {
                    visits > best_visits || (visits == best_visits && q > best_q)
                }
            };
            if better {
                best = Some((action, visits, q));
            }
        }

        match best {
            Some((action, visits, _)) if visits > 0 => action.clone(),
            _ => legal[self.rng.gen_range(0..legal.len())].clone(),
        }
    }
}

impl<S, F, D, H> Player<S> for MctsAgent<S, F, D, H>
where
    S: GameState,
    F: ForwardModel<S>,
    D: Determinizer<S> + Clone,
    H: Heuristic<S> + Clone,
{
    fn player_id(&self) -> PlayerId {
        self.id
    }

    fn select_action(
        &mut self,
        observation: &S,
        actions: &[S::Action],
    ) -> Result<S::Action, PlayerError> {
        Ok(self.search(observation, actions)?.action)
    }

    fn copy(&mut self) -> Self {
        let seed = self.rng.next_u64();
        let config = self.config.clone().with_seed(seed);
        Self {
            id: self.id,
            rollout: self.rollout,
            rng: ChaCha20Rng::seed_from_u64(seed),
            config,
            model: self.model.clone(),
            determinizer: self.determinizer.clone(),
            heuristic: self.heuristic.clone(),
            table: NodeTable::new(),
        }
    }
}
