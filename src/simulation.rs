// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Simulation Core

use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::graph::{Graph, GraphError};
use crate::ripple::{Ripple, RippleRegistry};
use crate::topology::{Topology, TopologyOracle};
use crate::types::*;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),
    #[error("simulation already finished")]
    AlreadyFinished,
    #[error("topology covers {got} nodes but the graph has {expected}")]
    TopologyMismatch { expected: usize, got: usize },
}

// ─── Candidate ───────────────────────────────────────────────────────────────

/// A wavefront crossing into an unvisited node during the current tick.
#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    path: Vec<NodeId>,
    leftover_radius: f64,
    length: f64,
    state: RippleState,
}

/// Candidates buffered per contested node, both in first-generated order.
#[derive(Debug, Default)]
struct IncomingRipples {
    order: Vec<NodeId>,
    by_node: Vec<Vec<Candidate>>,
}

impl IncomingRipples {
    fn push(&mut self, node: NodeId, candidate: Candidate) {
        match self.order.iter().position(|&n| n == node) {
            Some(i) => self.by_node[i].push(candidate),
            None => {
                self.order.push(node);
                self.by_node.push(vec![candidate]);
            }
        }
    }

    fn drain(self) -> impl Iterator<Item = (NodeId, Vec<Candidate>)> {
        self.order.into_iter().zip(self.by_node)
    }
}

/// Winner at an accessible node: largest leftover radius, the wavefront that
/// crossed the edge earliest. Ties go to the first candidate.
fn select_for_active(candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates.into_iter().reduce(|best, c| {
        if c.leftover_radius > best.leftover_radius { c } else { best }
    })
}

/// Winner at an inaccessible node: smallest accumulated length. Ties go to
/// the first candidate.
fn select_for_inactive(candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates.into_iter().reduce(|best, c| if c.length < best.length { c } else { best })
}

// ─── RippleSimulation ────────────────────────────────────────────────────────

/// Tick-stepped ripple-spreading search from `source` to `destination`.
///
/// Each tick runs in a fixed order: oracle query, promotion, expansion of the
/// ripples that existed before the tick, collision resolution and ripple
/// creation, death check over all ripples, then the success and failure tests.
#[derive(Debug, Clone)]
pub struct RippleSimulation {
    graph: Graph,
    source: NodeId,
    destination: NodeId,
    speed: f64,
    config: EngineConfig,
    registry: RippleRegistry,
    tick: u64,
    outcome: Option<SearchOutcome>,
}

impl RippleSimulation {
    /// Validate the input and seed the source ripple.
    ///
    /// Fails with `GraphError::NoEdges` when the propagation speed is
    /// undefined, before any tick runs.
    pub fn new(graph: Graph, source: NodeId, destination: NodeId) -> Result<Self, SimulationError> {
        Self::with_config(graph, source, destination, EngineConfig::default())
    }

    pub fn with_config(
        graph: Graph,
        source: NodeId,
        destination: NodeId,
        config: EngineConfig,
    ) -> Result<Self, SimulationError> {
        let speed = graph.propagation_speed()?;
        graph.validate()?;
        graph.validate_endpoints(source, destination)?;

        let mut registry = RippleRegistry::new(graph.node_count());
        registry.claim(Ripple::origin(source));

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            source,
            destination,
            speed,
            "Ripple simulation initialised"
        );

        Ok(Self { graph, source, destination, speed, config, registry, tick: 0, outcome: None })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Last tick executed; 0 before the first step.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn registry(&self) -> &RippleRegistry {
        &self.registry
    }

    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Run ticks until success, exhaustion, or the configured tick limit.
    pub fn run(&mut self, oracle: &dyn TopologyOracle) -> Result<SearchOutcome, SimulationError> {
        if let Some(outcome) = &self.outcome {
            return Ok(outcome.clone());
        }
        loop {
            if let Some(outcome) = self.step(oracle)?.outcome {
                return Ok(outcome);
            }
        }
    }

    /// Advance exactly one tick.
    pub fn step(&mut self, oracle: &dyn TopologyOracle) -> Result<TickReport, SimulationError> {
        if self.outcome.is_some() {
            return Err(SimulationError::AlreadyFinished);
        }

        // A run with no live ripple left fails before spending another tick
        if !self.registry.any_live() {
            return Ok(self.finish_without_path(NoPathReason::Exhausted, Vec::new(), Vec::new(), Vec::new()));
        }

        let tick = self.tick + 1;
        let topology = oracle.topology_at(tick);
        if topology.node_count() != self.graph.node_count() {
            return Err(SimulationError::TopologyMismatch {
                expected: self.graph.node_count(),
                got: topology.node_count(),
            });
        }
        self.tick = tick;

        let promoted = self.promote_waiting(&topology);

        // Ripples created during this tick only start expanding next tick
        let nr = self.registry.len();
        let incoming = self.expand_active(nr, &topology);
        let claims = self.create_ripples(incoming, &topology);
        let died = self.mark_dead();

        debug!(
            tick,
            promoted = promoted.len(),
            claims = claims.len(),
            died = died.len(),
            ripples = self.registry.len(),
            "Tick processed"
        );

        if let Some(owner) = self.registry.owner(self.destination) {
            let result = self.extract_path(owner);
            info!(tick, length = result.length, hops = result.hops(), "Destination claimed");
            let outcome = SearchOutcome::Found(result);
            self.outcome = Some(outcome.clone());
            return Ok(self.report(promoted, claims, died, Some(outcome)));
        }

        if !self.registry.any_live() {
            return Ok(self.finish_without_path(NoPathReason::Exhausted, promoted, claims, died));
        }

        if self.config.max_ticks.is_some_and(|limit| tick >= limit) {
            return Ok(self.finish_without_path(NoPathReason::TickLimit, promoted, claims, died));
        }

        Ok(self.report(promoted, claims, died, None))
    }

    /// Waiting ripples whose epicenter is active again start expanding.
    fn promote_waiting(&mut self, topology: &Topology) -> Vec<RippleId> {
        let mut promoted = Vec::new();
        for id in 0..self.registry.len() {
            if let Some(ripple) = self.registry.get_mut(id) {
                if ripple.state == RippleState::Waiting && topology.is_active(ripple.epicenter) {
                    ripple.state = RippleState::Active;
                    promoted.push(id);
                }
            }
        }
        promoted
    }

    /// Grow the first `nr` active ripples and buffer every edge crossing.
    fn expand_active(&mut self, nr: usize, topology: &Topology) -> IncomingRipples {
        let speed = self.speed;
        let mut incoming = IncomingRipples::default();

        for id in 0..nr {
            let Some(ripple) = self.registry.get_mut(id) else { break };
            if ripple.state != RippleState::Active {
                continue;
            }
            let previous_radius = ripple.radius;
            ripple.radius += speed;
            let ripple = &self.registry.ripples()[id];

            for edge in self.graph.edges_from(ripple.epicenter) {
                if self.registry.is_visited(edge.to) {
                    continue;
                }
                // Wavefront crossed the edge end during this tick's growth
                if !(previous_radius < edge.length && edge.length <= ripple.radius) {
                    continue;
                }
                let (leftover_radius, state) = if topology.is_active(edge.to) {
                    (ripple.radius - edge.length, RippleState::Active)
                } else {
                    (0.0, RippleState::Waiting)
                };
                let mut path = ripple.path.clone();
                path.push(edge.to);
                trace!(from = ripple.epicenter, to = edge.to, ripple = id, ?state, "Candidate claim");
                incoming.push(
                    edge.to,
                    Candidate {
                        path,
                        leftover_radius,
                        length: ripple.accumulated_length + edge.length,
                        state,
                    },
                );
            }
        }
        incoming
    }

    /// Resolve each contested node and claim it for the winning candidate.
    fn create_ripples(&mut self, incoming: IncomingRipples, topology: &Topology) -> Vec<Claim> {
        let mut claims = Vec::new();
        for (node, candidates) in incoming.drain() {
            let contenders = candidates.len();
            let winner = if topology.is_active(node) {
                select_for_active(candidates)
            } else {
                select_for_inactive(candidates)
            };
            let Some(winner) = winner else { continue };

            let ripple = Ripple {
                epicenter: node,
                radius: winner.leftover_radius,
                accumulated_length: winner.length,
                path: winner.path,
                state: winner.state,
            };
            if let Some(id) = self.registry.claim(ripple) {
                claims.push(Claim { node, ripple: id, state: winner.state, length: winner.length, contenders });
            }
        }
        claims
    }

    /// Live ripples with no unvisited neighbor left become dead. Includes the
    /// ripples created this tick.
    fn mark_dead(&mut self) -> Vec<RippleId> {
        let mut died = Vec::new();
        for id in 0..self.registry.len() {
            let ripple = &self.registry.ripples()[id];
            if !ripple.is_live() {
                continue;
            }
            let exhausted = self.graph.neighbors(ripple.epicenter).all(|n| self.registry.is_visited(n));
            if exhausted {
                if let Some(ripple) = self.registry.get_mut(id) {
                    ripple.state = RippleState::Dead;
                }
                died.push(id);
            }
        }
        died
    }

    fn extract_path(&self, owner: RippleId) -> PathResult {
        let ripple = &self.registry.ripples()[owner];
        let mut costs = Vec::with_capacity(ripple.path.len());
        let mut total = 0.0;
        for (i, &node) in ripple.path.iter().enumerate() {
            if i > 0 {
                total += self.graph.edge_length(ripple.path[i - 1], node).unwrap_or(0.0);
            }
            costs.push(total);
        }
        PathResult {
            path: ripple.path.clone(),
            length: ripple.accumulated_length,
            ticks: self.tick,
            speed: self.speed,
            costs,
        }
    }

    fn finish_without_path(
        &mut self,
        reason: NoPathReason,
        promoted: Vec<RippleId>,
        claims: Vec<Claim>,
        died: Vec<RippleId>,
    ) -> TickReport {
        info!(tick = self.tick, ?reason, visited = self.registry.visited_count(), "No path found");
        let outcome = SearchOutcome::NoPathFound(NoPathReport { ticks: self.tick, reason });
        self.outcome = Some(outcome.clone());
        self.report(promoted, claims, died, Some(outcome))
    }

    fn report(
        &self,
        promoted: Vec<RippleId>,
        claims: Vec<Claim>,
        died: Vec<RippleId>,
        outcome: Option<SearchOutcome>,
    ) -> TickReport {
        TickReport {
            tick: self.tick,
            promoted,
            claims,
            died,
            waiting: self.registry.count_in(RippleState::Waiting),
            active: self.registry.count_in(RippleState::Active),
            dead: self.registry.count_in(RippleState::Dead),
            outcome,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
