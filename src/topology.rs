// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Topology Oracles

//! Time-varying node accessibility.
//!
//! The engine asks a [`TopologyOracle`] once per tick which nodes are usable.
//! A [`Topology`] is an active mask over nodes; the live edge set is derived
//! from it on demand instead of copying the graph.

use serde::{Deserialize, Serialize};

use crate::config::ObstacleConfig;
use crate::graph::{Edge, Graph};
use crate::types::{NodeId, Point};

// ─── Topology ────────────────────────────────────────────────────────────────

/// Node accessibility at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    active: Vec<bool>,
}

impl Topology {
    pub fn all_active(node_count: usize) -> Self {
        Self { active: vec![true; node_count] }
    }

    /// Everything active except `blocked`. Ids past `node_count` are ignored.
    pub fn with_blocked(node_count: usize, blocked: impl IntoIterator<Item = NodeId>) -> Self {
        let mut topology = Self::all_active(node_count);
        for node in blocked {
            if let Some(slot) = topology.active.get_mut(node) {
                *slot = false;
            }
        }
        topology
    }

    pub fn node_count(&self) -> usize {
        self.active.len()
    }

    /// Unknown nodes count as inactive.
    pub fn is_active(&self, node: NodeId) -> bool {
        self.active.get(node).copied().unwrap_or(false)
    }

    pub fn active_nodes(&self) -> Vec<NodeId> {
        (0..self.active.len()).filter(|&n| self.active[n]).collect()
    }

    pub fn inactive_nodes(&self) -> Vec<NodeId> {
        (0..self.active.len()).filter(|&n| !self.active[n]).collect()
    }

    /// An edge is live when both endpoints are active.
    pub fn is_live_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.is_active(from) && self.is_active(to)
    }

    /// Live outgoing edges of `node`.
    pub fn live_edges<'a>(&'a self, graph: &'a Graph, node: NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        graph
            .edges_from(node)
            .iter()
            .filter(move |e| self.is_live_edge(node, e.to))
    }

    pub fn live_edge_count(&self, graph: &Graph) -> usize {
        (0..graph.node_count()).map(|n| self.live_edges(graph, n).count()).sum()
    }
}

// ─── TopologyOracle ──────────────────────────────────────────────────────────

/// Deterministic tick -> accessibility function.
pub trait TopologyOracle {
    fn topology_at(&self, tick: u64) -> Topology;
}

impl<F> TopologyOracle for F
where
    F: Fn(u64) -> Topology,
{
    fn topology_at(&self, tick: u64) -> Topology {
        self(tick)
    }
}

/// Every node is always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticTopology {
    pub node_count: usize,
}

impl StaticTopology {
    pub fn new(node_count: usize) -> Self {
        Self { node_count }
    }
}

impl TopologyOracle for StaticTopology {
    fn topology_at(&self, _tick: u64) -> Topology {
        Topology::all_active(self.node_count)
    }
}

// ─── BlockSchedule ───────────────────────────────────────────────────────────

/// Inclusive tick window during which a node is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockWindow {
    pub node: NodeId,
    pub first_tick: u64,
    pub last_tick: u64,
}

/// Explicit per-node blocking windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSchedule {
    pub node_count: usize,
    pub windows: Vec<BlockWindow>,
}

impl BlockSchedule {
    pub fn new(node_count: usize) -> Self {
        Self { node_count, windows: Vec::new() }
    }

    pub fn block(mut self, node: NodeId, first_tick: u64, last_tick: u64) -> Self {
        self.windows.push(BlockWindow { node, first_tick, last_tick });
        self
    }

    /// Block `node` from tick 0 onwards, forever.
    pub fn block_forever(self, node: NodeId) -> Self {
        self.block(node, 0, u64::MAX)
    }
}

impl TopologyOracle for BlockSchedule {
    fn topology_at(&self, tick: u64) -> Topology {
        let blocked = self
            .windows
            .iter()
            .filter(|w| (w.first_tick..=w.last_tick).contains(&tick))
            .map(|w| w.node);
        Topology::with_blocked(self.node_count, blocked)
    }
}

// ─── MovingObstacle ──────────────────────────────────────────────────────────

/// A disc sweeping across the node coordinates at constant velocity.
/// Nodes within `radius` of the centre (inclusive) are inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingObstacle {
    coords: Vec<Point>,
    start: Point,
    velocity: Point,
    radius: f64,
}

impl MovingObstacle {
    pub fn new(coords: Vec<Point>, config: &ObstacleConfig) -> Self {
        let norm = config.heading.distance(&Point::default());
        let velocity = if norm > 0.0 {
            Point::new(
                config.heading.x / norm * config.speed,
                config.heading.y / norm * config.speed,
            )
        } else {
            Point::default()
        };
        Self { coords, start: config.start, velocity, radius: config.radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn centre_at(&self, tick: u64) -> Point {
        let t = tick as f64;
        Point::new(self.start.x + self.velocity.x * t, self.start.y + self.velocity.y * t)
    }

    pub fn covers(&self, point: &Point, tick: u64) -> bool {
        point.distance(&self.centre_at(tick)) <= self.radius
    }
}

impl TopologyOracle for MovingObstacle {
    fn topology_at(&self, tick: u64) -> Topology {
        let blocked = self
            .coords
            .iter()
            .enumerate()
            .filter(|(_, p)| self.covers(p, tick))
            .map(|(n, _)| n);
        Topology::with_blocked(self.coords.len(), blocked)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_edges_require_both_endpoints_active() {
        let graph = Graph::from_edges(3, &[(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)]);
        let topology = Topology::with_blocked(3, [2]);

        let live: Vec<NodeId> = topology.live_edges(&graph, 0).map(|e| e.to).collect();
        assert_eq!(live, vec![1]);
        assert_eq!(topology.live_edge_count(&graph), 1);
        assert_eq!(topology.active_nodes(), vec![0, 1]);
        assert_eq!(topology.inactive_nodes(), vec![2]);
    }

    #[test]
    fn schedule_windows_are_inclusive() {
        let schedule = BlockSchedule::new(4).block(1, 1, 2);
        assert!(schedule.topology_at(0).is_active(1));
        assert!(!schedule.topology_at(1).is_active(1));
        assert!(!schedule.topology_at(2).is_active(1));
        assert!(schedule.topology_at(3).is_active(1));
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |tick: u64| Topology::with_blocked(2, if tick % 2 == 0 { vec![0] } else { vec![] });
        assert!(!oracle.topology_at(4).is_active(0));
        assert!(oracle.topology_at(5).is_active(0));
    }

    #[test]
    fn obstacle_moves_along_heading() {
        let obstacle = MovingObstacle::new(Vec::new(), &ObstacleConfig::default());
        let c = obstacle.centre_at(1);
        let step = 6.0 / 2f64.sqrt();
        assert!((c.x - (90.0 - step)).abs() < 1e-9);
        assert!((c.y - step).abs() < 1e-9);
    }

    #[test]
    fn obstacle_blocks_nodes_inside_disc() {
        let coords = vec![Point::new(90.0, 0.0), Point::new(90.0, 15.0), Point::new(0.0, 0.0)];
        let obstacle = MovingObstacle::new(coords, &ObstacleConfig::default());

        let t0 = obstacle.topology_at(0);
        assert_eq!(t0.inactive_nodes(), vec![0, 1]);

        // Far side of the arena by tick 20
        let t20 = obstacle.topology_at(20);
        assert!(t20.is_active(0));
        assert!(t20.is_active(2));
    }
}
