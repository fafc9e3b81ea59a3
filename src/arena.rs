// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Arena Planner

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::{EngineConfig, ObstacleConfig};
use crate::network::Network;
use crate::simulation::{RippleSimulation, SimulationError};
use crate::topology::{MovingObstacle, TopologyOracle};
use crate::types::*;

// ─── ArenaPlanner struct ─────────────────────────────────────────────────────

/// A network, the obstacle sweeping across it, and the search running on it.
#[wasm_bindgen]
pub struct ArenaPlanner {
    pub(crate) network: Network,
    pub(crate) obstacle: MovingObstacle,
    pub(crate) engine: EngineConfig,
    pub(crate) sim: RippleSimulation,
}

// ─── TimelineFrame ───────────────────────────────────────────────────────────

/// Rendering data for one tick of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub tick: u64,
    pub obstacle_centre: Point,
    pub obstacle_radius: f64,
    pub inactive: Vec<NodeId>,
    /// Part of the final path the wavefront has covered by this tick.
    pub prefix: Vec<NodeId>,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl ArenaPlanner {
    pub fn from_network(
        network: Network,
        obstacle: &ObstacleConfig,
        engine: EngineConfig,
    ) -> Result<Self, SimulationError> {
        network.validate()?;
        let sim = RippleSimulation::with_config(
            network.graph.clone(),
            network.source,
            network.destination,
            engine.clone(),
        )?;
        let obstacle = MovingObstacle::new(network.coords.clone(), obstacle);
        Ok(Self { network, obstacle, engine, sim })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn obstacle(&self) -> &MovingObstacle {
        &self.obstacle
    }

    pub fn simulation(&self) -> &RippleSimulation {
        &self.sim
    }

    pub fn tick_core(&mut self) -> Result<TickReport, SimulationError> {
        self.sim.step(&self.obstacle)
    }

    pub fn run_core(&mut self) -> Result<SearchOutcome, SimulationError> {
        self.sim.run(&self.obstacle)
    }

    /// Restart the search from tick 0 on the same network and obstacle.
    pub fn reset_core(&mut self) -> Result<(), SimulationError> {
        self.sim = RippleSimulation::with_config(
            self.network.graph.clone(),
            self.network.source,
            self.network.destination,
            self.engine.clone(),
        )?;
        Ok(())
    }

    /// Frames `0..=ticks` of the finished run. Empty until a path is found.
    pub fn timeline(&self) -> Vec<TimelineFrame> {
        let Some(result) = self.sim.outcome().and_then(SearchOutcome::path) else {
            return Vec::new();
        };
        (0..=result.ticks)
            .map(|tick| TimelineFrame {
                tick,
                obstacle_centre: self.obstacle.centre_at(tick),
                obstacle_radius: self.obstacle.radius(),
                inactive: self.obstacle.topology_at(tick).inactive_nodes(),
                prefix: result.prefix_at(tick).to_vec(),
            })
            .collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn line_network() -> Network {
        let mut graph = Graph::with_nodes(3);
        graph.add_undirected_edge(0, 1, 1.0);
        graph.add_undirected_edge(1, 2, 2.0);
        Network {
            graph,
            coords: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(3.0, 0.0)],
            source: 0,
            destination: 2,
        }
    }

    fn parked_far_away() -> ObstacleConfig {
        ObstacleConfig { start: Point::new(500.0, 500.0), speed: 0.0, ..Default::default() }
    }

    #[test]
    fn run_and_timeline() {
        let mut arena = ArenaPlanner::from_network(line_network(), &parked_far_away(), EngineConfig::default())
            .expect("test: valid network");
        let outcome = arena.run_core().expect("test: run");
        let result = outcome.path().expect("test: path found");
        assert_eq!(result.path, vec![0, 1, 2]);

        let frames = arena.timeline();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].prefix, vec![0]);
        assert_eq!(frames[1].prefix, vec![0, 1]);
        assert_eq!(frames[2].prefix, vec![0, 1]);
        assert_eq!(frames[3].prefix, vec![0, 1, 2]);
        assert!(frames.iter().all(|f| f.inactive.is_empty()));
    }

    #[test]
    fn reset_restarts_from_tick_zero() {
        let mut arena = ArenaPlanner::from_network(line_network(), &parked_far_away(), EngineConfig::default())
            .expect("test: valid network");
        arena.tick_core().expect("test: tick");
        assert_eq!(arena.simulation().current_tick(), 1);

        arena.reset_core().expect("test: reset");
        assert_eq!(arena.simulation().current_tick(), 0);
        assert_eq!(arena.simulation().registry().len(), 1);
        assert!(arena.timeline().is_empty());

        arena.run_core().expect("test: run");
        assert!(arena.reset().is_ok());
        assert!(!arena.simulation().is_finished());
    }

    #[test]
    fn mismatched_coordinates_are_rejected() {
        let mut network = line_network();
        network.coords.pop();
        let err = ArenaPlanner::from_network(network, &ObstacleConfig::default(), EngineConfig::default());
        assert!(matches!(err, Err(SimulationError::Graph(_))));
    }
}
