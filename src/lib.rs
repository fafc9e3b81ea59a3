// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner

//! Shortest-path search on a graph whose nodes are blocked over time by a
//! moving obstacle, solved by a tick-stepped ripple-spreading simulation.

pub mod types;
pub mod graph;
pub mod ripple;
pub mod topology;
pub mod simulation;
pub mod config;
pub mod network;
pub mod arena;

pub use types::*;
pub use arena::{ArenaPlanner, TimelineFrame};
pub use config::{ConfigError, EngineConfig, GridConfig, ObstacleConfig, PlannerConfig};
pub use graph::{Edge, Graph, GraphError};
pub use network::Network;
#[cfg(not(target_arch = "wasm32"))]
pub use network::generate_network;
pub use ripple::{Ripple, RippleRegistry};
pub use simulation::{RippleSimulation, SimulationError};
pub use topology::{BlockSchedule, MovingObstacle, StaticTopology, Topology, TopologyOracle};

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
impl ArenaPlanner {
    /// `network` is a serialized [`Network`]; `obstacle` an [`ObstacleConfig`]
    /// (null or undefined for the default obstacle).
    #[wasm_bindgen(constructor)]
    pub fn new(network: JsValue, obstacle: JsValue) -> Result<ArenaPlanner, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let network: Network = serde_wasm_bindgen::from_value(network)?;
        let obstacle: ObstacleConfig = if obstacle.is_null() || obstacle.is_undefined() {
            ObstacleConfig::default()
        } else {
            serde_wasm_bindgen::from_value(obstacle)?
        };
        obstacle.validate().map_err(to_js_error)?;
        ArenaPlanner::from_network(network, &obstacle, EngineConfig::default()).map_err(to_js_error)
    }

    pub fn tick(&mut self) -> JsValue {
        match self.tick_core() {
            Ok(report) => serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL),
            Err(_) => JsValue::NULL,
        }
    }

    pub fn run(&mut self) -> JsValue {
        match self.run_core() {
            Ok(outcome) => serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL),
            Err(_) => JsValue::NULL,
        }
    }

    pub fn get_ripples(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.sim.registry().ripples()).unwrap_or(JsValue::NULL)
    }

    pub fn get_timeline(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.timeline()).unwrap_or(JsValue::NULL)
    }

    pub fn current_tick(&self) -> u64 {
        self.sim.current_tick()
    }

    pub fn is_finished(&self) -> bool {
        self.sim.is_finished()
    }

    /// Reset the search to tick 0
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.reset_core().map_err(to_js_error)
    }
}
