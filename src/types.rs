// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Type Definitions

use serde::{Deserialize, Serialize};

/// Node identifier, `0..N-1`.
pub type NodeId = usize;

/// Index of a ripple in the registry (creation order).
pub type RippleId = usize;

// ─── Point ───────────────────────────────────────────────────────────────────

/// Planar node coordinate. Only the obstacle model and rendering use it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

// ─── Ripple State ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RippleState {
    Waiting = 1, // epicenter claimed but currently inaccessible
    Active = 2,  // expanding by the global speed each tick
    Dead = 3,    // TERMINAL: every neighbor already visited
}

impl RippleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dead)
    }
    pub fn is_live(&self) -> bool {
        !self.is_terminal()
    }
}

// ─── PathResult ──────────────────────────────────────────────────────────────

/// A successful search: the destination ripple's path and length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path: Vec<NodeId>,
    pub length: f64,
    /// Tick at which the destination was claimed.
    pub ticks: u64,
    /// Propagation speed used for the run.
    pub speed: f64,
    /// Cumulative cost from the source to each node of `path`.
    pub costs: Vec<f64>,
}

impl PathResult {
    /// Nodes of the path the wavefront has passed by `tick`, i.e. those whose
    /// cumulative cost is at most `tick * speed`.
    pub fn prefix_at(&self, tick: u64) -> &[NodeId] {
        let reach = tick as f64 * self.speed;
        let n = self.costs.iter().take_while(|&&c| c <= reach).count();
        &self.path[..n]
    }

    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

// ─── NoPathReport ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoPathReason {
    /// Every ripple died before the destination was claimed.
    Exhausted,
    /// The configured tick limit was reached first.
    TickLimit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoPathReport {
    pub ticks: u64,
    pub reason: NoPathReason,
}

// ─── SearchOutcome ───────────────────────────────────────────────────────────

/// Final result of a run. Not finding a path is an ordinary outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Found(PathResult),
    NoPathFound(NoPathReport),
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&PathResult> {
        match self {
            Self::Found(result) => Some(result),
            Self::NoPathFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn ticks(&self) -> u64 {
        match self {
            Self::Found(result) => result.ticks,
            Self::NoPathFound(report) => report.ticks,
        }
    }
}

// ─── TickReport ──────────────────────────────────────────────────────────────

/// A node claimed during a tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Claim {
    pub node: NodeId,
    pub ripple: RippleId,
    pub state: RippleState,
    pub length: f64,
    /// Number of candidates that competed for the node.
    pub contenders: usize,
}

/// What one call to `RippleSimulation::step` did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub promoted: Vec<RippleId>,
    pub claims: Vec<Claim>,
    pub died: Vec<RippleId>,
    pub waiting: usize,
    pub active: usize,
    pub dead: usize,
    /// Set once the run has finished on this tick.
    pub outcome: Option<SearchOutcome>,
}
