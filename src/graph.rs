// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Graph Model

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Errors raised by graph construction and the input validation layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// No edges at all, so the propagation speed is undefined.
    #[error("graph has no edges; propagation speed is undefined")]
    NoEdges,
    #[error("edge {from} -> {to} has non-positive or non-finite length {length}")]
    NonPositiveLength { from: NodeId, to: NodeId, length: f64 },
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },
    #[error("{coords} coordinates given for {node_count} nodes")]
    CoordinateMismatch { coords: usize, node_count: usize },
    #[error("source and destination are the same node ({node})")]
    SourceIsDestination { node: NodeId },
}

// ─── Graph ───────────────────────────────────────────────────────────────────

/// One outgoing edge as stored in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: NodeId,
    pub length: f64,
}

/// Static directed graph with positive edge lengths.
///
/// Outgoing edges keep their insertion order. The engine iterates neighbors
/// in that order, which is what makes candidate generation deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create a graph with `node_count` nodes and no edges.
    pub fn with_nodes(node_count: usize) -> Self {
        Self { adjacency: vec![Vec::new(); node_count] }
    }

    /// Build a graph from `(from, to, length)` triples. The node count grows
    /// to cover every endpoint mentioned.
    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId, f64)]) -> Self {
        let mut graph = Self::with_nodes(node_count);
        for &(from, to, length) in edges {
            graph.add_edge(from, to, length);
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Insert or overwrite the directed edge `from -> to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length: f64) {
        let needed = from.max(to) + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize(needed, Vec::new());
        }
        let out = &mut self.adjacency[from];
        match out.iter_mut().find(|e| e.to == to) {
            Some(edge) => edge.length = length,
            None => out.push(Edge { to, length }),
        }
    }

    /// Insert `a -> b` and `b -> a` with the same length.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, length: f64) {
        self.add_edge(a, b, length);
        self.add_edge(b, a, length);
    }

    /// Outgoing edges of `node`, in insertion order. Empty for unknown nodes.
    pub fn edges_from(&self, node: NodeId) -> &[Edge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes reachable over one outgoing edge from `node`, independent of time.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges_from(node).iter().map(|e| e.to)
    }

    pub fn edge_length(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.edges_from(from).iter().find(|e| e.to == to).map(|e| e.length)
    }

    /// Every edge as `(from, to, length)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, out)| out.iter().map(move |e| (from, e.to, e.length)))
    }

    /// Minimum edge length over the whole graph: the distance every active
    /// ripple grows per tick.
    pub fn propagation_speed(&self) -> Result<f64, GraphError> {
        self.edges()
            .map(|(_, _, length)| length)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .ok_or(GraphError::NoEdges)
    }

    /// Reject non-positive or non-finite edge lengths.
    pub fn validate(&self) -> Result<(), GraphError> {
        match self.edges().find(|&(_, _, length)| !(length.is_finite() && length > 0.0)) {
            Some((from, to, length)) => Err(GraphError::NonPositiveLength { from, to, length }),
            None => Ok(()),
        }
    }

    /// Check that both endpoints exist and differ.
    pub fn validate_endpoints(&self, source: NodeId, destination: NodeId) -> Result<(), GraphError> {
        for node in [source, destination] {
            if node >= self.node_count() {
                return Err(GraphError::NodeOutOfRange { node, node_count: self.node_count() });
            }
        }
        if source == destination {
            return Err(GraphError::SourceIsDestination { node: source });
        }
        Ok(())
    }

    /// Dijkstra over the static graph. `None` when unreachable.
    pub fn shortest_path_length(&self, source: NodeId, destination: NodeId) -> Option<f64> {
        let mut dist = vec![f64::INFINITY; self.node_count()];
        let mut heap = BinaryHeap::new();
        *dist.get_mut(source)? = 0.0;
        heap.push(HeapEntry { cost: 0.0, node: source });

        while let Some(HeapEntry { cost, node }) = heap.pop() {
            if node == destination {
                return Some(cost);
            }
            if cost > dist[node] {
                continue;
            }
            for edge in self.edges_from(node) {
                let next = cost + edge.length;
                if next < dist[edge.to] {
                    dist[edge.to] = next;
                    heap.push(HeapEntry { cost: next, node: edge.to });
                }
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on cost
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
