// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Random Network Generator

#[cfg(not(target_arch = "wasm32"))]
use rand::Rng;
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::config::GridConfig;
use crate::graph::{Graph, GraphError};
use crate::types::{NodeId, Point};

/// A generated arena: graph, node coordinates and the search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub graph: Graph,
    pub coords: Vec<Point>,
    pub source: NodeId,
    pub destination: NodeId,
}

impl Network {
    /// Validate graph, coordinates and endpoints as one unit.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.graph.validate()?;
        self.graph.validate_endpoints(self.source, self.destination)?;
        if self.coords.len() != self.graph.node_count() {
            return Err(GraphError::CoordinateMismatch {
                coords: self.coords.len(),
                node_count: self.graph.node_count(),
            });
        }
        Ok(())
    }
}

/// Generate a jittered near-grid network.
///
/// Node `i * rows + j` sits near `(i * spacing, j * spacing)`. Perimeter nodes
/// are always linked to close perimeter neighbours; interior links are drawn
/// at random. Source is node 0 and destination the last node, at opposite
/// corners.
#[cfg(not(target_arch = "wasm32"))]
pub fn generate_network<R: Rng>(config: &GridConfig, rng: &mut R) -> Network {
    let (columns, rows) = (config.columns, config.rows);
    let n = config.node_count();
    let s = config.spacing;

    let mut coords = Vec::with_capacity(n);
    for i in 0..columns {
        for j in 0..rows {
            coords.push(Point::new(
                i as f64 * s + rng.gen_range(-config.jitter..=config.jitter),
                j as f64 * s + rng.gen_range(-config.jitter..=config.jitter),
            ));
        }
    }

    let on_perimeter = |node: NodeId| {
        let (i, j) = (node / rows, node % rows);
        i == 0 || i == columns - 1 || j == 0 || j == rows - 1
    };

    let mut graph = Graph::with_nodes(n);

    // Perimeter ring
    for a in 0..n {
        for b in 0..n {
            if a != b && on_perimeter(a) && on_perimeter(b) {
                let d = coords[a].distance(&coords[b]);
                if d < 1.5 * s {
                    graph.add_edge(a, b, d);
                }
            }
        }
    }

    // Random interior links, drawn for each ordered pair
    for a in 0..n {
        for b in 0..n {
            if a == b {
                continue;
            }
            let gap = a.abs_diff(b);
            let d = coords[a].distance(&coords[b]);

            if (gap == 1 || gap == rows) && d < 2.0 * s && rng.gen::<f64>() < config.p_adjacent {
                graph.add_undirected_edge(a, b, d);
            }
            if (gap == rows + 1 || gap == rows - 1) && d < 2.0 * s && rng.gen::<f64>() < config.p_diagonal {
                graph.add_undirected_edge(a, b, d);
            }
            if (gap == 2 || gap == 2 * rows)
                && d < 3.0 * s
                && on_perimeter(a)
                && on_perimeter(b)
                && rng.gen::<f64>() < config.p_skip
            {
                graph.add_undirected_edge(a, b, d);
            }
        }
    }

    Network { graph, coords, source: 0, destination: n - 1 }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn same_seed_same_network() {
        let config = GridConfig::default();
        let a = generate_network(&config, &mut ChaCha8Rng::seed_from_u64(7));
        let b = generate_network(&config, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn perimeter_is_connected_corner_to_corner() {
        let config = GridConfig { p_adjacent: 0.0, p_diagonal: 0.0, p_skip: 0.0, ..Default::default() };
        let net = generate_network(&config, &mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(net.graph.node_count(), 100);
        assert_eq!((net.source, net.destination), (0, 99));
        assert!(net.graph.shortest_path_length(net.source, net.destination).is_some());
        // Interior nodes stay isolated without random links
        assert_eq!(net.graph.edges_from(55).len(), 0);
    }

    #[test]
    fn coordinates_stay_within_jitter() {
        let config = GridConfig::default();
        let net = generate_network(&config, &mut ChaCha8Rng::seed_from_u64(3));
        for (node, p) in net.coords.iter().enumerate() {
            let (i, j) = (node / config.rows, node % config.rows);
            assert!((p.x - i as f64 * config.spacing).abs() <= config.jitter);
            assert!((p.y - j as f64 * config.spacing).abs() <= config.jitter);
        }
    }

    #[test]
    fn generated_edges_are_valid_for_the_engine() {
        let net = generate_network(&GridConfig::default(), &mut ChaCha8Rng::seed_from_u64(11));
        assert!(net.graph.validate().is_ok());
        assert!(net.graph.propagation_speed().is_ok());
    }
}
