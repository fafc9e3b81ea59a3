// Batch Runner: one seeded network per run, obstacle-aware search vs static Dijkstra

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ripple_engine::*;
use tracing::{info, warn};

use crate::report::*;
use crate::time_series;

use std::time::Instant;

/// Plan on the network generated from `seed`.
pub fn run_single(
    config: &PlannerConfig,
    seed: u64,
    timeline_dir: Option<&std::path::Path>,
) -> Result<RunResult, SimulationError> {
    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let network = generate_network(&config.grid, &mut rng);
    let static_length = network.graph.shortest_path_length(network.source, network.destination);
    let (nodes, edges) = (network.graph.node_count(), network.graph.edge_count());

    let mut arena = ArenaPlanner::from_network(network, &config.obstacle, config.engine.clone())?;
    let outcome = arena.run_core()?;
    let elapsed_ms = start.elapsed().as_millis();

    if let Some(dir) = timeline_dir {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = time_series::write_jsonl(&arena.timeline(), &path) {
            warn!(seed, error = %e, "Failed to write timeline");
        }
    }

    let result = outcome.path();
    let length = result.map(|r| r.length);
    let detour_ratio = match (length, static_length) {
        (Some(l), Some(s)) if s > 0.0 => Some(l / s),
        _ => None,
    };
    info!(seed, found = outcome.is_found(), ticks = outcome.ticks(), "Run complete");

    Ok(RunResult {
        seed,
        found: outcome.is_found(),
        path: result.map(|r| r.path.clone()).unwrap_or_default(),
        length,
        static_length,
        detour_ratio,
        ticks: outcome.ticks(),
        ripples: arena.simulation().registry().len(),
        nodes,
        edges,
        speed: arena.simulation().speed(),
        elapsed_ms,
    })
}

/// Run seeds `config.seed .. config.seed + config.runs`.
pub fn run_batch(
    config: &PlannerConfig,
    timeline_dir: Option<&std::path::Path>,
) -> Result<Vec<RunResult>, SimulationError> {
    (0..config.runs)
        .map(|i| run_single(config, config.seed + i as u64, timeline_dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_single_is_reproducible() {
        let config = PlannerConfig::default();
        let a = run_single(&config, 3, None).expect("test: run");
        let b = run_single(&config, 3, None).expect("test: run");
        assert_eq!(a.path, b.path);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.static_length, b.static_length);
    }

    #[test]
    fn test_batch_covers_every_seed() {
        let config = PlannerConfig { runs: 3, seed: 10, ..Default::default() };
        let runs = run_batch(&config, None).expect("test: batch");
        assert_eq!(runs.iter().map(|r| r.seed).collect::<Vec<_>>(), vec![10, 11, 12]);
        for r in runs.iter().filter(|r| r.found) {
            let ratio = r.detour_ratio.expect("test: static path exists");
            assert!(ratio >= 1.0 - 1e-9);
        }
    }
}
