// Planner Report Types
// Structured JSON output for per-seed runs and their aggregation

use serde::Serialize;

// ─── Statistics ─────────────────────────────────────────────────────────────

/// Sample summary of one metric across seeds, with a normal-approximation
/// 95% confidence interval on the mean.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Self {
        let samples: Vec<f64> = samples.into_iter().collect();
        let Some((min, max)) = samples
            .iter()
            .fold(None, |range: Option<(f64, f64)>, &x| match range {
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
                None => Some((x, x)),
            })
        else {
            return Self::default();
        };

        let n = samples.len();
        let mean = samples.iter().sum::<f64>() / n as f64;
        // Bessel-corrected; a single run has no spread
        let std_dev = match n {
            1 => 0.0,
            _ => (samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt(),
        };
        let half_width = 1.96 * std_dev / (n as f64).sqrt();

        Self { mean, std_dev, ci_lower: mean - half_width, ci_upper: mean + half_width, min, max, n }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub seed: u64,
    pub found: bool,
    pub path: Vec<usize>,
    pub length: Option<f64>,
    /// Dijkstra length on the graph with no obstacle.
    pub static_length: Option<f64>,
    /// `length / static_length`; 1.0 means the obstacle cost nothing.
    pub detour_ratio: Option<f64>,
    pub ticks: u64,
    pub ripples: usize,
    pub nodes: usize,
    pub edges: usize,
    pub speed: f64,
    pub elapsed_ms: u128,
}

// ─── Batch Summary ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub found: usize,
    pub found_rate: f64,
    pub length: Stats,
    pub detour_ratio: Stats,
    pub ticks: Stats,
    pub ripples: Stats,
    pub elapsed_ms: Stats,
}

impl BatchSummary {
    pub fn from_runs(runs: &[RunResult]) -> Self {
        let found = runs.iter().filter(|r| r.found).count();
        Self {
            runs: runs.len(),
            found,
            found_rate: if runs.is_empty() { 0.0 } else { found as f64 / runs.len() as f64 },
            length: Stats::from_samples(runs.iter().filter_map(|r| r.length)),
            detour_ratio: Stats::from_samples(runs.iter().filter_map(|r| r.detour_ratio)),
            ticks: Stats::from_samples(runs.iter().map(|r| r.ticks as f64)),
            ripples: Stats::from_samples(runs.iter().map(|r| r.ripples as f64)),
            elapsed_ms: Stats::from_samples(runs.iter().map(|r| r.elapsed_ms as f64)),
        }
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PlannerReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub config: ripple_engine::PlannerConfig,
    pub summary: BatchSummary,
    pub runs: Vec<RunResult>,
}
