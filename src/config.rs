// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ripple Arena Path Planner - Configuration

//! Typed planner configuration.
//!
//! Every section has defaults matching the reference 10x10 arena with a
//! radius-15 obstacle crossing it diagonally at speed 6. A JSON file only
//! needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ─── PlannerConfig ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub grid: GridConfig,
    pub obstacle: ObstacleConfig,
    pub engine: EngineConfig,
    /// Number of seeded networks the batch runner plans over.
    pub runs: usize,
    /// First seed; run `i` uses `seed + i`.
    pub seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            obstacle: ObstacleConfig::default(),
            engine: EngineConfig::default(),
            runs: 30,
            seed: 0,
        }
    }
}

impl PlannerConfig {
    /// Read a JSON config file and validate it.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.obstacle.validate()?;
        if self.runs == 0 {
            return Err(ConfigError::Invalid("runs must be at least 1".into()));
        }
        Ok(())
    }
}

// ─── GridConfig ──────────────────────────────────────────────────────────────

/// Random near-grid network parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    /// Lattice spacing between neighbouring nodes.
    pub spacing: f64,
    /// Uniform coordinate noise, +/- this amount on each axis.
    pub jitter: f64,
    /// Probability of linking horizontal/vertical lattice neighbours.
    pub p_adjacent: f64,
    pub p_diagonal: f64,
    /// Probability of a two-step shortcut between perimeter nodes.
    pub p_skip: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
            spacing: 10.0,
            jitter: 2.0,
            p_adjacent: 0.7,
            p_diagonal: 0.05,
            p_skip: 0.03,
        }
    }
}

impl GridConfig {
    pub fn node_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < 2 || self.rows < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 2x2, got {}x{}",
                self.columns, self.rows
            )));
        }
        if !(self.spacing > 0.0) || self.jitter < 0.0 || self.jitter * 2.0 >= self.spacing {
            return Err(ConfigError::Invalid(
                "spacing must be positive and exceed twice the jitter".into(),
            ));
        }
        for (name, p) in [
            ("p_adjacent", self.p_adjacent),
            ("p_diagonal", self.p_diagonal),
            ("p_skip", self.p_skip),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        Ok(())
    }
}

// ─── ObstacleConfig ──────────────────────────────────────────────────────────

/// A disc obstacle moving in a straight line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub radius: f64,
    /// Distance travelled per tick.
    pub speed: f64,
    /// Centre at tick 0.
    pub start: Point,
    /// Direction of travel; normalised before use.
    pub heading: Point,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            radius: 15.0,
            speed: 6.0,
            start: Point::new(90.0, 0.0),
            heading: Point::new(-1.0, 1.0),
        }
    }
}

impl ObstacleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius < 0.0 || self.speed < 0.0 {
            return Err(ConfigError::Invalid(
                "obstacle radius and speed must be non-negative".into(),
            ));
        }
        if self.heading.x == 0.0 && self.heading.y == 0.0 && self.speed > 0.0 {
            return Err(ConfigError::Invalid("a moving obstacle needs a heading".into()));
        }
        Ok(())
    }
}

// ─── EngineConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stop with `NoPathReason::TickLimit` after this many ticks.
    /// `None` runs until success or until every ripple is dead.
    pub max_ticks: Option<u64>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_arena() {
        let config = PlannerConfig::default();
        assert_eq!(config.grid.node_count(), 100);
        assert_eq!(config.obstacle.radius, 15.0);
        assert_eq!(config.obstacle.speed, 6.0);
        assert_eq!(config.engine.max_ticks, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = PlannerConfig::from_json(
            r#"{ "runs": 5, "obstacle": { "radius": 8.0 }, "engine": { "max_ticks": 400 } }"#,
        )
        .expect("test: partial config should parse");

        assert_eq!(config.runs, 5);
        assert_eq!(config.obstacle.radius, 8.0);
        assert_eq!(config.obstacle.speed, 6.0);
        assert_eq!(config.engine.max_ticks, Some(400));
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let err = PlannerConfig::from_json(r#"{ "grid": { "p_adjacent": 1.5 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))), "got {err:?}");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PlannerConfig::from_json("{ runs: ");
        assert!(matches!(err, Err(ConfigError::Json(_))), "got {err:?}");
    }

    #[test]
    fn rejects_zero_runs() {
        let err = PlannerConfig::from_json(r#"{ "runs": 0 }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }
}
