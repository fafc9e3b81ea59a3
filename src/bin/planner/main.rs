// Ripple Planner Batch Runner
// Seeded networks, moving obstacle, ripple search vs static Dijkstra
//
// Usage:
//   cargo run --release --bin planner                          # 30 seeded runs
//   cargo run --release --bin planner -- --runs 5              # Quick mode
//   cargo run --release --bin planner -- --seed 42             # Custom base seed
//   cargo run --release --bin planner -- --config arena.json   # Load PlannerConfig
//   cargo run --release --bin planner -- --timeline            # Per-seed JSONL output

mod batch;
mod report;
mod time_series;

use report::*;
use ripple_engine::PlannerConfig;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    runs: Option<usize>,
    seed: Option<u64>,
    config: Option<std::path::PathBuf>,
    timeline: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--runs" => {
                let value = iter.next().ok_or("--runs needs a value")?;
                cli.runs = Some(value.parse().map_err(|_| format!("invalid --runs: {}", value))?);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                cli.seed = Some(value.parse().map_err(|_| format!("invalid --seed: {}", value))?);
            }
            "--config" => {
                let value = iter.next().ok_or("--config needs a path")?;
                cli.config = Some(value.into());
            }
            "--timeline" => cli.timeline = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(cli)
}

fn load_config(cli: &CliArgs) -> Result<PlannerConfig, String> {
    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_path(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => PlannerConfig::default(),
    };
    if let Some(runs) = cli.runs {
        config.runs = runs;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = parse_args(&args).and_then(|cli| {
        let config = load_config(&cli)?;
        Ok((cli, config))
    });
    let (cli, config) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("planner: {}", e);
            std::process::exit(2);
        }
    };

    let ts = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
    let timestamp = format!("{}", ts);
    let out_dir = std::path::Path::new("planner-results");
    let timeline_dir = cli.timeline.then(|| out_dir.join(format!("timeline-{}", timestamp)));

    println!("\n  Ripple Planner v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "  PRNG: ChaCha8Rng | Runs: {} | Base seed: {} | Grid: {}x{} | Obstacle r={} v={}",
        config.runs, config.seed, config.grid.columns, config.grid.rows,
        config.obstacle.radius, config.obstacle.speed,
    );
    println!("\n  {:>6} {:>6} {:>10} {:>10} {:>8} {:>6} {:>8} {:>7}",
        "Seed", "Found", "Length", "Static", "Detour", "Ticks", "Ripples", "Time");
    println!("  {}", "-".repeat(70));

    let suite_start = Instant::now();
    let runs = match batch::run_batch(&config, timeline_dir.as_deref()) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("planner: {}", e);
            std::process::exit(1);
        }
    };

    let fmt = |v: Option<f64>, prec: usize| v.map_or("-".to_string(), |x| format!("{:.*}", prec, x));
    for r in &runs {
        println!("  {:>6} {:>6} {:>10} {:>10} {:>8} {:>6} {:>8} {:>5}ms",
            r.seed,
            if r.found { "yes" } else { "no" },
            fmt(r.length, 2),
            fmt(r.static_length, 2),
            fmt(r.detour_ratio, 3),
            r.ticks,
            r.ripples,
            r.elapsed_ms,
        );
    }

    let summary = BatchSummary::from_runs(&runs);
    println!("  {}", "-".repeat(70));
    println!("  Found: {}/{} ({:.1}%)  Suite time: {:.2}s",
        summary.found, summary.runs, summary.found_rate * 100.0, suite_start.elapsed().as_secs_f64());
    for (name, stats) in [
        ("Length", &summary.length),
        ("Detour ratio", &summary.detour_ratio),
        ("Ticks", &summary.ticks),
    ] {
        println!("    {:<14} mean {:>9.3}  95% CI [{:.3}, {:.3}]  range [{:.3}, {:.3}]  n={}",
            name, stats.mean, stats.ci_lower, stats.ci_upper, stats.min, stats.max, stats.n);
    }

    // ─── Write JSON Report ──────────────────────────────────────────────

    let report = PlannerReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        config,
        summary,
        runs,
    };

    let path = out_dir.join(format!("run-{}.json", timestamp));
    let written = std::fs::create_dir_all(out_dir)
        .and_then(|_| {
            serde_json::to_string_pretty(&report)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
        })
        .and_then(|json| std::fs::write(&path, json));
    match written {
        Ok(()) => println!("\n  Results saved to: {}\n", path.display()),
        Err(e) => {
            eprintln!("planner: failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = parse_args(&args(&["--runs", "5", "--seed", "42", "--config", "a.json", "--timeline"]))
            .expect("test: valid args");
        assert_eq!(cli.runs, Some(5));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.config, Some("a.json".into()));
        assert!(cli.timeline);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&["--runs"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliArgs { runs: Some(3), seed: Some(9), ..Default::default() };
        let config = load_config(&cli).expect("test: config");
        assert_eq!((config.runs, config.seed), (3, 9));
        assert!(load_config(&CliArgs { runs: Some(0), ..Default::default() }).is_err());
    }
}
