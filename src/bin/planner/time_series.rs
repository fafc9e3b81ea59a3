// Per-Tick JSONL Timeline Recorder
// One line per tick: obstacle centre, blocked nodes, path prefix covered so far

use ripple_engine::{NodeId, TimelineFrame};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct TickRow {
    pub tick: u64,
    pub obstacle_x: f64,
    pub obstacle_y: f64,
    pub inactive: Vec<NodeId>,
    pub prefix: Vec<NodeId>,
}

impl From<&TimelineFrame> for TickRow {
    fn from(frame: &TimelineFrame) -> Self {
        Self {
            tick: frame.tick,
            obstacle_x: frame.obstacle_centre.x,
            obstacle_y: frame.obstacle_centre.y,
            inactive: frame.inactive.clone(),
            prefix: frame.prefix.clone(),
        }
    }
}

/// Write one row per frame to `path`, creating parent directories.
pub fn write_jsonl(frames: &[TimelineFrame], path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    for frame in frames {
        let line = serde_json::to_string(&TickRow::from(frame))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writeln!(file, "{}", line)?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_engine::Point;

    #[test]
    fn test_row_flattens_obstacle_centre() {
        let frame = TimelineFrame {
            tick: 3,
            obstacle_centre: Point::new(72.0, 18.0),
            obstacle_radius: 15.0,
            inactive: vec![4, 5],
            prefix: vec![0, 1],
        };
        let json = serde_json::to_value(TickRow::from(&frame)).expect("test: serialize");
        assert_eq!(json["obstacle_x"], 72.0);
        assert_eq!(json["obstacle_y"], 18.0);
        assert_eq!(json["inactive"], serde_json::json!([4, 5]));
    }
}
