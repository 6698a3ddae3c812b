// Landmark sources feeding the scoring engine
// The live detector runs outside this crate; recorded streams are replayed
// from JSON lines, one frame per line.

use crate::models::pose::{Landmark, PoseError, PoseResult};
use crate::models::session::FrameRecord;
use std::io::BufRead;
use std::time::Duration;

/// One frame handed over by a source
#[derive(Debug, Clone)]
pub struct SourceFrame {
    /// Time since the start of the stream
    pub offset: Duration,
    /// `None` when no body was detected
    pub landmarks: Option<Vec<Landmark>>,
    /// Pose selection change requested with this frame
    pub pose: Option<String>,
}

/// Source of per-frame landmarks
pub trait LandmarkSource {
    /// Next frame, or `None` at the end of the stream
    fn next_frame(&mut self) -> PoseResult<Option<SourceFrame>>;

    /// Human readable description for logs
    fn describe(&self) -> String;
}

/// Replays frames recorded as JSON lines:
/// `{"t_ms": 33, "landmarks": [[x, y, z], ...], "pose": "Side Chest"}`
pub struct JsonLinesSource<R: BufRead> {
    reader: R,
    name: String,
    line_number: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line_number: 0,
        }
    }

    fn parse_line(&self, line: &str) -> PoseResult<SourceFrame> {
        let record: FrameRecord = serde_json::from_str(line).map_err(|e| {
            PoseError::InvalidFrame(format!("{} line {}: {}", self.name, self.line_number, e))
        })?;

        Ok(SourceFrame {
            offset: Duration::from_millis(record.t_ms),
            landmarks: record
                .landmarks
                .map(|points| points.into_iter().map(Landmark::from).collect()),
            pose: record.pose,
        })
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> PoseResult<Option<SourceFrame>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return self.parse_line(trimmed).map(Some);
        }
    }

    fn describe(&self) -> String {
        format!("JSON lines replay ({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_frames_and_skips_blank_lines() {
        let input = "\n# recorded at the gym\n{\"t_ms\": 0, \"landmarks\": [[0.1, 0.2, 0.3]]}\n\n{\"t_ms\": 33, \"landmarks\": null, \"pose\": \"Lat Flex\"}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input), "test");

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.offset, Duration::ZERO);
        assert_eq!(first.landmarks, Some(vec![Landmark::new(0.1, 0.2, 0.3)]));
        assert!(first.pose.is_none());

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.offset, Duration::from_millis(33));
        assert!(second.landmarks.is_none());
        assert_eq!(second.pose.as_deref(), Some("Lat Flex"));

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_reports_line_number_on_bad_input() {
        let input = "{\"t_ms\": 0, \"landmarks\": null}\n{\"t_ms\": \"soon\"}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input), "bad.jsonl");

        assert!(source.next_frame().unwrap().is_some());
        match source.next_frame() {
            Err(PoseError::InvalidFrame(message)) => assert!(message.contains("bad.jsonl line 2")),
            other => panic!("expected invalid frame, got {:?}", other),
        }
    }

    #[test]
    fn test_describe() {
        let source = JsonLinesSource::new(Cursor::new(""), "session.jsonl");
        assert_eq!(source.describe(), "JSON lines replay (session.jsonl)");
    }
}
