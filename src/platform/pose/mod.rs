// Pose landmark input
// Sources yield per-frame landmarks from a live detector or a recording

pub mod landmark_source;

pub use landmark_source::{JsonLinesSource, LandmarkSource, SourceFrame};
