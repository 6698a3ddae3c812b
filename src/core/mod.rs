pub mod config;
pub mod geometry;
pub mod scoring;
pub mod hold_tracker;

// Session engine and async coaching service
pub mod pose_session;
pub mod coach;
