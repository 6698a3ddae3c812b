// Data models for pose scoring, hold tracking and posing sessions

pub mod hold;
pub mod pose;
pub mod session;
