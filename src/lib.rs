pub mod core;
pub mod models;
pub mod platform;

pub use core::coach::PoseCoach;
pub use core::config::Config;
pub use core::scoring::{score_frame, score_pose, score_pose_id};
pub use models::hold::{HoldConfig, HoldEvent, HoldState};
pub use models::pose::{Landmark, LandmarkSet, PoseError, PoseIdentifier, PoseResult, ScoreResult};
