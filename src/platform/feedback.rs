// Feedback sinks: where hold events turn into sounds, notifications and saved images
//
// The scoring core never calls these directly. `PoseCoach` forwards hold
// events to a background task that drives a `FeedbackSink`.

use crate::models::pose::PoseResult;
use crate::models::session::CaptureRequest;
use async_trait::async_trait;
use tracing::info;

/// Side effects requested by a posing session.
/// Implement this for the host's audio, notification and image layers.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Played once a hold reaches the capture duration
    async fn play_success_cue(&self) -> PoseResult<()>;

    /// Played when a hold is lost before it captured
    async fn play_coaching_cue(&self) -> PoseResult<()>;

    /// Persist the current camera image under `request.path`
    async fn persist_capture(&self, request: &CaptureRequest) -> PoseResult<()>;

    /// Short message for the athlete
    async fn notify(&self, _message: &str) -> PoseResult<()> {
        Ok(())
    }
}

/// Sink that only logs; used when no host audio or camera is attached
#[derive(Debug, Default, Clone)]
pub struct LoggingFeedback;

#[async_trait]
impl FeedbackSink for LoggingFeedback {
    async fn play_success_cue(&self) -> PoseResult<()> {
        info!("cue: success");
        Ok(())
    }

    async fn play_coaching_cue(&self) -> PoseResult<()> {
        info!("cue: coaching");
        Ok(())
    }

    async fn persist_capture(&self, request: &CaptureRequest) -> PoseResult<()> {
        info!(
            pose = %request.pose,
            path = %request.path.display(),
            manual = request.manual,
            "capture requested"
        );
        Ok(())
    }

    async fn notify(&self, message: &str) -> PoseResult<()> {
        info!("notification: {}", message);
        Ok(())
    }
}
