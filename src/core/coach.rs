use crate::core::config::Config;
use crate::core::pose_session::PoseSession;
use crate::models::hold::HoldEvent;
use crate::models::pose::{Landmark, PoseError, PoseIdentifier, PoseResult};
use crate::models::session::{CaptureRequest, FrameOutcome, SessionEvent, SessionStatistics};
use crate::platform::feedback::FeedbackSink;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

// ==============================================================================
// Cue Commands
// ==============================================================================

/// Work handed to the cue task. Frame processing never waits on these.
#[derive(Debug, Clone)]
enum CueCommand {
    Hold(SessionEvent),
    ManualCapture(CaptureRequest),
    Notice(String),
}

struct ActiveSession {
    session: PoseSession,
    cues: mpsc::Sender<CueCommand>,
    worker: JoinHandle<()>,
}

// ==============================================================================
// Pose Coach
// ==============================================================================

/// Runs one posing session at a time and turns its hold events into
/// feedback through a `FeedbackSink`.
pub struct PoseCoach {
    config: Config,
    sink: Arc<dyn FeedbackSink>,
    active: Mutex<Option<ActiveSession>>,
}

impl PoseCoach {
    pub fn new(config: Config, sink: Arc<dyn FeedbackSink>) -> Self {
        Self {
            config,
            sink,
            active: Mutex::new(None),
        }
    }

    /// Start a session on `pose`, or the configured default pose
    pub async fn start_session(&self, pose: Option<PoseIdentifier>) -> PoseResult<Uuid> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            return Err(PoseError::SessionAlreadyRunning);
        }
        self.config.validate()?;

        let pose = pose.unwrap_or(self.config.default_pose);
        let session = PoseSession::new(pose, self.config.hold_config());
        let session_id = session.id();

        let (tx, rx) = mpsc::channel::<CueCommand>(self.config.event_channel_capacity);
        let sink = self.sink.clone();
        let capture_dir = self.config.capture_dir.clone();

        let worker = tokio::spawn(async move {
            Self::process_cues(rx, sink, capture_dir).await;
        });

        *active = Some(ActiveSession {
            session,
            cues: tx,
            worker,
        });

        info!(session = %session_id, pose = %pose, "started pose session");
        Ok(session_id)
    }

    /// Stop the running session. Pending cues are delivered before this returns.
    pub async fn stop_session(&self) -> PoseResult<SessionStatistics> {
        let ActiveSession {
            session,
            cues,
            worker,
        } = self
            .active
            .lock()
            .await
            .take()
            .ok_or(PoseError::SessionNotRunning)?;

        // Closing the channel ends the cue task once it has drained
        drop(cues);
        if let Err(e) = worker.await {
            error!("Cue task failed: {}", e);
        }

        let stats = session.statistics().clone();
        info!(
            session = %stats.session_id,
            frames = stats.total_frames,
            captures = stats.captures,
            "stopped pose session"
        );
        Ok(stats)
    }

    pub async fn is_running(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Score one frame of the running session
    pub async fn process_frame(
        &self,
        landmarks: Option<&[Landmark]>,
        now: Instant,
    ) -> PoseResult<FrameOutcome> {
        let mut guard = self.active.lock().await;
        let active = guard.as_mut().ok_or(PoseError::SessionNotRunning)?;

        let outcome = active.session.process_frame(landmarks, now);

        if let Some(event) = outcome.event {
            if matches!(
                event,
                HoldEvent::CaptureFired { .. } | HoldEvent::PoseLost { .. }
            ) {
                let command = CueCommand::Hold(SessionEvent {
                    session_id: active.session.id(),
                    pose: outcome.pose,
                    event,
                    at: Utc::now(),
                });
                Self::enqueue(&active.cues, command);
            }
        }

        Ok(outcome)
    }

    /// Change the active pose; any hold in progress is dropped
    pub async fn switch_pose(&self, pose: PoseIdentifier) -> PoseResult<()> {
        let mut guard = self.active.lock().await;
        let active = guard.as_mut().ok_or(PoseError::SessionNotRunning)?;

        active.session.switch_pose(pose);
        Self::enqueue(
            &active.cues,
            CueCommand::Notice(format!("Switched to: {}", pose.display_name())),
        );
        Ok(())
    }

    /// Like `switch_pose`, for a display name or id. An unknown name leaves
    /// the session untouched.
    pub async fn switch_pose_by_name(&self, name: &str) -> PoseResult<PoseIdentifier> {
        let pose: PoseIdentifier = name.parse()?;
        self.switch_pose(pose).await?;
        Ok(pose)
    }

    /// Capture the current image regardless of score or hold state
    pub async fn capture_now(&self) -> PoseResult<CaptureRequest> {
        let guard = self.active.lock().await;
        let active = guard.as_ref().ok_or(PoseError::SessionNotRunning)?;

        let request = CaptureRequest::new(
            active.session.id(),
            active.session.pose(),
            Utc::now(),
            &self.config.capture_dir,
            true,
        );
        Self::enqueue(&active.cues, CueCommand::ManualCapture(request.clone()));
        Ok(request)
    }

    /// Statistics of the running session so far
    pub async fn statistics(&self) -> PoseResult<SessionStatistics> {
        let guard = self.active.lock().await;
        let active = guard.as_ref().ok_or(PoseError::SessionNotRunning)?;
        Ok(active.session.statistics().clone())
    }

    fn enqueue(cues: &mpsc::Sender<CueCommand>, command: CueCommand) {
        match cues.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!("Cue queue full, dropping {:?}", command);
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Cue task stopped, dropping cue");
            }
        }
    }

    /// Background task that plays cues and persists captures
    async fn process_cues(
        mut rx: mpsc::Receiver<CueCommand>,
        sink: Arc<dyn FeedbackSink>,
        capture_dir: PathBuf,
    ) {
        while let Some(command) = rx.recv().await {
            let result = match command {
                CueCommand::Hold(event) => Self::handle_hold_event(&*sink, &event, &capture_dir).await,
                CueCommand::ManualCapture(request) => Self::deliver_capture(&*sink, &request).await,
                CueCommand::Notice(message) => sink.notify(&message).await,
            };

            if let Err(e) = result {
                warn!("Feedback sink error: {}", e);
            }
        }
        debug!("cue task finished");
    }

    async fn handle_hold_event(
        sink: &dyn FeedbackSink,
        event: &SessionEvent,
        capture_dir: &Path,
    ) -> PoseResult<()> {
        match event.event {
            HoldEvent::CaptureFired { .. } => {
                sink.play_success_cue().await?;
                let request =
                    CaptureRequest::new(event.session_id, event.pose, event.at, capture_dir, false);
                Self::deliver_capture(sink, &request).await
            }
            HoldEvent::PoseLost { .. } => sink.play_coaching_cue().await,
            HoldEvent::HoldStarted | HoldEvent::HoldProgress { .. } => Ok(()),
        }
    }

    async fn deliver_capture(sink: &dyn FeedbackSink, request: &CaptureRequest) -> PoseResult<()> {
        sink.persist_capture(request).await?;
        sink.notify(request.notification()).await
    }
}
