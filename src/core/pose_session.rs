// One posing session: active pose, hold tracker and running statistics

use crate::core::hold_tracker::HoldTracker;
use crate::core::scoring::score_frame;
use crate::models::hold::{HoldConfig, HoldEvent, HoldState};
use crate::models::pose::{Landmark, LandmarkSet, PoseIdentifier, ScoreBand};
use crate::models::session::{FrameOutcome, SessionStatistics};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Synchronous per-session engine. Scores each frame for the active pose and
/// advances the hold tracker; produces events but never acts on them.
pub struct PoseSession {
    id: Uuid,
    tracker: HoldTracker,
    stats: SessionStatistics,
}

impl PoseSession {
    pub fn new(pose: PoseIdentifier, hold_config: HoldConfig) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            tracker: HoldTracker::new(pose, hold_config),
            stats: SessionStatistics::new(id),
        }
    }

    /// Score one frame and advance the hold state. `None` landmarks mean the
    /// detector found no body; that frame scores zero and ends any hold.
    pub fn process_frame(&mut self, landmarks: Option<&[Landmark]>, now: Instant) -> FrameOutcome {
        let pose = self.tracker.pose();
        let detected = landmarks.map_or(false, |points| points.len() >= LandmarkSet::MIN_LEN);

        let result = score_frame(pose, landmarks);
        let event = self.tracker.update(result.score, now);

        self.stats.record_frame(detected, result.score);
        if let Some(event) = &event {
            self.stats.record_event(event);
            if let HoldEvent::CaptureFired { held_ms } = event {
                info!(session = %self.id, pose = %pose, held_ms, score = result.score, "pose captured");
            }
        }

        FrameOutcome {
            pose,
            band: ScoreBand::classify(result.score, self.tracker.config().qualifying_score),
            phase: self.tracker.state().phase(),
            hold_seconds: self.tracker.hold_seconds(now),
            event,
            result,
        }
    }

    pub fn switch_pose(&mut self, pose: PoseIdentifier) {
        info!(session = %self.id, from = %self.tracker.pose(), to = %pose, "switching pose");
        self.stats.pose_switches += 1;
        self.tracker.switch_pose(pose);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pose(&self) -> PoseIdentifier {
        self.tracker.pose()
    }

    pub fn hold_state(&self) -> HoldState {
        self.tracker.state()
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::fixtures::Body;
    use crate::core::scoring::NO_POSE_FEEDBACK;
    use crate::models::hold::HoldPhase;
    use std::time::Duration;

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn test_strong_pose_held_captures() {
        let mut session = PoseSession::new(PoseIdentifier::FrontDoubleBiceps, HoldConfig::default());
        let body = Body::raised_arms(75.0, 75.0);
        let t0 = Instant::now();

        let first = session.process_frame(Some(body.points()), t0);
        assert_eq!(first.result.score, 100);
        assert_eq!(first.band, ScoreBand::Good);
        assert_eq!(first.event, Some(HoldEvent::HoldStarted));
        assert_eq!(first.hold_seconds, Some(0));

        let mid = session.process_frame(Some(body.points()), at(t0, 1500));
        assert_eq!(mid.phase, HoldPhase::Holding);
        assert_eq!(mid.hold_seconds, Some(1));

        let last = session.process_frame(Some(body.points()), at(t0, 3000));
        assert_eq!(last.event, Some(HoldEvent::CaptureFired { held_ms: 3000 }));
        assert_eq!(last.phase, HoldPhase::Captured);

        let stats = session.statistics();
        assert_eq!(stats.total_frames, 3);
        assert_eq!(stats.captures, 1);
        assert_eq!(stats.holds_started, 1);
        assert_eq!(stats.best_score, 100);
        assert_eq!(stats.session_id, session.id());
    }

    #[test]
    fn test_missing_body_ends_hold_silently() {
        let mut session = PoseSession::new(PoseIdentifier::FrontDoubleBiceps, HoldConfig::default());
        let body = Body::raised_arms(75.0, 75.0);
        let t0 = Instant::now();

        session.process_frame(Some(body.points()), t0);
        let outcome = session.process_frame(None, at(t0, 100));

        assert_eq!(outcome.result.score, 0);
        assert_eq!(outcome.result.feedback, NO_POSE_FEEDBACK);
        assert_eq!(outcome.event, None);
        assert_eq!(outcome.hold_seconds, None);
        assert!(session.hold_state().is_idle());
        assert_eq!(session.statistics().frames_with_body, 1);
    }

    #[test]
    fn test_weak_pose_after_hold_coaches() {
        let mut session = PoseSession::new(PoseIdentifier::FrontDoubleBiceps, HoldConfig::default());
        let t0 = Instant::now();

        session.process_frame(Some(Body::raised_arms(75.0, 75.0).points()), t0);
        let outcome = session.process_frame(Some(Body::raised_arms(125.0, 120.0).points()), at(t0, 800));

        assert_eq!(outcome.result.score, 65);
        assert_eq!(outcome.band, ScoreBand::Poor);
        assert_eq!(outcome.event, Some(HoldEvent::PoseLost { score: 65 }));
        assert_eq!(session.statistics().poses_lost, 1);
    }

    #[test]
    fn test_switch_pose_mid_hold() {
        let mut session = PoseSession::new(PoseIdentifier::FrontDoubleBiceps, HoldConfig::default());
        let body = Body::raised_arms(75.0, 75.0);
        let t0 = Instant::now();

        session.process_frame(Some(body.points()), t0);
        session.process_frame(Some(body.points()), at(t0, 2500));
        session.switch_pose(PoseIdentifier::BackDoubleBiceps);

        assert!(session.hold_state().is_idle());
        assert_eq!(session.pose(), PoseIdentifier::BackDoubleBiceps);
        assert_eq!(session.statistics().pose_switches, 1);

        // 75 degrees is also ideal for the back pose; the hold restarts
        let outcome = session.process_frame(Some(body.points()), at(t0, 3000));
        assert_eq!(outcome.pose, PoseIdentifier::BackDoubleBiceps);
        assert_eq!(outcome.event, Some(HoldEvent::HoldStarted));
    }
}
