//! Detection session state machine.
//!
//! A [`Session`] owns everything belonging to one detector tab: the accepted
//! candidate, its preview, the outstanding request and the verdict. The host
//! (the Yew component) performs the actual I/O and timers and reports back
//! through [`Session::tick`], [`Session::settle`] and [`Session::reveal`],
//! each tagged with the [`RequestId`] handed out by [`Session::submit`].
//! Anything carrying an id other than the one currently in flight is stale
//! and ignored, so a response for a request superseded by a reset can never
//! reach the new session.

use crate::modality::{Modality, ModalityDescriptor};
use crate::preview::{PreviewManager, PreviewSource};
use crate::response::{DetectionError, DetectionResult};
use crate::validation::{validate, MediaMeta, Rejection};
use crate::view::ResultView;
use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Selected,
    Submitting { progress: u8 },
    Succeeded(DetectionResult),
    Failed(DetectionError),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Selected => "selected",
            SessionState::Submitting { .. } => "submitting",
            SessionState::Succeeded(_) => "succeeded",
            SessionState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "#{}", _0)]
pub struct RequestId(u64);

#[derive(Debug, Clone)]
pub struct MediaCandidate<M> {
    pub meta: MediaMeta,
    pub media: M,
}

/// One submission, ready for the transport.
#[derive(Debug, Clone)]
pub struct DetectionRequest<M> {
    pub id: RequestId,
    pub modality: Modality,
    pub endpoint_path: &'static str,
    pub file_name: String,
    pub media: M,
}

/// Outcome of reporting a response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Success: progress is pinned at 100 and the result waits for `reveal`.
    Staged,
    Failed,
    /// Response for a request that is no longer current; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("file rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("a submission is in flight")]
    Busy,
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("no file selected")]
    NoCandidate,
    #[error("result already shown, reset to analyze another file")]
    Finished,
}

/// Synthetic progress: each tick adds `step`, never passing `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPolicy {
    pub step: u8,
    pub ceiling: u8,
}

impl Default for ProgressPolicy {
    fn default() -> Self {
        Self { step: 5, ceiling: 90 }
    }
}

pub struct Session<S: PreviewSource> {
    modality: Modality,
    previews: PreviewManager<S>,
    candidate: Option<MediaCandidate<S::Media>>,
    state: SessionState,
    rejection: Option<Rejection>,
    sequence: u64,
    in_flight: Option<RequestId>,
    staged: Option<DetectionResult>,
    progress: ProgressPolicy,
}

impl<S: PreviewSource> Session<S> {
    pub fn new(modality: Modality, source: S, progress: ProgressPolicy) -> Self {
        Self {
            modality,
            previews: PreviewManager::new(source),
            candidate: None,
            state: SessionState::Idle,
            rejection: None,
            sequence: 0,
            in_flight: None,
            staged: None,
            progress,
        }
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn descriptor(&self) -> &'static ModalityDescriptor {
        self.modality.descriptor()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn candidate(&self) -> Option<&MediaCandidate<S::Media>> {
        self.candidate.as_ref()
    }

    pub fn preview(&self) -> Option<&S::Handle> {
        self.previews.current()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting { .. })
    }

    pub fn progress(&self) -> Option<u8> {
        match self.state {
            SessionState::Submitting { progress } => Some(progress),
            _ => None,
        }
    }

    /// Inline message for the form area: a failed submission or, failing
    /// that, the last rejected selection.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            SessionState::Failed(error) => Some(error.user_message(self.modality)),
            _ => self
                .rejection
                .as_ref()
                .map(|rejection| rejection.user_message().to_string()),
        }
    }

    pub fn result_view(&self) -> Option<ResultView> {
        match &self.state {
            SessionState::Succeeded(result) => Some(ResultView::from_result(result)),
            _ => None,
        }
    }

    /// Accept or reject a newly picked file. A rejected file leaves no
    /// candidate and no preview behind.
    pub fn select(&mut self, meta: MediaMeta, media: S::Media) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::Busy);
        }

        if let Err(rejection) = validate(&meta, self.modality) {
            log::info!("{} detector rejected {:?}: {}", self.modality, meta.name, rejection);
            self.previews.release();
            self.candidate = None;
            self.rejection = Some(rejection.clone());
            self.transition(SessionState::Idle);
            return Err(rejection.into());
        }

        self.rejection = None;
        self.previews.acquire(&media);
        self.candidate = Some(MediaCandidate { meta, media });
        self.transition(SessionState::Selected);
        Ok(())
    }

    pub fn submit(&mut self) -> Result<DetectionRequest<S::Media>, SessionError>
    where
        S::Media: Clone,
    {
        match self.state {
            SessionState::Submitting { .. } => return Err(SessionError::AlreadySubmitting),
            SessionState::Succeeded(_) => return Err(SessionError::Finished),
            SessionState::Idle | SessionState::Selected | SessionState::Failed(_) => {}
        }
        let candidate = self.candidate.as_ref().ok_or(SessionError::NoCandidate)?;

        self.sequence += 1;
        let id = RequestId(self.sequence);
        let request = DetectionRequest {
            id,
            modality: self.modality,
            endpoint_path: self.descriptor().endpoint_path,
            file_name: candidate.meta.name.clone(),
            media: candidate.media.clone(),
        };

        self.in_flight = Some(id);
        self.staged = None;
        self.transition(SessionState::Submitting { progress: 0 });
        Ok(request)
    }

    /// Advance synthetic progress for `id`. `None` means the caller should
    /// stop its timer.
    pub fn tick(&mut self, id: RequestId) -> Option<u8> {
        if self.in_flight != Some(id) || self.staged.is_some() {
            return None;
        }
        if !self.descriptor().synthetic_progress {
            return None;
        }
        let SessionState::Submitting { progress } = self.state else {
            return None;
        };

        let next = progress
            .saturating_add(self.progress.step)
            .min(self.progress.ceiling)
            .max(progress);
        self.state = SessionState::Submitting { progress: next };
        Some(next)
    }

    pub fn settle(
        &mut self,
        id: RequestId,
        outcome: Result<DetectionResult, DetectionError>,
    ) -> Settled {
        if self.in_flight != Some(id) || self.staged.is_some() || !self.is_submitting() {
            log::debug!("{} detector dropped stale response {}", self.modality, id);
            return Settled::Stale;
        }

        match outcome {
            Ok(result) => {
                self.transition(SessionState::Submitting { progress: 100 });
                self.staged = Some(result);
                Settled::Staged
            }
            Err(error) => {
                self.in_flight = None;
                self.transition(SessionState::Failed(error));
                Settled::Failed
            }
        }
    }

    /// Show a staged result. Returns false if `id` was superseded meanwhile.
    pub fn reveal(&mut self, id: RequestId) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        match self.staged.take() {
            Some(result) => {
                self.in_flight = None;
                self.transition(SessionState::Succeeded(result));
                true
            }
            None => false,
        }
    }

    /// Back to `Idle`. Releases the preview and orphans any request in flight.
    pub fn reset(&mut self) {
        if let Some(id) = self.in_flight.take() {
            log::debug!("{} detector abandoning request {}", self.modality, id);
        }
        self.previews.release();
        self.candidate = None;
        self.staged = None;
        self.rejection = None;
        self.transition(SessionState::Idle);
    }

    pub fn switch_modality(&mut self, modality: Modality) {
        self.reset();
        self.modality = modality;
    }

    fn transition(&mut self, next: SessionState) {
        log::debug!(
            "{} detector: {} -> {}",
            self.modality,
            self.state.name(),
            next.name()
        );
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modality::VIDEO_SIZE_CEILING;
    use crate::preview::testing::CountingSource;
    use crate::response::{Prediction, ProtocolError};

    fn session(modality: Modality) -> (Session<CountingSource>, CountingSource) {
        let source = CountingSource::default();
        let session = Session::new(modality, source.clone(), ProgressPolicy::default());
        (session, source)
    }

    fn clip(size: u64) -> MediaMeta {
        MediaMeta::new("clip.mp4", "video/mp4", size)
    }

    fn verdict() -> DetectionResult {
        DetectionResult {
            prediction: Prediction::Real,
            confidence: 0.8,
            details: None,
            processing_time: None,
        }
    }

    #[test]
    fn select_acquires_preview() {
        let (mut session, source) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();

        assert_eq!(session.state(), &SessionState::Selected);
        assert_eq!(session.preview(), Some(&1));
        assert_eq!(source.ledger.borrow().live(), 1);
    }

    #[test]
    fn reselect_replaces_preview() {
        let (mut session, source) = session(Modality::Video);
        session.select(clip(10), "a").unwrap();
        session.select(clip(20), "b").unwrap();

        assert_eq!(session.preview(), Some(&2));
        assert_eq!(source.ledger.borrow().revoked, vec![1]);
        assert_eq!(session.candidate().unwrap().media, "b");
    }

    #[test]
    fn rejection_clears_candidate_and_preview() {
        let (mut session, source) = session(Modality::Video);
        session.select(clip(10), "ok").unwrap();

        let err = session.select(clip(VIDEO_SIZE_CEILING + 1), "big").unwrap_err();
        assert!(matches!(err, SessionError::Rejected(Rejection::TooLarge { .. })));
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(session.candidate().is_none());
        assert_eq!(source.ledger.borrow().live(), 0);
        assert_eq!(
            session.error_message().as_deref(),
            Some("File size too large. Please select a video smaller than 50MB")
        );
        assert_eq!(session.submit().unwrap_err(), SessionError::NoCandidate);
    }

    #[test]
    fn submit_builds_request_for_modality_endpoint() {
        let (mut session, _) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        let request = session.submit().unwrap();

        assert_eq!(request.endpoint_path, "/api/detect/video");
        assert_eq!(request.file_name, "clip.mp4");
        assert_eq!(request.media, "clip");
        assert_eq!(session.state(), &SessionState::Submitting { progress: 0 });
        assert_eq!(session.in_flight(), Some(request.id));
    }

    #[test]
    fn second_submit_is_refused() {
        let (mut session, _) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        let first = session.submit().unwrap();

        assert_eq!(session.submit().unwrap_err(), SessionError::AlreadySubmitting);
        assert_eq!(session.in_flight(), Some(first.id));
    }

    #[test]
    fn selection_is_refused_while_submitting() {
        let (mut session, _) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        session.submit().unwrap();

        assert_eq!(session.select(clip(5), "other").unwrap_err(), SessionError::Busy);
        assert_eq!(session.candidate().unwrap().media, "clip");
    }

    #[test]
    fn progress_climbs_by_five_and_stops_at_ninety() {
        let (mut session, _) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        let id = session.submit().unwrap().id;

        let mut seen = vec![];
        for _ in 0..30 {
            seen.push(session.tick(id).unwrap());
        }
        assert_eq!(&seen[..3], &[5, 10, 15]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 90);
        assert!(seen.iter().all(|p| *p <= 90));
    }

    #[test]
    fn modalities_without_synthetic_progress_do_not_tick() {
        let (mut session, _) = session(Modality::Audio);
        session
            .select(MediaMeta::new("voice.wav", "audio/wav", 10), "voice")
            .unwrap();
        let id = session.submit().unwrap().id;

        assert_eq!(session.tick(id), None);
        assert_eq!(session.progress(), Some(0));
    }

    #[test]
    fn success_pins_progress_at_hundred_until_revealed() {
        let (mut session, _) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        let id = session.submit().unwrap().id;
        session.tick(id);

        assert_eq!(session.settle(id, Ok(verdict())), Settled::Staged);
        assert_eq!(session.progress(), Some(100));
        assert_eq!(session.tick(id), None);
        assert_eq!(session.progress(), Some(100));

        assert!(session.reveal(id));
        assert_eq!(session.state(), &SessionState::Succeeded(verdict()));
        assert_eq!(session.result_view().unwrap().verdict_label, "Real Content");
        assert!(!session.reveal(id));
    }

    #[test]
    fn failure_keeps_candidate_and_preview_for_retry() {
        let (mut session, source) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        let id = session.submit().unwrap().id;

        let error = DetectionError::Protocol(ProtocolError::MissingField("prediction"));
        assert_eq!(session.settle(id, Err(error.clone())), Settled::Failed);
        assert_eq!(session.state(), &SessionState::Failed(error));
        assert_eq!(
            session.error_message().as_deref(),
            Some("Error processing video. Please try again.")
        );
        assert_eq!(source.ledger.borrow().live(), 1);
        assert_eq!(session.tick(id), None);

        let retry = session.submit().unwrap();
        assert!(retry.id > id);
        assert_eq!(session.state(), &SessionState::Submitting { progress: 0 });
    }

    #[test]
    fn reset_mid_flight_orphans_the_response() {
        let (mut session, source) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        let id = session.submit().unwrap().id;
        session.tick(id);

        session.reset();
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(source.ledger.borrow().live(), 0);

        assert_eq!(session.tick(id), None);
        assert_eq!(session.settle(id, Ok(verdict())), Settled::Stale);
        assert!(!session.reveal(id));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn stale_response_does_not_touch_newer_submission() {
        let (mut session, _) = session(Modality::Video);
        session.select(clip(10), "first").unwrap();
        let old = session.submit().unwrap().id;
        session.reset();

        session.select(clip(10), "second").unwrap();
        let current = session.submit().unwrap().id;

        assert_eq!(
            session.settle(old, Err(DetectionError::Status(500))),
            Settled::Stale
        );
        assert_eq!(session.state(), &SessionState::Submitting { progress: 0 });
        assert_eq!(session.settle(current, Ok(verdict())), Settled::Staged);
    }

    #[test]
    fn reset_between_stage_and_reveal_discards_result() {
        let (mut session, _) = session(Modality::Image);
        session
            .select(MediaMeta::new("a.png", "image/png", 10), "a")
            .unwrap();
        let id = session.submit().unwrap().id;
        session.settle(id, Ok(verdict()));

        session.reset();
        assert!(!session.reveal(id));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn submit_after_success_requires_reset() {
        let (mut session, _) = session(Modality::Image);
        session
            .select(MediaMeta::new("a.png", "image/png", 10), "a")
            .unwrap();
        let id = session.submit().unwrap().id;
        session.settle(id, Ok(verdict()));
        session.reveal(id);

        assert_eq!(session.submit().unwrap_err(), SessionError::Finished);
    }

    #[test]
    fn switching_modality_resets_and_releases() {
        let (mut session, source) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        session.switch_modality(Modality::Audio);

        assert_eq!(session.modality(), Modality::Audio);
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(source.ledger.borrow().live(), 0);
    }

    #[test]
    fn dropping_session_releases_preview() {
        let (mut session, source) = session(Modality::Video);
        session.select(clip(10), "clip").unwrap();
        drop(session);
        assert_eq!(source.ledger.borrow().live(), 0);
    }
}
