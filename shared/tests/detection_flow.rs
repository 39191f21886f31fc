use shared::{
    classify_response, DetailsView, MediaMeta, Modality, PreviewSource, ProgressPolicy, Session,
    SessionError, SessionState, Settled,
};
use std::cell::Cell;
use std::rc::Rc;

const MIB: u64 = 1024 * 1024;

/// Preview source that only counts live handles.
#[derive(Clone, Default)]
struct LiveCount(Rc<Cell<i32>>);

impl PreviewSource for LiveCount {
    type Media = Vec<u8>;
    type Handle = String;

    fn create(&mut self, media: &Vec<u8>) -> String {
        self.0.set(self.0.get() + 1);
        format!("blob:preview/{}", media.len())
    }

    fn revoke(&mut self, _handle: String) {
        self.0.set(self.0.get() - 1);
    }
}

fn new_session(modality: Modality) -> (Session<LiveCount>, Rc<Cell<i32>>) {
    let source = LiveCount::default();
    let live = source.0.clone();
    (Session::new(modality, source, ProgressPolicy::default()), live)
}

#[test]
fn video_submission_renders_fake_verdict() {
    let (mut session, live) = new_session(Modality::Video);
    session
        .select(MediaMeta::new("clip.mp4", "video/mp4", 10 * MIB), vec![0; 16])
        .unwrap();
    assert_eq!(live.get(), 1);

    let request = session.submit().unwrap();
    assert_eq!(request.endpoint_path, "/api/detect/video");
    for _ in 0..3 {
        session.tick(request.id);
    }
    assert_eq!(session.progress(), Some(15));

    let body = r#"{"prediction":"fake","confidence":0.873,
        "details":[{"name":"Face warping","value":0.91,"description":"..."}]}"#;
    let outcome = classify_response(200, body);
    assert_eq!(session.settle(request.id, outcome), Settled::Staged);
    assert_eq!(session.progress(), Some(100));
    assert!(session.reveal(request.id));

    let view = session.result_view().unwrap();
    assert_eq!(view.verdict_label, "Fake/Deepfake Content");
    assert_eq!(view.confidence_text, "87.30%");
    let DetailsView::Rows(rows) = view.details else {
        panic!("expected detail rows");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Face warping");
    assert_eq!(rows[0].percent_text, "91.00%");

    session.reset();
    assert_eq!(live.get(), 0);
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn text_file_is_rejected_by_audio_detector_before_any_request() {
    let (mut session, live) = new_session(Modality::Audio);
    let err = session
        .select(MediaMeta::new("notes.txt", "text/plain", 512), b"hello".to_vec())
        .unwrap_err();

    assert!(matches!(err, SessionError::Rejected(_)));
    assert_eq!(
        session.error_message().as_deref(),
        Some("Please select an audio file (WAV, MP3)")
    );
    assert_eq!(live.get(), 0);
    assert_eq!(session.submit().unwrap_err(), SessionError::NoCandidate);
    assert_eq!(session.in_flight(), None);
}

#[test]
fn server_error_fails_then_retry_resubmits() {
    let (mut session, live) = new_session(Modality::Image);
    session
        .select(MediaMeta::new("face.png", "image/png", 2 * MIB), vec![1; 8])
        .unwrap();

    let first = session.submit().unwrap();
    let outcome = classify_response(500, r#"{"prediction":"real","confidence":1}"#);
    assert_eq!(session.settle(first.id, outcome), Settled::Failed);

    assert!(matches!(session.state(), SessionState::Failed(_)));
    assert_eq!(
        session.error_message().as_deref(),
        Some("Error processing image. Please try again.")
    );
    assert_eq!(live.get(), 1);
    assert!(session.preview().is_some());

    let retry = session.submit().unwrap();
    assert_ne!(retry.id, first.id);
    assert_eq!(session.state(), &SessionState::Submitting { progress: 0 });
}

#[test]
fn video_size_boundary() {
    let (mut session, _) = new_session(Modality::Video);
    assert!(session
        .select(MediaMeta::new("max.mp4", "video/mp4", 50 * MIB), vec![])
        .is_ok());
    assert!(session
        .select(MediaMeta::new("over.mp4", "video/mp4", 50 * MIB + 1), vec![])
        .is_err());
}
