//! Client-side deepfake detection workflow shared by the frontend: per-modality
//! file validation, preview ownership, the submission state machine, response
//! interpretation and the display model of a verdict.

pub mod config;
pub mod modality;
pub mod preview;
pub mod response;
pub mod session;
pub mod validation;
pub mod view;

pub use config::{ConfigError, DetectorConfig};
pub use modality::{Modality, ModalityDescriptor};
pub use preview::{PreviewManager, PreviewSource};
pub use response::{
    classify_response, interpret, Detail, DetectionError, DetectionResult, Prediction,
    ProtocolError,
};
pub use session::{
    DetectionRequest, MediaCandidate, ProgressPolicy, RequestId, Session, SessionError,
    SessionState, Settled,
};
pub use validation::{validate, MediaMeta, Rejection};
pub use view::{format_percent, DetailRow, DetailsView, ResultView};
