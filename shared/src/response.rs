use crate::modality::Modality;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Prediction {
    Real,
    Fake,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub description: String,
}

/// Normalized verdict of one successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    pub prediction: Prediction,
    pub confidence: f64,
    pub details: Option<Vec<Detail>>,
    /// Server-side processing time in seconds, when reported.
    pub processing_time: Option<f64>,
}

// Wire shape. Required fields are optional here so that a missing field is
// reported by name instead of as a generic decode failure. Older servers send
// the verdict as `result`; `prediction` wins when both are present.
#[derive(Deserialize)]
struct RawResponse {
    prediction: Option<String>,
    #[serde(default)]
    result: Option<String>,
    confidence: Option<f64>,
    #[serde(default)]
    details: Option<Vec<Detail>>,
    #[serde(default)]
    processing_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    #[error("malformed response body: {0}")]
    Malformed(String),
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("unknown prediction {0:?}")]
    UnknownPrediction(String),
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
    #[error("detail {name:?} has value {value} outside [0, 1]")]
    DetailOutOfRange { name: String, value: f64 },
}

/// Why a submission produced no result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectionError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with {0}")]
    Status(u16),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl DetectionError {
    /// The user sees the same retry prompt for every failure class; the
    /// `Display` text is for the logs.
    pub fn user_message(&self, modality: Modality) -> String {
        format!("Error processing {}. Please try again.", modality)
    }
}

fn unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

pub fn interpret(body: &str) -> Result<DetectionResult, ProtocolError> {
    let raw: RawResponse =
        serde_json::from_str(body).map_err(|e| ProtocolError::Malformed(e.to_string()))?;

    let prediction = match raw.prediction.as_deref().or(raw.result.as_deref()) {
        Some("real") => Prediction::Real,
        Some("fake") => Prediction::Fake,
        Some(other) => return Err(ProtocolError::UnknownPrediction(other.to_string())),
        None => return Err(ProtocolError::MissingField("prediction")),
    };

    let confidence = raw
        .confidence
        .ok_or(ProtocolError::MissingField("confidence"))?;
    if !unit_interval(confidence) {
        return Err(ProtocolError::ConfidenceOutOfRange(confidence));
    }

    if let Some(detail) = raw
        .details
        .iter()
        .flatten()
        .find(|detail| !unit_interval(detail.value))
    {
        return Err(ProtocolError::DetailOutOfRange {
            name: detail.name.clone(),
            value: detail.value,
        });
    }

    Ok(DetectionResult {
        prediction,
        confidence,
        details: raw.details,
        processing_time: raw.processing_time.filter(|t| t.is_finite() && *t >= 0.0),
    })
}

/// Map an HTTP status and body to a result. Non-2xx bodies are never parsed.
pub fn classify_response(status: u16, body: &str) -> Result<DetectionResult, DetectionError> {
    if !(200..300).contains(&status) {
        return Err(DetectionError::Status(status));
    }
    Ok(interpret(body)?)
}
