use crate::modality::Modality;
use thiserror::Error;

/// What the browser tells us about a picked file before any bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMeta {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl MediaMeta {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unsupported type {mime:?} for {modality} detection")]
    UnsupportedType { modality: Modality, mime: String },
    #[error("{size} bytes exceeds the {ceiling} byte limit for {modality} detection")]
    TooLarge {
        modality: Modality,
        size: u64,
        ceiling: u64,
    },
}

impl Rejection {
    /// Text shown inline under the detector.
    pub fn user_message(&self) -> &'static str {
        match self {
            Rejection::UnsupportedType { modality, .. } => modality.descriptor().type_rejection,
            Rejection::TooLarge { modality, .. } => modality.descriptor().size_rejection,
        }
    }
}

/// Gate a candidate file for `modality`. Pure: no preview or request may be
/// started for a file that does not pass.
pub fn validate(meta: &MediaMeta, modality: Modality) -> Result<(), Rejection> {
    let descriptor = modality.descriptor();

    if !mime_allowed(&meta.mime, modality, descriptor.mime_allow_list) {
        return Err(Rejection::UnsupportedType {
            modality,
            mime: meta.mime.clone(),
        });
    }

    if let Some(ceiling) = descriptor.size_ceiling {
        if meta.size > ceiling {
            return Err(Rejection::TooLarge {
                modality,
                size: meta.size,
                ceiling,
            });
        }
    }

    Ok(())
}

fn mime_allowed(mime: &str, modality: Modality, allow_list: &[&str]) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.split_once('/') {
        Some((family, subtype)) => {
            family == modality.as_ref() && allow_list.iter().any(|allowed| *allowed == subtype)
        }
        None => false,
    }
}
