use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// 50 MiB, the largest video accepted before upload.
pub const VIDEO_SIZE_CEILING: u64 = 50 * 1024 * 1024;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    Image,
    Video,
    Audio,
}

/// Everything that differs between the three detectors. The workflow itself
/// is shared and reads its per-modality rules from here.
#[derive(Debug, PartialEq, Eq)]
pub struct ModalityDescriptor {
    pub modality: Modality,
    pub mime_allow_list: &'static [&'static str],
    pub size_ceiling: Option<u64>,
    pub endpoint_path: &'static str,
    pub synthetic_progress: bool,
    /// Human readable list of accepted formats.
    pub formats: &'static str,
    pub type_rejection: &'static str,
    pub size_rejection: &'static str,
    pub title: &'static str,
    pub about: &'static str,
}

static IMAGE: ModalityDescriptor = ModalityDescriptor {
    modality: Modality::Image,
    mime_allow_list: &["jpeg", "jpg", "png"],
    size_ceiling: None,
    endpoint_path: "/api/detect/image",
    synthetic_progress: false,
    formats: "JPG, PNG",
    type_rejection: "Please select an image file (JPG, PNG)",
    size_rejection: "",
    title: "Image Deepfake Detection",
    about: "The image detector looks for pixel-level inconsistencies, facial feature \
            abnormalities, lighting mismatches and compression artifacts typical of \
            manipulated or generated images.",
};

static VIDEO: ModalityDescriptor = ModalityDescriptor {
    modality: Modality::Video,
    mime_allow_list: &["mp4", "avi", "mov", "quicktime"],
    size_ceiling: Some(VIDEO_SIZE_CEILING),
    endpoint_path: "/api/detect/video",
    synthetic_progress: true,
    formats: "MP4, AVI, MOV",
    type_rejection: "Please select a video file (MP4, AVI, MOV)",
    size_rejection: "File size too large. Please select a video smaller than 50MB",
    title: "Video Deepfake Detection",
    about: "The video detector analyzes individual frames and the consistency between \
            them, flagging face warping, unnatural movement and blending artifacts. \
            Processing may take several minutes for longer videos.",
};

static AUDIO: ModalityDescriptor = ModalityDescriptor {
    modality: Modality::Audio,
    mime_allow_list: &["wav", "mp3", "mpeg"],
    size_ceiling: None,
    endpoint_path: "/api/detect/audio",
    synthetic_progress: false,
    formats: "WAV, MP3",
    type_rejection: "Please select an audio file (WAV, MP3)",
    size_rejection: "",
    title: "Audio Deepfake Detection",
    about: "The audio detector examines spectral characteristics and phoneme \
            transitions to find artifacts common in synthetic speech. Clear speech \
            with little background noise gives the best results.",
};

impl Modality {
    pub fn descriptor(self) -> &'static ModalityDescriptor {
        match self {
            Modality::Image => &IMAGE,
            Modality::Video => &VIDEO,
            Modality::Audio => &AUDIO,
        }
    }

    pub fn all() -> impl Iterator<Item = Modality> {
        <Modality as strum::IntoEnumIterator>::iter()
    }

    /// Capitalised label for tabs and buttons.
    pub fn label(self) -> &'static str {
        match self {
            Modality::Image => "Image",
            Modality::Video => "Video",
            Modality::Audio => "Audio",
        }
    }
}

impl ModalityDescriptor {
    /// Value for the `accept` attribute of the file input, e.g. `video/mp4,video/avi`.
    pub fn accept_attr(&self) -> String {
        self.mime_allow_list
            .iter()
            .map(|subtype| format!("{}/{}", self.modality, subtype))
            .collect::<Vec<_>>()
            .join(",")
    }
}
