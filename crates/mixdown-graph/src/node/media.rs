//! Media vocabulary shared by node configurations.
//!
//! These types are deliberately shallow: the core passes paths and probe
//! results through without interpreting codecs or resolutions. Anything the
//! processing backend reports lands here as opaque, display-ready data.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Container format a converter stage encodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MediaFormat {
    /// MPEG-4 container (H.264/AAC by convention).
    #[default]
    Mp4,
    /// Matroska container.
    Mkv,
    /// WebM container.
    Webm,
    /// Animated GIF.
    Gif,
    /// MP3 audio.
    Mp3,
    /// WAV audio.
    Wav,
    /// FLAC audio.
    Flac,
}

/// Quality metric an analyzer stage computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisMetric {
    /// Netflix VMAF perceptual score.
    #[default]
    Vmaf,
    /// Peak signal-to-noise ratio.
    Psnr,
    /// Structural similarity index.
    Ssim,
    /// Integrated loudness (LUFS).
    Loudness,
}

/// Probe result for an input file, reported by the processing backend.
///
/// Transient: present only while the node holds a completed probe, stripped
/// whenever the graph is captured as a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Frame width in pixels, absent for audio-only media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Frame height in pixels, absent for audio-only media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Video codec name as reported by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    /// Audio codec name as reported by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
}

impl MediaInfo {
    /// Creates a probe result with just a duration.
    pub fn with_duration(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            width: None,
            height: None,
            video_codec: None,
            audio_codec: None,
        }
    }
}
