//! Per-kind node configuration.
//!
//! Each node kind owns a typed configuration struct; [`NodeConfig`] is the
//! tagged union over them. At the serialization boundary a configuration
//! becomes a `"type"`-tagged JSON object, which is the only place the
//! untyped "data bag" shape exists.
//!
//! Configuration structs mix persistent fields (what the user chose) with
//! transient fields (what one run produced). [`NodeConfig::reset_transient`]
//! is the single rule for stripping the latter; the document codec and the
//! clipboard paste path both go through it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use super::media::{AnalysisMetric, MediaFormat, MediaInfo};

/// Kind discriminant for pipeline nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// Media source stage.
    Input,
    /// Format/quality conversion stage.
    Convert,
    /// Quality analysis stage.
    Analyze,
    /// Frame preview stage.
    Preview,
}

/// Typed configuration for a pipeline node, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeConfig {
    /// Media source stage.
    Input(InputConfig),
    /// Format/quality conversion stage.
    Convert(ConvertConfig),
    /// Quality analysis stage.
    Analyze(AnalyzeConfig),
    /// Frame preview stage.
    Preview(PreviewConfig),
}

impl NodeConfig {
    /// Returns the kind discriminant for this configuration.
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::Input(_) => NodeKind::Input,
            NodeConfig::Convert(_) => NodeKind::Convert,
            NodeConfig::Analyze(_) => NodeKind::Analyze,
            NodeConfig::Preview(_) => NodeKind::Preview,
        }
    }

    /// Returns whether this is an input stage.
    pub const fn is_input(&self) -> bool {
        matches!(self, NodeConfig::Input(_))
    }

    /// Clears every transient field, returning the configuration to its
    /// not-yet-processed state. Persistent user choices are untouched.
    ///
    /// Idempotent: resetting an already-reset configuration is a no-op.
    pub fn reset_transient(&mut self) {
        match self {
            NodeConfig::Input(config) => {
                config.media = None;
            }
            NodeConfig::Convert(config) => {
                config.output_path = String::new();
            }
            NodeConfig::Analyze(config) => {
                config.score = None;
                config.analyzing = false;
            }
            NodeConfig::Preview(config) => {
                config.frame_path = None;
            }
        }
    }
}

/// Configuration for an input stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the source media file. Opaque to the core.
    #[serde(default)]
    pub source_path: String,
    /// Probe result for the source file. Transient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaInfo>,
}

impl InputConfig {
    /// Creates an input configuration for the given source path.
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            media: None,
        }
    }
}

/// Configuration for a conversion stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Target container format.
    #[serde(default)]
    pub format: MediaFormat,
    /// Quality slider position, 0..=100.
    #[serde(default = "default_quality")]
    pub quality: u32,
    /// Path of the last produced output. Transient, empty when unset.
    #[serde(default)]
    pub output_path: String,
}

impl ConvertConfig {
    /// Creates a conversion configuration for the given format.
    pub fn new(format: MediaFormat) -> Self {
        Self {
            format,
            quality: default_quality(),
            output_path: String::new(),
        }
    }

    /// Sets the quality slider position, clamped to 0..=100.
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality.min(100);
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new(MediaFormat::default())
    }
}

fn default_quality() -> u32 {
    80
}

/// Configuration for an analysis stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    /// Metric to compute.
    #[serde(default)]
    pub metric: AnalysisMetric,
    /// Computed score from the last run. Transient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Whether an analysis is currently in flight. Transient.
    #[serde(default)]
    pub analyzing: bool,
}

impl AnalyzeConfig {
    /// Creates an analysis configuration for the given metric.
    pub fn new(metric: AnalysisMetric) -> Self {
        Self {
            metric,
            score: None,
            analyzing: false,
        }
    }
}

/// Configuration for a preview stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Offset into the media to preview, in seconds.
    #[serde(default)]
    pub frame_offset_secs: f64,
    /// Path of the last rendered preview frame. Transient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_path: Option<String>,
}

impl PreviewConfig {
    /// Creates a preview configuration at the given offset.
    pub fn at_offset(frame_offset_secs: f64) -> Self {
        Self {
            frame_offset_secs,
            frame_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_kind() {
        let config = NodeConfig::Convert(ConvertConfig::default());
        assert_eq!(config.kind(), NodeKind::Convert);
        assert!(!config.is_input());
    }

    #[test]
    fn test_reset_transient_clears_run_state() {
        let mut config = NodeConfig::Analyze(AnalyzeConfig {
            metric: AnalysisMetric::Psnr,
            score: Some(42.5),
            analyzing: true,
        });
        config.reset_transient();

        let NodeConfig::Analyze(analyze) = &config else {
            panic!("kind changed");
        };
        assert_eq!(analyze.metric, AnalysisMetric::Psnr);
        assert_eq!(analyze.score, None);
        assert!(!analyze.analyzing);
    }

    #[test]
    fn test_reset_transient_is_idempotent() {
        let mut config = NodeConfig::Convert(ConvertConfig {
            format: MediaFormat::Webm,
            quality: 55,
            output_path: "/tmp/out.webm".into(),
        });
        config.reset_transient();
        let once = config.clone();
        config.reset_transient();
        assert_eq!(config, once);
    }

    #[test]
    fn test_serde_tag_shape() {
        let config = NodeConfig::Input(InputConfig::new("/media/clip.mov"));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "input");
        assert_eq!(json["source_path"], "/media/clip.mov");
    }

    #[test]
    fn test_deserialize_tolerates_missing_transients() {
        let json = r#"{"type":"convert","format":"mkv"}"#;
        let config: NodeConfig = serde_json::from_str(json).unwrap();
        let NodeConfig::Convert(convert) = config else {
            panic!("wrong kind");
        };
        assert_eq!(convert.format, MediaFormat::Mkv);
        assert_eq!(convert.quality, 80);
        assert_eq!(convert.output_path, "");
    }
}
