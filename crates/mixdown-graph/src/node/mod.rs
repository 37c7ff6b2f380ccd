//! Node types for pipeline graphs.
//!
//! This module provides the editing-side node abstractions:
//! - [`NodeId`]: Unique identifier for nodes
//! - [`Node`]: A placed, selectable, configured pipeline stage
//! - [`NodeConfig`]: Typed per-kind configuration
//! - [`NodeResult`]: Write-back results reported by the processing backend

mod config;
mod id;
mod media;

pub use config::{
    AnalyzeConfig, ConvertConfig, InputConfig, NodeConfig, NodeKind, PreviewConfig,
};
pub use id::NodeId;
pub use media::{AnalysisMetric, MediaFormat, MediaInfo};

use serde::{Deserialize, Serialize};

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by the given deltas.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A pipeline stage placed on the canvas.
///
/// `selected` is editing state and never serialized; the selection is always
/// recomputed as a filter over live nodes. `error` is the last failure
/// reported by the backend for this node, transient like the per-kind run
/// state inside `config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,
    /// Canvas position.
    pub position: Position,
    /// Whether the node is part of the current selection. Never persisted.
    #[serde(skip)]
    pub selected: bool,
    /// Last error reported for this node. Transient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Typed per-kind configuration.
    #[serde(flatten)]
    pub config: NodeConfig,
}

impl Node {
    /// Creates a node with a fresh id at the given position.
    pub fn new(position: Position, config: impl Into<NodeConfig>) -> Self {
        Self::with_id(NodeId::new(), position, config)
    }

    /// Creates a node with a specific id.
    pub fn with_id(id: NodeId, position: Position, config: impl Into<NodeConfig>) -> Self {
        Self {
            id,
            position,
            selected: false,
            error: None,
            config: config.into(),
        }
    }

    /// Returns the kind discriminant of this node.
    pub const fn kind(&self) -> NodeKind {
        self.config.kind()
    }

    /// Clears transient run state: per-kind results and the error slot.
    pub fn reset_transient(&mut self) {
        self.config.reset_transient();
        self.error = None;
    }

    /// Returns a deselected copy with all transient run state cleared.
    pub fn sanitized(&self) -> Self {
        let mut node = self.clone();
        node.selected = false;
        node.reset_transient();
        node
    }

    /// Applies a backend result to this node.
    ///
    /// A result whose kind does not match the node's configuration is
    /// ignored: the graph may have been rewired between pipeline start and
    /// result arrival, and a stale result must not clobber a different
    /// stage's state.
    pub fn apply_result(&mut self, result: NodeResult) {
        match (&mut self.config, result) {
            (NodeConfig::Input(config), NodeResult::Probed(media)) => {
                config.media = Some(media);
                self.error = None;
            }
            (NodeConfig::Convert(config), NodeResult::Converted { output_path }) => {
                config.output_path = output_path;
                self.error = None;
            }
            (NodeConfig::Analyze(config), NodeResult::Analyzed { score }) => {
                config.score = Some(score);
                config.analyzing = false;
                self.error = None;
            }
            (NodeConfig::Preview(config), NodeResult::Rendered { frame_path }) => {
                config.frame_path = Some(frame_path);
                self.error = None;
            }
            (config, NodeResult::Failed { message }) => {
                if let NodeConfig::Analyze(analyze) = config {
                    analyze.analyzing = false;
                }
                self.error = Some(message);
            }
            _ => {}
        }
    }
}

/// A per-node result reported by the processing backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeResult {
    /// Probe completed for an input stage.
    Probed(MediaInfo),
    /// Conversion completed, output written.
    Converted {
        /// Path of the produced file.
        output_path: String,
    },
    /// Analysis completed.
    Analyzed {
        /// Computed metric score.
        score: f64,
    },
    /// Preview frame rendered.
    Rendered {
        /// Path of the rendered frame.
        frame_path: String,
    },
    /// The stage failed.
    Failed {
        /// Backend error message, surfaced verbatim.
        message: String,
    },
}
