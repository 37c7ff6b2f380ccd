//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use mixdown_graph::prelude::*;
//! ```

pub use crate::clipboard::{
    Clipboard, CopyOutcome, DeleteOutcome, DuplicateOutcome, PasteOutcome, PastedSet,
    delete_selection,
};
pub use crate::document::GraphDocument;
pub use crate::edge::{Edge, EdgeId};
pub use crate::error::{GraphError, GraphResult};
pub use crate::node::{
    AnalysisMetric, AnalyzeConfig, ConvertConfig, InputConfig, MediaFormat, MediaInfo, Node,
    NodeConfig, NodeId, NodeKind, NodeResult, Position, PreviewConfig,
};
pub use crate::remap::{Offset, Remapped, remap};
pub use crate::store::GraphStore;
