//! Workflow records.

use std::str::FromStr;

use derive_more::{Debug, Display, From, Into};
use jiff::Timestamp;
use mixdown_graph::document::GraphDocument;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString, IntoStaticStr};
use uuid::Uuid;

/// Unique identifier for a workflow.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct WorkflowId(Uuid);

impl WorkflowId {
    /// Creates a new time-derived workflow ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a workflow ID from an existing UUID.
    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[inline]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for WorkflowId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Where a workflow comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(StrumDisplay, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowCategory {
    /// Built into the program; immutable, fixed at startup.
    Preset,
    /// User-created and persisted.
    Custom,
}

/// A named, persistable pipeline template.
///
/// The embedded graph document is sanitized: a workflow records what the
/// user assembled, never what one particular run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique workflow identifier.
    pub id: WorkflowId,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Preset or custom.
    pub category: WorkflowCategory,
    /// The template graph.
    #[serde(flatten)]
    pub graph: GraphDocument,
    /// Creation timestamp; absent for built-in presets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// A workflow the user is about to save: everything but the identity the
/// catalog assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDraft {
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// The graph to save as a template.
    pub graph: GraphDocument,
}

impl WorkflowDraft {
    /// Creates a draft.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        graph: GraphDocument,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            graph,
        }
    }
}
