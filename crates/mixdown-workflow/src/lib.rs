#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod catalog;
mod error;
pub mod presets;
pub mod storage;
mod workflow;

#[doc(hidden)]
pub mod prelude;

pub use catalog::WorkflowCatalog;
pub use error::{CatalogError, CatalogResult, CatalogWarning, StoreError};
pub use workflow::{Workflow, WorkflowCategory, WorkflowDraft, WorkflowId};

/// Tracing target for workflow catalog operations.
pub const TRACING_TARGET: &str = "mixdown_workflow";
