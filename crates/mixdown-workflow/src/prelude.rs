//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use mixdown_workflow::prelude::*;
//! ```

pub use crate::catalog::WorkflowCatalog;
pub use crate::error::{CatalogError, CatalogResult, CatalogWarning, StoreError};
pub use crate::storage::{
    CUSTOM_WORKFLOWS_KEY, JsonFileStore, MemoryStore, StoreResult, WorkflowStore,
};
pub use crate::workflow::{Workflow, WorkflowCategory, WorkflowDraft, WorkflowId};
