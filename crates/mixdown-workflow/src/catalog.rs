//! The workflow catalog.

use jiff::Timestamp;

use crate::error::{CatalogResult, CatalogWarning};
use crate::presets;
use crate::storage::{CUSTOM_WORKFLOWS_KEY, WorkflowStore};
use crate::workflow::{Workflow, WorkflowCategory, WorkflowDraft, WorkflowId};

const TRACING_TARGET: &str = "mixdown_workflow::catalog";

/// Built-in presets plus the user's persisted workflow collection.
///
/// The custom collection is read entirely at startup and written entirely on
/// every mutation, so storage always holds a complete, consistent snapshot.
/// In-memory state is committed only after a successful save; a failed write
/// leaves both sides unchanged.
#[derive(Debug)]
pub struct WorkflowCatalog<S> {
    presets: Vec<Workflow>,
    custom: Vec<Workflow>,
    store: S,
}

impl<S: WorkflowStore> WorkflowCatalog<S> {
    /// Loads the catalog from storage.
    ///
    /// Never fails: an absent key means an empty collection, and unreadable
    /// or malformed storage degrades to an empty collection with a surfaced
    /// warning. Startup is never blocked on bad persistence.
    pub async fn load(store: S) -> (Self, Option<CatalogWarning>) {
        let (custom, warning) = match store.load(CUSTOM_WORKFLOWS_KEY).await {
            Ok(None) => (Vec::new(), None),
            Ok(Some(text)) => match serde_json::from_str::<Vec<Workflow>>(&text) {
                Ok(custom) => (custom, None),
                Err(err) => (Vec::new(), Some(CatalogWarning::Malformed(err))),
            },
            Err(err) => (Vec::new(), Some(CatalogWarning::Unreadable(err))),
        };

        if let Some(warning) = &warning {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %warning,
                "Starting with an empty custom workflow collection"
            );
        }
        tracing::info!(
            target: TRACING_TARGET,
            custom_count = custom.len(),
            "Workflow catalog loaded"
        );

        let catalog = Self {
            presets: presets::built_in(),
            custom,
            store,
        };
        (catalog, warning)
    }

    /// Returns the built-in presets.
    pub fn presets(&self) -> &[Workflow] {
        &self.presets
    }

    /// Returns the user's workflows.
    pub fn custom(&self) -> &[Workflow] {
        &self.custom
    }

    /// Returns all workflows, presets first.
    pub fn workflows(&self) -> impl Iterator<Item = &Workflow> {
        self.presets.iter().chain(self.custom.iter())
    }

    /// Looks up a workflow by id in either collection.
    pub fn find(&self, id: WorkflowId) -> Option<&Workflow> {
        self.workflows().find(|workflow| workflow.id == id)
    }

    /// Saves a draft as a new custom workflow.
    ///
    /// Assigns a fresh time-derived id and a creation timestamp, and
    /// re-sanitizes the document: whatever path it arrived through, a stored
    /// workflow is a template.
    pub async fn add(&mut self, draft: WorkflowDraft) -> CatalogResult<Workflow> {
        let mut graph = draft.graph;
        graph.sanitize();

        let workflow = Workflow {
            id: WorkflowId::new(),
            name: draft.name,
            description: draft.description,
            category: WorkflowCategory::Custom,
            graph,
            created_at: Some(Timestamp::now()),
        };

        let mut next = self.custom.clone();
        next.push(workflow.clone());
        self.persist(&next).await?;
        self.custom = next;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %workflow.id,
            name = %workflow.name,
            "Custom workflow saved"
        );
        Ok(workflow)
    }

    /// Removes a custom workflow by id.
    ///
    /// Returns `false` without writing when the id is not in the custom
    /// collection; presets cannot be removed.
    pub async fn remove(&mut self, id: WorkflowId) -> CatalogResult<bool> {
        if !self.custom.iter().any(|workflow| workflow.id == id) {
            return Ok(false);
        }

        let next: Vec<Workflow> = self
            .custom
            .iter()
            .filter(|workflow| workflow.id != id)
            .cloned()
            .collect();
        self.persist(&next).await?;
        self.custom = next;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %id,
            "Custom workflow removed"
        );
        Ok(true)
    }

    /// Writes a complete custom collection to storage.
    async fn persist(&self, collection: &[Workflow]) -> CatalogResult<()> {
        let text = serde_json::to_string(collection)?;
        self.store.save(CUSTOM_WORKFLOWS_KEY, text).await?;
        Ok(())
    }
}
