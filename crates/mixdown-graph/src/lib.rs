#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod clipboard;
pub mod document;
mod edge;
mod error;
pub mod node;
pub mod remap;
mod store;

#[doc(hidden)]
pub mod prelude;

pub use edge::{Edge, EdgeId};
pub use error::{GraphError, GraphResult};
pub use store::GraphStore;

/// Tracing target for graph-editing operations.
pub const TRACING_TARGET: &str = "mixdown_graph";
