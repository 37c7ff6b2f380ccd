//! Built-in workflow templates.
//!
//! Presets are fixed at process start and addressed by stable ids, so a
//! front-end can pin or deep-link them across releases. They are hand-built
//! documents and never carry transient run state.

use mixdown_graph::document::GraphDocument;
use mixdown_graph::node::{
    AnalysisMetric, AnalyzeConfig, ConvertConfig, InputConfig, MediaFormat, Node, NodeId,
    Position, PreviewConfig,
};
use mixdown_graph::{Edge, EdgeId};
use uuid::{Uuid, uuid};

use crate::workflow::{Workflow, WorkflowCategory, WorkflowId};

/// Stable id of the "Web transcode" preset.
pub const WEB_TRANSCODE_ID: Uuid = uuid!("7a1d9c22-4b1f-4a51-9d35-0f2b6c1a8e01");
/// Stable id of the "Quality check" preset.
pub const QUALITY_CHECK_ID: Uuid = uuid!("7a1d9c22-4b1f-4a51-9d35-0f2b6c1a8e02");
/// Stable id of the "Thumbnail preview" preset.
pub const THUMBNAIL_PREVIEW_ID: Uuid = uuid!("7a1d9c22-4b1f-4a51-9d35-0f2b6c1a8e03");

/// Returns the built-in workflow collection.
pub fn built_in() -> Vec<Workflow> {
    vec![web_transcode(), quality_check(), thumbnail_preview()]
}

fn preset(id: Uuid, name: &str, description: &str, graph: GraphDocument) -> Workflow {
    Workflow {
        id: WorkflowId::from_uuid(id),
        name: name.to_string(),
        description: description.to_string(),
        category: WorkflowCategory::Preset,
        graph,
        created_at: None,
    }
}

fn node(id: Uuid, x: f64, y: f64, config: impl Into<mixdown_graph::node::NodeConfig>) -> Node {
    Node::with_id(NodeId::from_uuid(id), Position::new(x, y), config)
}

fn edge(id: Uuid, source: Uuid, target: Uuid) -> Edge {
    Edge {
        id: EdgeId::from_uuid(id),
        source: NodeId::from_uuid(source),
        target: NodeId::from_uuid(target),
        source_port: None,
        target_port: None,
        selected: false,
    }
}

fn web_transcode() -> Workflow {
    const INPUT: Uuid = uuid!("3f6a0d10-91c4-4e7a-8a4e-b50c1d9e0a01");
    const CONVERT: Uuid = uuid!("3f6a0d10-91c4-4e7a-8a4e-b50c1d9e0a02");

    let graph = GraphDocument {
        nodes: vec![
            node(INPUT, 80.0, 160.0, InputConfig::default()),
            node(
                CONVERT,
                360.0,
                160.0,
                ConvertConfig::new(MediaFormat::Mp4).with_quality(80),
            ),
        ],
        edges: vec![edge(
            uuid!("3f6a0d10-91c4-4e7a-8a4e-b50c1d9e0aff"),
            INPUT,
            CONVERT,
        )],
    };

    preset(
        WEB_TRANSCODE_ID,
        "Web transcode",
        "Convert a source file to web-friendly MP4",
        graph,
    )
}

fn quality_check() -> Workflow {
    const INPUT: Uuid = uuid!("58b2e7c4-6d0a-4f3b-bf19-2c7e4a1d0b01");
    const CONVERT: Uuid = uuid!("58b2e7c4-6d0a-4f3b-bf19-2c7e4a1d0b02");
    const ANALYZE: Uuid = uuid!("58b2e7c4-6d0a-4f3b-bf19-2c7e4a1d0b03");

    let analyze_distorted = Edge {
        id: EdgeId::from_uuid(uuid!("58b2e7c4-6d0a-4f3b-bf19-2c7e4a1d0bfe")),
        source: NodeId::from_uuid(CONVERT),
        target: NodeId::from_uuid(ANALYZE),
        source_port: Some("out".into()),
        target_port: Some("distorted".into()),
        selected: false,
    };
    let analyze_reference = Edge {
        id: EdgeId::from_uuid(uuid!("58b2e7c4-6d0a-4f3b-bf19-2c7e4a1d0bff")),
        source: NodeId::from_uuid(INPUT),
        target: NodeId::from_uuid(ANALYZE),
        source_port: Some("out".into()),
        target_port: Some("reference".into()),
        selected: false,
    };

    let graph = GraphDocument {
        nodes: vec![
            node(INPUT, 80.0, 200.0, InputConfig::default()),
            node(CONVERT, 360.0, 120.0, ConvertConfig::new(MediaFormat::Mp4)),
            node(
                ANALYZE,
                640.0,
                200.0,
                AnalyzeConfig::new(AnalysisMetric::Vmaf),
            ),
        ],
        edges: vec![
            edge(
                uuid!("58b2e7c4-6d0a-4f3b-bf19-2c7e4a1d0bfd"),
                INPUT,
                CONVERT,
            ),
            analyze_distorted,
            analyze_reference,
        ],
    };

    preset(
        QUALITY_CHECK_ID,
        "Quality check",
        "Encode and score the result against the source with VMAF",
        graph,
    )
}

fn thumbnail_preview() -> Workflow {
    const INPUT: Uuid = uuid!("9c4f1b8e-2a6d-4c05-8e7f-6d3a0b5c2e01");
    const PREVIEW: Uuid = uuid!("9c4f1b8e-2a6d-4c05-8e7f-6d3a0b5c2e02");

    let graph = GraphDocument {
        nodes: vec![
            node(INPUT, 80.0, 160.0, InputConfig::default()),
            node(PREVIEW, 360.0, 160.0, PreviewConfig::at_offset(1.0)),
        ],
        edges: vec![edge(
            uuid!("9c4f1b8e-2a6d-4c05-8e7f-6d3a0b5c2eff"),
            INPUT,
            PREVIEW,
        )],
    };

    preset(
        THUMBNAIL_PREVIEW_ID,
        "Thumbnail preview",
        "Grab a preview frame shortly after the start",
        graph,
    )
}
