//! Upstream dependency resolution from a value-stream-map (VSM) document.
//!
//! The server renders a run's lineage as an ordered list of levels, each an
//! ordered list of nodes, laid out left to right with upstream pipelines before
//! the queried pipeline itself.

use serde::Deserialize;

use crate::error::{GoCDError, Result};
use crate::types::PipelineDependency;

/// Response body of `GET /go/pipelines/value_stream_map/{pipeline}/{version}.json`.
#[derive(Debug, Deserialize)]
pub struct ValueStreamMap {
    /// Absent when the queried run has not happened yet (e.g. the next
    /// prospective run of a pipeline).
    pub levels: Option<Vec<VsmLevel>>,
}

#[derive(Debug, Deserialize)]
pub struct VsmLevel {
    pub nodes: Vec<VsmNode>,
}

/// One node in a VSM level: either a pipeline or a material (source-control)
/// node. Material instances carry a different shape, so instances stay raw
/// until the node is known to be a pipeline.
#[derive(Debug, Deserialize)]
pub struct VsmNode {
    pub name: String,
    pub node_type: String,
    pub instances: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct PipelineInstance {
    counter: u32,
}

/// Walks the VSM document and collects the upstream `(pipeline, version)` pairs
/// for the queried run.
///
/// The result always starts with the query's own `(pipeline, version)`. The
/// walk visits levels and nodes in document order, collects one dependency per
/// instance of every pipeline-type node, and stops as soon as it reaches the
/// node named like the queried pipeline, so downstream consumers never leak in.
pub fn upstream_dependencies(
    document: &ValueStreamMap,
    pipeline: &str,
    version: u32,
) -> Result<Vec<PipelineDependency>> {
    let mut dependencies = vec![PipelineDependency::new(pipeline, version)];

    // Happens typically when checking for the next run; connection errors
    // would have failed before this point.
    let Some(levels) = &document.levels else {
        return Ok(dependencies);
    };

    for level in levels {
        for node in &level.nodes {
            if node.name == pipeline {
                return Ok(dependencies);
            }

            if !node.node_type.eq_ignore_ascii_case("PIPELINE") {
                continue;
            }

            let instances = node.instances.as_ref().ok_or_else(|| {
                GoCDError::Document(format!("pipeline node '{}' has no instances", node.name))
            })?;
            for instance in instances {
                let instance: PipelineInstance = serde_json::from_value(instance.clone())?;
                dependencies.push(PipelineDependency::new(node.name.clone(), instance.counter));
            }
        }
    }

    Ok(dependencies)
}
