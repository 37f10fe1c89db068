use serde::{Deserialize, Serialize};
use std::fmt;

/// One node in a pipeline run's upstream dependency chain.
///
/// Identified by pipeline name and the run counter ("version") of the specific
/// run that fed into the queried run. A dependency list always starts with the
/// queried `(pipeline, version)` pair itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDependency {
    /// Name of the upstream pipeline
    pub pipeline_name: String,
    /// Run counter of the upstream pipeline run
    pub version: u32,
}

impl PipelineDependency {
    pub fn new(pipeline_name: impl Into<String>, version: u32) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            version,
        }
    }
}

/// Snapshot of a pipeline's current gating state.
///
/// Deserialized straight from `GET /go/api/pipelines/{pipeline}/status`; valid
/// only for the single query that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStatus {
    pub locked: bool,
    pub paused: bool,
    pub schedulable: bool,
}

/// Binary verdict for one completed-or-running pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineRunStatus {
    Passed,
    Failed,
}

impl fmt::Display for PipelineRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineRunStatus::Passed => write!(f, "Passed"),
            PipelineRunStatus::Failed => write!(f, "Failed"),
        }
    }
}
