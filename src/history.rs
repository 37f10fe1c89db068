//! Run-status aggregation over a pipeline's stage results and run history.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::types::PipelineRunStatus;

/// Response body of `GET /go/api/pipelines/{pipeline}/history/{offset}`.
#[derive(Debug, Deserialize)]
pub struct PipelineHistory {
    pub pipelines: Vec<PipelineRun>,
}

#[derive(Debug, Deserialize)]
pub struct PipelineRun {
    pub counter: u32,
    pub preparing_to_schedule: bool,
    pub stages: Vec<StageRun>,
}

#[derive(Debug, Deserialize)]
pub struct StageRun {
    /// Absent while the stage is still executing or was skipped ambiguously.
    pub result: Option<String>,
}

/// Reduces one run's stage results to a single verdict.
///
/// A stage counts as failed when its `result` is absent or equals "failed"
/// regardless of letter case, and any failed stage fails the whole run. There
/// is no universal way to tell whether a run failed: a stage may fail yet be
/// deemed unimportant and the run continued, and a run that never completes a
/// stage (paused or locked) must not be reported as passed. Treating missing
/// results as failures is the deliberately strict reading of both cases.
pub fn run_verdict(stages: &[StageRun]) -> PipelineRunStatus {
    let any_failed = stages.iter().any(|stage| {
        stage
            .result
            .as_deref()
            .map_or(true, |result| result.eq_ignore_ascii_case("failed"))
    });

    if any_failed {
        PipelineRunStatus::Failed
    } else {
        PipelineRunStatus::Passed
    }
}

/// Builds the reverse-chronological run-status map from a history document.
///
/// Runs still preparing to schedule are excluded entirely. The returned map
/// iterates with the highest counter first, regardless of document order.
pub fn run_statuses(
    pipeline: &str,
    history: &PipelineHistory,
) -> IndexMap<u32, PipelineRunStatus> {
    let mut statuses = IndexMap::new();

    for run in &history.pipelines {
        if run.preparing_to_schedule {
            continue;
        }

        let status = run_verdict(&run.stages);
        debug!("{pipeline}@{} has {status}", run.counter);
        statuses.insert(run.counter, status);
    }

    statuses.sort_unstable_by(|left, _, right, _| right.cmp(left));
    statuses
}
