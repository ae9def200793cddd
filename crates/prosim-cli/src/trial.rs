//! Recorded trials – replay tracker batches through a performance manager.
//!
//! A trial file is JSON:
//!
//! ```text
//! {
//!   "trial_id": "5f0c…",            (optional)
//!   "cycles": [
//!     { "batches": [
//!         { "evaluator": "Shoulder", "samples": [ {"x":0,"y":0,"z":0}, … ] },
//!         { "evaluator": "Trunk",    "samples": [ … ] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Every cycle routes its batches with
//! [`PerformanceManager::add_data`] and then calls
//! [`PerformanceManager::update`] once, yielding one [`ScoreRecord`].

use std::path::Path;

use chrono::Utc;
use prosim_core::PerformanceManager;
use prosim_types::{AdaptError, Position3, ScoreRecord};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A batch of samples tagged with the evaluator it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrackerBatch {
    /// `"Shoulder"` or `"Trunk"`; other names are skipped.
    pub evaluator: String,
    pub samples: Vec<Position3>,
}

/// The batches delivered during one fixed-rate update cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TrialCycle {
    pub batches: Vec<TrackerBatch>,
}

/// A whole recorded trial.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TrialFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_id: Option<Uuid>,
    pub cycles: Vec<TrialCycle>,
}

/// Read and parse a trial file.
pub fn load_trial(path: &Path) -> Result<TrialFile, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read trial at {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Failed to parse trial: {}", e))
}

/// Score every cycle of `trial`.
///
/// Stops at the first failing cycle and returns its error unchanged.
pub fn score_trial<M: PerformanceManager>(
    manager: &mut M,
    trial: &TrialFile,
) -> Result<Vec<ScoreRecord>, AdaptError> {
    let trial_id = trial.trial_id.unwrap_or_else(Uuid::new_v4);
    info!(%trial_id, cycles = trial.cycles.len(), "scoring trial");

    let mut records = Vec::with_capacity(trial.cycles.len());
    for (cycle, batch_set) in trial.cycles.iter().enumerate() {
        for batch in &batch_set.batches {
            manager.add_data(&batch.samples, &batch.evaluator);
        }
        let score = manager.update()?;
        records.push(ScoreRecord {
            trial_id,
            cycle: cycle as u64,
            timestamp: Utc::now(),
            score,
        });
    }
    Ok(records)
}

/// JSON Schema describing [`TrialFile`].
pub fn trial_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(TrialFile)).unwrap_or_default()
}
