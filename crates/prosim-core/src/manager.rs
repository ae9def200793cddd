//! Performance managers – turn per-tracker metrics into one compensation score.
//!
//! [`UpperBodyCompensationManager`] owns a shoulder and a trunk
//! [`MaxDisplacementEvaluator`] plus a [`ConvexSumOfNorms`] objective.  Each
//! [`PerformanceManager::update`] call:
//!
//! 1. evaluates both trackers and converts metres to centimetres (× 100),
//! 2. subtracts the trunk displacement from the shoulder displacement, since
//!    trunk motion also moves the shoulder tracker,
//! 3. returns `objective([shoulder − trunk, trunk])`.
//!
//! Step 2 is a modelling assumption carried over from the experiment design;
//! it has not been validated biomechanically.
//!
//! # Example
//!
//! ```rust
//! use prosim_core::manager::{PerformanceManager, UpperBodyCompensationManager};
//! use prosim_types::Position3;
//!
//! let mut manager = UpperBodyCompensationManager::new();
//! manager.add_data(&[Position3::zero(), Position3::new(0.0, 1.0, 0.0)], "Shoulder");
//! manager.add_data(&[Position3::zero(), Position3::new(0.0, 0.0, 2.0)], "Trunk");
//!
//! // shoulder' = 100 - 200 = -100; 0.5 * 100² + 0.5 * 200² = 25000
//! let score = manager.update().unwrap();
//! assert!((score - 25_000.0).abs() < 1e-2);
//! ```

use prosim_types::{AdaptError, EvaluatorId, Position3};
use tracing::{debug, warn};

use crate::evaluator::{MaxDisplacementEvaluator, PerformanceEvaluator};
use crate::objective::{ConvexSumOfNorms, ObjectiveFunction};

/// Evaluator output is in metres; the objective is fed centimetres.
pub const METRES_TO_CENTIMETRES: f32 = 100.0;

/// Aggregates tagged batches of tracker samples into a scalar score.
pub trait PerformanceManager {
    /// Route `samples` to the evaluator named `evaluator_id`.
    ///
    /// Unrecognised identifiers are ignored.
    fn add_data(&mut self, samples: &[Position3], evaluator_id: &str);

    /// Compute the score for the currently buffered data.
    fn update(&mut self) -> Result<f32, AdaptError>;
}

/// Shoulder/trunk compensation scorer.
#[derive(Debug, Clone)]
pub struct UpperBodyCompensationManager {
    shoulder: MaxDisplacementEvaluator,
    trunk: MaxDisplacementEvaluator,
    objective: ConvexSumOfNorms,
    last_displacements: Option<(f32, f32)>,
}

impl UpperBodyCompensationManager {
    /// Manager with equal shoulder and trunk weights.
    pub fn new() -> Self {
        Self::from_objective(ConvexSumOfNorms::balanced_pair())
    }

    /// Manager with caller-supplied `(shoulder, trunk)` weights.
    ///
    /// # Errors
    ///
    /// Any error from [`ConvexSumOfNorms::set_weights`]: the weights must be
    /// non-negative and sum to exactly `1.0`.
    pub fn with_weights(shoulder_weight: f32, trunk_weight: f32) -> Result<Self, AdaptError> {
        let objective = ConvexSumOfNorms::with_weights(&[shoulder_weight, trunk_weight])?;
        Ok(Self::from_objective(objective))
    }

    fn from_objective(objective: ConvexSumOfNorms) -> Self {
        Self {
            shoulder: MaxDisplacementEvaluator::new(),
            trunk: MaxDisplacementEvaluator::new(),
            objective,
            last_displacements: None,
        }
    }

    /// Replace the working set of one evaluator with `samples`.
    pub fn add_samples(&mut self, samples: &[Position3], id: EvaluatorId) {
        let evaluator = match id {
            EvaluatorId::Shoulder => &mut self.shoulder,
            EvaluatorId::Trunk => &mut self.trunk,
        };
        evaluator.clear_data();
        evaluator.append_data(samples);
    }

    /// The evaluator registered under `id`.
    pub fn evaluator(&self, id: EvaluatorId) -> &MaxDisplacementEvaluator {
        match id {
            EvaluatorId::Shoulder => &self.shoulder,
            EvaluatorId::Trunk => &self.trunk,
        }
    }

    pub fn objective(&self) -> &ConvexSumOfNorms {
        &self.objective
    }

    /// `(shoulder − trunk, trunk)` in centimetres from the last successful
    /// [`update`](PerformanceManager::update).
    pub fn displacements(&self) -> Option<(f32, f32)> {
        self.last_displacements
    }
}

impl Default for UpperBodyCompensationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceManager for UpperBodyCompensationManager {
    fn add_data(&mut self, samples: &[Position3], evaluator_id: &str) {
        match evaluator_id.parse::<EvaluatorId>() {
            Ok(id) => self.add_samples(samples, id),
            Err(_) => {
                warn!(evaluator_id, samples = samples.len(), "ignoring batch for unknown evaluator");
            }
        }
    }

    fn update(&mut self) -> Result<f32, AdaptError> {
        let shoulder = self.shoulder.evaluate_performance()? * METRES_TO_CENTIMETRES;
        let trunk = self.trunk.evaluate_performance()? * METRES_TO_CENTIMETRES;
        let shoulder = shoulder - trunk;

        let score = self.objective.update(&[shoulder, trunk])?;
        self.last_displacements = Some((shoulder, trunk));
        debug!(shoulder_cm = shoulder, trunk_cm = trunk, score, "compensation score updated");
        Ok(score)
    }
}
