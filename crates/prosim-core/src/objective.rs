//! Objective functions – collapse several performance metrics into one cost.
//!
//! Both variants compute a weighted sum of squared inputs:
//!
//! ```text
//! cost = Σ wᵢ · uᵢ²
//! ```
//!
//! Weights must be non-negative.  [`ConvexSumOfNorms`] additionally requires
//! them to sum to exactly `1.0`; no tolerance is applied.
//!
//! # Example
//!
//! ```rust
//! use prosim_core::objective::{ConvexSumOfNorms, ObjectiveFunction};
//!
//! let objective = ConvexSumOfNorms::with_weights(&[0.5, 0.5]).unwrap();
//! let cost = objective.update(&[2.0, 4.0]).unwrap();
//! assert!((cost - 10.0).abs() < 1e-6);
//! ```

use prosim_types::AdaptError;

use crate::vector_math::{dot, elementwise_mul};

// ────────────────────────────────────────────────────────────────────────────
// ObjectiveFunction trait
// ────────────────────────────────────────────────────────────────────────────

/// A weighted cost over a fixed number of input channels.
pub trait ObjectiveFunction {
    /// Replace the stored weights.
    ///
    /// On error the previously stored weights are left untouched.
    fn set_weights(&mut self, weights: &[f32]) -> Result<(), AdaptError>;

    /// The current weights, or `None` if they were never set.
    fn weights(&self) -> Option<&[f32]>;

    /// Evaluate the cost for `inputs`.
    ///
    /// # Errors
    ///
    /// - [`AdaptError::WeightsUnset`] before the first successful
    ///   [`set_weights`](ObjectiveFunction::set_weights).
    /// - [`AdaptError::LengthMismatch`] when `inputs` and the weights differ
    ///   in length.
    fn update(&self, inputs: &[f32]) -> Result<f32, AdaptError>;
}

/// Reject empty, non-finite, and negative weight vectors.
fn validate_non_negative(weights: &[f32]) -> Result<(), AdaptError> {
    if weights.is_empty() {
        return Err(AdaptError::EmptyWeights);
    }
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() {
            return Err(AdaptError::NonFiniteWeight { index });
        }
        if value < 0.0 {
            return Err(AdaptError::NegativeWeight { index, value });
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// SumOfNorms
// ────────────────────────────────────────────────────────────────────────────

/// Weighted sum of squared inputs with non-negative weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SumOfNorms {
    weights: Option<Vec<f32>>,
}

impl SumOfNorms {
    /// Create an objective with no weights set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an objective and set its weights in one step.
    pub fn with_weights(weights: &[f32]) -> Result<Self, AdaptError> {
        let mut objective = Self::new();
        objective.set_weights(weights)?;
        Ok(objective)
    }
}

impl ObjectiveFunction for SumOfNorms {
    fn set_weights(&mut self, weights: &[f32]) -> Result<(), AdaptError> {
        validate_non_negative(weights)?;
        self.weights = Some(weights.to_vec());
        Ok(())
    }

    fn weights(&self) -> Option<&[f32]> {
        self.weights.as_deref()
    }

    fn update(&self, inputs: &[f32]) -> Result<f32, AdaptError> {
        let weights = self.weights.as_deref().ok_or(AdaptError::WeightsUnset)?;
        if inputs.len() != weights.len() {
            return Err(AdaptError::LengthMismatch {
                expected: weights.len(),
                actual: inputs.len(),
            });
        }
        let squared = elementwise_mul(inputs, inputs)?;
        dot(weights, &squared)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ConvexSumOfNorms
// ────────────────────────────────────────────────────────────────────────────

/// [`SumOfNorms`] whose weights form a convex combination (sum exactly 1).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexSumOfNorms {
    inner: SumOfNorms,
}

impl ConvexSumOfNorms {
    /// Create an objective with no weights set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an objective and set its weights in one step.
    pub fn with_weights(weights: &[f32]) -> Result<Self, AdaptError> {
        let mut objective = Self::new();
        objective.set_weights(weights)?;
        Ok(objective)
    }

    /// Two channels weighted `(0.5, 0.5)`.
    pub fn balanced_pair() -> Self {
        Self {
            inner: SumOfNorms {
                weights: Some(vec![0.5, 0.5]),
            },
        }
    }
}

impl ObjectiveFunction for ConvexSumOfNorms {
    fn set_weights(&mut self, weights: &[f32]) -> Result<(), AdaptError> {
        validate_non_negative(weights)?;
        let sum: f32 = weights.iter().sum();
        if sum != 1.0 {
            return Err(AdaptError::WeightsNotConvex { sum });
        }
        self.inner.set_weights(weights)
    }

    fn weights(&self) -> Option<&[f32]> {
        self.inner.weights()
    }

    fn update(&self, inputs: &[f32]) -> Result<f32, AdaptError> {
        self.inner.update(inputs)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------ SumOfNorms

    #[test]
    fn weighted_sum_of_squares() {
        let objective = SumOfNorms::with_weights(&[0.5, 0.5]).unwrap();
        // 0.5 * 4 + 0.5 * 16
        let cost = objective.update(&[2.0, 4.0]).unwrap();
        assert!((cost - 10.0).abs() < 1e-6);
    }

    #[test]
    fn sum_of_norms_accepts_non_convex_weights() {
        let objective = SumOfNorms::with_weights(&[2.0, 0.0, 1.0]).unwrap();
        // 2 * 1 + 0 * 100 + 1 * 9
        let cost = objective.update(&[-1.0, 10.0, 3.0]).unwrap();
        assert!((cost - 11.0).abs() < 1e-6);
    }

    #[test]
    fn negative_inputs_contribute_positively() {
        let objective = SumOfNorms::with_weights(&[1.0]).unwrap();
        assert!((objective.update(&[-3.0]).unwrap() - 9.0).abs() < 1e-6);
    }

    #[test]
    fn empty_weights_rejected() {
        let mut objective = SumOfNorms::new();
        assert_eq!(objective.set_weights(&[]), Err(AdaptError::EmptyWeights));
    }

    #[test]
    fn negative_weight_rejected() {
        let mut objective = SumOfNorms::new();
        assert_eq!(
            objective.set_weights(&[0.5, -0.1, 0.6]),
            Err(AdaptError::NegativeWeight {
                index: 1,
                value: -0.1
            })
        );
    }

    #[test]
    fn nan_weight_rejected() {
        let mut objective = SumOfNorms::new();
        assert_eq!(
            objective.set_weights(&[f32::NAN]),
            Err(AdaptError::NonFiniteWeight { index: 0 })
        );
    }

    #[test]
    fn infinite_weight_rejected() {
        let mut objective = SumOfNorms::new();
        assert_eq!(
            objective.set_weights(&[1.0, f32::INFINITY]),
            Err(AdaptError::NonFiniteWeight { index: 1 })
        );
        assert_eq!(objective.weights(), None);
    }

    #[test]
    fn update_without_weights_fails() {
        let objective = SumOfNorms::new();
        assert_eq!(objective.update(&[1.0]), Err(AdaptError::WeightsUnset));
    }

    #[test]
    fn update_with_length_mismatch_fails() {
        let objective = SumOfNorms::with_weights(&[0.5, 0.5]).unwrap();
        assert_eq!(
            objective.update(&[1.0, 2.0, 3.0]),
            Err(AdaptError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert!(objective.update(&[1.0]).is_err());
    }

    #[test]
    fn failed_set_weights_keeps_previous_weights() {
        let mut objective = SumOfNorms::with_weights(&[1.0, 2.0]).unwrap();
        assert!(objective.set_weights(&[-1.0]).is_err());
        assert_eq!(objective.weights(), Some(&[1.0, 2.0][..]));
    }

    // ------------------------------------------------------------------ ConvexSumOfNorms

    #[test]
    fn convex_accepts_weights_summing_to_one() {
        let objective = ConvexSumOfNorms::with_weights(&[0.25, 0.75]).unwrap();
        // 0.25 * 4 + 0.75 * 4
        let cost = objective.update(&[2.0, -2.0]).unwrap();
        assert!((cost - 4.0).abs() < 1e-6);
    }

    #[test]
    fn convex_rejects_sum_other_than_one() {
        let mut objective = ConvexSumOfNorms::new();
        assert!(matches!(
            objective.set_weights(&[0.5, 0.6]),
            Err(AdaptError::WeightsNotConvex { .. })
        ));
        assert!(matches!(
            objective.set_weights(&[0.25, 0.25]),
            Err(AdaptError::WeightsNotConvex { .. })
        ));
        assert_eq!(objective.weights(), None);
    }

    #[test]
    fn convex_applies_no_tolerance() {
        let mut objective = ConvexSumOfNorms::new();
        assert!(objective.set_weights(&[0.5, 0.5 + 1e-4]).is_err());
    }

    #[test]
    fn convex_still_rejects_negative_weights() {
        let mut objective = ConvexSumOfNorms::new();
        assert!(matches!(
            objective.set_weights(&[1.5, -0.5]),
            Err(AdaptError::NegativeWeight { index: 1, .. })
        ));
    }

    #[test]
    fn balanced_pair_matches_validated_weights() {
        let validated = ConvexSumOfNorms::with_weights(&[0.5, 0.5]).unwrap();
        assert_eq!(ConvexSumOfNorms::balanced_pair(), validated);
        let mut check = ConvexSumOfNorms::new();
        assert!(check.set_weights(&[0.5, 0.5]).is_ok());
    }

    #[test]
    fn convex_update_before_weights_fails() {
        let objective = ConvexSumOfNorms::new();
        assert_eq!(objective.update(&[1.0, 1.0]), Err(AdaptError::WeightsUnset));
    }
}
