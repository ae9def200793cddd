//! Element-wise helpers over equal-length `f32` slices.
//!
//! Both operations reject inputs of different length with
//! [`AdaptError::LengthMismatch`]; `expected` is the length of the first
//! argument.

use prosim_types::AdaptError;

fn check_lengths(a: &[f32], b: &[f32]) -> Result<(), AdaptError> {
    if a.len() != b.len() {
        return Err(AdaptError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Sum of pairwise products.
pub fn dot(a: &[f32], b: &[f32]) -> Result<f32, AdaptError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// New vector of pairwise products.
pub fn elementwise_mul(a: &[f32], b: &[f32]) -> Result<Vec<f32>, AdaptError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}
