//! Performance evaluators – displacement metrics over buffered tracker samples.
//!
//! An evaluator buffers [`Position3`] samples and reduces them to a single
//! metric.  Both variants here report the **maximum Euclidean displacement**
//! of any buffered sample from the first (oldest) buffered sample, in the
//! same units as the samples (metres).
//!
//! - [`MaxDisplacementEvaluator`] keeps every sample until cleared and has no
//!   bounded-buffer mode; [`PerformanceEvaluator::set_buffer_size`] always
//!   fails with [`AdaptError::Unsupported`].
//! - [`SlidingWindowEvaluator`] keeps only the most recent `capacity`
//!   samples.
//!
//! # Example
//!
//! ```rust
//! use prosim_core::evaluator::{MaxDisplacementEvaluator, PerformanceEvaluator};
//! use prosim_types::Position3;
//!
//! let mut eval = MaxDisplacementEvaluator::new();
//! eval.append_data(&[Position3::zero(), Position3::new(3.0, 4.0, 0.0)]);
//! assert!((eval.evaluate_performance().unwrap() - 5.0).abs() < 1e-6);
//! ```

use std::collections::VecDeque;

use prosim_types::{AdaptError, Position3};

/// A metric computed over a buffer of 3-D positions.
pub trait PerformanceEvaluator {
    /// Append `samples` to the buffer in order.  No deduplication.
    fn append_data(&mut self, samples: &[Position3]);

    /// Empty the buffer.  Safe to call on an empty evaluator.
    fn clear_data(&mut self);

    /// Bound the buffer to `size` samples, where supported.
    fn set_buffer_size(&mut self, size: usize) -> Result<(), AdaptError>;

    /// Reduce the buffered samples to the evaluator's metric.
    ///
    /// Returns [`AdaptError::NoData`] when the buffer is empty.
    fn evaluate_performance(&self) -> Result<f32, AdaptError>;

    /// Number of buffered samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Max distance of any sample from the first sample yielded by `samples`.
fn max_displacement<'a, I>(mut samples: I) -> Result<f32, AdaptError>
where
    I: Iterator<Item = &'a Position3>,
{
    let origin = *samples.next().ok_or(AdaptError::NoData)?;
    // The origin itself contributes a displacement of zero.
    Ok(samples
        .map(|p| p.distance(origin))
        .fold(0.0_f32, f32::max))
}

// ────────────────────────────────────────────────────────────────────────────
// MaxDisplacementEvaluator
// ────────────────────────────────────────────────────────────────────────────

/// Unbounded max-displacement evaluator.
#[derive(Debug, Clone, Default)]
pub struct MaxDisplacementEvaluator {
    samples: Vec<Position3>,
}

impl MaxDisplacementEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered samples in insertion order.
    pub fn samples(&self) -> &[Position3] {
        &self.samples
    }
}

impl PerformanceEvaluator for MaxDisplacementEvaluator {
    fn append_data(&mut self, samples: &[Position3]) {
        self.samples.extend_from_slice(samples);
    }

    fn clear_data(&mut self) {
        self.samples.clear();
    }

    fn set_buffer_size(&mut self, _size: usize) -> Result<(), AdaptError> {
        Err(AdaptError::Unsupported {
            component: "MaxDisplacementEvaluator".to_string(),
            operation: "set_buffer_size".to_string(),
        })
    }

    fn evaluate_performance(&self) -> Result<f32, AdaptError> {
        max_displacement(self.samples.iter())
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SlidingWindowEvaluator
// ────────────────────────────────────────────────────────────────────────────

/// Max-displacement evaluator over the most recent `capacity` samples.
///
/// When the window is full, each appended sample evicts the oldest one, so
/// displacement is measured from the oldest sample still in the window.
#[derive(Debug, Clone)]
pub struct SlidingWindowEvaluator {
    capacity: usize,
    samples: VecDeque<Position3>,
}

impl SlidingWindowEvaluator {
    /// Create a window holding at most `capacity` samples.
    ///
    /// Returns [`AdaptError::InvalidBufferSize`] for a zero capacity.
    pub fn new(capacity: usize) -> Result<Self, AdaptError> {
        if capacity == 0 {
            return Err(AdaptError::InvalidBufferSize(capacity));
        }
        Ok(Self {
            capacity,
            samples: VecDeque::new(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_overflow(&mut self) {
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }
}

impl PerformanceEvaluator for SlidingWindowEvaluator {
    fn append_data(&mut self, samples: &[Position3]) {
        self.samples.extend(samples.iter().copied());
        self.evict_overflow();
    }

    fn clear_data(&mut self) {
        self.samples.clear();
    }

    fn set_buffer_size(&mut self, size: usize) -> Result<(), AdaptError> {
        if size == 0 {
            return Err(AdaptError::InvalidBufferSize(size));
        }
        self.capacity = size;
        self.evict_overflow();
        Ok(())
    }

    fn evaluate_performance(&self) -> Result<f32, AdaptError> {
        max_displacement(self.samples.iter())
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
