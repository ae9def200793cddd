//! `prosim-core` – Adaptation Core.
//!
//! Scores how much a participant compensates with their upper body while
//! using a simulated prosthesis.  Tracker samples go in, a single scalar
//! compensation score comes out.
//!
//! # Modules
//!
//! - [`vector_math`] – dot and elementwise products over `f32` slices.
//! - [`objective`] – [`ObjectiveFunction`][objective::ObjectiveFunction]:
//!   weighted sum-of-squares cost with a plain
//!   ([`SumOfNorms`][objective::SumOfNorms]) and a convex
//!   ([`ConvexSumOfNorms`][objective::ConvexSumOfNorms]) variant.
//! - [`evaluator`] – [`PerformanceEvaluator`][evaluator::PerformanceEvaluator]:
//!   buffers 3-D positions and reports the maximum displacement from the first
//!   buffered sample.
//! - [`manager`] – [`UpperBodyCompensationManager`][manager::UpperBodyCompensationManager]:
//!   combines a shoulder and a trunk evaluator through a convex objective into
//!   one score per update.
//! - [`shuffle`] – seedable Fisher–Yates shuffle used to randomise the order
//!   of experimental conditions.

pub mod evaluator;
pub mod manager;
pub mod objective;
pub mod shuffle;
pub mod vector_math;

pub use evaluator::{MaxDisplacementEvaluator, PerformanceEvaluator, SlidingWindowEvaluator};
pub use manager::{PerformanceManager, UpperBodyCompensationManager};
pub use objective::{ConvexSumOfNorms, ObjectiveFunction, SumOfNorms};
pub use shuffle::{shuffle, shuffled_order};
