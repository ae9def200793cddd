use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// A single 3-D tracker position in the world frame (metres).
///
/// Samples carry no timestamp; their order of insertion into an evaluator is
/// the only notion of time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Position3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position3 {
    /// Create a new position.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The world origin.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Euclidean length of the vector from the origin to this position.
    pub fn norm(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance between two positions.
    pub fn distance(self, other: Self) -> f32 {
        self.sub(other).norm()
    }
}

impl From<[f32; 3]> for Position3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// The tracked body segments whose displacement feeds the compensation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EvaluatorId {
    /// Acromion / shoulder tracker.
    Shoulder,
    /// Trunk tracker placed on the C7 vertebra.
    Trunk,
}

impl EvaluatorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluatorId::Shoulder => "Shoulder",
            EvaluatorId::Trunk => "Trunk",
        }
    }
}

impl std::fmt::Display for EvaluatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluatorId {
    type Err = AdaptError;

    /// Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Shoulder" => Ok(EvaluatorId::Shoulder),
            "Trunk" => Ok(EvaluatorId::Trunk),
            other => Err(AdaptError::UnknownEvaluator(other.to_string())),
        }
    }
}

/// One compensation score produced for a single update cycle of a trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub trial_id: Uuid,
    /// Zero-based index of the update cycle within the trial.
    pub cycle: u64,
    pub timestamp: DateTime<Utc>,
    pub score: f32,
}

/// Error type shared by every stage of the adaptation pipeline.
///
/// Validation errors are raised at the call that violates the contract;
/// [`AdaptError::NoData`] is raised at evaluation time.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdaptError {
    #[error("Length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Weight vector must not be empty")]
    EmptyWeights,

    #[error("Weight {index} is negative: {value}")]
    NegativeWeight { index: usize, value: f32 },

    #[error("Weight {index} is not a finite number")]
    NonFiniteWeight { index: usize },

    #[error("Convex weights must sum to 1, got {sum}")]
    WeightsNotConvex { sum: f32 },

    #[error("Objective weights have not been set")]
    WeightsUnset,

    #[error("No samples available for evaluation")]
    NoData,

    #[error("Operation '{operation}' is not supported by {component}")]
    Unsupported { component: String, operation: String },

    #[error("Invalid buffer size: {0}")]
    InvalidBufferSize(usize),

    #[error("Unknown evaluator: {0}")]
    UnknownEvaluator(String),
}
