//! Classification results shared by every backend.

use serde::{Deserialize, Serialize};

/// A single sentiment prediction as reported by a model.
///
/// `label` is whatever category name the model uses (`POSITIVE`, `LABEL_0`,
/// ...). `score` is the softmax probability of that label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// True when the label is non-empty and the score is a finite value in `[0, 1]`.
    pub fn is_well_formed(&self) -> bool {
        !self.label.trim().is_empty() && self.score.is_finite() && (0.0..=1.0).contains(&self.score)
    }
}

/// An input text paired with the prediction made for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub text: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}
