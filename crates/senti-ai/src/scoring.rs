//! Logits to probabilities.

use senti_core::Prediction;

use crate::labels::LabelMap;

/// Numerically stable softmax. Returns an empty vector for empty input.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        exps.into_iter().map(|e| e / sum).collect()
    } else {
        exps
    }
}

/// Highest-probability class for one row of logits.
///
/// Returns `None` for an empty row.
pub fn top_prediction(logits: &[f32], labels: &LabelMap) -> Option<Prediction> {
    let probs = softmax(logits);
    let (idx, &score) = probs
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    Some(Prediction::new(labels.label(idx), score.clamp(0.0, 1.0)))
}
