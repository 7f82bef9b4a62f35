//! The inference seam: anything that turns a batch of texts into predictions.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::prediction::{Analysis, Prediction};

/// A text-classification model, local or remote.
///
/// Implementations return exactly one prediction per input text, in input
/// order. An empty batch must return an empty vector.
#[async_trait]
pub trait SentimentBackend: Send {
    /// Short name used in logs (`onnx`, `remote`, ...).
    fn name(&self) -> &str;

    async fn classify(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>>;
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("backend returned {got} predictions for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("malformed prediction for input {index}: label {label:?}, score {score}")]
    InvalidPrediction {
        index: usize,
        label: String,
        score: f32,
    },

    #[error("inference failed: {0:#}")]
    Backend(#[from] anyhow::Error),
}

/// Classify `texts` in one batch call and pair each input with its result.
pub async fn analyze<B>(backend: &mut B, texts: &[&str]) -> Result<Vec<Analysis>, AnalysisError>
where
    B: SentimentBackend + ?Sized,
{
    if texts.is_empty() {
        return Ok(vec![]);
    }

    info!(backend = backend.name(), count = texts.len(), "classifying");
    let predictions = backend.classify(texts).await?;

    if predictions.len() != texts.len() {
        return Err(AnalysisError::CountMismatch {
            expected: texts.len(),
            got: predictions.len(),
        });
    }

    if let Some((index, bad)) = predictions
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_well_formed())
    {
        return Err(AnalysisError::InvalidPrediction {
            index,
            label: bad.label.clone(),
            score: bad.score,
        });
    }

    let analyses: Vec<Analysis> = texts
        .iter()
        .zip(predictions)
        .map(|(text, prediction)| Analysis {
            text: (*text).to_string(),
            prediction,
        })
        .collect();

    debug!(count = analyses.len(), "analysis complete");
    Ok(analyses)
}
