//! ONNX Runtime sequence classifier for sentiment models.
//!
//! Runs a HuggingFace `*ForSequenceClassification` checkpoint exported to
//! ONNX (e.g. distilbert-base-uncased-finetuned-sst-2-english). The model
//! directory must contain `model.onnx`, `tokenizer.json` and `config.json`.

use std::path::Path;

use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use senti_core::{Prediction, SentimentBackend};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::labels::LabelMap;
use crate::scoring::top_prediction;

/// Longest input accepted by BERT-family encoders.
const MAX_SEQ_LEN: usize = 512;

/// Sentiment classifier backed by an ONNX Runtime session.
pub struct OnnxClassifier {
    session: Session,
    tokenizer: Tokenizer,
    labels: LabelMap,
    /// BERT graphs take `token_type_ids`; DistilBERT and RoBERTa do not.
    uses_token_types: bool,
}

impl OnnxClassifier {
    /// Load a classifier from a directory containing `model.onnx`,
    /// `tokenizer.json` and `config.json`.
    pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");
        let config_path = model_dir.join("config.json");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {model_dir:?}"
        );
        anyhow::ensure!(config_path.exists(), "config.json not found in {model_dir:?}");

        let session = Session::builder()?.commit_from_file(&model_path)?;
        let uses_token_types = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;
        // Pad every batch to its longest member.
        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        let labels = LabelMap::from_config(&config_path)?;

        info!(
            model = %model_path.display(),
            labels = labels.len(),
            uses_token_types,
            "loaded classification model"
        );
        Ok(Self {
            session,
            tokenizer,
            labels,
            uses_token_types,
        })
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Classify a batch of texts, returning one prediction per input.
    pub fn classify_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let batch_size = texts.len();

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);
        anyhow::ensure!(seq_len > 0, "tokenizer produced no tokens");

        // Flat [batch_size, seq_len] inputs, zero-padded.
        let flatten = |field: fn(&tokenizers::Encoding) -> &[u32]| {
            let mut flat = vec![0i64; batch_size * seq_len];
            for (row, encoding) in flat.chunks_mut(seq_len).zip(&encodings) {
                for (slot, &v) in row.iter_mut().zip(field(encoding)) {
                    *slot = v as i64;
                }
            }
            flat.into_boxed_slice()
        };

        let shape = [batch_size as i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, flatten(|e| e.get_ids())))?;
        let mask_tensor = Tensor::from_array((shape, flatten(|e| e.get_attention_mask())))?;

        let outputs = if self.uses_token_types {
            let type_tensor = Tensor::from_array((shape, flatten(|e| e.get_type_ids())))?;
            self.session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])?
        } else {
            self.session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
            ])?
        };

        // Logits: [batch_size, num_labels].
        let (output_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            dims.len() == 2 && dims[0] as usize == batch_size && dims[1] > 0,
            "unexpected logits shape: {dims:?}, expected [{batch_size}, num_labels]"
        );
        let num_labels = dims[1] as usize;
        debug!(batch_size, seq_len, num_labels, "inference complete");

        logits
            .chunks(num_labels)
            .map(|row| {
                top_prediction(row, &self.labels)
                    .ok_or_else(|| anyhow::anyhow!("empty logits row"))
            })
            .collect()
    }
}

#[async_trait]
impl SentimentBackend for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    async fn classify(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>> {
        self.classify_batch(texts)
    }
}
