//! AI inference layer: ONNX Runtime sequence classification for sentiment models.

pub mod labels;
pub mod scoring;

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub use classifier::OnnxClassifier;

pub use labels::LabelMap;
pub use scoring::{softmax, top_prediction};
