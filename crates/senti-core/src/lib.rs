pub mod backend;
pub mod credential;
pub mod polarity;
pub mod prediction;

pub use backend::{AnalysisError, SentimentBackend, analyze};
pub use credential::{ApiToken, CredentialError};
pub use polarity::Polarity;
pub use prediction::{Analysis, Prediction};

/// Hub repository used when no model is named.
///
/// This is the checkpoint the HuggingFace `sentiment-analysis` pipeline falls
/// back to when called without a model.
pub const DEFAULT_MODEL: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// Sentences classified when none are given on the command line.
pub const DEFAULT_TEXTS: [&str; 3] = [
    "I love this tutorial!",
    "This is terrible.",
    "I'm feeling okay.",
];
