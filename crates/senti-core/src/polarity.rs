//! Polarity buckets for model labels.
//!
//! Models report labels in several spellings: `POSITIVE`/`NEGATIVE` for SST-2
//! checkpoints, `pos`/`neu`/`neg` for some multilingual models, and star
//! ratings for review models. Everything maps onto three buckets.
//!
//! Index names (`LABEL_0`, `LABEL_1`, ...) from checkpoints without an
//! `id2label` table carry no direction: class 1 is positive in a two-class
//! model but neutral in a three-class one. They bucket as `Neutral`.

/// Coarse sentiment direction of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// Bucket a raw model label. Unknown labels are `Neutral`.
    pub fn from_label(label: &str) -> Self {
        let norm = label.trim().to_ascii_lowercase();
        match norm.as_str() {
            "positive" | "pos" | "4 stars" | "5 stars" => Self::Positive,
            "negative" | "neg" | "1 star" | "2 stars" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Marker printed next to a result.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Positive => "😊",
            Self::Negative => "😔",
            Self::Neutral => "😐",
        }
    }
}
