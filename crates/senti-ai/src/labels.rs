//! Class-index to label mapping read from a HuggingFace `config.json`.
//!
//! Sequence-classification checkpoints carry an `id2label` object whose keys
//! are stringified class indices:
//!
//! ```json
//! { "id2label": { "0": "NEGATIVE", "1": "POSITIVE" } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// Ordered list of class labels, indexed by logit position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    /// Load from the `config.json` next to a model.
    pub fn from_config(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
        Self::from_json(&content).with_context(|| format!("parsing {path:?}"))
    }

    /// Parse `config.json` content.
    ///
    /// Gaps in the index range are filled with `LABEL_<i>`, matching what the
    /// HuggingFace pipelines print for unnamed classes.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;

        let mut by_index = HashMap::with_capacity(raw.id2label.len());
        for (key, label) in raw.id2label {
            let idx: usize = key
                .trim()
                .parse()
                .with_context(|| format!("non-numeric id2label key {key:?}"))?;
            by_index.insert(idx, label);
        }

        let len = by_index.keys().max().map(|m| m + 1).unwrap_or(0);
        let labels = (0..len)
            .map(|i| by_index.remove(&i).unwrap_or_else(|| format!("LABEL_{i}")))
            .collect();
        Ok(Self { labels })
    }

    /// Generic `LABEL_0..LABEL_{n-1}` names for a model without `id2label`.
    pub fn generic(num_labels: usize) -> Self {
        Self {
            labels: (0..num_labels).map(|i| format!("LABEL_{i}")).collect(),
        }
    }

    /// Label for class `idx`, falling back to `LABEL_<idx>`.
    pub fn label(&self, idx: usize) -> String {
        self.labels
            .get(idx)
            .cloned()
            .unwrap_or_else(|| format!("LABEL_{idx}"))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
