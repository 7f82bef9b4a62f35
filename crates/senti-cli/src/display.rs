//! Console rendering of analysis results.
//!
//! One block per input, in input order, followed by a polarity tally.

use std::fmt::Write;

use senti_core::{Analysis, Polarity};

const SEPARATOR: &str = "---";

// ── Text report ──

/// Render every analysis as a `Text / Sentiment / Confidence` block.
pub fn render_blocks(analyses: &[Analysis]) -> String {
    let mut out = String::new();
    for a in analyses {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Text: '{}'", a.text);
        let _ = writeln!(out, "Sentiment: {}", a.prediction.label);
        let _ = writeln!(out, "Confidence: {:.2}", a.prediction.score);
        let _ = writeln!(out, "{SEPARATOR}");
    }
    out
}

/// Line printed after the report.
pub const CLOSING_LINE: &str = "🎉 Congratulations! You just used AI!";

/// Full text report: heading, blocks, tally, then the closing line.
pub fn render_report(analyses: &[Analysis]) -> String {
    format!(
        "\n📊 AI Analysis Results:\n{}{}\n\n{CLOSING_LINE}\n",
        render_blocks(analyses),
        render_summary(analyses)
    )
}

/// One-line tally of results by polarity.
pub fn render_summary(analyses: &[Analysis]) -> String {
    let count = |want: Polarity| {
        analyses
            .iter()
            .filter(|a| Polarity::from_label(&a.prediction.label) == want)
            .count()
    };

    let parts: Vec<String> = [Polarity::Positive, Polarity::Negative, Polarity::Neutral]
        .into_iter()
        .map(|p| format!("{} {} {}", count(p), p.as_str(), p.emoji()))
        .collect();
    format!("Summary: {}", parts.join(", "))
}

// ── JSON report ──

/// Render the analyses as a pretty-printed JSON array.
pub fn render_json(analyses: &[Analysis]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(analyses)?)
}
