//! Editor-response normalization.
//!
//! The editor role replies with text that should already be a serialized
//! verdict. Normalization guarantees the text handed downstream is
//! syntactically valid JSON; it does not guarantee the JSON is a verdict.
//! Parsing is the separate step that can still fail, and the orchestrator
//! treats that failure differently depending on where it happens.

use copydesk_models::EditorVerdict;

/// Normalize a raw editor reply into serialized verdict text.
///
/// Valid JSON passes through unchanged. Anything else is wrapped into a
/// synthetic verdict with the fixed reject decision and the raw text as the
/// editor feedback.
pub fn normalize_verdict(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(_) => raw.to_string(),
        Err(_) => {
            let synthetic = EditorVerdict::rejected_with_text(raw);
            serde_json::to_string(&synthetic).unwrap_or_default()
        }
    }
}

/// Parse normalized verdict text into a structured verdict.
pub fn parse_verdict(text: &str) -> serde_json::Result<EditorVerdict> {
    serde_json::from_str(text)
}
