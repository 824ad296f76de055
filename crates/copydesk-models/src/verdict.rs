//! Editor verdict type and feedback sentinels.

use serde::{Deserialize, Serialize};

/// Sentinel used wherever a feedback field has nothing to say.
pub const NO_FEEDBACK: &str = "No Feedback";

/// Decision value synthesized when the editor answers with free text
/// instead of a structured verdict.
pub const REJECT_FEEDBACK_DECISION: &str = "reject feedback";

/// The editor role's structured decision plus feedback fields.
///
/// The `decision` value is enum-like text rather than a closed enum: the
/// editor model is asked for "accept" or "reject" but is free to elaborate,
/// and the loop predicate only inspects the leading token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorVerdict {
    /// The editorial decision text.
    pub decision: String,

    /// Feedback directed at the next research step.
    #[serde(rename = "researchFeedback", default = "no_feedback")]
    pub research_feedback: String,

    /// Feedback directed at the next writer step.
    #[serde(rename = "editorFeedback", default = "no_feedback")]
    pub editor_feedback: String,
}

fn no_feedback() -> String {
    NO_FEEDBACK.to_string()
}

impl EditorVerdict {
    /// Create a verdict with explicit feedback fields.
    pub fn new(
        decision: impl Into<String>,
        research_feedback: impl Into<String>,
        editor_feedback: impl Into<String>,
    ) -> Self {
        Self {
            decision: decision.into(),
            research_feedback: research_feedback.into(),
            editor_feedback: editor_feedback.into(),
        }
    }

    /// The synthetic verdict wrapped around a free-text editor reply.
    pub fn rejected_with_text(raw: impl Into<String>) -> Self {
        Self {
            decision: REJECT_FEEDBACK_DECISION.to_string(),
            research_feedback: NO_FEEDBACK.to_string(),
            editor_feedback: raw.into(),
        }
    }

    /// Whether the decision text, case-insensitively, starts with "accept".
    pub fn decision_accepts(&self) -> bool {
        self.decision.to_lowercase().starts_with("accept")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_accepts_case_insensitive() {
        assert!(EditorVerdict::new("accept", "", "").decision_accepts());
        assert!(EditorVerdict::new("Accepted", "", "").decision_accepts());
        assert!(EditorVerdict::new("ACCEPT with minor notes", "", "").decision_accepts());
        assert!(!EditorVerdict::new("reject feedback", "", "").decision_accepts());
        assert!(!EditorVerdict::new("", "", "").decision_accepts());
    }

    #[test]
    fn test_feedback_defaults_when_absent() {
        let verdict: EditorVerdict = serde_json::from_str(r#"{"decision": "accept"}"#).unwrap();
        assert_eq!(verdict.research_feedback, NO_FEEDBACK);
        assert_eq!(verdict.editor_feedback, NO_FEEDBACK);
    }

    #[test]
    fn test_missing_decision_fails() {
        let result = serde_json::from_str::<EditorVerdict>(r#"{"editorFeedback": "fix it"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let verdict = EditorVerdict::new("reject", "more sources", "shorten the intro");
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["researchFeedback"], "more sources");
        assert_eq!(value["editorFeedback"], "shorten the intro");
    }

    #[test]
    fn test_rejected_with_text() {
        let verdict = EditorVerdict::rejected_with_text("Looks great!");
        assert_eq!(verdict.decision, REJECT_FEEDBACK_DECISION);
        assert_eq!(verdict.research_feedback, NO_FEEDBACK);
        assert_eq!(verdict.editor_feedback, "Looks great!");
        assert!(!verdict.decision_accepts());
    }
}
