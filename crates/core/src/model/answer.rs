use serde::{Deserialize, Serialize};

/// A question/answer text pair collected during one interview run.
///
/// Records are keyed by the question *text*, not by position: the interview
/// flow keeps at most one record per distinct question string, and a later
/// edit replaces the earlier answer in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = AnswerRecord::new("Why Rust?", "Memory safety without GC.");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"question\""));
        assert!(json.contains("\"answer\""));
    }
}
