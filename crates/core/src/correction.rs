//! Correction results returned by the exam grader.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::DecodeError;
use crate::exam::Answer;

/// Per-question verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedback {
    pub question_index: usize,
    pub is_correct: bool,
    pub correct_answer: Answer,
    pub explanation: String,
}

/// Grading outcome for one submission. Produced once, immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub score: u32,
    pub total: u32,
    pub feedback: Vec<QuestionFeedback>,
}

impl CorrectionResult {
    /// Decode backend text into a validated correction result.
    ///
    /// `score` above `total` is rejected. A feedback list whose length
    /// disagrees with `total` is kept but logged; the correction prompt
    /// only describes that shape in prose, so the backend is not held to
    /// it strictly.
    pub fn from_backend_json(text: &str) -> Result<Self, DecodeError> {
        let result: CorrectionResult = serde_json::from_str(text.trim())?;

        if result.score > result.total {
            return Err(DecodeError::invariant(format!(
                "score {} exceeds total {}",
                result.score, result.total
            )));
        }
        if result.feedback.len() != result.total as usize {
            warn!(
                "correction has {} feedback entries for {} questions",
                result.feedback.len(),
                result.total
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_correction() {
        let text = r#"{
            "score": 1,
            "total": 2,
            "feedback": [
                {"questionIndex": 0, "isCorrect": true, "correctAnswer": "H2O", "explanation": "الإجابة صحيحة."},
                {"questionIndex": 1, "isCorrect": false, "correctAnswer": "100", "explanation": "الماء يغلي عند 100 درجة."}
            ]
        }"#;

        let result = CorrectionResult::from_backend_json(text).unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.feedback.len(), 2);
        assert!(result.feedback[0].is_correct);
        assert_eq!(result.feedback[1].correct_answer, Answer::from("100"));
    }

    #[test]
    fn test_decode_accepts_boolean_correct_answer() {
        let text = r#"{
            "score": 1,
            "total": 1,
            "feedback": [
                {"questionIndex": 0, "isCorrect": true, "correctAnswer": true, "explanation": "صح."}
            ]
        }"#;

        let result = CorrectionResult::from_backend_json(text).unwrap();
        assert_eq!(result.feedback[0].correct_answer, Answer::from(true));
    }

    #[test]
    fn test_decode_rejects_score_above_total() {
        let text = r#"{"score": 3, "total": 2, "feedback": []}"#;
        assert!(matches!(
            CorrectionResult::from_backend_json(text),
            Err(DecodeError::Invariant(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(
            CorrectionResult::from_backend_json("أحسنت!"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_decode_keeps_feedback_length_mismatch() {
        // Length disagreement is logged, not rejected.
        let text = r#"{
            "score": 0,
            "total": 2,
            "feedback": [
                {"questionIndex": 0, "isCorrect": false, "correctAnswer": "أ", "explanation": "خطأ."}
            ]
        }"#;
        let result = CorrectionResult::from_backend_json(text).unwrap();
        assert_eq!(result.feedback.len(), 1);
    }
}
