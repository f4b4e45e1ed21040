//! Exam domain types and validated deserialization.
//!
//! An [`Exam`] is produced once per generation request from backend JSON
//! and is immutable afterwards; the user's picks accumulate separately in
//! [`UserAnswers`] keyed by question index.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::DecodeError;

/// Requested exam difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Arabic label embedded into prompts and shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "سهل",
            Difficulty::Medium => "متوسط",
            Difficulty::Hard => "صعب",
        }
    }
}

/// Requested exam flavor. Comprehensive asks for a mix of all four
/// question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    MultipleChoice,
    FillInTheBlank,
    TrueFalse,
    Comprehensive,
}

impl ExamType {
    /// Arabic label embedded into prompts and shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            ExamType::MultipleChoice => "خيارات متعددة",
            ExamType::FillInTheBlank => "املأ الفراغ",
            ExamType::TrueFalse => "صح / خطأ",
            ExamType::Comprehensive => "امتحان شامل",
        }
    }
}

/// Style the lesson explainer asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplanationStyle {
    Philosophical,
    Scientific,
    Simple,
}

impl ExplanationStyle {
    /// Arabic label embedded into prompts and shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            ExplanationStyle::Philosophical => "فلسفي",
            ExplanationStyle::Scientific => "علمي",
            ExplanationStyle::Simple => "مبسط",
        }
    }
}

/// Question kind, serialized as the four kebab-case wire strings the
/// response schema enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    FillInTheBlank,
    TrueFalse,
    ShortAnswer,
}

/// An answer value. The backend emits strings for the schema-constrained
/// exam path but booleans have been observed on the prose-only correction
/// path, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Text(String),
}

impl Answer {
    /// The answer as text, when it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            Answer::Bool(_) => None,
        }
    }

    /// Whether this answer honors the prompt contract for true/false
    /// questions: the literal strings "True" / "False" (a plain boolean
    /// also counts).
    pub fn is_true_false_literal(&self) -> bool {
        match self {
            Answer::Bool(_) => true,
            Answer::Text(s) => s == "True" || s == "False",
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

impl From<bool> for Answer {
    fn from(b: bool) -> Self {
        Answer::Bool(b)
    }
}

/// One exam question. `options` is present only for multiple-choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: Answer,
}

/// The user's picks, keyed by question index. Insertion order is
/// irrelevant; the map is read once at submission.
pub type UserAnswers = BTreeMap<usize, Answer>;

/// A generated exam. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub title: String,
    pub questions: Vec<Question>,
}

impl Exam {
    /// Decode backend text into a validated exam.
    ///
    /// Structural mismatches and an empty question list are rejected.
    /// A multiple-choice answer missing from its own options list is kept
    /// but logged, since the backend occasionally violates that contract.
    pub fn from_backend_json(text: &str) -> Result<Self, DecodeError> {
        let exam: Exam = serde_json::from_str(text.trim())?;
        exam.validate()?;
        Ok(exam)
    }

    fn validate(&self) -> Result<(), DecodeError> {
        if self.questions.is_empty() {
            return Err(DecodeError::invariant("exam has no questions"));
        }

        for (index, question) in self.questions.iter().enumerate() {
            match question.question_type {
                QuestionType::MultipleChoice => {
                    let options = question.options.as_deref().unwrap_or_default();
                    if options.is_empty() {
                        return Err(DecodeError::invariant(format!(
                            "question {} is multiple-choice but has no options",
                            index
                        )));
                    }
                    if let Answer::Text(answer) = &question.answer {
                        if !options.iter().any(|option| option == answer) {
                            warn!(
                                "question {}: answer {:?} is not among its options",
                                index, answer
                            );
                        }
                    }
                }
                QuestionType::TrueFalse => {
                    if !question.answer.is_true_false_literal() {
                        warn!(
                            "question {}: true/false answer is {:?}, expected \"True\" or \"False\"",
                            index, question.answer
                        );
                    }
                }
                QuestionType::FillInTheBlank | QuestionType::ShortAnswer => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_EXAM: &str = r#"{
        "title": "امتحان عن الماء",
        "questions": [
            {
                "question": "ما هي الصيغة الكيميائية للماء؟",
                "type": "multiple-choice",
                "options": ["H2O", "CO2", "O2"],
                "answer": "H2O"
            },
            {
                "question": "الماء يغلي عند _____ درجة مئوية.",
                "type": "fill-in-the-blank",
                "answer": "100"
            },
            {
                "question": "الماء مركب عضوي.",
                "type": "true-false",
                "answer": "False"
            },
            {
                "question": "اذكر حالات الماء الثلاث.",
                "type": "short-answer",
                "answer": "صلبة وسائلة وغازية"
            }
        ]
    }"#;

    #[test]
    fn test_decode_valid_exam_all_question_types() {
        let exam = Exam::from_backend_json(VALID_EXAM).unwrap();
        assert!(!exam.title.is_empty());
        assert_eq!(exam.questions.len(), 4);

        let types: Vec<QuestionType> = exam.questions.iter().map(|q| q.question_type).collect();
        assert_eq!(
            types,
            vec![
                QuestionType::MultipleChoice,
                QuestionType::FillInTheBlank,
                QuestionType::TrueFalse,
                QuestionType::ShortAnswer,
            ]
        );
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let result = Exam::from_backend_json("هذا ليس JSON");
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_empty_questions() {
        let result = Exam::from_backend_json(r#"{"title": "فارغ", "questions": []}"#);
        assert!(matches!(result, Err(DecodeError::Invariant(_))));
    }

    #[test]
    fn test_decode_rejects_multiple_choice_without_options() {
        let text = r#"{
            "title": "امتحان",
            "questions": [
                {"question": "سؤال؟", "type": "multiple-choice", "answer": "نعم"}
            ]
        }"#;
        let result = Exam::from_backend_json(text);
        assert!(matches!(result, Err(DecodeError::Invariant(_))));
    }

    #[test]
    fn test_decode_keeps_answer_outside_options() {
        // Contract violation by the backend is logged, not rejected.
        let text = r#"{
            "title": "امتحان",
            "questions": [
                {"question": "سؤال؟", "type": "multiple-choice", "options": ["أ", "ب"], "answer": "ج"}
            ]
        }"#;
        let exam = Exam::from_backend_json(text).unwrap();
        assert_eq!(exam.questions[0].answer, Answer::from("ج"));
    }

    #[test]
    fn test_decode_tolerates_leading_whitespace() {
        let padded = format!("\n  {}\n", VALID_EXAM);
        assert!(Exam::from_backend_json(&padded).is_ok());
    }

    #[test]
    fn test_answer_accepts_string_or_bool() {
        let text: Answer = serde_json::from_str(r#""True""#).unwrap();
        assert_eq!(text, Answer::from("True"));
        assert!(text.is_true_false_literal());

        let boolean: Answer = serde_json::from_str("true").unwrap();
        assert_eq!(boolean, Answer::from(true));
        assert!(boolean.is_true_false_literal());

        assert!(!Answer::from("صح").is_true_false_literal());
    }

    #[test]
    fn test_question_type_wire_strings() {
        assert_eq!(
            serde_json::to_string(&QuestionType::FillInTheBlank).unwrap(),
            r#""fill-in-the-blank""#
        );
        assert_eq!(
            serde_json::to_string(&QuestionType::TrueFalse).unwrap(),
            r#""true-false""#
        );
    }

    #[test]
    fn test_labels_are_arabic() {
        assert_eq!(Difficulty::Easy.label(), "سهل");
        assert_eq!(ExamType::Comprehensive.label(), "امتحان شامل");
        assert_eq!(ExplanationStyle::Simple.label(), "مبسط");
    }

    #[test]
    fn test_user_answers_serialize_with_index_keys() {
        let mut answers = UserAnswers::new();
        answers.insert(1, Answer::from("ب"));
        answers.insert(0, Answer::from("H2O"));

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"0":"H2O","1":"ب"}"#);
    }
}
