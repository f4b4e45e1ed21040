//! Prompt builders.
//!
//! Pure functions translating a feature request into the exact Arabic
//! instruction text, plus the structured-output schema for the exam path.
//! Builders perform no I/O and never fail.
//!
//! Only exam generation attaches a schema object; the correction prompt
//! describes its expected JSON shape in prose. That asymmetry comes from
//! the original product behavior and is preserved as-is.

use serde_json::json;

use aibook_core::{Difficulty, Exam, ExamType, ExplanationStyle, SourceContent, UserAnswers};

/// Placeholder standing in for binary source content inside prompts.
pub const UPLOADED_CONTENT_PLACEHOLDER: &str = "[محتوى من الملف المرفوع]";

/// System instruction for the chat widget session.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "أنت مساعد ذكي وودود. تحدث باللغة العربية.";

fn source_text(source: &SourceContent) -> &str {
    source.as_text().unwrap_or(UPLOADED_CONTENT_PLACEHOLDER)
}

/// Instruction for generating an exam from `source`.
pub fn exam_prompt(difficulty: Difficulty, exam_type: ExamType, source: &SourceContent) -> String {
    format!(
        "بناءً على المحتوى التالي، قم بإنشاء امتحان بمستوى صعوبة \"{}\" من نوع \"{}\".\n\
         يجب أن يكون الامتحان بصيغة JSON مطابقة للمخطط (schema) المقدم.\n\
         لأسئلة \"املأ الفراغ\"، استخدم \"_____\" لتمثيل الفراغ.\n\
         لأسئلة \"صح / خطأ\"، يجب أن تكون الإجابة \"True\" أو \"False\".\n\
         بالنسبة للامتحانات \"الشاملة\"، قم بتضمين مزيج من جميع أنواع الأسئلة: خيارات متعددة، املأ الفراغ، صح/خطأ، وإجابة قصيرة.\n\
         \n\
         المحتوى: {}",
        difficulty.label(),
        exam_type.label(),
        source_text(source)
    )
}

/// The structured-output schema constraining exam generation.
pub fn exam_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "enum": ["multiple-choice", "fill-in-the-blank", "true-false", "short-answer"]
                        },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "answer": { "type": "STRING" }
                    },
                    "required": ["question", "type", "answer"]
                }
            }
        },
        "required": ["title", "questions"]
    })
}

/// Instruction for grading a submission. The expected `{score, total,
/// feedback[]}` shape is spelled out in prose only.
pub fn correction_prompt(exam: &Exam, user_answers: &UserAnswers) -> String {
    let exam_json = serde_json::to_string(exam).unwrap_or_else(|_| "{}".to_string());
    let answers_json = serde_json::to_string(user_answers).unwrap_or_else(|_| "{}".to_string());

    format!(
        "أنت مصحح امتحانات ذكاء اصطناعي. بالنظر إلى أسئلة الامتحان والإجابات الصحيحة وإجابات المستخدم، قم بتقديم تقييم.\n\
         - احسب النتيجة.\n\
         - لكل سؤال، حدد ما إذا كانت إجابة المستخدم صحيحة.\n\
         - قدم شرحًا موجزًا لسبب صحة أو خطأ الإجابة.\n\
         - يجب أن يكون الناتج كائن JSON بالهيكل التالي: {{ score: number, total: number, feedback: [{{ questionIndex: number, isCorrect: boolean, correctAnswer: string | boolean, explanation: string }}] }}.\n\
         \n\
         الامتحان: {}\n\
         إجابات المستخدم: {}",
        exam_json, answers_json
    )
}

/// Instruction for explaining `source` in the requested style, as
/// markdown.
pub fn explanation_prompt(style: ExplanationStyle, source: &SourceContent) -> String {
    format!(
        "يرجى تلخيص وشرح المحتوى التالي بأسلوب {}\n\
         قم بتنسيق المخرجات بشكل جيد باستخدام markdown.\n\
         \n\
         المحتوى: {}",
        style.label(),
        source_text(source)
    )
}

/// Instruction for authoring a structured markdown project document.
pub fn project_prompt(topic: &str, details: &str) -> String {
    format!(
        "أنشئ مشروعًا شاملاً حول الموضوع: \"{}\".\n\
         تفاصيل إضافية: \"{}\".\n\
         يجب أن يكون المشروع منظمًا جيدًا مع عناوين رئيسية وفرعية ومحتوى مفصل.\n\
         استخدم markdown للتنسيق.",
        topic, details
    )
}

/// Instruction for generating an illustrative project image.
pub fn image_prompt(topic: &str) -> String {
    format!(
        "أنشئ صورة مناسبة وعالية الجودة واحترافية لمشروع حول: {}",
        topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aibook_core::{Answer, InlineData, Question, QuestionType};

    fn sample_exam() -> Exam {
        Exam {
            title: "امتحان".to_string(),
            questions: vec![Question {
                question: "سؤال؟".to_string(),
                question_type: QuestionType::ShortAnswer,
                options: None,
                answer: Answer::from("جواب"),
            }],
        }
    }

    #[test]
    fn test_exam_prompt_embeds_labels_and_source() {
        let source = SourceContent::text("نص عن الماء");
        let prompt = exam_prompt(Difficulty::Easy, ExamType::Comprehensive, &source);

        assert!(prompt.contains("\"سهل\""));
        assert!(prompt.contains("\"امتحان شامل\""));
        assert!(prompt.contains("نص عن الماء"));
        assert!(prompt.contains("\"True\" أو \"False\""));
        assert!(prompt.contains("_____"));
    }

    #[test]
    fn test_exam_prompt_uses_placeholder_for_inline_source() {
        let source = SourceContent::from(InlineData::new("application/pdf", "cGRm"));
        let prompt = exam_prompt(Difficulty::Hard, ExamType::TrueFalse, &source);

        assert!(prompt.contains(UPLOADED_CONTENT_PLACEHOLDER));
        assert!(!prompt.contains("cGRm"));
    }

    #[test]
    fn test_exam_schema_shape() {
        let schema = exam_response_schema();
        assert_eq!(schema["required"], serde_json::json!(["title", "questions"]));

        let item = &schema["properties"]["questions"]["items"];
        assert_eq!(
            item["required"],
            serde_json::json!(["question", "type", "answer"])
        );
        let type_enum = item["properties"]["type"]["enum"].as_array().unwrap();
        assert_eq!(type_enum.len(), 4);
        assert!(type_enum.contains(&serde_json::json!("fill-in-the-blank")));
    }

    #[test]
    fn test_correction_prompt_serializes_both_structures() {
        let exam = sample_exam();
        let mut answers = UserAnswers::new();
        answers.insert(0, Answer::from("إجابتي"));

        let prompt = correction_prompt(&exam, &answers);
        assert!(prompt.contains(r#""سؤال؟""#));
        assert!(prompt.contains(r#"{"0":"إجابتي"}"#));
        assert!(prompt.contains("questionIndex"));
    }

    #[test]
    fn test_explanation_prompt_embeds_style() {
        let source = SourceContent::text("درس الفلسفة");
        let prompt = explanation_prompt(ExplanationStyle::Philosophical, &source);
        assert!(prompt.contains("فلسفي"));
        assert!(prompt.contains("markdown"));
    }

    #[test]
    fn test_project_and_image_prompts_embed_topic() {
        assert!(project_prompt("الطاقة الشمسية", "للصف التاسع").contains("الطاقة الشمسية"));
        assert!(image_prompt("الطاقة الشمسية").contains("الطاقة الشمسية"));
    }
}
