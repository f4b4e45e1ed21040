//! Exam generation and grading state.

use std::sync::Arc;

use log::{debug, error};

use aibook_core::{
    Answer, CorrectionResult, Difficulty, Exam, ExamType, SourceContent, UserAnswers,
};

use crate::client::GenerativeClient;
use crate::gateway::AiGateway;

/// State for the exam feature: the generated exam, the user's picks, and
/// the grading outcome.
pub struct ExamOrchestrator<C: GenerativeClient + 'static> {
    gateway: Arc<AiGateway<C>>,
    loading: bool,
    exam: Option<Exam>,
    answers: UserAnswers,
    correction: Option<CorrectionResult>,
    error: Option<String>,
}

impl<C: GenerativeClient + 'static> ExamOrchestrator<C> {
    pub fn new(gateway: Arc<AiGateway<C>>) -> Self {
        Self {
            gateway,
            loading: false,
            exam: None,
            answers: UserAnswers::new(),
            correction: None,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }

    pub fn correction(&self) -> Option<&CorrectionResult> {
        self.correction.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Generate a fresh exam. Any previous exam, answers, and correction
    /// are discarded.
    pub async fn generate(
        &mut self,
        difficulty: Difficulty,
        exam_type: ExamType,
        source: SourceContent,
    ) {
        self.loading = true;
        self.error = None;
        self.exam = None;
        self.answers.clear();
        self.correction = None;

        match self.gateway.generate_exam(difficulty, exam_type, &source).await {
            Ok(exam) => self.exam = Some(exam),
            Err(e) => {
                error!("exam generation failed: {}", e);
                self.error = Some(e.user_message().to_string());
            }
        }
        self.loading = false;
    }

    /// Record the user's pick for one question. Out-of-range indices are
    /// ignored.
    pub fn answer(&mut self, question_index: usize, answer: Answer) {
        let question_count = self.exam.as_ref().map(|e| e.questions.len()).unwrap_or(0);
        if question_index >= question_count {
            debug!("ignoring answer for out-of-range question {}", question_index);
            return;
        }
        self.answers.insert(question_index, answer);
    }

    /// Submit the current answers for grading. Does nothing when no exam
    /// has been generated.
    pub async fn submit(&mut self) {
        let Some(exam) = self.exam.clone() else {
            return;
        };

        self.loading = true;
        self.error = None;
        self.correction = None;

        match self.gateway.correct_exam(&exam, &self.answers).await {
            Ok(result) => self.correction = Some(result),
            Err(e) => {
                error!("exam correction failed: {}", e);
                self.error = Some(e.user_message().to_string());
            }
        }
        self.loading = false;
    }
}
