//! Quiz flow state machine and the submission payload it produces.
//!
//! The flow is linear: `Idle -> Answering -> Reviewed -> Answering ... -> Report`.
//! There are no backward transitions; `restart` returns to `Idle` from anywhere.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{QuizQuestion, TopicProfile};

/// Where the quiz currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    /// Waiting for an answer to question `index`.
    Answering { index: usize },
    /// Showing the result for question `index`.
    Reviewed { index: usize, correct: bool },
    /// Terminal report screen.
    Report,
}

impl QuizPhase {
    fn name(&self) -> &'static str {
        match self {
            QuizPhase::Idle => "idle",
            QuizPhase::Answering { .. } => "answering",
            QuizPhase::Reviewed { .. } => "reviewing an answer",
            QuizPhase::Report => "showing the report",
        }
    }
}

/// What the caller shows after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_option: String,
    pub explanation: String,
}

/// A single run through a topic's quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    topic: String,
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    correct_answers: u32,
    attempts: u32,
    started_at: Option<Instant>,
    finished_after: Option<Duration>,
}

impl QuizSession {
    pub fn new(profile: &TopicProfile) -> Result<Self, QuizError> {
        if profile.quiz.is_empty() {
            return Err(QuizError::NoQuestions(profile.name.clone()));
        }
        Ok(Self {
            topic: profile.name.clone(),
            questions: profile.quiz.clone(),
            phase: QuizPhase::Idle,
            correct_answers: 0,
            attempts: 0,
            started_at: None,
            finished_after: None,
        })
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The question currently being answered or reviewed.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Answering { index } | QuizPhase::Reviewed { index, .. } => {
                self.questions.get(index)
            }
            _ => None,
        }
    }

    pub fn start(&mut self) -> Result<&QuizQuestion, QuizError> {
        if self.phase != QuizPhase::Idle {
            return Err(self.invalid("start"));
        }
        self.started_at = Some(Instant::now());
        self.phase = QuizPhase::Answering { index: 0 };
        Ok(&self.questions[0])
    }

    /// Answer the current question with the zero-based option `choice`.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerOutcome, QuizError> {
        let QuizPhase::Answering { index } = self.phase else {
            return Err(self.invalid("answer"));
        };
        let question = &self.questions[index];
        if choice >= question.options.len() {
            return Err(QuizError::ChoiceOutOfRange {
                choice,
                options: question.options.len(),
            });
        }

        let correct = choice == question.answer;
        let outcome = AnswerOutcome {
            correct,
            correct_option: question
                .options
                .get(question.answer)
                .cloned()
                .unwrap_or_default(),
            explanation: question.explanation.clone(),
        };

        self.attempts += 1;
        if correct {
            self.correct_answers += 1;
        }
        self.phase = QuizPhase::Reviewed { index, correct };
        Ok(outcome)
    }

    /// Move past the reviewed question. Returns the next question, or `None`
    /// once the quiz has reached the report.
    pub fn advance(&mut self) -> Result<Option<&QuizQuestion>, QuizError> {
        let QuizPhase::Reviewed { index, .. } = self.phase else {
            return Err(self.invalid("advance"));
        };
        let next = index + 1;
        if next < self.questions.len() {
            self.phase = QuizPhase::Answering { index: next };
            Ok(self.questions.get(next))
        } else {
            self.finished_after = self.started_at.map(|t| t.elapsed());
            self.phase = QuizPhase::Report;
            Ok(None)
        }
    }

    /// Reset to `Idle`, discarding progress.
    pub fn restart(&mut self) {
        self.phase = QuizPhase::Idle;
        self.correct_answers = 0;
        self.attempts = 0;
        self.started_at = None;
        self.finished_after = None;
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time spent so far, or the total once the report is reached.
    pub fn elapsed(&self) -> Duration {
        match (self.finished_after, self.started_at) {
            (Some(d), _) => d,
            (None, Some(t)) => t.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    /// Payload for the scoring backend.
    pub fn submission(&self, student_id: &str) -> QuizSubmission {
        QuizSubmission {
            student_id: student_id.to_string(),
            topic: self.topic.clone(),
            total_questions: self.questions.len() as u32,
            correct_answers: self.correct_answers,
            time_taken_seconds: self.elapsed().as_secs(),
            attempts: self.attempts,
        }
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }
}

/// Body of `POST /submit-quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub student_id: String,
    pub topic: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub time_taken_seconds: u64,
    pub attempts: u32,
}

impl QuizSubmission {
    /// Share of questions answered correctly, 0..=100.
    pub fn accuracy_percent(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.correct_answers as f64 / self.total_questions as f64 * 100.0
    }

    /// Mean seconds spent per question.
    pub fn avg_time_seconds(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.time_taken_seconds as f64 / self.total_questions as f64
    }
}

/// Placeholder shown for fields the backend did not supply.
pub const MISSING_FIELD: &str = "—";

/// What the report screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizReport {
    pub topic: String,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub accuracy_percent: f64,
    pub time_taken_seconds: u64,
    pub attempts: u32,
    /// Level predicted by the backend, if it answered.
    pub predicted_level: Option<String>,
}

impl QuizReport {
    pub fn new(submission: &QuizSubmission, predicted_level: Option<String>) -> Self {
        Self {
            topic: submission.topic.clone(),
            correct_answers: submission.correct_answers,
            total_questions: submission.total_questions,
            accuracy_percent: submission.accuracy_percent(),
            time_taken_seconds: submission.time_taken_seconds,
            attempts: submission.attempts,
            predicted_level,
        }
    }

    pub fn level_display(&self) -> &str {
        self.predicted_level.as_deref().unwrap_or(MISSING_FIELD)
    }
}
