//! Core data model types for coatutor.
//!
//! Topic profiles are the static knowledge every evaluator reads from;
//! evaluation results and conversation turns are what the evaluators hand
//! back to the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::intent::IntentCategory;
use crate::normalize::contains_phrase;

/// Everything the evaluators know about a single course topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicProfile {
    /// Display name (e.g. "Instruction Cycle").
    pub name: String,
    /// Whether the practice checklist names process steps or components.
    #[serde(default)]
    pub kind: ChecklistKind,
    /// Concept keywords with their stored explanations, in lookup order.
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// Phrases a practice answer is expected to cover.
    #[serde(default)]
    pub practice_checklist: Vec<String>,
    /// Canonical ordered process steps.
    #[serde(default)]
    pub flow_steps: Vec<String>,
    /// Guiding questions grouped by depth.
    #[serde(default)]
    pub socratic: SocraticBanks,
    /// Multiple-choice questions for the quiz flow.
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

impl TopicProfile {
    /// First concept whose keyword occurs in `text` as whole words.
    pub fn find_concept(&self, text: &str) -> Option<&Concept> {
        self.concepts
            .iter()
            .find(|c| contains_phrase(text, &c.keyword))
    }

    /// Whether a checklist item refers to one of this topic's flow steps.
    pub fn is_flow_step(&self, item: &str) -> bool {
        let item = item.to_lowercase();
        self.flow_steps
            .iter()
            .any(|step| contains_phrase(&item, step))
    }
}

/// How a topic's practice checklist should be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistKind {
    /// Process topics: the checklist walks through ordered steps.
    Sequence,
    /// Structural topics: the checklist names parts of a system.
    #[default]
    Components,
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecklistKind::Sequence => write!(f, "sequence"),
            ChecklistKind::Components => write!(f, "components"),
        }
    }
}

impl FromStr for ChecklistKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequence" | "process" | "flow" => Ok(ChecklistKind::Sequence),
            "components" | "component" | "structure" => Ok(ChecklistKind::Components),
            other => Err(format!("unknown checklist kind: {other}")),
        }
    }
}

/// A concept keyword and the explanation given when a student asks for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub keyword: String,
    pub explanation: String,
}

/// Socratic question pools, from "why does this exist" down to "how does data move".
///
/// Questions may contain `{topic}` and `{concept}` placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocraticBanks {
    #[serde(default)]
    pub purpose: Vec<String>,
    #[serde(default)]
    pub system_level: Vec<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub data_flow: Vec<String>,
}

/// Question depth within [`SocraticBanks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionDepth {
    Purpose,
    SystemLevel,
    Components,
    DataFlow,
}

impl SocraticBanks {
    pub fn bank(&self, depth: QuestionDepth) -> &[String] {
        match depth {
            QuestionDepth::Purpose => &self.purpose,
            QuestionDepth::SystemLevel => &self.system_level,
            QuestionDepth::Components => &self.components,
            QuestionDepth::DataFlow => &self.data_flow,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.purpose.is_empty()
            && self.system_level.is_empty()
            && self.components.is_empty()
            && self.data_flow.is_empty()
    }
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub answer: usize,
    #[serde(default)]
    pub explanation: String,
}

/// Outcome of scoring a free-text answer or a submitted sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// 0..=100.
    pub score: u8,
    /// Checklist items or flow steps the submission did not cover.
    pub missing_items: Vec<String>,
    /// Set when every step was present but in the wrong order.
    pub sequence_error: bool,
    pub message: String,
}

/// Who said a line in a tutoring conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Tutor,
}

/// One line of a tutoring conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<IntentCategory>,
}

/// Ordered, in-memory log of a single chat session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>, category: IntentCategory) {
        self.turns.push(ConversationTurn {
            role: Role::User,
            content: content.into(),
            category: Some(category),
        });
    }

    pub fn push_tutor(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::Tutor,
            content: content.into(),
            category: None,
        });
    }

    /// The most recent tutor line, if any.
    pub fn last_tutor_line(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::Tutor)
            .map(|t| t.content.as_str())
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
