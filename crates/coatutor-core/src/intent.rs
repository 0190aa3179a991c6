//! Rule-based intent classification for tutor chat messages.
//!
//! Rules are checked in [`RULES`] order and the first match wins, so a bare
//! "hi" is a greeting even when a topic happens to have a concept keyed
//! "hi". Every category has exactly one rule; the response for each is
//! chosen in [`crate::socratic`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{Concept, TopicProfile};
use crate::normalize::{contains_phrase, normalize};

/// Classification bucket for a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    VideoRequest,
    ExplainRequest,
    Acknowledgment,
    Greeting,
    StartRequest,
    DefinitionQuestion,
    HowQuestion,
    WhyQuestion,
    ConceptMention,
    Attempt,
    Question,
    Fallback,
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IntentCategory::VideoRequest => "video-request",
            IntentCategory::ExplainRequest => "explain-request",
            IntentCategory::Acknowledgment => "acknowledgment",
            IntentCategory::Greeting => "greeting",
            IntentCategory::StartRequest => "start-request",
            IntentCategory::DefinitionQuestion => "definition-question",
            IntentCategory::HowQuestion => "how-question",
            IntentCategory::WhyQuestion => "why-question",
            IntentCategory::ConceptMention => "concept-mention",
            IntentCategory::Attempt => "attempt",
            IntentCategory::Question => "question",
            IntentCategory::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// A user message prepared for classification.
#[derive(Debug, Clone)]
pub struct Message<'a> {
    /// Normalized text.
    pub text: String,
    /// Normalized text with surrounding punctuation removed, for exact-token rules.
    pub bare: String,
    /// First concept of the topic the message mentions.
    pub concept: Option<&'a Concept>,
}

impl<'a> Message<'a> {
    pub fn new(raw: &str, profile: &'a TopicProfile) -> Self {
        let text = normalize(raw);
        let bare = text
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_string();
        let concept = profile.find_concept(&text);
        Self {
            text,
            bare,
            concept,
        }
    }
}

/// A single classification rule.
pub struct Rule {
    pub category: IntentCategory,
    pub matches: fn(&Message<'_>) -> bool,
}

/// Classification rules in precedence order.
pub static RULES: &[Rule] = &[
    Rule {
        category: IntentCategory::VideoRequest,
        matches: is_video_request,
    },
    Rule {
        category: IntentCategory::ExplainRequest,
        matches: is_explain_request,
    },
    Rule {
        category: IntentCategory::Acknowledgment,
        matches: is_acknowledgment,
    },
    Rule {
        category: IntentCategory::Greeting,
        matches: is_greeting,
    },
    Rule {
        category: IntentCategory::StartRequest,
        matches: is_start_request,
    },
    Rule {
        category: IntentCategory::DefinitionQuestion,
        matches: is_definition_question,
    },
    Rule {
        category: IntentCategory::HowQuestion,
        matches: is_how_question,
    },
    Rule {
        category: IntentCategory::WhyQuestion,
        matches: is_why_question,
    },
    Rule {
        category: IntentCategory::ConceptMention,
        matches: mentions_concept,
    },
    Rule {
        category: IntentCategory::Attempt,
        matches: is_attempt,
    },
    Rule {
        category: IntentCategory::Question,
        matches: is_question,
    },
];

fn is_video_request(m: &Message<'_>) -> bool {
    any_phrase(&m.text, VIDEO_WORDS)
}

fn is_explain_request(m: &Message<'_>) -> bool {
    EXPLAIN_PHRASES.iter().any(|p| m.text.contains(p))
}

fn is_acknowledgment(m: &Message<'_>) -> bool {
    ACKNOWLEDGMENTS.contains(&m.bare.as_str())
}

fn is_greeting(m: &Message<'_>) -> bool {
    GREETINGS.contains(&m.bare.as_str())
}

fn is_start_request(m: &Message<'_>) -> bool {
    any_phrase(&m.text, START_PHRASES)
}

fn is_definition_question(m: &Message<'_>) -> bool {
    DEFINITION_START.is_match(&m.text)
}

fn is_how_question(m: &Message<'_>) -> bool {
    HOW_START.is_match(&m.text)
}

fn is_why_question(m: &Message<'_>) -> bool {
    WHY_START.is_match(&m.text)
}

fn mentions_concept(m: &Message<'_>) -> bool {
    m.concept.is_some()
}

fn is_attempt(m: &Message<'_>) -> bool {
    any_phrase(&m.text, ATTEMPT_PHRASES)
}

fn is_question(m: &Message<'_>) -> bool {
    m.text.contains('?')
}

const VIDEO_WORDS: &[&str] = &["video", "videos", "show me", "play", "watch", "tutorial"];

const EXPLAIN_PHRASES: &[&str] = &[
    "just explain",
    "explain it",
    "just tell me",
    "tell me the answer",
    "i don't know",
    "i dont know",
    "i don't understand",
    "i dont understand",
    "no idea",
];

const ACKNOWLEDGMENTS: &[&str] = &[
    "ok", "okay", "k", "yes", "yeah", "yep", "sure", "got it", "right", "alright", "cool",
    "fine", "makes sense",
];

const GREETINGS: &[&str] = &[
    "hi",
    "hii",
    "hello",
    "hey",
    "hola",
    "good morning",
    "good afternoon",
    "good evening",
];

const START_PHRASES: &[&str] = &["start", "begin", "where do i", "where should i"];

const ATTEMPT_PHRASES: &[&str] = &[
    "i think",
    "maybe",
    "because",
    "probably",
    "i guess",
    "i believe",
    "it is",
    "it's",
];

static DEFINITION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(what is|what are|what's|explain|tell me about|define)\b")
        .expect("definition pattern is valid")
});
static HOW_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^how\b").expect("how pattern is valid"));
static WHY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^why\b").expect("why pattern is valid"));

fn any_phrase(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| contains_phrase(text, p))
}

/// Classify a prepared message.
pub fn classify_message(message: &Message<'_>) -> IntentCategory {
    RULES
        .iter()
        .find(|rule| (rule.matches)(message))
        .map(|rule| rule.category)
        .unwrap_or(IntentCategory::Fallback)
}

/// Classify raw user text in the context of a topic.
pub fn classify(text: &str, profile: &TopicProfile) -> IntentCategory {
    classify_message(&Message::new(text, profile))
}
