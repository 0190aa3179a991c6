//! Socratic tutor sessions.
//!
//! A session classifies each message with [`crate::intent`], picks a
//! canned question from the topic's banks and records both lines in the
//! conversation. Selection within a bucket is uniformly random; inject a
//! seeded [`StdRng`] for reproducible output.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::intent::{classify_message, IntentCategory, Message};
use crate::knowledge::{find_video, generic_profile, VideoMatch};
use crate::model::{Concept, Conversation, QuestionDepth, TopicProfile};

/// Order in which acknowledgments walk the question banks.
const ACK_CYCLE: [QuestionDepth; 3] = [
    QuestionDepth::SystemLevel,
    QuestionDepth::Components,
    QuestionDepth::DataFlow,
];

const DEFINITION_FOLLOW_UPS: &[&str] = &[
    "Before I explain, what do you already know about {concept}?",
    "Good question. Where do you think {concept} fits into the {topic}?",
    "Let's reason it out: what would break if {concept} were missing?",
];

const NO_QUESTION: &str = "Tell me more about what you're thinking.";

/// What the tutor says back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TutorReply {
    /// A line of tutor prose.
    Text { text: String },
    /// Result of a video lookup; `None` when no video topic matched.
    Video { video: Option<VideoMatch> },
}

impl TutorReply {
    fn text(text: impl Into<String>) -> Self {
        TutorReply::Text { text: text.into() }
    }
}

impl fmt::Display for TutorReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TutorReply::Text { text } => f.write_str(text),
            TutorReply::Video { video: Some(v) } => {
                write!(f, "Here's a video on {} (matched '{}').", v.title, v.keyword)
            }
            TutorReply::Video { video: None } => {
                f.write_str("I couldn't find a video for that. Try naming the topic, e.g. \"cache video\".")
            }
        }
    }
}

/// A single tutoring conversation about one topic.
pub struct SocraticSession {
    profile: TopicProfile,
    fallback: TopicProfile,
    rng: StdRng,
    ack_stage: usize,
    conversation: Conversation,
}

impl SocraticSession {
    pub fn new(profile: TopicProfile, rng: StdRng) -> Self {
        let fallback = generic_profile(&profile.name);
        Self {
            profile,
            fallback,
            rng,
            ack_stage: 0,
            conversation: Conversation::new(),
        }
    }

    /// Session with a reproducible random source.
    pub fn with_seed(profile: TopicProfile, seed: u64) -> Self {
        Self::new(profile, StdRng::seed_from_u64(seed))
    }

    /// Session seeded from the operating system.
    pub fn from_os_rng(profile: TopicProfile) -> Self {
        Self::new(profile, StdRng::from_os_rng())
    }

    pub fn profile(&self) -> &TopicProfile {
        &self.profile
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Classify `input`, choose a reply and append both to the conversation.
    pub fn respond(&mut self, input: &str) -> TutorReply {
        let (category, reply) = self.reply_to(input);
        self.conversation.push_user(input, category);
        self.conversation.push_tutor(reply.to_string());
        reply
    }

    /// Record an exchange whose reply came from somewhere else (e.g. the backend).
    pub fn record_exchange(&mut self, input: &str, reply: &str) {
        let category = {
            let message = Message::new(input, &self.profile);
            classify_message(&message)
        };
        self.conversation.push_user(input, category);
        self.conversation.push_tutor(reply);
    }

    fn reply_to(&mut self, input: &str) -> (IntentCategory, TutorReply) {
        let (category, text, concept) = {
            let message = Message::new(input, &self.profile);
            (
                classify_message(&message),
                message.text.clone(),
                message.concept.cloned(),
            )
        };
        tracing::debug!(%category, concept = ?concept.as_ref().map(|c| &c.keyword), "classified tutor message");

        let reply = match category {
            IntentCategory::VideoRequest => TutorReply::Video {
                video: find_video(&text),
            },
            IntentCategory::ExplainRequest => self.explain(concept.as_ref()),
            IntentCategory::Acknowledgment => {
                let depth = ACK_CYCLE[self.ack_stage % ACK_CYCLE.len()];
                self.ack_stage += 1;
                TutorReply::text(self.pick(&[depth], concept.as_ref()))
            }
            IntentCategory::Greeting => {
                let question = self.pick(&[QuestionDepth::Purpose], None);
                TutorReply::text(format!(
                    "Hi! Let's explore the {}. {question}",
                    self.profile.name
                ))
            }
            IntentCategory::StartRequest => TutorReply::text(format!(
                "Good place to start. {}",
                self.pick(&[QuestionDepth::Purpose], None)
            )),
            IntentCategory::DefinitionQuestion => match concept.as_ref() {
                Some(c) => TutorReply::text(self.pick_from(DEFINITION_FOLLOW_UPS, Some(c))),
                None => TutorReply::text(self.pick(&[QuestionDepth::Purpose], None)),
            },
            IntentCategory::HowQuestion => TutorReply::text(self.pick(
                &[QuestionDepth::SystemLevel, QuestionDepth::DataFlow],
                concept.as_ref(),
            )),
            IntentCategory::WhyQuestion => TutorReply::text(self.pick(
                &[QuestionDepth::Purpose, QuestionDepth::SystemLevel],
                concept.as_ref(),
            )),
            IntentCategory::ConceptMention => TutorReply::text(self.pick(
                &[QuestionDepth::Components, QuestionDepth::DataFlow],
                concept.as_ref(),
            )),
            IntentCategory::Attempt => match concept.as_ref() {
                Some(c) => TutorReply::text(format!(
                    "You're on the right track with {}. {}",
                    c.keyword,
                    self.pick(&[QuestionDepth::DataFlow], Some(c))
                )),
                None => TutorReply::text(format!(
                    "Good thinking. Hint: focus on which parts are involved. {}",
                    self.pick(&[QuestionDepth::Components], None)
                )),
            },
            IntentCategory::Question => TutorReply::text(format!(
                "You asked: \"{}\". Let's reason it through together. {}",
                input.trim(),
                self.pick(
                    &[QuestionDepth::SystemLevel, QuestionDepth::DataFlow],
                    concept.as_ref()
                )
            )),
            IntentCategory::Fallback => TutorReply::text(self.pick(
                &[
                    QuestionDepth::Purpose,
                    QuestionDepth::SystemLevel,
                    QuestionDepth::Components,
                ],
                None,
            )),
        };
        (category, reply)
    }

    fn explain(&mut self, concept: Option<&Concept>) -> TutorReply {
        let concept = concept
            .cloned()
            .or_else(|| self.profile.concepts.first().cloned());
        match concept {
            Some(c) => TutorReply::text(format!(
                "{}\n\nDoes that make sense? Try telling me in your own words how {} fits into the {}.",
                c.explanation, c.keyword, self.profile.name
            )),
            None => TutorReply::text(format!(
                "Let's work it out together. {}",
                self.pick(&[QuestionDepth::Purpose], None)
            )),
        }
    }

    /// Random question from the given banks, falling back to the generic banks.
    fn pick(&mut self, depths: &[QuestionDepth], concept: Option<&Concept>) -> String {
        let own: Vec<String> = depths
            .iter()
            .flat_map(|d| self.profile.socratic.bank(*d).iter().cloned())
            .collect();
        let candidates = if usable(&own, concept) {
            own
        } else {
            depths
                .iter()
                .flat_map(|d| self.fallback.socratic.bank(*d).iter().cloned())
                .collect()
        };
        self.pick_from(&candidates, concept)
    }

    fn pick_from<S: AsRef<str>>(&mut self, templates: &[S], concept: Option<&Concept>) -> String {
        let rendered: Vec<String> = templates
            .iter()
            .filter_map(|t| {
                let t: &str = t.as_ref();
                (concept.is_some() || !t.contains("{concept}"))
                    .then(|| render(t, &self.profile.name, concept))
            })
            .collect();

        let last = self.conversation.last_tutor_line().unwrap_or_default();
        let fresh: Vec<&String> = rendered
            .iter()
            .filter(|r| last.is_empty() || !last.ends_with(r.as_str()))
            .collect();
        let pool = if fresh.is_empty() {
            rendered.iter().collect()
        } else {
            fresh
        };

        pool.choose(&mut self.rng)
            .map(|s| s.to_string())
            .unwrap_or_else(|| NO_QUESTION.to_string())
    }
}

fn usable(templates: &[String], concept: Option<&Concept>) -> bool {
    templates
        .iter()
        .any(|t| concept.is_some() || !t.contains("{concept}"))
}

fn render(template: &str, topic: &str, concept: Option<&Concept>) -> String {
    let out = template.replace("{topic}", topic);
    match concept {
        Some(c) => out.replace("{concept}", &c.keyword),
        None => out,
    }
}
