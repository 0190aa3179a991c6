//! Practice-review feedback: splits checklist omissions into missing steps
//! and missing components for display.

use serde::{Deserialize, Serialize};

use crate::checklist::score_checklist;
use crate::model::{ChecklistKind, EvaluationResult, TopicProfile};

/// UI-facing shape of a practice evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeFeedback {
    pub topic: String,
    pub score: u8,
    pub message: String,
    pub missing_steps: Vec<String>,
    pub missing_components: Vec<String>,
    pub sequence_error: bool,
}

impl PracticeFeedback {
    pub fn is_complete(&self) -> bool {
        self.missing_steps.is_empty() && self.missing_components.is_empty() && !self.sequence_error
    }
}

/// Categorize the omissions in `result` using the topic's checklist kind.
///
/// For sequence topics, an omitted item naming one of the flow steps is a
/// missing step; every other omission is a missing component.
pub fn assemble_feedback(profile: &TopicProfile, result: EvaluationResult) -> PracticeFeedback {
    let (missing_steps, missing_components) = match profile.kind {
        ChecklistKind::Sequence => result
            .missing_items
            .into_iter()
            .partition(|item| profile.is_flow_step(item)),
        ChecklistKind::Components => (Vec::new(), result.missing_items),
    };

    PracticeFeedback {
        topic: profile.name.clone(),
        score: result.score,
        message: result.message,
        missing_steps,
        missing_components,
        sequence_error: result.sequence_error,
    }
}

/// Score `text` against the profile's checklist and assemble the feedback.
pub fn review_practice(profile: &TopicProfile, text: &str) -> PracticeFeedback {
    assemble_feedback(profile, score_checklist(text, &profile.practice_checklist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    #[test]
    fn sequence_topic_separates_steps_from_components() {
        let profile = KnowledgeBase::shared().get_or_generic("Instruction Cycle");
        let feedback = review_practice(&profile, "first we fetch the instruction");
        assert_eq!(feedback.missing_steps, vec!["Mention Decode phase", "Mention Execute phase"]);
        assert_eq!(feedback.missing_components, vec!["Include Program Counter"]);
        assert_eq!(feedback.score, 25);
        assert!(!feedback.is_complete());
    }

    #[test]
    fn components_topic_reports_only_components() {
        let profile = KnowledgeBase::shared().get_or_generic("Memory Hierarchy");
        let feedback = review_practice(&profile, "registers then cache");
        assert!(feedback.missing_steps.is_empty());
        assert!(feedback
            .missing_components
            .contains(&"Include Secondary Storage".to_string()));
    }

    #[test]
    fn complete_answer() {
        let profile = KnowledgeBase::shared().get_or_generic("Instruction Cycle");
        let feedback = review_practice(
            &profile,
            "fetch, decode and execute, driven by the program counter",
        );
        assert!(feedback.is_complete());
        assert_eq!(feedback.score, 100);
    }
}
