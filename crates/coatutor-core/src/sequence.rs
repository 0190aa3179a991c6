//! Ordered process-flow validation.
//!
//! A submission is valid when every canonical step appears in some user
//! step and the user steps visit the canonical steps in non-decreasing
//! order. Repeated labels on either side use first-occurrence semantics.

use serde::{Deserialize, Serialize};

use crate::model::EvaluationResult;

/// Binary outcome of validating a submitted step order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceOutcome {
    pub valid: bool,
    /// Canonical steps that no user step mentions.
    pub missing: Vec<String>,
    /// The first canonical step found out of order, if any.
    pub out_of_order: Option<String>,
    pub message: String,
}

impl From<SequenceOutcome> for EvaluationResult {
    fn from(outcome: SequenceOutcome) -> Self {
        EvaluationResult {
            score: if outcome.valid { 100 } else { 0 },
            sequence_error: outcome.out_of_order.is_some(),
            missing_items: outcome.missing,
            message: outcome.message,
        }
    }
}

/// Validate `user_steps` against the canonical `flow_steps`.
pub fn validate_sequence<S: AsRef<str>>(user_steps: &[S], flow_steps: &[String]) -> SequenceOutcome {
    let user: Vec<String> = user_steps
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect();

    // First user index mentioning each canonical step.
    let mut first_seen: Vec<Option<usize>> = Vec::with_capacity(flow_steps.len());
    for (pos, step) in flow_steps.iter().enumerate() {
        let needle = step.trim().to_lowercase();
        let seen = if needle.is_empty() || is_repeat_label(flow_steps, pos) {
            None
        } else {
            user.iter().position(|u| u.contains(&needle))
        };
        first_seen.push(seen);
    }

    let missing: Vec<String> = flow_steps
        .iter()
        .enumerate()
        .filter(|(pos, step)| {
            first_seen[*pos].is_none()
                && !step.trim().is_empty()
                && !is_repeat_label(flow_steps, *pos)
        })
        .map(|(_, step)| step.clone())
        .collect();

    if !missing.is_empty() {
        return SequenceOutcome {
            valid: false,
            message: format!("Missing steps: {}", missing.join(", ")),
            missing,
            out_of_order: None,
        };
    }

    // Walk matched steps in the order the user wrote them; ties within one
    // user step keep canonical order.
    let mut visits: Vec<(usize, usize)> = first_seen
        .iter()
        .enumerate()
        .filter_map(|(canonical, seen)| seen.map(|user_idx| (user_idx, canonical)))
        .collect();
    visits.sort();

    let mut highest = None;
    for (_, canonical) in visits {
        if let Some(h) = highest {
            if canonical < h {
                let step = flow_steps[canonical].clone();
                return SequenceOutcome {
                    valid: false,
                    message: format!("Step '{step}' appears out of order."),
                    missing: vec![],
                    out_of_order: Some(step),
                };
            }
        }
        highest = Some(canonical);
    }

    SequenceOutcome {
        valid: true,
        missing: vec![],
        out_of_order: None,
        message: "Correct! All steps are in the right order.".to_string(),
    }
}

fn is_repeat_label(flow_steps: &[String], pos: usize) -> bool {
    flow_steps[..pos]
        .iter()
        .any(|earlier| earlier.trim().eq_ignore_ascii_case(flow_steps[pos].trim()))
}
