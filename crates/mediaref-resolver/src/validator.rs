//! Parent Validator
//!
//! Classifies the declared parent linkage of one asset. The decision table is
//! evaluated in order, first match wins:
//!
//! 1. parent id 0 -> `Unattached`
//! 2. pointer does not resolve -> `InvalidParent`
//! 3. pointer resolves but the post owns none of the discovered references
//!    -> `BadParent` (the resolved title is known, so the summary is still
//!    populated)
//! 4. otherwise -> `AttachedValid`
//!
//! Classification never fails: every input combination maps to a state.

use mediaref_core::{ParentState, Post, PostId};
use mediaref_scanner::ScanOutcome;

/// Outcome of parent validation
#[derive(Debug, Clone, PartialEq)]
pub struct ParentClassification {
    /// Primary classification
    pub state: ParentState,
    /// `"(post_type) title"` of the resolved parent, when it resolved
    pub summary: Option<String>,
    /// Parent resolved and owns at least one discovered reference
    pub found_parent: bool,
    /// Declared parent id is zero
    pub is_unattached: bool,
}

/// Format the `"(post_type) title"` parent summary line
fn summarize(post: &Post) -> String {
    format!("({}) {}", post.post_type, post.title)
}

/// Classify the declared parent of an asset against its discovered references
pub fn classify_parent(
    declared_parent_id: PostId,
    parent_post: Option<&Post>,
    outcome: &ScanOutcome,
) -> ParentClassification {
    if declared_parent_id == 0 {
        return ParentClassification {
            state: ParentState::Unattached,
            summary: None,
            found_parent: false,
            is_unattached: true,
        };
    }

    let Some(parent) = parent_post else {
        return ParentClassification {
            state: ParentState::InvalidParent,
            summary: None,
            found_parent: false,
            is_unattached: false,
        };
    };

    if !outcome.names_post(parent.id) {
        return ParentClassification {
            state: ParentState::BadParent,
            summary: Some(summarize(parent)),
            found_parent: false,
            is_unattached: false,
        };
    }

    ParentClassification {
        state: ParentState::AttachedValid,
        summary: Some(summarize(parent)),
        found_parent: true,
        is_unattached: false,
    }
}
