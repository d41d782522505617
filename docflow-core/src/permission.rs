//! Role-based permission evaluation.
//!
//! Pure decision logic layered on the model's structural queries. Every
//! resolution failure — unknown transition, dangling source state, missing
//! `transit` entry, role not listed — evaluates to deny. Nothing in this
//! module errors or defaults open.

use crate::document::{State, StatePermission};
use crate::model::Workflow;
use serde::{Deserialize, Serialize};

/// The one permission kind the evaluator decides.
pub const TRANSIT_PERMISSION: &str = "transit";

/// One role/transition pair to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitQuery {
    pub role: String,
    pub transition: String,
}

/// A query pair annotated with its decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitDecision {
    pub role: String,
    pub transition: String,
    pub outcome: bool,
}

/// First permission entry on the state with the given name.
pub fn state_permission(state: &State, permission_name: &str) -> Option<StatePermission> {
    state
        .permission
        .iter()
        .find(|permission| permission.name == permission_name)
        .cloned()
}

/// Tests whether `role` appears as an exact token of the whitespace-separated
/// `roles` field. Substrings never match.
pub fn role_matches(roles: &str, role: &str) -> bool {
    roles.split_whitespace().any(|candidate| candidate == role)
}

impl Workflow {
    /// Evaluates each role/transition pair independently, preserving input
    /// order. The outcome is `false` for every resolution failure.
    pub fn can_role_transit(&self, queries: &[TransitQuery]) -> Vec<TransitDecision> {
        queries
            .iter()
            .map(|query| TransitDecision {
                role: query.role.clone(),
                transition: query.transition.clone(),
                outcome: self.role_can_transit(&query.role, &query.transition),
            })
            .collect()
    }

    fn role_can_transit(&self, role: &str, transition: &str) -> bool {
        self.states_for_transition(transition)
            .and_then(|states| states.from)
            .and_then(|from| state_permission(&from, TRANSIT_PERMISSION))
            .map(|permission| role_matches(&permission.roles, role))
            .unwrap_or(false)
    }
}
