//! Post-load referential integrity report.
//!
//! The loader deliberately does not check that `transition.from`/`to` name
//! declared states; queries stay permissive either way. [`Workflow::lint`]
//! reports the gaps so tooling can flag them without changing runtime
//! behavior.

use crate::model::Workflow;
use std::collections::HashSet;
use std::fmt;

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// `transition.from` names no declared state.
    DanglingFrom { transition: String, state: String },
    /// `transition.to` names no declared state.
    DanglingTo { transition: String, state: String },
    /// Two states share a name.
    DuplicateState { state: String },
    /// Two transitions share a name.
    DuplicateTransition { transition: String },
    /// A state grants a permission the document catalog does not declare.
    UndeclaredPermission { state: String, permission: String },
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::DanglingFrom { transition, state } => {
                write!(f, "transition '{}': from-state '{}' is not declared", transition, state)
            }
            LintWarning::DanglingTo { transition, state } => {
                write!(f, "transition '{}': to-state '{}' is not declared", transition, state)
            }
            LintWarning::DuplicateState { state } => {
                write!(f, "state '{}' is declared more than once", state)
            }
            LintWarning::DuplicateTransition { transition } => {
                write!(f, "transition '{}' is declared more than once", transition)
            }
            LintWarning::UndeclaredPermission { state, permission } => {
                write!(
                    f,
                    "state '{}': permission '{}' is not in the document catalog",
                    state, permission
                )
            }
        }
    }
}

impl Workflow {
    /// Reports referential gaps in a `Valid` document. Empty for a clean
    /// document, and empty for a model that is not `Valid`.
    pub fn lint(&self) -> Vec<LintWarning> {
        let doc = match self.document() {
            Some(doc) => doc,
            None => return Vec::new(),
        };

        let mut warnings = Vec::new();

        let mut state_names: HashSet<&str> = HashSet::new();
        for state in &doc.states.state {
            if !state_names.insert(state.name.as_str()) {
                warnings.push(LintWarning::DuplicateState {
                    state: state.name.clone(),
                });
            }
        }

        let catalog: HashSet<&str> = doc
            .permissions
            .permission
            .iter()
            .map(|permission| permission.name.as_str())
            .collect();
        for state in &doc.states.state {
            for permission in &state.permission {
                if !catalog.contains(permission.name.as_str()) {
                    warnings.push(LintWarning::UndeclaredPermission {
                        state: state.name.clone(),
                        permission: permission.name.clone(),
                    });
                }
            }
        }

        let mut transition_names: HashSet<&str> = HashSet::new();
        for transition in &doc.transitions.transition {
            if !transition_names.insert(transition.name.as_str()) {
                warnings.push(LintWarning::DuplicateTransition {
                    transition: transition.name.clone(),
                });
            }
            if !state_names.contains(transition.from.as_str()) {
                warnings.push(LintWarning::DanglingFrom {
                    transition: transition.name.clone(),
                    state: transition.from.clone(),
                });
            }
            if !state_names.contains(transition.to.as_str()) {
                warnings.push(LintWarning::DanglingTo {
                    transition: transition.name.clone(),
                    state: transition.to.clone(),
                });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn workflow_from(value: serde_json::Value) -> Workflow {
        Workflow::from_bytes(&serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn test_clean_document_has_no_warnings() {
        let wf = workflow_from(json!({
            "workflow": {
                "doctype": "act", "subtype": "statute",
                "permissions": {"permission": [{"name": "transit"}]},
                "states": {"state": [
                    {"name": "draft", "permission": [{"name": "transit", "roles": "admin"}]},
                    {"name": "editable"}
                ]},
                "transitions": {"transition": [
                    {"name": "make_editable", "from": "draft", "to": "editable"}
                ]}
            }
        }));
        assert!(wf.lint().is_empty());
    }

    #[test]
    fn test_dangling_references_reported() {
        let wf = workflow_from(json!({
            "workflow": {
                "doctype": "act", "subtype": "statute",
                "permissions": {"permission": []},
                "states": {"state": [{"name": "draft"}]},
                "transitions": {"transition": [
                    {"name": "vanish", "from": "nowhere", "to": "draft"},
                    {"name": "appear", "from": "draft", "to": "limbo"}
                ]}
            }
        }));

        let warnings = wf.lint();
        assert!(warnings.contains(&LintWarning::DanglingFrom {
            transition: "vanish".to_string(),
            state: "nowhere".to_string(),
        }));
        assert!(warnings.contains(&LintWarning::DanglingTo {
            transition: "appear".to_string(),
            state: "limbo".to_string(),
        }));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_duplicate_names_reported() {
        let wf = workflow_from(json!({
            "workflow": {
                "doctype": "act", "subtype": "statute",
                "permissions": {"permission": []},
                "states": {"state": [{"name": "draft"}, {"name": "draft"}]},
                "transitions": {"transition": [
                    {"name": "loop", "from": "draft", "to": "draft"},
                    {"name": "loop", "from": "draft", "to": "draft"}
                ]}
            }
        }));

        let warnings = wf.lint();
        assert!(warnings.contains(&LintWarning::DuplicateState {
            state: "draft".to_string(),
        }));
        assert!(warnings.contains(&LintWarning::DuplicateTransition {
            transition: "loop".to_string(),
        }));
    }

    #[test]
    fn test_undeclared_permission_reported() {
        let wf = workflow_from(json!({
            "workflow": {
                "doctype": "act", "subtype": "statute",
                "permissions": {"permission": [{"name": "view"}]},
                "states": {"state": [
                    {"name": "draft", "permission": [
                        {"name": "view", "roles": "admin"},
                        {"name": "archive", "roles": "admin"}
                    ]}
                ]},
                "transitions": {"transition": []}
            }
        }));

        let warnings = wf.lint();
        assert_eq!(
            warnings,
            vec![LintWarning::UndeclaredPermission {
                state: "draft".to_string(),
                permission: "archive".to_string(),
            }]
        );
    }

    #[test]
    fn test_lint_on_non_valid_model_is_empty() {
        let wf = Workflow::from_bytes(b"garbage");
        assert!(wf.lint().is_empty());

        let wf = Workflow::from_bytes(br#"{"workflow": {}}"#);
        assert!(wf.lint().is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = LintWarning::DanglingFrom {
            transition: "vanish".to_string(),
            state: "nowhere".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "transition 'vanish': from-state 'nowhere' is not declared"
        );
    }
}
