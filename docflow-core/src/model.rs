//! Workflow model and read-only query surface.
//!
//! A [`Workflow`] is produced by a single load call (see [`crate::loader`])
//! and never changes afterwards. Every query is safe in every status and
//! returns owned deep copies of the matched substructures; a caller can
//! mutate what it receives without touching the model.

use crate::document::{PermissionDef, State, Transition, WorkflowDocument};
use crate::loader::LoadStatus;
use serde::Serialize;
use serde_json::Value;

/// What a single load call produced.
///
/// The tag is the source of truth for [`LoadStatus`]: an unloaded or
/// shape-invalid document cannot be mistaken for a valid one by construction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Loaded {
    /// Nothing was loaded (unreadable source or malformed syntax).
    Empty,
    /// Parsed, but failed shape validation. The raw value is retained.
    Invalid(Value),
    /// Parsed and shape-checked.
    Valid(WorkflowDocument),
}

/// An immutable workflow model: states, transitions, and role permissions
/// loaded from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub(crate) loaded: Loaded,
    pub(crate) checksum: Option<String>,
}

/// Doctype, subtype, and load status of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub doctype: String,
    pub subtype: String,
    pub status: LoadStatus,
}

/// The `from`/`to` state names of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEndpoints {
    pub from: String,
    pub to: String,
}

/// The endpoint states of a transition, each resolved independently.
/// A dangling state name yields `None` for that side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionStates {
    pub from: Option<State>,
    pub to: Option<State>,
}

impl Workflow {
    pub(crate) fn empty() -> Self {
        Self {
            loaded: Loaded::Empty,
            checksum: None,
        }
    }

    pub(crate) fn document(&self) -> Option<&WorkflowDocument> {
        match &self.loaded {
            Loaded::Valid(doc) => Some(doc),
            _ => None,
        }
    }

    /// Current lifecycle status. Set once by the load call.
    pub fn status(&self) -> LoadStatus {
        match &self.loaded {
            Loaded::Empty => LoadStatus::Empty,
            Loaded::Invalid(_) => LoadStatus::Invalid,
            Loaded::Valid(_) => LoadStatus::Valid,
        }
    }

    /// True once a document was parsed, whatever its shape classification.
    pub fn is_loaded(&self) -> bool {
        self.status() != LoadStatus::Empty
    }

    /// crc32c checksum of the raw bytes the model was loaded from.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Doctype, subtype, and status. Type fields are empty unless `Valid`.
    pub fn type_info(&self) -> TypeInfo {
        match self.document() {
            Some(doc) => TypeInfo {
                doctype: doc.doctype.clone(),
                subtype: doc.subtype.clone(),
                status: self.status(),
            },
            None => TypeInfo {
                doctype: String::new(),
                subtype: String::new(),
                status: self.status(),
            },
        }
    }

    /// Declared location of the action hook unit, carried as data.
    pub fn module_path(&self) -> Option<String> {
        self.document().and_then(|doc| doc.module_path.clone())
    }

    /// All states in document order.
    pub fn states(&self) -> Vec<State> {
        self.document()
            .map(|doc| doc.states.state.clone())
            .unwrap_or_default()
    }

    /// All transitions in document order.
    pub fn transitions(&self) -> Vec<Transition> {
        self.document()
            .map(|doc| doc.transitions.transition.clone())
            .unwrap_or_default()
    }

    /// The document-level permission catalog.
    pub fn permission_catalog(&self) -> Vec<PermissionDef> {
        self.document()
            .map(|doc| doc.permissions.permission.clone())
            .unwrap_or_default()
    }

    /// First state with the given name.
    pub fn state(&self, name: &str) -> Option<State> {
        self.document()?
            .states
            .state
            .iter()
            .find(|state| state.name == name)
            .cloned()
    }

    /// First transition with the given name.
    pub fn transition(&self, name: &str) -> Option<Transition> {
        self.document()?
            .transitions
            .transition
            .iter()
            .find(|transition| transition.name == name)
            .cloned()
    }

    /// The `from`/`to` state names of a transition, or `None` if unknown.
    pub fn state_names_for_transition(&self, name: &str) -> Option<TransitionEndpoints> {
        self.transition(name).map(|transition| TransitionEndpoints {
            from: transition.from,
            to: transition.to,
        })
    }

    /// The endpoint states of a transition, each looked up independently.
    pub fn states_for_transition(&self, name: &str) -> Option<TransitionStates> {
        self.state_names_for_transition(name)
            .map(|endpoints| TransitionStates {
                from: self.state(&endpoints.from),
                to: self.state(&endpoints.to),
            })
    }

    /// All transitions leaving the given state, in document order.
    pub fn transitions_from(&self, state_name: &str) -> Vec<Transition> {
        match self.document() {
            Some(doc) => doc
                .transitions
                .transition
                .iter()
                .filter(|transition| transition.from == state_name)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Names of the states reachable from the given state, in document order.
    pub fn next_state_names(&self, state_name: &str) -> Vec<String> {
        self.transitions_from(state_name)
            .into_iter()
            .map(|transition| transition.to)
            .collect()
    }

    /// The states reachable from the given state, resolved to full objects.
    /// Target names that resolve to no declared state are skipped.
    pub fn next_states(&self, state_name: &str) -> Vec<State> {
        self.next_state_names(state_name)
            .iter()
            .filter_map(|name| self.state(name))
            .collect()
    }

    /// True iff the transition exists and carries a truthy `bySystem` flag.
    pub fn is_system_transition(&self, name: &str) -> bool {
        self.transition(name)
            .map(|transition| transition.by_system)
            .unwrap_or(false)
    }

    /// Declared pre-transit hook name, or `None` if absent or unknown.
    pub fn pre_transit_action(&self, name: &str) -> Option<String> {
        self.transition(name).and_then(|transition| transition.pre_transit)
    }

    /// Declared post-transit hook name, or `None` if absent or unknown.
    pub fn post_transit_action(&self, name: &str) -> Option<String> {
        self.transition(name).and_then(|transition| transition.post_transit)
    }
}
