//! # docflow-core
//!
//! Declarative workflow engine for docflow.
//!
//! This crate provides:
//! - Workflow document parsing and shape classification
//! - Read-only structural queries over states and transitions
//! - Role-based `transit` permission evaluation
//! - Caller-registered action hook dispatch
//! - Directory discovery of workflow documents
//!
//! A model is loaded once and queried many times; it is never mutated after
//! its single load call, so sharing a loaded [`Workflow`] across tasks needs
//! no locking.

pub mod actions;
pub mod discover;
pub mod document;
pub mod error;
pub mod lint;
pub mod loader;
pub mod model;
pub mod permission;

pub use actions::{ActionFn, ActionOutcome, ActionRegistry};
pub use discover::{discover, discover_sync, DiscoveredWorkflow};
pub use document::{
    PermissionDef, State, StatePermission, Transition, WorkflowDocument,
};
pub use error::CoreError;
pub use lint::LintWarning;
pub use loader::LoadStatus;
pub use model::{TransitionEndpoints, TransitionStates, TypeInfo, Workflow};
pub use permission::{
    role_matches, state_permission, TransitDecision, TransitQuery, TRANSIT_PERMISSION,
};
