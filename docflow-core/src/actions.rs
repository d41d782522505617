//! Caller-registered action hooks.
//!
//! Transitions name `preTransit`/`postTransit` hooks as plain data; the
//! engine never invokes them on its own. Callers build an [`ActionRegistry`]
//! at process start and dispatch explicitly, after deciding through
//! [`Workflow::can_role_transit`](crate::model::Workflow::can_role_transit)
//! that a transition is permitted. The two steps are never chained
//! automatically.

use crate::document::WorkflowDocument;
use crate::error::CoreError;
use serde_json::Value;
use std::collections::HashMap;

/// Signature of a registered hook: the full document plus caller-supplied
/// params. The return shape is the hook's own business.
pub type ActionFn =
    Box<dyn Fn(&WorkflowDocument, &Value) -> Result<Value, CoreError> + Send + Sync>;

/// Result of dispatching a named action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The hook ran and returned a value.
    Ran(Value),
    /// No hook is registered under the requested name.
    NoOp,
}

/// Name → hook table, built once at process start.
///
/// This replaces run-time resolution of code units named by the document's
/// `modulePath`: the path stays data (see
/// [`Workflow::module_path`](crate::model::Workflow::module_path)) and only
/// statically registered functions ever run.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, ActionFn>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook under `name`, replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn(&WorkflowDocument, &Value) -> Result<Value, CoreError> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Box::new(action));
    }

    /// Returns true if a hook is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered hook names, unordered.
    pub fn names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    /// Invokes the named hook with the document and params.
    ///
    /// An unregistered name is a no-op, not an error. A fault raised by the
    /// hook itself propagates unmodified.
    pub fn invoke(
        &self,
        name: &str,
        document: &WorkflowDocument,
        params: &Value,
    ) -> Result<ActionOutcome, CoreError> {
        match self.actions.get(name) {
            Some(action) => action(document, params).map(ActionOutcome::Ran),
            None => Ok(ActionOutcome::NoOp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentRoot;
    use serde_json::json;

    fn sample_document() -> WorkflowDocument {
        let root: DocumentRoot = serde_json::from_value(json!({
            "workflow": {
                "doctype": "act",
                "subtype": "statute",
                "permissions": {"permission": []},
                "states": {"state": [{"name": "processing"}]},
                "transitions": {"transition": [
                    {"name": "make_publish", "from": "processing", "to": "publish",
                     "preTransit": "doPreProcessing"}
                ]}
            }
        }))
        .unwrap();
        root.workflow
    }

    #[test]
    fn test_invoke_registered_hook() {
        let mut registry = ActionRegistry::new();
        registry.register("doPreProcessing", |doc, params| {
            Ok(json!({
                "doctype": doc.doctype,
                "params": params,
                "marker": "ran"
            }))
        });

        let doc = sample_document();
        let outcome = registry
            .invoke("doPreProcessing", &doc, &json!({"caller": "publisher"}))
            .unwrap();

        match outcome {
            ActionOutcome::Ran(value) => {
                assert_eq!(value["doctype"], "act");
                assert_eq!(value["params"]["caller"], "publisher");
                assert_eq!(value["marker"], "ran");
            }
            ActionOutcome::NoOp => panic!("hook should have run"),
        }
    }

    #[test]
    fn test_unregistered_hook_is_noop() {
        let registry = ActionRegistry::new();
        let doc = sample_document();

        let outcome = registry.invoke("doProcessing", &doc, &json!({})).unwrap();
        assert_eq!(outcome, ActionOutcome::NoOp);
    }

    #[test]
    fn test_hook_fault_propagates() {
        let mut registry = ActionRegistry::new();
        registry.register("explode", |_doc, _params| {
            Err(CoreError::action_failed("explode", "backend unreachable"))
        });

        let doc = sample_document();
        let result = registry.invoke("explode", &doc, &json!({}));
        assert!(matches!(result, Err(CoreError::ActionFailed { .. })));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ActionRegistry::new();
        registry.register("hook", |_, _| Ok(json!(1)));
        registry.register("hook", |_, _| Ok(json!(2)));

        let doc = sample_document();
        let outcome = registry.invoke("hook", &doc, &Value::Null).unwrap();
        assert_eq!(outcome, ActionOutcome::Ran(json!(2)));
        assert!(registry.contains("hook"));
        assert_eq!(registry.names(), vec!["hook"]);
    }
}
