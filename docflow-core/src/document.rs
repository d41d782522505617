//! Workflow document types.
//!
//! Documents use a JSON DSL with a single `workflow` root key:
//!
//! ```json
//! {
//!   "workflow": {
//!     "doctype": "act",
//!     "subtype": "statute",
//!     "modulePath": "actions/statute",
//!     "permissions": {"permission": [{"name": "transit", "title": "Transit"}]},
//!     "states": {"state": [
//!       {"name": "draft", "title": "Draft", "level": "1", "color": "initial",
//!        "permission": [{"name": "transit", "roles": "admin submitter"}]}
//!     ]},
//!     "transitions": {"transition": [
//!       {"name": "make_editable", "from": "draft", "to": "editable"}
//!     ]}
//!   }
//! }
//! ```
//!
//! Every type here is an owned value with a deep `Clone`; the query surface
//! hands out clones so callers can never alias engine-internal storage.

use serde::{Deserialize, Serialize};

/// Root wrapper for the on-disk document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRoot {
    pub workflow: WorkflowDocument,
}

/// A complete workflow document. Immutable after load; owned by exactly one
/// model instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    /// Document type this workflow applies to.
    pub doctype: String,

    /// Document subtype.
    pub subtype: String,

    /// Location of the action hook unit. Carried as data only; hooks are
    /// resolved through a registry, never loaded from this path.
    #[serde(rename = "modulePath", default, skip_serializing_if = "Option::is_none")]
    pub module_path: Option<String>,

    /// Catalog of permission kinds the document declares.
    pub permissions: PermissionCatalog,

    /// Declared states.
    pub states: StateList,

    /// Declared transitions.
    pub transitions: TransitionList,
}

/// The `permissions` wrapper: a single `permission` sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PermissionCatalog {
    #[serde(default)]
    pub permission: Vec<PermissionDef>,
}

/// The `states` wrapper: a single `state` sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateList {
    #[serde(default)]
    pub state: Vec<State>,
}

/// The `transitions` wrapper: a single `transition` sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransitionList {
    #[serde(default)]
    pub transition: Vec<Transition>,
}

/// A catalog entry naming a permission kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionDef {
    /// Permission name, e.g. `view`, `edit`, `transit`.
    pub name: String,

    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Display icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A named node in the workflow graph, carrying its own permission list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Unique name within a document.
    pub name: String,

    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Ordering level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Permissions scoped to this state, in document order.
    #[serde(default)]
    pub permission: Vec<StatePermission>,
}

/// A permission granted within one state to a set of roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePermission {
    /// Permission name, matched against the document catalog.
    pub name: String,

    /// Whitespace-separated role identifiers.
    #[serde(default)]
    pub roles: String,
}

/// A named directed edge between two states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Unique name within a document.
    pub name: String,

    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Display icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Source state name. Referential validity is not enforced at load.
    pub from: String,

    /// Target state name. Referential validity is not enforced at load.
    pub to: String,

    /// Marks a transition triggered by automated logic rather than a
    /// role-driven action. Accepts a JSON bool or the string `"true"`.
    #[serde(
        rename = "bySystem",
        default,
        deserialize_with = "deserialize_system_flag",
        skip_serializing_if = "is_false"
    )]
    pub by_system: bool,

    /// Hook name a caller may invoke before performing this transition.
    #[serde(rename = "preTransit", default, skip_serializing_if = "Option::is_none")]
    pub pre_transit: Option<String>,

    /// Hook name a caller may invoke after performing this transition.
    #[serde(rename = "postTransit", default, skip_serializing_if = "Option::is_none")]
    pub post_transit: Option<String>,
}

fn is_false(flag: &bool) -> bool {
    !flag
}

fn deserialize_system_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct SystemFlagVisitor;

    impl<'de> Visitor<'de> for SystemFlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean or the string \"true\"")
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v == "true")
        }

        fn visit_i64<E>(self, _v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(false)
        }

        fn visit_u64<E>(self, _v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(false)
        }

        fn visit_f64<E>(self, _v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(false)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(false)
        }
    }

    deserializer.deserialize_any(SystemFlagVisitor)
}
