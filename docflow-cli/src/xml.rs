//! Workflow XML to JSON document conversion.
//!
//! Authoring happens in XML; the engine consumes JSON. The mapping is the
//! generic element-tree one:
//!
//! - attributes become string properties
//! - child elements are grouped by name; repeated children become an array,
//!   a single child stays an object
//! - a text-only element becomes a string; mixed text lands under `"$t"`
//!
//! A consequence worth knowing: a document with exactly one `<state>` element
//! converts to an object, not a one-element array, and the loader then
//! classifies it `invalid`. The shape rule exists to catch precisely that.

use minidom::Element;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Parses an XML string and converts it to a JSON value keyed by the root
/// element's name.
pub fn convert_str(xml: &str) -> Result<Value, minidom::Error> {
    let root: Element = xml.parse()?;
    let mut map = Map::new();
    map.insert(root.name().to_string(), element_to_value(&root));
    Ok(Value::Object(map))
}

fn element_to_value(element: &Element) -> Value {
    let mut object = Map::new();

    for (name, value) in element.attrs() {
        object.insert(name.to_string(), Value::String(value.to_string()));
    }

    // Group children by element name, preserving first-seen order
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Value>> = HashMap::new();
    for child in element.children() {
        let name = child.name().to_string();
        if !groups.contains_key(&name) {
            order.push(name.clone());
        }
        groups
            .entry(name)
            .or_default()
            .push(element_to_value(child));
    }
    for name in order {
        let mut values = groups.remove(&name).unwrap_or_default();
        let value = if values.len() == 1 {
            values.pop().unwrap()
        } else {
            Value::Array(values)
        };
        object.insert(name, value);
    }

    let text = element.text();
    let text = text.trim();
    if !text.is_empty() {
        if object.is_empty() {
            return Value::String(text.to_string());
        }
        object.insert("$t".to_string(), Value::String(text.to_string()));
    }

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_core::{LoadStatus, Workflow};
    use serde_json::json;

    const NS: &str = "urn:docflow:workflow:1.0";

    #[test]
    fn test_attributes_become_string_properties() {
        let value = convert_str(&format!(
            r#"<state xmlns="{}" name="draft" title="Draft" level="1"/>"#,
            NS
        ))
        .unwrap();

        assert_eq!(
            value,
            json!({"state": {"name": "draft", "title": "Draft", "level": "1"}})
        );
    }

    #[test]
    fn test_repeated_children_become_arrays() {
        let value = convert_str(&format!(
            r#"<states xmlns="{}">
                 <state name="draft"/>
                 <state name="editable"/>
               </states>"#,
            NS
        ))
        .unwrap();

        assert_eq!(
            value,
            json!({"states": {"state": [{"name": "draft"}, {"name": "editable"}]}})
        );
    }

    #[test]
    fn test_single_child_stays_an_object() {
        let value = convert_str(&format!(
            r#"<states xmlns="{}"><state name="only"/></states>"#,
            NS
        ))
        .unwrap();

        assert_eq!(value, json!({"states": {"state": {"name": "only"}}}));
    }

    #[test]
    fn test_text_only_element_becomes_string() {
        let value = convert_str(&format!(r#"<doctype xmlns="{}">act</doctype>"#, NS)).unwrap();
        assert_eq!(value, json!({"doctype": "act"}));
    }

    #[test]
    fn test_mixed_content_text_under_dollar_t() {
        let value = convert_str(&format!(
            r#"<note xmlns="{}" kind="info">review me</note>"#,
            NS
        ))
        .unwrap();
        assert_eq!(value, json!({"note": {"kind": "info", "$t": "review me"}}));
    }

    fn workflow_xml(states: &str, transitions: &str) -> String {
        format!(
            r#"<workflow xmlns="{}" doctype="act" subtype="statute">
                 <permissions>
                   <permission name="view" title="View"/>
                   <permission name="transit" title="Transit"/>
                 </permissions>
                 <states>{}</states>
                 <transitions>{}</transitions>
               </workflow>"#,
            NS, states, transitions
        )
    }

    #[test]
    fn test_converted_workflow_loads_valid() {
        let xml = workflow_xml(
            r#"<state name="draft" title="Draft">
                 <permission name="transit" roles="admin submitter"/>
                 <permission name="view" roles="admin"/>
               </state>
               <state name="editable" title="Editable">
                 <permission name="transit" roles="admin editor"/>
                 <permission name="view" roles="admin editor"/>
               </state>"#,
            r#"<transition name="make_editable" from="draft" to="editable"/>
               <transition name="make_drafting" from="editable" to="draft"/>"#,
        );

        let value = convert_str(&xml).unwrap();
        let wf = Workflow::from_bytes(&serde_json::to_vec(&value).unwrap());

        assert_eq!(wf.status(), LoadStatus::Valid);
        assert_eq!(wf.states().len(), 2);
        assert_eq!(wf.next_state_names("draft"), vec!["editable"]);
    }

    #[test]
    fn test_single_state_document_classifies_invalid() {
        // One <state> converts to an object, which the loader rejects
        let xml = workflow_xml(
            r#"<state name="draft" title="Draft">
                 <permission name="transit" roles="admin"/>
                 <permission name="view" roles="admin"/>
               </state>"#,
            r#"<transition name="loop" from="draft" to="draft"/>
               <transition name="stay" from="draft" to="draft"/>"#,
        );

        let value = convert_str(&xml).unwrap();
        let wf = Workflow::from_bytes(&serde_json::to_vec(&value).unwrap());
        assert_eq!(wf.status(), LoadStatus::Invalid);
    }

    #[test]
    fn test_malformed_xml_errors() {
        assert!(convert_str("<workflow").is_err());
    }
}
