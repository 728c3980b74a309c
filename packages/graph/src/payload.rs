use serde_json::{Map, Value};

use crate::error::GraphError;
use crate::query::{JSON_VAR, URI_VAR};
use crate::repository::{Binding, QueryResult};

/// Require exactly one binding for a by-identifier lookup.
///
/// Zero rows map to `NotFound`; more than one row is `AmbiguousResult`.
pub fn single_binding<'a>(
    result: &'a QueryResult,
    subject: &str,
) -> Result<&'a Binding, GraphError> {
    match result.bindings() {
        [] => Err(GraphError::NotFound(subject.to_string())),
        [binding] => Ok(binding),
        many => Err(GraphError::AmbiguousResult {
            subject: subject.to_string(),
            count: many.len(),
        }),
    }
}

/// Read a variable out of a binding.
pub fn binding_value<'a>(binding: &'a Binding, var: &str) -> Result<&'a str, GraphError> {
    binding
        .get(var)
        .map(|term| term.value.as_str())
        .ok_or_else(|| GraphError::MalformedPayload(format!("binding has no '{var}' variable")))
}

/// Restore the enclosing braces the repository stores objects without.
pub fn wrap(interior: &str) -> String {
    format!("{{{interior}}}")
}

/// Inverse of [`wrap`] for a serialized JSON object.
pub fn unwrap(object: &Map<String, Value>) -> String {
    let text = Value::Object(object.clone()).to_string();
    text[1..text.len() - 1].to_string()
}

/// Parse the stored interior of a JSON object.
pub fn parse_interior(interior: &str) -> Result<Map<String, Value>, GraphError> {
    match serde_json::from_str::<Value>(&wrap(interior)) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(GraphError::MalformedPayload(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(e) => Err(GraphError::MalformedPayload(e.to_string())),
    }
}

/// Object payload of a single-object query, with the URI it was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedObject {
    pub object: Map<String, Value>,
    pub uri: Option<String>,
}

/// Pull the object payload out of a single-object query result.
pub fn extract(result: &QueryResult, subject: &str) -> Result<ParsedObject, GraphError> {
    let binding = single_binding(result, subject)?;
    Ok(ParsedObject {
        object: parse_interior(binding_value(binding, JSON_VAR)?)?,
        uri: binding.get(URI_VAR).map(|term| term.value.clone()),
    })
}
