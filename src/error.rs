//! This module contains the typed errors reported while extracting schema properties or inserting defaults.
use serde_json::Value;
use thiserror::Error;

/// Errors produced while inserting schema defaults into a target object.
///
/// Every shape assumption made about the schema document is an explicit check
/// producing one of these variants; a malformed schema aborts the current call
/// with an error, never the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefaultsError {
  /// The schema has no backing document pool.
  #[error("document pool for schema not set")]
  NoDocumentPool,
  /// The schema's standalone document is not a JSON object.
  #[error("schema document is not an object, found {found}")]
  DocumentNotObject {
    /// JSON type of the document that was found instead.
    found: &'static str,
  },
  /// The schema's standalone document has no `properties` key.
  #[error("schema document has no properties")]
  NoProperties,
  /// A schema node or a `properties` value is not shaped as a JSON object.
  #[error("malformed schema at `{path}`: expected an object, found {found}")]
  MalformedSchema {
    /// Dotted key path of the offending value inside the schema document.
    path: String,
    /// JSON type that was found where an object was required, or `nothing`
    /// when a required key is absent.
    found: &'static str,
  },
}

/// JSON type name of a value, used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
