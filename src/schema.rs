//! This module contains the schema handle and the access to its parsed standalone document.
use color_eyre::owo_colors::OwoColorize;
use log::{debug, trace};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{
  error::{json_type_name, DefaultsError},
  merger::fill_defaults::fill_defaults,
};

/// Holds the parsed standalone document backing a schema.
///
/// This is the document store boundary of a full schema engine, reduced to the
/// one capability this crate consumes: owning a parsed document and handing
/// out read-only access to it.
#[derive(Debug, Clone)]
pub struct SchemaPool {
  standalone_document: Value,
}

impl SchemaPool {
  /// Creates a pool holding the given parsed document.
  pub fn new(standalone_document: Value) -> Self {
    Self { standalone_document }
  }

  /// Returns the parsed standalone document.
  pub fn standalone_document(&self) -> &Value {
    &self.standalone_document
  }
}

/// A handle to a parsed schema document, entry point for default insertion.
#[derive(Debug, Clone)]
pub struct Schema {
  pool: Option<SchemaPool>,
}

impl Schema {
  /// Creates a schema backed by the given document pool, if any.
  ///
  /// A schema without a pool fails every operation with
  /// [`DefaultsError::NoDocumentPool`].
  pub fn new(pool: Option<SchemaPool>) -> Self {
    Self { pool }
  }

  /// Creates a schema directly from a parsed standalone document.
  pub fn from_document(document: Value) -> Self {
    Self::new(Some(SchemaPool::new(document)))
  }

  /// Retrieves the `properties` object of the schema's standalone document.
  ///
  /// # Errors
  ///
  /// * [`DefaultsError::NoDocumentPool`] - the schema has no backing pool.
  /// * [`DefaultsError::DocumentNotObject`] - the document is not a JSON object.
  /// * [`DefaultsError::NoProperties`] - the document has no `properties` key.
  /// * [`DefaultsError::MalformedSchema`] - the `properties` value is not a
  ///   JSON object.
  fn doc_properties(&self) -> Result<&Map<String, Value>, DefaultsError> {
    let pool = self.pool.as_ref().ok_or(DefaultsError::NoDocumentPool)?;
    let document = pool.standalone_document();
    trace!("Reading properties of document {}", document.cyan());

    let doc_map = match document {
      Value::Object(map) => map,
      other => return Err(DefaultsError::DocumentNotObject { found: json_type_name(other) }),
    };

    match doc_map.get("properties") {
      Some(Value::Object(properties)) => Ok(properties),
      Some(other) => {
        Err(DefaultsError::MalformedSchema { path: "properties".into(), found: json_type_name(other) })
      },
      None => Err(DefaultsError::NoProperties),
    }
  }

  /// Inserts any missing default values declared by the schema into `into`,
  /// non-destructively.
  ///
  /// Values already present in `into` are never overwritten; existing nested
  /// objects are only deepened. The schema document must describe an object
  /// with a `properties` map, so bare value schemas are rejected.
  ///
  /// # Arguments
  ///
  /// * `into` - The target object, mutated in place.
  ///
  /// # Errors
  ///
  /// Any [`DefaultsError`]: the accessor failures listed on
  /// [`doc_properties`](Self::doc_properties), or a
  /// [`DefaultsError::MalformedSchema`] found during the recursive fill. On
  /// failure `into` keeps the fields written before the offending node was
  /// reached.
  ///
  /// # Example
  ///
  /// ```
  /// use serde_json::json;
  /// use schema_defaults::Schema;
  ///
  /// let schema = Schema::from_document(json!({
  ///   "type": "object",
  ///   "properties": {
  ///     "retries": { "type": "integer", "default": 3 },
  ///     "log": { "properties": { "level": { "default": "info" } } },
  ///   },
  /// }));
  /// let mut target = serde_json::Map::new();
  /// target.insert("retries".into(), json!(5));
  ///
  /// schema.insert_defaults(&mut target).unwrap();
  ///
  /// assert_eq!(
  ///   serde_json::Value::Object(target),
  ///   json!({ "retries": 5, "log": { "level": "info" } }),
  /// );
  /// ```
  #[instrument(skip_all, err, target = "instrument")]
  pub fn insert_defaults(&self, into: &mut Map<String, Value>) -> Result<(), DefaultsError> {
    let properties = self.doc_properties()?;
    debug!("Inserting defaults for {} top-level properties", properties.len().yellow());
    fill_defaults(into, properties, "")
  }

  /// Builds a fresh object holding only the schema's defaults.
  ///
  /// Equivalent to [`insert_defaults`](Self::insert_defaults) against a newly
  /// created empty map, which is returned to the caller.
  #[instrument(skip_all, err, target = "instrument")]
  pub fn defaults(&self) -> Result<Map<String, Value>, DefaultsError> {
    let mut into = Map::new();
    self.insert_defaults(&mut into)?;
    Ok(into)
  }
}
