//! This module contains the fill_defaults function that inserts missing schema defaults into a JSON object.
use color_eyre::owo_colors::OwoColorize;
use log::{debug, trace};
use serde_json::{Map, Value};

use crate::error::{json_type_name, DefaultsError};

const KEY_SEPARATOR: &str = ".";

/// Returns the nested `properties` object of a schema node, or a
/// [`DefaultsError::MalformedSchema`] naming the value actually found there.
fn nested_properties<'a>(
  schema_node: &'a Map<String, Value>,
  node_path: &str,
) -> Result<&'a Map<String, Value>, DefaultsError> {
  match schema_node.get("properties") {
    Some(Value::Object(nested)) => Ok(nested),
    other => Err(DefaultsError::MalformedSchema {
      path: format!("{node_path}{KEY_SEPARATOR}properties"),
      found: other.map_or("nothing", json_type_name),
    }),
  }
}

/// Inserts missing default values from a schema `properties` map into a target JSON object.
///
/// Walks each `(field, schema node)` entry of `properties` in lock-step with `into`:
/// a field already present in the target is never overwritten. An existing object value
/// is deepened through the node's nested `properties`; an existing non-object value wins
/// unconditionally and is left alone. For an absent field, the node's `default` is
/// inserted when declared; otherwise its nested `properties` are filled into a fresh map
/// which is attached only when it ends up non-empty, so no empty placeholder objects are
/// ever created. A node declaring both `default` and `properties` contributes its
/// `default` and is not descended into.
///
/// # Arguments
///
/// * `into` - The target object, mutated in place.
/// * `properties` - One level of an object schema's declared fields, mapping each field
///   name to its schema node.
/// * `full_key_prefix` - Dotted key path of the current level, used to locate malformed
///   schema values in error reports. Callers start with `""`.
///
/// # Errors
///
/// Returns [`DefaultsError::MalformedSchema`] when a schema node, or a `properties`
/// value a descent requires, is not a JSON object. Fields written before the failure
/// remain in `into`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use schema_defaults::fill_defaults;
///
/// let schema = json!({
///   "retries": { "type": "integer", "default": 3 },
///   "log": { "properties": { "level": { "default": "info" } } },
/// });
/// let properties = schema.as_object().unwrap();
/// let mut target = serde_json::Map::new();
///
/// fill_defaults(&mut target, properties, "").unwrap();
///
/// assert_eq!(
///   serde_json::Value::Object(target),
///   json!({ "retries": 3, "log": { "level": "info" } }),
/// );
/// ```
pub fn fill_defaults(
  into: &mut Map<String, Value>,
  properties: &Map<String, Value>,
  full_key_prefix: &str,
) -> Result<(), DefaultsError> {
  for (property, schema) in properties {
    trace!("Handling {} with schema {}", property.italic().purple(), schema.cyan());
    let schema_node = match schema {
      Value::Object(node) => node,
      other => {
        return Err(DefaultsError::MalformedSchema {
          path: format!("{full_key_prefix}{property}"),
          found: json_type_name(other),
        });
      },
    };

    match into.get_mut(property) {
      Some(Value::Object(inner)) => {
        // An existing object is deepened, never replaced. The schema node
        // must describe an object here, so a missing or non-object
        // `properties` is a malformed schema.
        debug!("Stepping into existing key: {}", property.yellow());
        let node_path = format!("{full_key_prefix}{property}");
        let nested = nested_properties(schema_node, &node_path)?;
        fill_defaults(inner, nested, &format!("{node_path}{KEY_SEPARATOR}"))?;
      },
      Some(existing) => {
        // Existing non-object values win unconditionally.
        trace!("Keeping existing key {} with value {}", property.purple(), existing.cyan());
      },
      None => {
        if let Some(default) = schema_node.get("default") {
          // `default` beats nested `properties` when a node declares both.
          debug!("Inserting default for {}: {}", property.purple(), default.cyan());
          into.insert(property.clone(), default.clone());
        } else if schema_node.contains_key("properties") {
          let node_path = format!("{full_key_prefix}{property}");
          let nested = nested_properties(schema_node, &node_path)?;
          let mut inner = Map::new();
          fill_defaults(&mut inner, nested, &format!("{node_path}{KEY_SEPARATOR}"))?;
          // Only attach the inner object when the recursion produced
          // something; an empty placeholder is never inserted.
          if !inner.is_empty() {
            debug!("Attaching nested defaults for {}: {:?}", property.purple(), inner.cyan());
            into.insert(property.clone(), Value::Object(inner));
          }
        } else {
          trace!("Nothing to insert for {}", property.purple());
        }
      },
    }
  }

  Ok(())
}
