//! Map-backed resource data
//!
//! [`ResourceDataMap`] is the [`ResourceData`] handle hosts and tests hand to
//! lifecycle callbacks. It holds one instance's identity and attribute map,
//! refuses writes to attributes its schema does not declare, and converts to
//! and from persisted [`ResourceState`] snapshots.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::schema::ResourceSchema;
use crate::traits::{ResourceData, ResourceState};

/// Attribute map plus identity, bound to a schema
#[derive(Debug, Clone)]
pub struct ResourceDataMap {
    schema: ResourceSchema,
    id: String,
    attributes: Map<String, Value>,
}

impl ResourceDataMap {
    /// Create an empty instance with no identity
    pub fn new(schema: ResourceSchema) -> Self {
        Self {
            schema,
            id: String::new(),
            attributes: Map::new(),
        }
    }

    /// Create an instance from configured attributes
    ///
    /// Schema defaults are applied first, then the result is validated.
    pub fn from_attributes(schema: ResourceSchema, mut attributes: Map<String, Value>) -> Result<Self> {
        schema.apply_defaults(&mut attributes);
        schema.validate(&attributes)?;

        Ok(Self {
            schema,
            id: String::new(),
            attributes,
        })
    }

    /// Restore an instance from a persisted snapshot
    pub fn from_state(schema: ResourceSchema, state: &ResourceState) -> Self {
        Self {
            schema,
            id: state.id.clone(),
            attributes: state.attributes.clone(),
        }
    }

    /// Snapshot the instance for persistence
    pub fn to_state(&self) -> ResourceState {
        ResourceState::new(self.id.clone(), self.attributes.clone())
    }

    /// Overlay newly configured attributes onto the current ones
    ///
    /// Used before an update: configured values win, attributes the new
    /// configuration leaves out keep their last known (possibly computed)
    /// value.
    pub fn merge_config(&mut self, mut config: Map<String, Value>) -> Result<()> {
        self.schema.apply_defaults(&mut config);
        self.schema.validate(&config)?;

        for (key, value) in config {
            self.attributes.insert(key, value);
        }
        Ok(())
    }

    /// All attribute values
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// The schema this instance is bound to
    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }
}

impl ResourceData for ResourceDataMap {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.attributes.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                Value::Object(block) => block.get(segment)?,
                _ => return None,
            };
        }

        Some(current)
    }

    fn set(&mut self, path: &str, value: Value) -> Result<()> {
        if !self.schema.contains_path(path) {
            return Err(Error::attribute(path, "attribute is not declared in the schema"));
        }

        let segments: Vec<&str> = path.split('.').collect();
        set_path(&mut self.attributes, path, &segments, value)
    }
}

fn set_path(
    target: &mut Map<String, Value>,
    path: &str,
    segments: &[&str],
    value: Value,
) -> Result<()> {
    match segments {
        [key] => {
            target.insert((*key).to_string(), value);
            Ok(())
        }
        [key, index, rest @ ..] if !rest.is_empty() => {
            let index: usize = index
                .parse()
                .map_err(|_| Error::attribute(path, format!("invalid list index '{}'", index)))?;

            let entry = target
                .entry((*key).to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if entry.is_null() {
                *entry = Value::Array(Vec::new());
            }

            let Value::Array(items) = entry else {
                return Err(Error::attribute(path, format!("'{}' is not a list", key)));
            };
            while items.len() <= index {
                items.push(Value::Object(Map::new()));
            }

            match items.get_mut(index) {
                Some(Value::Object(block)) => set_path(block, path, rest, value),
                _ => Err(Error::attribute(path, "list item is not a block")),
            }
        }
        _ => Err(Error::attribute(path, "malformed attribute path")),
    }
}
