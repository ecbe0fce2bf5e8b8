//! Resource schema declarations
//!
//! A schema lists the attributes a resource type accepts, their kinds and
//! flags, defaults, and per-attribute validators. It is the configuration
//! contract of a resource: attribute names and defaults must not drift.
//!
//! ```rust
//! use ltm_core::schema::{Attribute, ResourceSchema};
//!
//! let schema = ResourceSchema::new()
//!     .with_attribute("name", Attribute::required_string().force_new())
//!     .with_attribute("monitor", Attribute::optional_string().with_default("/Common/icmp"));
//!
//! let mut attrs = serde_json::Map::new();
//! attrs.insert("name".into(), "/Common/web1".into());
//! schema.apply_defaults(&mut attrs);
//!
//! assert_eq!(attrs["monitor"], "/Common/icmp");
//! assert!(schema.validate(&attrs).is_ok());
//! ```

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static F5_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/[\w_\-.]+/[\w_\-.:]+$").expect("object name pattern is valid")
});

/// Per-attribute validator: returns one message per problem found
pub type Validator = fn(&Value, &str) -> Vec<String>;

/// Value kind of an attribute
#[derive(Debug, Clone)]
pub enum AttributeKind {
    /// UTF-8 string
    String,
    /// Signed integer
    Int,
    /// List of nested blocks
    Block(ResourceSchema),
}

/// A single attribute declaration
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Value kind
    pub kind: AttributeKind,
    /// Must be set in configuration
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Filled in from the remote side when not configured
    pub computed: bool,
    /// Changing the value requires replacing the object
    pub force_new: bool,
    /// Value used when the attribute is not configured
    pub default: Option<Value>,
    /// Upper bound on the number of blocks
    pub max_items: Option<usize>,
    /// Human readable description
    pub description: &'static str,
    /// Extra validation applied to configured values
    pub validator: Option<Validator>,
}

impl Attribute {
    fn new(kind: AttributeKind, required: bool) -> Self {
        Self {
            kind,
            required,
            optional: !required,
            computed: false,
            force_new: false,
            default: None,
            max_items: None,
            description: "",
            validator: None,
        }
    }

    /// A required string attribute
    pub fn required_string() -> Self {
        Self::new(AttributeKind::String, true)
    }

    /// An optional string attribute
    pub fn optional_string() -> Self {
        Self::new(AttributeKind::String, false)
    }

    /// An optional integer attribute
    pub fn optional_int() -> Self {
        Self::new(AttributeKind::Int, false)
    }

    /// An optional list of nested blocks
    pub fn optional_block(schema: ResourceSchema) -> Self {
        Self::new(AttributeKind::Block(schema), false)
    }

    /// Mark as computed
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Mark as requiring replacement on change
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Set a default value
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Limit the number of nested blocks
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Set the description
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Attach a validator
    pub fn validate_with(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    fn check(&self, name: &str, value: &Value, errors: &mut Vec<String>) {
        match (&self.kind, value) {
            (_, Value::Null) => return,
            (AttributeKind::String, Value::String(_)) => {}
            (AttributeKind::Int, Value::Number(n)) if n.is_i64() => {}
            (AttributeKind::Block(schema), Value::Array(items)) => {
                if let Some(max) = self.max_items
                    && items.len() > max
                {
                    errors.push(format!(
                        "{}: at most {} item(s) allowed, got {}",
                        name,
                        max,
                        items.len()
                    ));
                }
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::Object(block) => {
                            schema.collect_errors(block, &format!("{}.{}.", name, index), errors)
                        }
                        _ => errors.push(format!("{}.{}: expected a block", name, index)),
                    }
                }
            }
            (kind, _) => {
                errors.push(format!("{}: expected {}", name, kind_name(kind)));
                return;
            }
        }

        if let Some(validator) = self.validator {
            errors.extend(validator(value, name));
        }
    }
}

fn kind_name(kind: &AttributeKind) -> &'static str {
    match kind {
        AttributeKind::String => "a string",
        AttributeKind::Int => "an integer",
        AttributeKind::Block(_) => "a list of blocks",
    }
}

/// Attribute declarations of a resource type (or of a nested block)
#[derive(Debug, Clone, Default)]
pub struct ResourceSchema {
    attributes: BTreeMap<String, Attribute>,
}

impl ResourceSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Look up an attribute declaration
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Iterate over all attribute declarations, sorted by name
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fill unset attributes that declare a default
    ///
    /// Nested blocks get their own defaults applied.
    pub fn apply_defaults(&self, attrs: &mut Map<String, Value>) {
        for (name, attribute) in &self.attributes {
            let unset = attrs.get(name).is_none_or(Value::is_null);
            if unset {
                if let Some(default) = &attribute.default {
                    attrs.insert(name.clone(), default.clone());
                }
                continue;
            }

            if let AttributeKind::Block(schema) = &attribute.kind
                && let Some(Value::Array(items)) = attrs.get_mut(name)
            {
                for item in items.iter_mut() {
                    if let Value::Object(block) = item {
                        schema.apply_defaults(block);
                    }
                }
            }
        }
    }

    /// Validate an attribute map against this schema
    ///
    /// Reports every problem at once, joined with `; `.
    pub fn validate(&self, attrs: &Map<String, Value>) -> Result<()> {
        let mut errors = Vec::new();
        self.collect_errors(attrs, "", &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors.join("; ")))
        }
    }

    fn collect_errors(&self, attrs: &Map<String, Value>, prefix: &str, errors: &mut Vec<String>) {
        for (name, attribute) in &self.attributes {
            let path = format!("{}{}", prefix, name);
            match attrs.get(name) {
                Some(value) if !value.is_null() => attribute.check(&path, value, errors),
                _ if attribute.required => {
                    errors.push(format!("{}: required attribute is not set", path));
                }
                _ => {}
            }
        }

        for name in attrs.keys() {
            if !self.attributes.contains_key(name) {
                errors.push(format!("{}{}: unsupported attribute", prefix, name));
            }
        }
    }

    /// Names of force-new attributes whose value differs between `old` and `new`
    pub fn force_new_changes(
        &self,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
    ) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(_, attribute)| attribute.force_new)
            .filter(|(name, _)| {
                new.get(name.as_str())
                    .is_some_and(|value| old.get(name.as_str()) != Some(value))
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Check whether a dotted attribute path is declared
    ///
    /// Block attributes must be followed by a list index and a nested name,
    /// e.g. `fqdn.0.interval`; the bare block name is also accepted.
    pub fn contains_path(&self, path: &str) -> bool {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return false;
        };
        let Some(attribute) = self.attributes.get(first) else {
            return false;
        };

        let rest: Vec<&str> = segments.collect();
        match (&attribute.kind, rest.as_slice()) {
            (_, []) => true,
            (AttributeKind::Block(schema), [index, nested @ ..]) if !nested.is_empty() => {
                index.parse::<usize>().is_ok() && schema.contains_path(&nested.join("."))
            }
            _ => false,
        }
    }
}

/// Validate `/Partition/Name` object names
///
/// Accepts a single string or a list of strings.
pub fn validate_f5_name(value: &Value, field: &str) -> Vec<String> {
    let names: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut errors = Vec::new();
    for name in names {
        match name.as_str() {
            Some(name) if F5_NAME.is_match(name) => {}
            Some(_) => errors.push(format!(
                "\"{}\" must match /Partition/Name and contain letters, numbers or [._-:]. e.g. /Common/my-pool",
                field
            )),
            None => errors.push(format!("Unknown type {} in validate_f5_name", name)),
        }
    }
    errors
}
