// # Resource Data Trait
//
// The handle a lifecycle callback receives from the host: the configured and
// persisted attribute values of one resource instance plus its identity.
//
// Attribute paths are dotted, with list indices for nested blocks:
//
// ```text
// name
// fqdn.0.interval
// ```
//
// An empty identity means "this resource does not exist"; callbacks clear it
// to tell the host to drop the instance from state.

use serde_json::Value;

/// Lifecycle context for a single resource instance
pub trait ResourceData: Send + Sync {
    /// The resource identity, empty when the resource does not exist
    fn id(&self) -> &str;

    /// Set the resource identity
    ///
    /// Passing an empty string marks the resource as gone.
    fn set_id(&mut self, id: &str);

    /// Get the raw value stored at `path`
    fn get(&self, path: &str) -> Option<&Value>;

    /// Store a value at `path`
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The value was stored
    /// - `Err(Error)`: The path is not part of the schema or the value has
    ///   the wrong shape
    fn set(&mut self, path: &str, value: Value) -> Result<(), crate::Error>;

    /// Get a string attribute, `""` when unset
    fn get_string(&self, path: &str) -> String {
        self.get(path)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Get an integer attribute, `0` when unset
    fn get_int(&self, path: &str) -> i64 {
        self.get(path).and_then(Value::as_i64).unwrap_or(0)
    }

    /// Clear the identity
    fn clear_id(&mut self) {
        self.set_id("");
    }

    /// Returns `true` while the resource has an identity
    fn has_id(&self) -> bool {
        !self.id().is_empty()
    }
}
