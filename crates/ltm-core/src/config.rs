//! Configuration types for LTM node management
//!
//! This module defines the declarative node configuration and the state
//! store selection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::schema::validate_f5_name;

/// Health monitor assigned when none is configured
pub const DEFAULT_MONITOR: &str = "/Common/icmp";

/// Declarative configuration of one node
///
/// Optional settings left unset are filled in by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Full object name, `/Partition/Name`
    pub name: String,

    /// Literal IP address or domain name
    pub address: String,

    /// Connections per second limit
    #[serde(default)]
    pub rate_limit: Option<String>,

    /// Maximum concurrent connections
    #[serde(default)]
    pub connection_limit: Option<i64>,

    /// Dynamic ratio weight
    #[serde(default)]
    pub dynamic_ratio: Option<i64>,

    /// Static ratio weight
    #[serde(default)]
    pub ratio: Option<i64>,

    /// Health monitor rule
    #[serde(default = "default_monitor")]
    pub monitor: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Operational state, e.g. `user-up` or `user-down`
    #[serde(default)]
    pub state: Option<String>,

    /// Session state, `user-enabled` or `user-disabled`
    #[serde(default)]
    pub session: Option<String>,

    /// FQDN settings, used when `address` is a domain name
    #[serde(default)]
    pub fqdn: Option<FqdnConfig>,
}

impl NodeConfig {
    /// Create a new node configuration
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            rate_limit: None,
            connection_limit: None,
            dynamic_ratio: None,
            ratio: None,
            monitor: default_monitor(),
            description: None,
            state: None,
            session: None,
            fqdn: None,
        }
    }

    /// Set the monitor rule
    pub fn with_monitor(mut self, monitor: impl Into<String>) -> Self {
        self.monitor = monitor.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the connection limit
    pub fn with_connection_limit(mut self, limit: i64) -> Self {
        self.connection_limit = Some(limit);
        self
    }

    /// Set the ratio
    pub fn with_ratio(mut self, ratio: i64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Set the session state
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Set the FQDN settings
    pub fn with_fqdn(mut self, fqdn: FqdnConfig) -> Self {
        self.fqdn = Some(fqdn);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.name.is_empty() {
            return Err(crate::Error::config("Node name cannot be empty"));
        }
        if let Some(message) = validate_f5_name(&Value::from(self.name.as_str()), "name")
            .into_iter()
            .next()
        {
            return Err(crate::Error::config(message));
        }
        if self.address.is_empty() {
            return Err(crate::Error::config(format!(
                "Node {} has no address",
                self.name
            )));
        }

        Ok(())
    }

    /// Render the configuration as an attribute map
    ///
    /// Unset optional settings are left out so they stay computed; the FQDN
    /// block becomes a one-item list.
    pub fn to_attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert("name".into(), json!(self.name));
        attrs.insert("address".into(), json!(self.address));
        attrs.insert("monitor".into(), json!(self.monitor));

        let optional = [
            ("rate_limit", self.rate_limit.as_ref().map(|v| json!(v))),
            ("connection_limit", self.connection_limit.map(|v| json!(v))),
            ("dynamic_ratio", self.dynamic_ratio.map(|v| json!(v))),
            ("ratio", self.ratio.map(|v| json!(v))),
            ("description", self.description.as_ref().map(|v| json!(v))),
            ("state", self.state.as_ref().map(|v| json!(v))),
            ("session", self.session.as_ref().map(|v| json!(v))),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                attrs.insert(key.into(), value);
            }
        }

        if let Some(fqdn) = &self.fqdn {
            attrs.insert("fqdn".into(), json!([fqdn.to_attributes()]));
        }

        attrs
    }
}

/// FQDN settings of a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FqdnConfig {
    /// `ipv4`, `ipv6` or `unspecified`
    #[serde(default)]
    pub address_family: Option<String>,

    /// Domain name
    #[serde(default)]
    pub name: Option<String>,

    /// Seconds between DNS queries
    #[serde(default)]
    pub interval: Option<String>,

    /// Resolution attempts before the node is marked down
    #[serde(default)]
    pub downinterval: Option<i64>,

    /// `enabled` or `disabled`
    #[serde(default)]
    pub autopopulate: Option<String>,
}

impl FqdnConfig {
    fn to_attributes(&self) -> Map<String, Value> {
        let entries = [
            ("address_family", self.address_family.as_ref().map(|v| json!(v))),
            ("name", self.name.as_ref().map(|v| json!(v))),
            ("interval", self.interval.as_ref().map(|v| json!(v))),
            ("downinterval", self.downinterval.map(|v| json!(v))),
            ("autopopulate", self.autopopulate.as_ref().map(|v| json!(v))),
        ];

        entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
            .collect()
    }
}

fn default_monitor() -> String {
    DEFAULT_MONITOR.to_string()
}

/// State store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateStoreConfig {
    /// File-based state store
    File {
        /// Path to the state file
        path: String,
    },

    /// In-memory state store (not persistent)
    #[default]
    Memory,
}

impl StateStoreConfig {
    /// Validate the state store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StateStoreConfig::File { path } if path.is_empty() => {
                Err(crate::Error::config("State file path cannot be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Get the store type name
    pub fn type_name(&self) -> &'static str {
        match self {
            StateStoreConfig::File { .. } => "file",
            StateStoreConfig::Memory => "memory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_applies_monitor_default() {
        let config: NodeConfig = serde_json::from_value(json!({
            "name": "/Common/web1",
            "address": "10.0.0.5"
        }))
        .unwrap();
        assert_eq!(config.monitor, DEFAULT_MONITOR);
        assert!(config.fqdn.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(NodeConfig::new("/Common/web1", "10.0.0.5").validate().is_ok());
        assert!(NodeConfig::new("", "10.0.0.5").validate().is_err());
        assert!(NodeConfig::new("web1", "10.0.0.5").validate().is_err());
        assert!(NodeConfig::new("/Common/web1", "").validate().is_err());
    }

    #[test]
    fn test_to_attributes_skips_unset_settings() {
        let attrs = NodeConfig::new("/Common/web1", "10.0.0.5")
            .with_ratio(2)
            .to_attributes();

        assert_eq!(attrs["ratio"], 2);
        assert_eq!(attrs["monitor"], DEFAULT_MONITOR);
        assert!(!attrs.contains_key("connection_limit"));
        assert!(!attrs.contains_key("fqdn"));
    }

    #[test]
    fn test_to_attributes_renders_fqdn_block() {
        let attrs = NodeConfig::new("/Common/web1", "web1.example.com")
            .with_fqdn(FqdnConfig {
                interval: Some("300".to_string()),
                downinterval: Some(3),
                ..FqdnConfig::default()
            })
            .to_attributes();

        assert_eq!(attrs["fqdn"], json!([{ "interval": "300", "downinterval": 3 }]));
    }

    #[test]
    fn test_state_store_config() {
        let config: StateStoreConfig =
            serde_json::from_value(json!({ "type": "file", "path": "/tmp/state.json" })).unwrap();
        assert_eq!(config.type_name(), "file");
        assert!(config.validate().is_ok());

        let empty = StateStoreConfig::File { path: String::new() };
        assert!(empty.validate().is_err());
        assert_eq!(StateStoreConfig::default(), StateStoreConfig::Memory);
    }
}
