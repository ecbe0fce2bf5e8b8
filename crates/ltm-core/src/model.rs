//! Node records as exchanged with the device
//!
//! Field names follow the device's REST representation. Empty strings and
//! zero counters are left out when a record is serialized, so a modify
//! payload only carries what the caller actually set.

use serde::{Deserialize, Serialize};

/// Persisted session value for nodes accepting new connections
pub const SESSION_USER_ENABLED: &str = "user-enabled";

/// Persisted session value for every other remote session state
pub const SESSION_USER_DISABLED: &str = "user-disabled";

/// An LTM node object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Full object name, e.g. `/Common/web1`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Literal address, possibly carrying a `%<n>` route domain
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,

    /// Maximum concurrent connections (0 = unlimited)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub connection_limit: i64,

    /// Dynamic ratio weight
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dynamic_ratio: i64,

    /// Health monitor rule
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub monitor: String,

    /// Connections per second limit, or `disabled`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rate_limit: String,

    /// Static ratio weight
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ratio: i64,

    /// Session state, e.g. `user-enabled` or `monitor-enabled`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session: String,

    /// Operational state, e.g. `user-up`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// FQDN settings; empty for literal nodes
    #[serde(default, skip_serializing_if = "Fqdn::is_empty")]
    pub fqdn: Fqdn,
}

/// FQDN settings of a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fqdn {
    /// `ipv4`, `ipv6` or `unspecified`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address_family: String,

    /// Domain name the device resolves
    #[serde(rename = "tmName", default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Seconds between DNS queries
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interval: String,

    /// Resolution attempts before the node is marked down
    #[serde(default, skip_serializing_if = "is_zero")]
    pub down_interval: i64,

    /// `enabled` to scale the node to every resolved address
    #[serde(rename = "autopopulate", default, skip_serializing_if = "String::is_empty")]
    pub auto_populate: String,
}

impl Fqdn {
    /// Returns `true` if no FQDN setting is present
    pub fn is_empty(&self) -> bool {
        self.address_family.is_empty()
            && self.name.is_empty()
            && self.interval.is_empty()
            && self.down_interval == 0
            && self.auto_populate.is_empty()
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Session state as persisted
///
/// The device distinguishes more session states than a configuration can
/// express; they collapse into enabled/disabled on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// New connections are load balanced to the node
    UserEnabled,
    /// New connections are not load balanced to the node
    UserDisabled,
}

impl SessionState {
    /// Collapse a remote session value
    ///
    /// `monitor-enabled` and `user-enabled` map to [`SessionState::UserEnabled`],
    /// anything else to [`SessionState::UserDisabled`].
    pub fn from_remote(session: &str) -> Self {
        match session {
            "monitor-enabled" | SESSION_USER_ENABLED => SessionState::UserEnabled,
            _ => SessionState::UserDisabled,
        }
    }

    /// The persisted string form
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::UserEnabled => SESSION_USER_ENABLED,
            SessionState::UserDisabled => SESSION_USER_DISABLED,
        }
    }
}
