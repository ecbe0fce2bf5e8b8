//! Node address classification
//!
//! A node is addressed either by a literal network address or by a domain
//! name that the device resolves on its own (FQDN mode). The split is decided
//! by a fixed pattern which has to stay byte-compatible with existing
//! configurations, so it keeps its quirks:
//!
//! - the dotted-quad branch is anchored only on the left, so anything after
//!   a leading `a.b.c.d` is accepted (`10.0.0.5.extra` is literal)
//! - the colon branch needs a colon followed by a run of non-`%` characters
//!   up to the end, so an IPv6 address carrying a route domain suffix
//!   (`2001:db8::1%2`) is *not* literal
//!
//! Addresses read back from the device may carry a route domain suffix
//! (`10.0.0.5%2`). [`strip_route_domain`] removes it for logging; the raw
//! value is what gets persisted.

use regex::Regex;
use std::sync::LazyLock;

static LITERAL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:[0-9]{1,3}\.){3}[0-9]{1,3})|(.*:[^%]*)$")
        .expect("literal address pattern is valid")
});

static ROUTE_DOMAIN_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:(?:[0-9]{1,3}\.){3}[0-9]{1,3})|(?:.*:[^%]*))(?:%\d+)?")
        .expect("route domain pattern is valid")
});

static ROUTE_DOMAIN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(\d+)$").expect("route domain suffix pattern is valid"));

/// How a node is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Literal IPv4/IPv6 address
    Literal,
    /// Domain name resolved by the device
    Fqdn,
}

/// Classify a configured node address
pub fn classify(address: &str) -> AddressKind {
    if LITERAL_ADDRESS.is_match(address) {
        AddressKind::Literal
    } else {
        AddressKind::Fqdn
    }
}

/// Returns `true` if the address is treated as a literal network address
pub fn is_literal(address: &str) -> bool {
    classify(address) == AddressKind::Literal
}

/// Strip a trailing `%<n>` route domain from an address
///
/// Returns `None` when the value looks neither like a dotted quad nor like a
/// colon-separated address (e.g. `any6` on FQDN nodes).
pub fn strip_route_domain(address: &str) -> Option<&str> {
    ROUTE_DOMAIN_ADDRESS
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the numeric route domain id from an address, if any
pub fn route_domain(address: &str) -> Option<u32> {
    ROUTE_DOMAIN_SUFFIX
        .captures(address)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
