// # LTM Node Resource
//
// Lifecycle adapter for BIG-IP LTM node objects.
//
// ## Behavior
//
// - Create looks up an existing object first and adopts it instead of
//   failing; the identity is the full object name
// - Literal addresses (IPv4, IPv6, optionally with a `%<n>` route domain)
//   are sent as `address`; anything else is a domain name and goes into the
//   FQDN block together with its polling settings
// - Read treats a missing object as an external deletion and clears the
//   identity instead of failing
// - Update sends only auxiliary settings; the address is immutable and only
//   repeated for literal nodes
// - Every remote failure is wrapped with the operation and the node name
//
// ## Constraints
//
// - One remote call per lifecycle step (plus the Read that follows
//   Create/Update); no retries, retry policy belongs to the `NodeStore`
// - No state between calls; everything lives in the `ResourceData` handle

use async_trait::async_trait;
use ltm_core::address;
use ltm_core::model::{Fqdn, Node, SessionState};
use ltm_core::schema::{Attribute, ResourceSchema, validate_f5_name};
use ltm_core::traits::{NodeLookup, NodeStore, Resource, ResourceData, lookup};
use ltm_core::{Error, Operation, Result};
use serde_json::json;
use std::sync::Arc;

/// Resource type name
pub const RESOURCE_TYPE: &str = "bigip_ltm_node";

/// Attribute schema of `bigip_ltm_node`
pub fn node_schema() -> ResourceSchema {
    let fqdn = ResourceSchema::new()
        .with_attribute(
            "address_family",
            Attribute::optional_string().describe(
                "Specifies the node's address family. The default is 'unspecified', or IP-agnostic",
            ),
        )
        .with_attribute(
            "name",
            Attribute::optional_string()
                .describe("Specifies the fully qualified domain name of the node."),
        )
        .with_attribute(
            "interval",
            Attribute::optional_string()
                .computed()
                .describe("Specifies the amount of time before sending the next DNS query."),
        )
        .with_attribute(
            "downinterval",
            Attribute::optional_int().computed().describe(
                "Specifies the number of attempts to resolve a domain name. The default is 5.",
            ),
        )
        .with_attribute(
            "autopopulate",
            Attribute::optional_string().computed().describe(
                "Specifies whether the node should scale to the IP address set returned by DNS.",
            ),
        );

    ResourceSchema::new()
        .with_attribute(
            "name",
            Attribute::required_string()
                .force_new()
                .validate_with(validate_f5_name)
                .describe("Name of the node"),
        )
        .with_attribute(
            "address",
            Attribute::required_string()
                .force_new()
                .describe("Address of the node"),
        )
        .with_attribute(
            "rate_limit",
            Attribute::optional_string().computed().describe(
                "Specifies the maximum number of connections per second allowed for a node or node address. The default value is 'disabled'.",
            ),
        )
        .with_attribute(
            "connection_limit",
            Attribute::optional_int().computed().describe(
                "Specifies the maximum number of connections allowed for the node or node address.",
            ),
        )
        .with_attribute(
            "dynamic_ratio",
            Attribute::optional_int().computed().describe(
                "Sets the dynamic ratio number for the node. Used for dynamic ratio load balancing. ",
            ),
        )
        .with_attribute(
            "ratio",
            Attribute::optional_int()
                .computed()
                .describe("Sets the ratio number for the node."),
        )
        .with_attribute(
            "monitor",
            Attribute::optional_string()
                .with_default("/Common/icmp")
                .describe(
                    "Specifies the name of the monitor or monitor rule that you want to associate with the node.",
                ),
        )
        .with_attribute(
            "description",
            Attribute::optional_string().describe("User defined description of the node."),
        )
        .with_attribute(
            "state",
            Attribute::optional_string()
                .computed()
                .describe("Marks the node up or down. The default value is user-up."),
        )
        .with_attribute(
            "session",
            Attribute::optional_string().computed().describe(
                "Enables or disables the node for new sessions. The default value is user-enabled.",
            ),
        )
        .with_attribute("fqdn", Attribute::optional_block(fqdn).max_items(1))
}

/// LTM node resource
///
/// Holds nothing but the shared handle to the device's node collection.
pub struct NodeResource {
    client: Arc<dyn NodeStore>,
    schema: ResourceSchema,
}

impl std::fmt::Debug for NodeResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeResource")
            .field("store", &self.client.store_name())
            .finish()
    }
}

impl NodeResource {
    /// Create a node resource backed by `client`
    pub fn new(client: Arc<dyn NodeStore>) -> Self {
        Self {
            client,
            schema: node_schema(),
        }
    }

    /// Check whether the node named by the identity exists
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The object exists
    /// - `Ok(false)`: The device reported no such object
    /// - `Err(Error)`: The lookup failed
    pub async fn exists(&self, data: &dyn ResourceData) -> Result<bool> {
        let name = data.id();
        tracing::info!("Fetching node {}", name);

        let outcome = lookup(self.client.as_ref(), name).await;
        if let NodeLookup::Failed(e) = outcome {
            tracing::error!("Unable to retrieve node {}: {}", name, e);
            return Err(Error::remote_call(Operation::Read, name, e));
        }

        let found = outcome.is_found();
        if !found {
            tracing::warn!("Node ({}) not found", name);
        }
        Ok(found)
    }
}

#[async_trait]
impl Resource for NodeResource {
    fn type_name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    async fn create(&self, data: &mut dyn ResourceData) -> Result<()> {
        let name = data.get_string("name");
        let address = data.get_string("address");
        tracing::info!("Creating node {}::{}", name, address);

        let node = build_node(&*data, &name, &address);
        tracing::debug!("Node to be added: {:?}", node);
        data.set_id(&name);

        let exists = match self.exists(&*data).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(
                    "Existence check for node {} failed, attempting to add it: {}",
                    name,
                    e
                );
                false
            }
        };

        if exists {
            tracing::info!("Node {} already exists, adopting it", name);
        } else if let Err(e) = self.client.add_node(&node).await {
            tracing::error!("Unable to add node {}: {}", name, e);
            data.clear_id();
            return Err(Error::remote_call(Operation::Create, &name, e));
        }

        self.read(data).await
    }

    async fn read(&self, data: &mut dyn ResourceData) -> Result<()> {
        let name = data.id().to_string();
        tracing::info!("Fetching node {}", name);

        let node = match lookup(self.client.as_ref(), &name).await {
            NodeLookup::Found(node) => node,
            NodeLookup::Absent => {
                tracing::warn!("Node ({}) not found, removing from state", name);
                data.clear_id();
                return Ok(());
            }
            NodeLookup::Failed(e) => {
                tracing::error!("Unable to retrieve node {}: {}", name, e);
                return Err(Error::remote_call(Operation::Read, &name, e));
            }
        };

        apply_remote(data, &name, &node)
    }

    async fn update(&self, data: &mut dyn ResourceData) -> Result<()> {
        let name = data.id().to_string();
        let address = data.get_string("address");

        let mut node = Node {
            connection_limit: data.get_int("connection_limit"),
            dynamic_ratio: data.get_int("dynamic_ratio"),
            monitor: data.get_string("monitor"),
            rate_limit: data.get_string("rate_limit"),
            state: data.get_string("state"),
            session: data.get_string("session"),
            description: data.get_string("description"),
            ratio: data.get_int("ratio"),
            ..Node::default()
        };
        if address::is_literal(&address) {
            node.address = address;
        }

        tracing::info!("Modifying node {}", name);
        tracing::debug!("Node modifications: {:?}", node);

        if let Err(e) = self.client.modify_node(&name, &node).await {
            tracing::error!("Unable to modify node {}: {}", name, e);
            return Err(Error::remote_call(Operation::Modify, &name, e));
        }

        self.read(data).await
    }

    async fn delete(&self, data: &mut dyn ResourceData) -> Result<()> {
        let name = data.id().to_string();
        tracing::info!("Deleting node {}", name);

        if let Err(e) = self.client.delete_node(&name).await {
            tracing::error!("Unable to delete node {}: {}", name, e);
            return Err(Error::remote_call(Operation::Delete, &name, e));
        }

        data.clear_id();
        Ok(())
    }
}

/// Build the record sent by Create
fn build_node(data: &dyn ResourceData, name: &str, address: &str) -> Node {
    let mut node = Node {
        name: name.to_string(),
        rate_limit: data.get_string("rate_limit"),
        connection_limit: data.get_int("connection_limit"),
        dynamic_ratio: data.get_int("dynamic_ratio"),
        monitor: data.get_string("monitor"),
        state: data.get_string("state"),
        session: data.get_string("session"),
        description: data.get_string("description"),
        ratio: data.get_int("ratio"),
        ..Node::default()
    };

    if address::is_literal(address) {
        node.address = address.to_string();
    } else {
        node.fqdn = Fqdn {
            name: address.to_string(),
            interval: data.get_string("fqdn.0.interval"),
            address_family: data.get_string("fqdn.0.address_family"),
            auto_populate: data.get_string("fqdn.0.autopopulate"),
            down_interval: data.get_int("fqdn.0.downinterval"),
        };
    }

    node
}

/// Copy the device's view of a node into `data`
fn apply_remote(data: &mut dyn ResourceData, name: &str, node: &Node) -> Result<()> {
    if node.fqdn.name.is_empty() {
        if let Some(ip) = address::strip_route_domain(&node.address) {
            match address::route_domain(&node.address) {
                Some(id) => tracing::info!("Address: {} (route domain {})", ip, id),
                None => tracing::info!("Address: {}", ip),
            }
        }
        data.set("address", json!(node.address))?;
    } else {
        data.set("address", json!(node.fqdn.name))?;
    }
    data.set("name", json!(name))?;
    data.set("rate_limit", json!(node.rate_limit))?;

    tracing::debug!("Node session is: {}", node.session);
    let session = SessionState::from_remote(&node.session);
    data.set("session", json!(session.as_str()))?;

    data.set("connection_limit", json!(node.connection_limit))?;
    data.set("description", json!(node.description))?;
    data.set("dynamic_ratio", json!(node.dynamic_ratio))?;
    data.set("monitor", json!(node.monitor.trim()))?;
    data.set("ratio", json!(node.ratio))?;
    data.set("fqdn.0.interval", json!(node.fqdn.interval))?;
    data.set("fqdn.0.downinterval", json!(node.fqdn.down_interval))?;
    data.set("fqdn.0.autopopulate", json!(node.fqdn.auto_populate))?;
    data.set("fqdn.0.address_family", json!(node.fqdn.address_family))?;

    Ok(())
}
