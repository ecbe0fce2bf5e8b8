// # Node Configuration Check
//
// Validates a JSON file of node configurations without touching a device.
//
// ## Usage
//
// ```bash
// LTM_NODE_FILE=nodes.json cargo run -p ltm-demos --bin node_config_check
// ```
//
// The file holds a list of node blocks:
//
// ```json
// [
//   { "name": "/Common/web1", "address": "10.0.0.5", "ratio": 2 },
//   { "name": "/Common/api", "address": "api.example.com",
//     "fqdn": { "interval": "300" } }
// ]
// ```
//
// For every node the tool reports schema problems, how the address will be
// sent (literal or FQDN) and any route domain it carries.
//
// ## Environment Variables
//
// Required:
// - `LTM_NODE_FILE`: path to the configuration file
//
// Optional:
// - `LTM_LOG_LEVEL`: trace, debug, info, warn or error (default: info)

use anyhow::Context;
use ltm_core::NodeConfig;
use ltm_core::address::{self, AddressKind};
use ltm_resource_node::node_schema;
use std::env;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let level = match env::var("LTM_LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let path = env::var("LTM_NODE_FILE").unwrap_or_else(|_| {
        tracing::error!("LTM_NODE_FILE environment variable is required");
        std::process::exit(1);
    });

    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    let nodes: Vec<NodeConfig> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path))?;

    tracing::info!("Checking {} node(s) from {}", nodes.len(), path);

    let schema = node_schema();
    let mut failures = 0;

    for node in &nodes {
        let checked = node
            .validate()
            .and_then(|_| schema.validate(&node.to_attributes()));
        if let Err(e) = checked {
            failures += 1;
            tracing::error!("{}: {}", node.name, e);
            continue;
        }

        match address::classify(&node.address) {
            AddressKind::Literal => {
                let ip = address::strip_route_domain(&node.address).unwrap_or(&node.address);
                match address::route_domain(&node.address) {
                    Some(id) => tracing::info!("{}: literal {} in route domain {}", node.name, ip, id),
                    None => tracing::info!("{}: literal {}", node.name, ip),
                }
                if node.fqdn.is_some() {
                    tracing::warn!("{}: fqdn settings are ignored for literal addresses", node.name);
                }
            }
            AddressKind::Fqdn => tracing::info!("{}: fqdn {}", node.name, node.address),
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} node(s) failed validation", failures, nodes.len());
    }

    tracing::info!("All nodes are valid");
    Ok(())
}
