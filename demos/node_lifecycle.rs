//! Embedding example for ltm-core and ltm-resource-node
//!
//! Drives one node through its whole lifecycle the way a host runtime would:
//! configure, create, persist, restore, update, import and delete. The device
//! is the in-memory node store, so nothing outside the process is touched.
//!
//! ## Environment Variables
//!
//! - `LTM_LOG_LEVEL`: trace, debug, info, warn or error (default: info)
//! - `LTM_STATE_FILE`: persist state to this file instead of memory
//! - `LTM_ROUTE_DOMAIN`: route domain the simulated device appends

use anyhow::Context;
use ltm_core::traits::{Resource, ResourceData, StateStore};
use ltm_core::{
    FqdnConfig, MemoryNodeStore, NodeConfig, ResourceDataMap, StateStoreConfig,
    create_state_store,
};
use ltm_resource_node::{NodeResource, RESOURCE_TYPE, node_schema};
use std::env;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn log_level() -> Level {
    match env::var("LTM_LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn print_node(label: &str, data: &ResourceDataMap) {
    println!("[{}] id={:?}", label, data.id());
    for (key, value) in data.attributes() {
        println!("    {} = {}", key, value);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(log_level()).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    println!("=== Embedded LTM node lifecycle ===\n");

    let mut device = MemoryNodeStore::new();
    if let Ok(route_domain) = env::var("LTM_ROUTE_DOMAIN") {
        let id: u32 = route_domain
            .parse()
            .with_context(|| format!("LTM_ROUTE_DOMAIN '{}' is not a number", route_domain))?;
        device = device.with_route_domain(id);
    }

    let state_config = match env::var("LTM_STATE_FILE") {
        Ok(path) => StateStoreConfig::File { path },
        Err(_) => StateStoreConfig::Memory,
    };
    state_config.validate()?;
    let state = create_state_store(&state_config).await?;
    info!("Using {} state store", state_config.type_name());

    let resource = NodeResource::new(Arc::new(device.clone()));
    let literal_address = format!("{}.web1", RESOURCE_TYPE);
    let fqdn_address = format!("{}.api", RESOURCE_TYPE);

    // 1. literal node
    let web1 = NodeConfig::new("/Common/web1", "10.10.0.5")
        .with_ratio(2)
        .with_description("web tier");
    web1.validate()?;

    let mut data = ResourceDataMap::from_attributes(node_schema(), web1.to_attributes())?;
    resource.create(&mut data).await?;
    state.set_state(&literal_address, &data.to_state()).await?;
    print_node("created", &data);

    // 2. FQDN node, polling settings left to the device
    let api = NodeConfig::new("/Common/api", "api.example.com").with_fqdn(FqdnConfig {
        interval: Some("300".to_string()),
        ..FqdnConfig::default()
    });
    api.validate()?;

    let mut api_data = ResourceDataMap::from_attributes(node_schema(), api.to_attributes())?;
    resource.create(&mut api_data).await?;
    state.set_state(&fqdn_address, &api_data.to_state()).await?;
    print_node("created", &api_data);

    // 3. next run: restore from state and apply a changed configuration
    let snapshot = state
        .get_state(&literal_address)
        .await?
        .context("state for web1 was not persisted")?;
    let mut data = ResourceDataMap::from_state(node_schema(), &snapshot);
    resource.read(&mut data).await?;

    let changed = web1.clone().with_monitor("/Common/http").with_connection_limit(500);
    let replace = node_schema().force_new_changes(data.attributes(), &changed.to_attributes());
    if replace.is_empty() {
        data.merge_config(changed.to_attributes())?;
        resource.update(&mut data).await?;
        state.set_state(&literal_address, &data.to_state()).await?;
        print_node("updated", &data);
    } else {
        println!("web1 needs replacement, changed: {}", replace.join(", "));
    }

    // 4. adopt a node created outside this tool
    device
        .insert_raw(ltm_core::Node {
            name: "/Common/legacy".to_string(),
            address: "10.10.0.99".to_string(),
            session: "monitor-enabled".to_string(),
            monitor: "default".to_string(),
            ..ltm_core::Node::default()
        })
        .await;
    let mut legacy = ResourceDataMap::new(node_schema());
    resource.import("/Common/legacy", &mut legacy).await?;
    print_node("imported", &legacy);

    // 5. tear down
    for address in [&literal_address, &fqdn_address] {
        let Some(snapshot) = state.get_state(address).await? else {
            continue;
        };
        let mut data = ResourceDataMap::from_state(node_schema(), &snapshot);
        resource.delete(&mut data).await?;
        state.delete_state(address).await?;
        info!("Deleted {}", address);
    }
    state.flush().await?;

    println!("\nNodes left on the device: {}", device.len().await);
    println!("Resources left in state: {}", state.list_states().await?.len());
    println!("\n=== Lifecycle complete ===");

    Ok(())
}
