//! Contract Test: Read, Import and the Existence Check
//!
//! Constraints verified:
//! - A missing object clears the identity without touching attributes
//! - A failed lookup keeps identity and attributes and names the operation
//! - Remote session states collapse to `user-enabled` / `user-disabled`
//! - The monitor rule is trimmed, the name comes from the identity
//! - Import adopts an existing object by name

mod common;

use common::*;
use ltm_core::model::{Fqdn, Node};
use ltm_core::traits::{Resource, ResourceData};
use ltm_core::{Operation, ResourceDataMap};
use ltm_resource_node::node_schema;
use serde_json::json;

fn tracked(name: &str, address: &str) -> ResourceDataMap {
    let mut data = node_data(json!({ "name": name, "address": address, "ratio": 3 }));
    data.set_id(name);
    data
}

#[tokio::test]
async fn absent_node_clears_identity_only() {
    let store = MockNodeStore::new();
    let resource = resource(&store);
    let mut data = tracked("/Common/web1", "10.0.0.5");
    let before = data.attributes().clone();

    resource.read(&mut data).await.expect("absence is not an error");

    assert!(!data.has_id());
    assert_eq!(data.attributes(), &before, "no attribute may be written");
}

#[tokio::test]
async fn failed_lookup_keeps_identity() {
    let store = MockNodeStore::new().with_node(device_node("/Common/web1", "10.0.0.5"));
    store.fail_gets(1);
    let resource = resource(&store);
    let mut data = tracked("/Common/web1", "10.0.0.5");
    let before = data.attributes().clone();

    let err = resource.read(&mut data).await.unwrap_err();

    assert_eq!(err.operation(), Some(Operation::Read));
    assert!(err.to_string().starts_with("error retrieving node /Common/web1:"));
    assert_eq!(data.id(), "/Common/web1");
    assert_eq!(data.attributes(), &before);
}

#[tokio::test]
async fn session_states_collapse_to_two_values() {
    let cases = [
        ("user-enabled", "user-enabled"),
        ("monitor-enabled", "user-enabled"),
        ("user-disabled", "user-disabled"),
        ("forced-offline", "user-disabled"),
        ("", "user-disabled"),
    ];

    for (remote, expected) in cases {
        let mut node = device_node("/Common/web1", "10.0.0.5");
        node.session = remote.to_string();
        let store = MockNodeStore::new().with_node(node);
        let resource = resource(&store);
        let mut data = tracked("/Common/web1", "10.0.0.5");

        resource.read(&mut data).await.unwrap();
        assert_eq!(data.get_string("session"), expected, "remote session {:?}", remote);

        // reading again with an unchanged device gives the same value
        resource.read(&mut data).await.unwrap();
        assert_eq!(data.get_string("session"), expected);
    }
}

#[tokio::test]
async fn device_values_are_copied() {
    let node = Node {
        name: "/Common/web1".to_string(),
        address: "10.0.0.5%4".to_string(),
        connection_limit: 100,
        dynamic_ratio: 2,
        monitor: "/Common/http and /Common/icmp ".to_string(),
        rate_limit: "500".to_string(),
        ratio: 9,
        session: "user-enabled".to_string(),
        description: "web tier".to_string(),
        ..Node::default()
    };
    let store = MockNodeStore::new().with_node(node);
    let resource = resource(&store);
    let mut data = tracked("/Common/web1", "10.0.0.5");

    resource.read(&mut data).await.unwrap();

    assert_eq!(data.get_string("name"), "/Common/web1");
    assert_eq!(data.get_string("address"), "10.0.0.5%4", "raw device address is kept");
    assert_eq!(data.get_int("connection_limit"), 100);
    assert_eq!(data.get_int("dynamic_ratio"), 2);
    assert_eq!(data.get_string("monitor"), "/Common/http and /Common/icmp");
    assert_eq!(data.get_string("rate_limit"), "500");
    assert_eq!(data.get_int("ratio"), 9);
    assert_eq!(data.get_string("description"), "web tier");
}

#[tokio::test]
async fn fqdn_name_wins_over_address() {
    let node = Node {
        name: "/Common/web1".to_string(),
        address: "any6".to_string(),
        session: "user-enabled".to_string(),
        fqdn: Fqdn {
            name: "web1.example.com".to_string(),
            address_family: "ipv6".to_string(),
            interval: "60".to_string(),
            down_interval: 2,
            auto_populate: "enabled".to_string(),
        },
        ..Node::default()
    };
    let store = MockNodeStore::new().with_node(node);
    let resource = resource(&store);
    let mut data = tracked("/Common/web1", "web1.example.com");

    resource.read(&mut data).await.unwrap();

    assert_eq!(data.get_string("address"), "web1.example.com");
    assert_eq!(data.get_string("fqdn.0.address_family"), "ipv6");
    assert_eq!(data.get_string("fqdn.0.interval"), "60");
    assert_eq!(data.get_int("fqdn.0.downinterval"), 2);
    assert_eq!(data.get_string("fqdn.0.autopopulate"), "enabled");
}

#[tokio::test]
async fn import_adopts_existing_node() {
    let store = MockNodeStore::new().with_node(device_node("/Common/web1", "10.0.0.5"));
    let resource = resource(&store);
    let mut data = ResourceDataMap::new(node_schema());

    resource.import("/Common/web1", &mut data).await.unwrap();

    assert_eq!(data.id(), "/Common/web1");
    assert_eq!(data.get_string("name"), "/Common/web1");
    assert_eq!(data.get_string("address"), "10.0.0.5");
    assert_eq!(data.get_string("monitor"), "/Common/icmp");
}

#[tokio::test]
async fn import_of_missing_node_leaves_no_identity() {
    let store = MockNodeStore::new();
    let resource = resource(&store);
    let mut data = ResourceDataMap::new(node_schema());

    resource.import("/Common/missing", &mut data).await.unwrap();

    assert!(!data.has_id());
    assert!(data.attributes().is_empty());
}

#[tokio::test]
async fn existence_check_outcomes() {
    let store = MockNodeStore::new().with_node(device_node("/Common/web1", "10.0.0.5"));
    let resource = resource(&store);

    let present = tracked("/Common/web1", "10.0.0.5");
    assert!(resource.exists(&present).await.unwrap());

    let missing = tracked("/Common/web2", "10.0.0.6");
    assert!(!resource.exists(&missing).await.unwrap());

    store.fail_gets(1);
    let err = resource.exists(&present).await.unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Read));
}
