//! Contract Test: Create
//!
//! Constraints verified:
//! - Literal addresses go into `address`, domain names into the FQDN block
//! - An existing object is adopted without calling add
//! - A failed add clears the identity and names the operation
//! - A failed existence check does not block the add
//! - Create always finishes with a Read of the device view

mod common;

use common::*;
use ltm_core::traits::{Resource, ResourceData};
use ltm_core::{MemoryNodeStore, Operation};
use ltm_resource_node::NodeResource;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn literal_address_is_sent_as_address() {
    let store = MockNodeStore::new();
    let resource = resource(&store);
    let mut data = node_data(json!({
        "name": "/Common/web1",
        "address": "10.0.0.5",
        "ratio": 2,
        "fqdn": [{ "interval": "300" }]
    }));

    resource.create(&mut data).await.expect("create succeeds");

    let added = store.added();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].name, "/Common/web1");
    assert_eq!(added[0].address, "10.0.0.5");
    assert_eq!(added[0].monitor, "/Common/icmp");
    assert_eq!(added[0].ratio, 2);
    assert!(added[0].fqdn.is_empty(), "literal nodes must not carry FQDN settings");

    assert_eq!(data.id(), "/Common/web1");
    assert_eq!(data.get_string("address"), "10.0.0.5");
}

#[tokio::test]
async fn domain_name_is_sent_as_fqdn() {
    let store = MockNodeStore::new();
    let resource = resource(&store);
    let mut data = node_data(json!({
        "name": "/Common/web1",
        "address": "web1.example.com",
        "fqdn": [{
            "interval": "300",
            "downinterval": 3,
            "autopopulate": "enabled",
            "address_family": "ipv4"
        }]
    }));

    resource.create(&mut data).await.expect("create succeeds");

    let added = store.added();
    assert_eq!(added.len(), 1);
    assert!(added[0].address.is_empty());
    assert_eq!(added[0].fqdn.name, "web1.example.com");
    assert_eq!(added[0].fqdn.interval, "300");
    assert_eq!(added[0].fqdn.down_interval, 3);
    assert_eq!(added[0].fqdn.auto_populate, "enabled");
    assert_eq!(added[0].fqdn.address_family, "ipv4");

    assert_eq!(data.get_string("address"), "web1.example.com");
    assert_eq!(data.get_string("fqdn.0.interval"), "300");
}

#[tokio::test]
async fn existing_node_is_adopted_without_add() {
    let mut existing = device_node("/Common/web1", "10.0.0.5");
    existing.ratio = 7;
    let store = MockNodeStore::new().with_node(existing);
    let resource = resource(&store);
    let mut data = node_data(json!({ "name": "/Common/web1", "address": "10.0.0.5" }));

    resource.create(&mut data).await.expect("create succeeds");

    assert_eq!(store.add_call_count(), 0, "add must be skipped for an existing node");
    assert_eq!(data.id(), "/Common/web1");
    assert_eq!(data.get_int("ratio"), 7, "state reflects the device, not the config");
}

#[tokio::test]
async fn failed_add_clears_identity() {
    let store = MockNodeStore::new();
    store.fail_add();
    let resource = resource(&store);
    let mut data = node_data(json!({ "name": "/Common/web1", "address": "10.0.0.5" }));

    let err = resource.create(&mut data).await.unwrap_err();

    assert_eq!(err.operation(), Some(Operation::Create));
    assert!(
        err.to_string().starts_with("error creating node /Common/web1:"),
        "unexpected message: {}",
        err
    );
    assert!(!data.has_id());
    assert_eq!(store.get_call_count(), 1, "no read after a failed add");
}

#[tokio::test]
async fn failed_existence_check_still_adds() {
    let store = MockNodeStore::new();
    store.fail_gets(1);
    let resource = resource(&store);
    let mut data = node_data(json!({ "name": "/Common/web1", "address": "10.0.0.5" }));

    resource.create(&mut data).await.expect("create succeeds");

    assert_eq!(store.add_call_count(), 1);
    assert_eq!(store.get_call_count(), 2, "existence check plus read-back");
    assert_eq!(data.id(), "/Common/web1");
}

#[tokio::test]
async fn read_back_failure_surfaces_as_retrieve_error() {
    let store = MockNodeStore::new();
    store.fail_gets(2);
    let resource = resource(&store);
    let mut data = node_data(json!({ "name": "/Common/web1", "address": "10.0.0.5" }));

    let err = resource.create(&mut data).await.unwrap_err();

    assert_eq!(err.operation(), Some(Operation::Read));
    assert_eq!(store.add_call_count(), 1);
    assert_eq!(data.id(), "/Common/web1", "the object was created, keep its identity");
}

#[tokio::test]
async fn route_domain_suffix_survives_round_trip() {
    let store = MemoryNodeStore::new().with_route_domain(2);
    let resource = NodeResource::new(Arc::new(store));

    let mut v4 = node_data(json!({ "name": "/Common/v4", "address": "10.0.0.5" }));
    resource.create(&mut v4).await.expect("create succeeds");
    assert_eq!(v4.get_string("address"), "10.0.0.5%2");
    assert_eq!(v4.get_string("monitor"), "/Common/icmp");
    assert_eq!(v4.get_string("session"), "user-enabled");
    assert_eq!(v4.get_string("rate_limit"), "disabled");

    let mut v6 = node_data(json!({ "name": "/Common/v6", "address": "2001:db8::1" }));
    resource.create(&mut v6).await.expect("create succeeds");
    assert_eq!(v6.get_string("address"), "2001:db8::1%2");
}

#[tokio::test]
async fn fqdn_defaults_come_from_the_device() {
    let resource = NodeResource::new(Arc::new(MemoryNodeStore::new()));
    let mut data = node_data(json!({ "name": "/Common/web1", "address": "web1.example.com" }));

    resource.create(&mut data).await.expect("create succeeds");

    assert_eq!(data.get_string("address"), "web1.example.com");
    assert_eq!(data.get_string("fqdn.0.interval"), "3600");
    assert_eq!(data.get_int("fqdn.0.downinterval"), 5);
    assert_eq!(data.get_string("fqdn.0.autopopulate"), "disabled");
    assert_eq!(data.get_string("fqdn.0.address_family"), "ipv4");
}
