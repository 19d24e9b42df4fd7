//! Registry behaviour through the public manager API.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tomcat_glance::{ConnectionDescriptor, ManagerError, MockTransport, TomcatManager};

fn descriptor(host: &str) -> ConnectionDescriptor {
    ConnectionDescriptor::new(host, 8080, "tomcat", "tomcat", Duration::from_secs(15))
}

fn manager() -> TomcatManager<MockTransport> {
    TomcatManager::with_transport(MockTransport::new())
}

#[test]
fn test_indices_increase_until_close_all() {
    let mut manager = manager();
    let mut indices = Vec::new();
    for (i, host) in ["a", "b", "c", "d"].iter().enumerate() {
        indices.push(manager.connect_with(descriptor(host), None).unwrap());
        if i == 1 {
            manager.disconnect();
        }
    }
    assert_eq!(indices, vec![1, 2, 3, 4]);

    manager.close_all();
    assert!(matches!(
        manager.current(),
        Err(ManagerError::NoActiveConnection)
    ));
    assert_eq!(manager.connect_with(descriptor("e"), None).unwrap(), 1);
}

#[test]
fn test_switch_alias_and_index_agree() {
    let mut manager = manager();
    manager.connect_with(descriptor("alpha"), Some("a")).unwrap();
    let beta = manager.connect_with(descriptor("beta"), Some("b")).unwrap();
    manager.connect_with(descriptor("gamma"), None).unwrap();

    manager.switch("b").unwrap();
    let via_alias = manager.current().unwrap().clone();
    manager.switch(1usize).unwrap();
    manager.switch(beta).unwrap();
    let via_index = manager.current().unwrap().clone();

    assert_eq!(via_alias, via_index);
    assert_eq!(via_alias.host(), "beta");
}

#[test]
fn test_switch_back_to_previous_round_trips() {
    let mut manager = manager();
    manager.connect_with(descriptor("alpha"), Some("a")).unwrap();
    manager.connect_with(descriptor("beta"), Some("b")).unwrap();
    manager.connect_with(descriptor("gamma"), Some("c")).unwrap();

    let before = manager.current().unwrap().host().to_string();
    let previous = manager.switch("a").unwrap();
    manager.switch(previous).unwrap();

    assert_eq!(manager.current().unwrap().host(), before);
}

#[test]
fn test_switch_to_closed_connection_fails() {
    let mut manager = manager();
    manager.connect_with(descriptor("alpha"), Some("a")).unwrap();
    manager.connect_with(descriptor("beta"), Some("b")).unwrap();
    manager.switch("a").unwrap();
    manager.disconnect();

    for target in ["a", "1", "0", "99", "ghost"] {
        assert!(
            matches!(manager.switch(target), Err(ManagerError::ConnectionNotFound(_))),
            "switch({target}) should fail"
        );
    }
    assert_eq!(manager.registry().current_index(), 0);
    assert_eq!(manager.switch("b").unwrap(), 0);
}

#[test]
fn test_duplicate_alias_rejected_without_side_effects() {
    let mut manager = manager();
    manager.connect_with(descriptor("alpha"), Some("prod")).unwrap();
    manager.connect_with(descriptor("beta"), None).unwrap();

    let err = manager
        .connect_with(descriptor("gamma"), Some("prod"))
        .unwrap_err();

    assert!(matches!(err, ManagerError::AliasInUse(_)));
    assert_eq!(manager.registry().len(), 2);
    assert_eq!(manager.current().unwrap().host(), "beta");
    assert_eq!(manager.registry().get("prod").unwrap().host(), "alpha");
}

#[tokio::test]
async fn test_application_status_missing_through_manager() {
    let mut manager = manager();
    manager.connect_with(descriptor("alpha"), None).unwrap();
    manager
        .client()
        .transport()
        .push_ok("OK\n/app:running:2:app\n/root:stopped:0:ROOT\n\n");

    let err = manager.application_status("/missing").await.unwrap_err();
    assert!(matches!(err, ManagerError::ApplicationNotFound(ref path) if path == "/missing"));
}

#[test]
fn test_registry_listing_after_mixed_operations() {
    let mut manager = manager();
    manager.connect_with(descriptor("alpha"), Some("a")).unwrap();
    manager.connect_with(descriptor("beta"), None).unwrap();
    manager.connect_with(descriptor("gamma"), Some("c")).unwrap();
    manager.switch(2usize).unwrap();
    manager.disconnect();

    let listed: Vec<_> = manager
        .registry()
        .iter()
        .map(|(index, alias, desc)| (index, alias.map(str::to_string), desc.host().to_string()))
        .collect();

    assert_eq!(
        listed,
        vec![
            (1, Some("a".to_string()), "alpha".to_string()),
            (3, Some("c".to_string()), "gamma".to_string()),
        ]
    );
}
