//! HTTP integration tests.
//!
//! Drives `TomcatManager<HttpTransport>` against the fake manager.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tomcat_glance::{ManagerError, TomcatManager};

use super::fake_tomcat::{closed_port, FakeTomcat, SilentServer};

const LIST_BODY: &str = "OK - Listed applications for virtual host [localhost]\n\
                         /manager:running:1:manager\n\
                         /:running:0:ROOT\n\
                         /app:stopped:0:app\n";

fn connect(manager: &mut TomcatManager, port: u16, alias: Option<&str>) -> usize {
    manager
        .connect(
            "127.0.0.1",
            port,
            "tomcat",
            "tomcat",
            Duration::from_secs(5),
            alias,
        )
        .unwrap()
}

#[tokio::test]
async fn test_list_sends_auth_and_content_type() {
    let server = FakeTomcat::spawn(&[("list", 200, LIST_BODY)]).await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, server.port(), None);

    let apps = manager.list().await.unwrap();

    let rows: Vec<_> = apps.iter().map(|a| a.fields()).collect();
    assert_eq!(
        rows,
        vec![
            ("/manager", "running", "1", "manager"),
            ("/", "running", "0", "ROOT"),
            ("/app", "stopped", "0", "app"),
        ]
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].target, "/manager/text/list");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Basic dG9tY2F0OnRvbWNhdA==")
    );
    assert_eq!(requests[0].content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_list_unauthorized_is_http_error() {
    let server = FakeTomcat::spawn(&[("list", 401, "Unauthorized\n")]).await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, server.port(), None);

    let err = manager.list().await.unwrap_err();
    assert!(matches!(err, ManagerError::Http { status: Some(401), .. }));
}

#[tokio::test]
async fn test_application_status() {
    let server = FakeTomcat::spawn(&[("list", 200, LIST_BODY)]).await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, server.port(), None);

    assert_eq!(manager.application_status("/app").await.unwrap(), "stopped");
    assert!(matches!(
        manager.application_status("/missing").await,
        Err(ManagerError::ApplicationNotFound(_))
    ));
}

#[tokio::test]
async fn test_server_info() {
    let body = "OK - Server info\n\
                Tomcat Version: Apache Tomcat/9.0.85\n\
                OS Name: Linux\n\
                JVM Vendor: Eclipse Adoptium\n";
    let server = FakeTomcat::spawn(&[("serverinfo", 200, body)]).await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, server.port(), None);

    let info = manager.server_info().await.unwrap();

    assert_eq!(info.len(), 3);
    assert_eq!(info["Tomcat Version"], "Apache Tomcat/9.0.85");
    assert_eq!(info["JVM Vendor"], "Eclipse Adoptium");
}

#[tokio::test]
async fn test_start_stop_reload_success() {
    let server = FakeTomcat::spawn(&[
        ("start", 200, "OK - Started application at context path /app\n"),
        ("stop", 200, "OK - Stopped application at context path /app\n"),
        ("reload", 200, "OK - Reloaded application at context path /app\n"),
    ])
    .await
    .unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, server.port(), None);

    manager.start("/app").await.unwrap();
    manager.stop("/app").await.unwrap();
    manager.reload("/app").await.unwrap();

    let targets: Vec<_> = server.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(
        targets,
        vec![
            "/manager/text/start?path=%2Fapp",
            "/manager/text/stop?path=%2Fapp",
            "/manager/text/reload?path=%2Fapp",
        ]
    );
}

#[tokio::test]
async fn test_start_failure_body_is_reported() {
    let body = "FAIL - No context exists named [/app]\n";
    let server = FakeTomcat::spawn(&[("start", 200, body)]).await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, server.port(), None);

    match manager.start("/app").await.unwrap_err() {
        ManagerError::CommandFailed { command, body: got } => {
            assert_eq!(command, "start");
            assert_eq!(got, body);
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_commands_use_switched_connection() {
    let first = FakeTomcat::spawn(&[("serverinfo", 200, "OK\nOS Name: Linux\n\n")])
        .await
        .unwrap();
    let second = FakeTomcat::spawn(&[("serverinfo", 200, "OK\nOS Name: Windows\n\n")])
        .await
        .unwrap();
    let mut manager = TomcatManager::new().unwrap();
    assert_eq!(connect(&mut manager, first.port(), Some("tmc1")), 1);
    assert_eq!(connect(&mut manager, second.port(), Some("tmc2")), 2);

    assert_eq!(manager.switch("tmc1").unwrap(), 2);
    assert_eq!(manager.server_info().await.unwrap()["OS Name"], "Linux");
    assert_eq!(manager.switch(2usize).unwrap(), 1);
    assert_eq!(manager.server_info().await.unwrap()["OS Name"], "Windows");

    assert_eq!(first.requests().len(), 1);
    assert_eq!(second.requests().len(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let port = closed_port().await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, port, None);

    let err = manager.server_info().await.unwrap_err();
    assert!(matches!(err, ManagerError::Http { status: None, .. }));
}

#[tokio::test]
async fn test_descriptor_timeout_bounds_request() {
    let server = SilentServer::spawn().await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    manager
        .connect(
            "127.0.0.1",
            server.port(),
            "tomcat",
            "tomcat",
            Duration::from_secs(1),
            None,
        )
        .unwrap();

    let err = manager.list().await.unwrap_err();
    assert!(matches!(err, ManagerError::Http { status: None, .. }));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_disconnect_stops_commands() {
    let server = FakeTomcat::spawn(&[("list", 200, LIST_BODY)]).await.unwrap();
    let mut manager = TomcatManager::new().unwrap();
    connect(&mut manager, server.port(), None);

    let closed = manager.disconnect().unwrap();
    assert_eq!(closed.port(), server.port());
    assert!(matches!(
        manager.list().await,
        Err(ManagerError::NoActiveConnection)
    ));
    assert!(server.requests().is_empty());
}
