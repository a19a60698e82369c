#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use evmetrics_agent::app_state::AppState;
use evmetrics_agent::config::{AgentConfig, Secret};
use evmetrics_agent::router;
use evmetrics_core::RoutingKey;

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn exposes_event_counter() {
    let mut cfg = AgentConfig::default();
    cfg.amqp.password = Some(Secret::new("guest"));
    let state = AppState::new(cfg).unwrap();

    let metrics = state.metrics();
    metrics.observe(&RoutingKey::new("employee", "employee", "create"));
    metrics.observe(&RoutingKey::new("employee", "employee", "create"));
    metrics.observe(&RoutingKey::new("org_unit", "org_unit", "terminate"));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router::build_router(state);
    tokio::spawn(async move { axum::serve(listener, app).await });

    let resp = get(addr, "/metrics").await;
    assert!(resp.starts_with("HTTP/1.1 200"), "{resp}");
    assert!(resp.to_lowercase().contains("content-type: text/plain; version=0.0.4"));
    assert!(resp.contains("# HELP amqp_events_total AMQP Events"));
    assert!(resp.contains(
        "amqp_events_total{service=\"employee\",object_type=\"employee\",action=\"create\"} 2"
    ));
    assert!(resp.contains(
        "amqp_events_total{service=\"org_unit\",object_type=\"org_unit\",action=\"terminate\"} 1"
    ));

    let missing = get(addr, "/nope").await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");
}
