use std::time::Duration;

use docqa_core::traits::TextGenerator;
use docqa_core::types::GenerationOptions;
use docqa_core::Error;
use docqa_llm::OllamaClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one HTTP response on a random local port and return its base URL.
async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0u8; 16 * 1024];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

/// A port nothing listens on: bind, remember, drop.
async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn returns_generated_text() {
    let url = one_shot_server("200 OK", r#"{"model":"llama3.2","response":"Port 80 was taken.","done":true}"#).await;
    let client = OllamaClient::new(&url, "llama3.2", Duration::from_secs(5)).expect("client");
    let text = client.generate("prompt", &GenerationOptions::default()).await.expect("generate");
    assert_eq!(text, "Port 80 was taken.");
}

#[tokio::test]
async fn unreachable_runtime_is_unavailable() {
    let client = OllamaClient::new(&closed_port_url().await, "llama3.2", Duration::from_secs(2)).expect("client");
    let err = client.generate("prompt", &GenerationOptions::default()).await.expect_err("no server");
    assert!(matches!(err, Error::GenerationUnavailable(_)), "{err}");
    assert!(!client.is_available().await);
}

#[tokio::test]
async fn http_errors_are_failures_not_outages() {
    let url = one_shot_server("404 Not Found", r#"{"error":"model 'nope' not found"}"#).await;
    let client = OllamaClient::new(&url, "nope", Duration::from_secs(5)).expect("client");
    let err = client.generate("prompt", &GenerationOptions::default()).await.expect_err("404");
    match err {
        Error::GenerationFailed(msg) => assert!(msg.contains("404"), "{msg}"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let url = one_shot_server("200 OK", r#"{"unexpected":true}"#).await;
    let client = OllamaClient::new(&url, "llama3.2", Duration::from_secs(5)).expect("client");
    let err = client.generate("prompt", &GenerationOptions::default()).await.expect_err("bad body");
    assert!(matches!(err, Error::GenerationFailed(_)));
}

#[tokio::test]
async fn availability_check_hits_tags() {
    let url = one_shot_server("200 OK", r#"{"models":[]}"#).await;
    let client = OllamaClient::new(&url, "llama3.2", Duration::from_secs(5)).expect("client");
    assert!(client.is_available().await);
}
