//! Backends against a one-shot local HTTP server.
//!
//! Each test binds an ephemeral port, serves a single canned response, and
//! hands the raw request back for assertions.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use vigil_classifier::{ClassifierClient, ClassifierError, UnavailableReason};
use vigil_config::ClassifierConfig;
use vigil_core::AspectDefinition;

struct Canned {
    status: &'static str,
    headers: &'static [(&'static str, &'static str)],
    body: &'static str,
    /// Hold the connection open without answering.
    stall: bool,
}

impl Canned {
    const fn ok(body: &'static str) -> Self {
        Self {
            status: "200 OK",
            headers: &[],
            body,
            stall: false,
        }
    }
}

/// Serve one request; returns the endpoint URL and the captured raw request.
async fn serve_once(canned: Canned) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let _ = tx.send(request);

        if canned.stall {
            tokio::time::sleep(Duration::from_secs(30)).await;
            return;
        }

        let mut response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
            canned.status,
            canned.body.len()
        );
        for (name, value) in canned.headers {
            response.push_str(&format!("{name}: {value}\r\n"));
        }
        response.push_str("\r\n");
        response.push_str(canned.body);
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    (format!("http://{addr}/models/zero-shot"), rx)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn sentiment() -> AspectDefinition {
    AspectDefinition::new("sentiment", "Sentiment", &["positive", "neutral", "negative"], true)
        .unwrap()
}

fn request_body(raw: &str) -> serde_json::Value {
    let (_, body) = raw.split_once("\r\n\r\n").expect("request has a body");
    serde_json::from_str(body).expect("request body is JSON")
}

#[tokio::test]
async fn hosted_backend_round_trip() {
    let (endpoint, request) = serve_once(Canned::ok(
        r#"{"sequence":"x","labels":["negative","neutral","positive"],"scores":[0.81,0.15,0.04]}"#,
    ))
    .await;

    let client = ClassifierClient::from_config(&ClassifierConfig {
        endpoint,
        api_token: "hf_test".into(),
        ..Default::default()
    });
    let result = client
        .classify("A man grabbed my bag and ran away near the market", &sentiment())
        .await
        .unwrap();

    assert_eq!(result.top_label, "negative");
    assert_eq!(result.scores.len(), 3);

    let raw = request.await.unwrap();
    assert!(raw.starts_with("POST /models/zero-shot"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer hf_test"));
    assert_eq!(
        request_body(&raw),
        serde_json::json!({
            "inputs": "A man grabbed my bag and ran away near the market",
            "parameters": { "candidate_labels": ["positive", "neutral", "negative"] }
        })
    );
}

#[tokio::test]
async fn local_backend_round_trip() {
    let (endpoint, request) = serve_once(Canned::ok(
        r#"{"sentiment_scores":[{"label":"positive","score":0.1},{"label":"neutral","score":0.2},{"label":"negative","score":0.7}]}"#,
    ))
    .await;

    let client = ClassifierClient::from_config(&ClassifierConfig {
        backend: "local".into(),
        endpoint,
        ..Default::default()
    });
    let result = client.classify("someone hit me", &sentiment()).await.unwrap();

    assert_eq!(result.top_label, "negative");
    let labels: Vec<&str> = result.scores.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["negative", "neutral", "positive"]);

    let raw = request.await.unwrap();
    assert!(!raw.to_ascii_lowercase().contains("authorization:"));
    assert_eq!(request_body(&raw)["text"], "someone hit me");
}

#[tokio::test]
async fn rate_limit_is_unavailable_with_retry_after() {
    let (endpoint, _request) = serve_once(Canned {
        status: "429 Too Many Requests",
        headers: &[("retry-after", "7")],
        body: r#"{"error":"rate limited"}"#,
        stall: false,
    })
    .await;

    let client = ClassifierClient::from_config(&ClassifierConfig {
        endpoint,
        api_token: "hf_test".into(),
        ..Default::default()
    });
    let err = client.classify("text", &sentiment()).await.unwrap_err();

    assert!(matches!(
        err,
        ClassifierError::Unavailable {
            reason: UnavailableReason::RateLimited {
                retry_after_secs: 7
            },
            ..
        }
    ));
}

#[tokio::test]
async fn mismatched_arrays_are_unavailable() {
    let (endpoint, _request) = serve_once(Canned::ok(
        r#"{"labels":["negative","neutral","positive"],"scores":[0.81,0.15]}"#,
    ))
    .await;

    let client = ClassifierClient::from_config(&ClassifierConfig {
        endpoint,
        api_token: "hf_test".into(),
        ..Default::default()
    });
    let err = client.classify("text", &sentiment()).await.unwrap_err();
    assert!(matches!(
        err,
        ClassifierError::Unavailable {
            reason: UnavailableReason::Malformed(_),
            ..
        }
    ));
}

#[tokio::test]
async fn stalled_service_times_out() {
    let (endpoint, _request) = serve_once(Canned {
        status: "200 OK",
        headers: &[],
        body: "",
        stall: true,
    })
    .await;

    let client = ClassifierClient::from_config(&ClassifierConfig {
        endpoint,
        api_token: "hf_test".into(),
        timeout_secs: 1,
        ..Default::default()
    });
    let err = client.classify("text", &sentiment()).await.unwrap_err();

    // Either the client-side deadline or reqwest's own timeout fires first.
    assert!(
        matches!(
            &err,
            ClassifierError::Unavailable {
                reason: UnavailableReason::Timeout(_) | UnavailableReason::Http(_),
                ..
            }
        ),
        "got {err:?}"
    );
}

#[tokio::test]
#[ignore] // requires network and VIGIL_CLASSIFIER__API_TOKEN
async fn live_hosted_classification() {
    let token = std::env::var("VIGIL_CLASSIFIER__API_TOKEN").unwrap_or_default();
    let client = ClassifierClient::from_config(&ClassifierConfig {
        api_token: token,
        timeout_secs: 30,
        ..Default::default()
    });
    let result = client
        .classify("A man grabbed my bag and ran away near the market", &sentiment())
        .await;
    println!("{result:#?}");
}
