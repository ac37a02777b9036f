use std::time::Duration;

use bytes::Bytes;
use pretty_assertions::assert_eq;
use sumclip_engine::{BodyKind, FailureKind, FetchSettings, FetchedBody, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn fetcher_returns_summary_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summary/simple"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("요약문", "text/plain; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher_for(&server)
        .fetch(1, "/summary/simple", BodyKind::Text)
        .await
        .expect("fetch ok");
    assert_eq!(body, FetchedBody::Text("요약문".to_string()));
}

#[tokio::test]
async fn fetcher_returns_image_bytes() {
    let server = MockServer::start().await;
    let png: &[u8] = b"\x89PNG\r\n\x1a\nfake";
    Mock::given(method("GET"))
        .and(path("/more/wordcloud"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png, "image/png"))
        .mount(&server)
        .await;

    let body = fetcher_for(&server)
        .fetch(2, "/more/wordcloud", BodyKind::Binary)
        .await
        .expect("fetch ok");
    assert_eq!(body, FetchedBody::Binary(Bytes::from_static(png)));
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summary/core"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch(3, "/summary/core", BodyKind::Text)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/more/tree"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(&b"tree"[..], "image/png"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    })
    .unwrap();

    let err = fetcher
        .fetch(4, "/more/tree", BodyKind::Binary)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/more/bar"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(&b"01234567890"[..], "image/png"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..FetchSettings::default()
    })
    .unwrap();

    let err = fetcher
        .fetch(5, "/more/bar", BodyKind::Binary)
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_reports_decode_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summary/point"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(&[0x66u8, 0xFF, 0xFE][..], "text/plain"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/more/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    let err = fetcher
        .fetch(6, "/summary/point", BodyKind::Text)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);

    let err = fetcher
        .fetch(7, "/more/sentiment", BodyKind::Binary)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn fetcher_reports_unreachable_backend_as_network_error() {
    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(500),
        ..FetchSettings::default()
    })
    .unwrap();

    let err = fetcher
        .fetch(8, "/summary/simple", BodyKind::Text)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
