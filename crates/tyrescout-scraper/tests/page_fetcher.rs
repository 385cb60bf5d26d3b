//! Integration tests for `HttpPageFetcher` using wiremock HTTP mocks.

use tyrescout_scraper::{FetchError, HttpPageFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpPageFetcher {
    HttpPageFetcher::new(5, "tyrescout-test/0.1").expect("fetcher construction")
}

#[tokio::test]
async fn fetch_text_returns_visible_text() {
    let server = MockServer::start().await;

    let html = r"<html><head><title>Agri Wheel</title><script>track();</script></head>
        <body><h1>Agri Wheel Paarl</h1>
        <p>Tractor tyre repair costs start from R350. We fix punctures and sidewall cuts.</p>
        </body></html>";

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "tyrescout-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let text = fetcher()
        .fetch_text(&format!("{}/", server.uri()))
        .await
        .expect("page should fetch");

    assert!(text.contains("Agri Wheel Paarl"));
    assert!(text.contains("start from R350."));
    assert!(!text.contains("track()"));
}

#[tokio::test]
async fn non_success_status_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher()
        .fetch_text(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FetchError::UnexpectedStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn fetch_html_returns_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>About us</p>"))
        .mount(&server)
        .await;

    let body = fetcher()
        .fetch_html(&format!("{}/about", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<p>About us</p>");
}

#[tokio::test]
async fn invalid_url_is_rejected_before_request() {
    let err = fetcher().fetch_text("not a url").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}
