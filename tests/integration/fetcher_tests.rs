use sitemap_sweep::config::Config;
use sitemap_sweep::crawler::{Fetch, HttpFetcher};
use sitemap_sweep::FetchError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_with(pool: &[&str], timeout_secs: u64) -> Config {
    let mut config = Config::default();
    config.user_agent.pool = pool.iter().map(|ua| ua.to_string()).collect();
    config.user_agent.seed = Some(7);
    config.crawler.request_timeout_secs = timeout_secs;
    config
}

#[tokio::test]
async fn test_fetch_sends_pool_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "SweepTestAgent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&config_with(&["SweepTestAgent/1.0"], 10))
        .expect("Failed to build fetcher");

    let page = fetcher
        .fetch(&format!("{}/page", mock_server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(page.status_code, 200);
    assert_eq!(page.body, "hello");
    assert!(page.url.ends_with("/page"));
}

#[tokio::test]
async fn test_fetch_returns_error_status_as_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410).set_body_string("gone"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build fetcher");
    let page = fetcher
        .fetch(&format!("{}/gone", mock_server.uri()))
        .await
        .expect("Non-2xx should not be a transport error");

    assert_eq!(page.status_code, 410);
    assert!(!page.is_success());
}

#[tokio::test]
async fn test_fetch_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&config_with(&["Agent/1.0"], 1))
        .expect("Failed to build fetcher");
    let url = format!("{}/slow", mock_server.uri());
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }), "got {:?}", err);
    assert_eq!(err.url(), url);
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build fetcher");
    let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();

    assert!(
        matches!(err, FetchError::Connect { .. } | FetchError::Http { .. }),
        "got {:?}",
        err
    );
}
