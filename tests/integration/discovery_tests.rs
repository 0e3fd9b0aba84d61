use sitemap_sweep::config::Config;
use sitemap_sweep::crawler::Coordinator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_discover_from_robots_txt() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "User-agent: *\nDisallow: /admin\nSitemap: /foo.xml\nSitemap: https://other.test/bar.xml\n",
        ))
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(&Config::default()).expect("Failed to create coordinator");
    let roots = coordinator.discover(&base_url).await;

    assert_eq!(
        roots,
        vec![
            format!("{}/foo.xml", base_url),
            "https://other.test/bar.xml".to_string()
        ]
    );
}

#[tokio::test]
async fn test_discover_well_known_paths_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for probe in ["/sitemap.xml", "/sitemap1.xml"] {
        Mock::given(method("GET"))
            .and(path(probe))
            .respond_with(ResponseTemplate::new(200).set_body_string("<urlset></urlset>"))
            .mount(&mock_server)
            .await;
    }

    // sitemap_index.xml and robots.txt fall through to wiremock's 404
    let coordinator = Coordinator::new(&Config::default()).expect("Failed to create coordinator");
    let roots = coordinator.discover(&base_url).await;

    assert_eq!(
        roots,
        vec![
            format!("{}/sitemap.xml", base_url),
            format!("{}/sitemap1.xml", base_url)
        ]
    );
}

#[tokio::test]
async fn test_discover_nothing() {
    let mock_server = MockServer::start().await;

    let coordinator = Coordinator::new(&Config::default()).expect("Failed to create coordinator");
    let roots = coordinator.discover(&mock_server.uri()).await;

    assert!(roots.is_empty());
}
