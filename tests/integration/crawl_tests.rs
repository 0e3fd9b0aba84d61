use sitemap_sweep::config::Config;
use sitemap_sweep::crawler::{run_sweep, Coordinator};
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <url><loc>{}</loc></url>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <sitemap><loc>{}</loc></sitemap>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

async fn mount_body(server: &MockServer, route: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts 1 index -> 2 child sitemaps -> 5 pages
async fn mount_site(server: &MockServer) -> Vec<String> {
    let base = server.uri();
    let posts: Vec<String> = (1..=3).map(|i| format!("{}/posts/{}", base, i)).collect();
    let pages: Vec<String> = ["about", "contact"]
        .iter()
        .map(|p| format!("{}/{}", base, p))
        .collect();

    mount_body(
        server,
        "/sitemap_index.xml",
        200,
        sitemap_index(&[
            format!("{}/post-sitemap.xml", base),
            format!("{}/page-sitemap.xml", base),
        ]),
    )
    .await;
    mount_body(server, "/post-sitemap.xml", 200, urlset(&posts)).await;
    mount_body(server, "/page-sitemap.xml", 200, urlset(&pages)).await;

    for url in posts.iter().chain(pages.iter()) {
        let route = url.trim_start_matches(&base).to_string();
        let name = route.trim_start_matches('/').replace('/', " ");
        mount_body(
            server,
            &route,
            200,
            format!(
                r#"<html><head><title>{name}</title><meta name="description" content="About {name}"></head><body><h1>Heading {name}</h1></body></html>"#,
                name = name
            ),
        )
        .await;
    }

    posts.into_iter().chain(pages).collect()
}

#[tokio::test]
async fn test_full_sweep_three_level_tree() {
    let mock_server = MockServer::start().await;
    let expected = mount_site(&mock_server).await;

    let report = run_sweep(&Config::default(), &mock_server.uri())
        .await
        .expect("Sweep failed");

    assert_eq!(
        report.roots,
        vec![format!("{}/sitemap_index.xml", mock_server.uri())]
    );
    assert_eq!(report.records.len(), 5);

    let urls: HashSet<String> = report.records.iter().map(|r| r.url.clone()).collect();
    let expected: HashSet<String> = expected.into_iter().collect();
    assert_eq!(urls, expected);

    let about = report
        .records
        .iter()
        .find(|r| r.url.ends_with("/about"))
        .expect("about page missing");
    assert_eq!(about.status_code, 200);
    assert_eq!(about.title, "about");
    assert_eq!(about.h1, "Heading about");
    assert_eq!(about.meta_description, "About about");
}

#[tokio::test]
async fn test_sweep_survives_broken_child_sitemap() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_body(
        &mock_server,
        "/sitemap.xml",
        200,
        sitemap_index(&[
            format!("{}/good-sitemap.xml", base),
            format!("{}/broken-sitemap.xml", base),
            "http://127.0.0.1:1/unreachable-sitemap.xml".to_string(),
        ]),
    )
    .await;
    mount_body(
        &mock_server,
        "/good-sitemap.xml",
        200,
        urlset(&[format!("{}/only-page", base)]),
    )
    .await;
    mount_body(&mock_server, "/broken-sitemap.xml", 500, String::new()).await;
    mount_body(
        &mock_server,
        "/only-page",
        200,
        "<title>Only</title>".to_string(),
    )
    .await;

    let coordinator = Coordinator::new(&Config::default()).expect("Failed to create coordinator");
    let records = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        coordinator.scrape_sitemap(&format!("{}/sitemap.xml", base)),
    )
    .await
    .expect("Sweep did not terminate");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Only");
}

#[tokio::test]
async fn test_missing_pages_keep_their_status() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_body(
        &mock_server,
        "/sitemap.xml",
        200,
        urlset(&[format!("{}/exists", base), format!("{}/missing", base)]),
    )
    .await;
    mount_body(&mock_server, "/exists", 200, "<title>Here</title>".to_string()).await;

    let coordinator = Coordinator::new(&Config::default()).expect("Failed to create coordinator");
    let records = coordinator
        .scrape_sitemap(&format!("{}/sitemap.xml", base))
        .await;

    assert_eq!(records.len(), 2);
    let missing = records
        .iter()
        .find(|r| r.url.ends_with("/missing"))
        .expect("missing page should still be recorded");
    assert_eq!(missing.status_code, 404);
}

#[tokio::test]
async fn test_sweep_of_site_without_sitemaps() {
    let mock_server = MockServer::start().await;

    let report = run_sweep(&Config::default(), &mock_server.uri())
        .await
        .expect("Sweep failed");

    assert!(report.roots.is_empty());
    assert!(report.records.is_empty());
}
