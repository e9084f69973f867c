use price_scout::config::{
    Config, EmptyPageAction, OutputConfig, RequestConfig, SearchConfig,
};
use price_scout::crawler::{Coordinator, Scheduler};
use price_scout::output::save_to_csv;
use price_scout::selector::{SelectorSpec, SelectorTree};
use price_scout::{run_scrape, PageOutcome, StopReason};
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, pages: u32) -> Config {
    Config {
        search: SearchConfig {
            url_base: format!("{}/s?k=", base_url),
            query: "memorias ram".to_string(),
            pages,
            delay_min: 0.0,
            delay_max: 0.0,
            on_empty_page: EmptyPageAction::Stop,
        },
        request: RequestConfig {
            timeout_ms: 500,
            user_agent: None,
        },
        selectors: SelectorTree::new(
            SelectorSpec::new("div").with_attr("data-component-type", "s-search-result"),
        )
        .with_field("title", SelectorSpec::new("h3"))
        .with_field(
            "price",
            SelectorSpec::new("span").with_attr("class", "a-offscreen"),
        ),
        output: OutputConfig::default(),
    }
}

/// Renders a result page with `count` priced products
fn product_page(page: u32, count: usize) -> String {
    let items: String = (0..count)
        .map(|i| {
            format!(
                r#"<div data-component-type="s-search-result">
                     <h3>Product {page}-{i}</h3>
                     <span class="a-price"><span class="a-offscreen">${page}{i}.99</span></span>
                   </div>"#
            )
        })
        .collect();

    format!("<html><body><div class=\"results\">{}</div></body></html>", items)
}

const EMPTY_PAGE: &str = "<html><body><p>No results for your search.</p></body></html>";

async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "memorias-ram"))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

fn ok(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

#[tokio::test]
async fn test_all_pages_processed() {
    let mock_server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(&mock_server, page, ok(product_page(page, 2)), 1).await;
    }
    mount_page(&mock_server, 4, ok(product_page(4, 2)), 0).await;

    let config = create_test_config(&mock_server.uri(), 3);
    let result = run_scrape(config).await.expect("run failed");

    assert_eq!(result.records.len(), 6);
    assert_eq!(result.pages.len(), 3);
    assert_eq!(result.stop_reason, StopReason::Exhausted);

    // Page order, then document order
    let titles: Vec<_> = result
        .records
        .iter()
        .map(|r| r.title.clone().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Product 1-0", "Product 1-1", "Product 2-0", "Product 2-1", "Product 3-0", "Product 3-1"]
    );
    assert_eq!(result.records[0].price, "$10.99");
    assert_eq!(result.records[0].page_label, "Página 1");
    assert_eq!(result.records[5].page_label, "Página 3");
}

#[tokio::test]
async fn test_http_error_stops_run() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, ok(product_page(1, 3)), 1).await;
    mount_page(&mock_server, 2, ok(product_page(2, 3)), 1).await;
    mount_page(&mock_server, 3, ResponseTemplate::new(404), 1).await;
    mount_page(&mock_server, 4, ok(product_page(4, 3)), 0).await;

    let config = create_test_config(&mock_server.uri(), 5);
    let result = run_scrape(config).await.expect("run failed");

    assert_eq!(result.records.len(), 6);
    assert_eq!(result.pages.len(), 3);
    assert_eq!(
        result.stop_reason,
        StopReason::HttpStatus {
            page: 3,
            status_code: 404
        }
    );
}

#[tokio::test]
async fn test_empty_page_stops_run() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, ok(product_page(1, 3)), 1).await;
    mount_page(&mock_server, 2, ok(product_page(2, 3)), 1).await;
    mount_page(&mock_server, 3, ok(EMPTY_PAGE.to_string()), 1).await;
    mount_page(&mock_server, 4, ok(product_page(4, 3)), 0).await;

    let config = create_test_config(&mock_server.uri(), 5);
    let result = run_scrape(config).await.expect("run failed");

    assert_eq!(result.records.len(), 6);
    assert_eq!(result.stop_reason, StopReason::NoContainers { page: 3 });
    assert_eq!(result.pages[2].outcome, PageOutcome::NoContainers);
}

#[tokio::test]
async fn test_empty_page_continue_policy() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, ok(EMPTY_PAGE.to_string()), 1).await;
    mount_page(&mock_server, 2, ok(product_page(2, 1)), 1).await;

    let mut config = create_test_config(&mock_server.uri(), 2);
    config.search.on_empty_page = EmptyPageAction::Continue;
    let result = run_scrape(config).await.expect("run failed");

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stop_reason, StopReason::Exhausted);
}

#[tokio::test]
async fn test_transport_error_skips_page() {
    let mock_server = MockServer::start().await;
    for page in [1, 3, 4, 5] {
        mount_page(&mock_server, page, ok(product_page(page, 1)), 1).await;
    }
    // Slower than the client timeout
    mount_page(
        &mock_server,
        2,
        ok(product_page(2, 1)).set_delay(Duration::from_secs(3)),
        1,
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 5);
    let result = run_scrape(config).await.expect("run failed");

    assert_eq!(result.records.len(), 4);
    assert_eq!(result.pages.len(), 5);
    assert!(matches!(
        result.pages[1].outcome,
        PageOutcome::TransportError { .. }
    ));
    assert!(result
        .records
        .iter()
        .all(|r| r.page_label != "Página 2"));
    assert_eq!(result.stop_reason, StopReason::Exhausted);
}

#[tokio::test]
async fn test_unreachable_server_is_not_fatal() {
    // Nothing listens on the discard port; every page is a transport error.
    let config = create_test_config("http://127.0.0.1:9", 2);
    let result = run_scrape(config).await.expect("run failed");

    assert!(result.is_empty());
    assert_eq!(result.pages.len(), 2);
    assert!(result.pages.iter().all(|p| p.outcome.is_transient()));
}

#[tokio::test]
async fn test_missing_title_and_missing_price() {
    let mock_server = MockServer::start().await;
    let body = r#"<html><body>
        <div data-component-type="s-search-result">
            <span class="a-offscreen">$12.00</span>
        </div>
        <div data-component-type="s-search-result">
            <h3>Out of stock</h3>
        </div>
        <div data-component-type="s-search-result">
            <h3>Kit 2x8GB</h3>
            <span class="a-offscreen">$55.00</span>
        </div>
    </body></html>"#;
    mount_page(&mock_server, 1, ok(body.to_string()), 1).await;

    let config = create_test_config(&mock_server.uri(), 1);
    let result = run_scrape(config).await.expect("run failed");

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].title, None);
    assert_eq!(result.records[0].price, "$12.00");
    assert_eq!(result.records[1].title.as_deref(), Some("Kit 2x8GB"));
    assert_eq!(
        result.pages[0].outcome,
        PageOutcome::Extracted {
            containers: 3,
            records: 2
        }
    );
}

#[tokio::test]
async fn test_browser_headers_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept-language"))
        .and(header_exists("accept"))
        .and(header("dnt", "1"))
        .respond_with(ok(product_page(1, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1);
    let result = run_scrape(config).await.expect("run failed");

    assert_eq!(result.records.len(), 1);
}

#[tokio::test]
async fn test_delay_applied_before_each_request() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, ok(product_page(1, 1)), 1).await;
    mount_page(&mock_server, 2, ok(product_page(2, 1)), 1).await;

    let mut config = create_test_config(&mock_server.uri(), 2);
    config.search.delay_min = 0.1;
    config.search.delay_max = 0.2;

    let scheduler = Scheduler::new(&config.search).with_rng(fastrand::Rng::with_seed(42));
    let mut coordinator = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .with_scheduler(scheduler);
    let started = std::time::Instant::now();
    let result = coordinator.run().await;
    let elapsed = started.elapsed();

    assert_eq!(result.records.len(), 2);
    assert!(
        elapsed >= Duration::from_millis(200),
        "two delays of at least 100ms each, got {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_latin1_page_decoded_from_meta_charset() {
    let mock_server = MockServer::start().await;
    let html = "<html><head><meta charset=\"iso-8859-1\"></head><body>\
                <div data-component-type=\"s-search-result\">\
                <h3>Memoria RAM 8GB Año 2024</h3>\
                <span class=\"a-offscreen\">$25.990</span></div></body></html>";
    let body: Vec<u8> = html.chars().map(|c| c as u32 as u8).collect();
    mount_page(
        &mock_server,
        1,
        ResponseTemplate::new(200).set_body_raw(body, "text/html"),
        1,
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 1);
    let result = run_scrape(config).await.unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(
        result.records[0].title.as_deref(),
        Some("Memoria RAM 8GB Año 2024")
    );
}

#[tokio::test]
async fn test_run_then_save_csv() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, ok(product_page(1, 2)), 1).await;
    mount_page(&mock_server, 2, ResponseTemplate::new(503), 1).await;

    let config = create_test_config(&mock_server.uri(), 3);
    let result = run_scrape(config).await.expect("run failed");

    let dir = tempfile::TempDir::new().unwrap();
    let csv_path = dir.path().join("data").join("precios.csv");
    let rows = save_to_csv(&result.records, &csv_path).unwrap();
    assert_eq!(rows, 2);

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "fecha_ext,producto,precio,página");
    assert!(lines[1].ends_with(",Product 1-0,$10.99,Página 1"));
}
