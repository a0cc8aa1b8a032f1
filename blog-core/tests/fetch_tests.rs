use blog_core::{ContentStore, Event, FetchError};
use reqwest::Client;
use tokio::sync::mpsc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_catalog() -> String {
    r#"[
        {"filename": "A.md", "date": "01.01.20", "tags": ["x"]},
        {"filename": "B.md", "date": "02.01.20", "tags": ["y"]}
    ]"#
    .to_string()
}

async fn store_for(server: &MockServer) -> ContentStore {
    let base = Url::parse(&format!("{}/articles", server.uri())).unwrap();
    ContentStore::new(Client::new(), base, "articles.json")
}

#[tokio::test]
async fn catalog_load_parses_and_sorts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/articles.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(sample_catalog()),
        )
        .mount(&server)
        .await;

    let catalog = store_for(&server).await.load_catalog().await.unwrap();
    let order: Vec<&str> = catalog.iter().map(|a| a.filename.as_str()).collect();
    assert_eq!(order, vec!["B.md", "A.md"]);
}

#[tokio::test]
async fn catalog_load_fails_on_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/articles.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = store_for(&server).await.load_catalog().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got: {err}");
}

#[tokio::test]
async fn catalog_load_fails_on_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/articles.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = store_for(&server).await.load_catalog().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)), "got: {err}");
}

#[tokio::test]
async fn article_load_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/A.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Привіт\n\nтекст"))
        .mount(&server)
        .await;

    let body = store_for(&server).await.load_article("A.md").await.unwrap();
    assert_eq!(body, "# Привіт\n\nтекст");
}

#[tokio::test]
async fn article_load_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/A.md"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .await
        .load_article("A.md")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got: {err}");
}

#[tokio::test]
async fn spawned_article_load_reports_over_the_channel_with_its_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/A.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body"))
        .mount(&server)
        .await;

    let store = store_for(&server).await;
    let (tx, mut rx) = mpsc::channel(4);
    store.spawn_article_load(&tokio::runtime::Handle::current(), "A.md".into(), 7, tx);

    match rx.recv().await.expect("event") {
        Event::ArticleLoaded {
            token,
            filename,
            result,
        } => {
            assert_eq!(token, 7);
            assert_eq!(filename, "A.md");
            assert_eq!(result.unwrap(), "body");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn overlapping_fetches_latest_token_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/slow.md"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow body")
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/fast.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fast body"))
        .mount(&server)
        .await;

    let store = store_for(&server).await;
    let (tx, mut rx) = mpsc::channel(4);
    let handle = tokio::runtime::Handle::current();
    store.spawn_article_load(&handle, "slow.md".into(), 1, tx.clone());
    store.spawn_article_load(&handle, "fast.md".into(), 2, tx);

    // Consume both completions the way the UI does: keep only the result
    // whose token matches the latest issued request.
    let latest_token = 2;
    let mut applied: Option<(String, String)> = None;
    for _ in 0..2 {
        if let Some(Event::ArticleLoaded {
            token,
            filename,
            result,
        }) = rx.recv().await
        {
            if token == latest_token {
                applied = Some((filename, result.unwrap()));
            }
        }
    }

    assert_eq!(applied, Some(("fast.md".into(), "fast body".into())));
}

#[tokio::test]
async fn base_url_without_trailing_slash_keeps_its_last_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/articles/articles.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/blog/articles", server.uri())).unwrap();
    let store = ContentStore::new(Client::new(), base, "articles.json");
    let catalog = store.load_catalog().await.unwrap();
    assert!(catalog.is_empty());
}
