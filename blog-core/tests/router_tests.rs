use blog_core::router::encode_fragment;
use blog_core::{handle_location_change, AddressBar, Article, Catalog, Route};

fn catalog() -> Catalog {
    Catalog::from_records(vec![
        Article {
            filename: "My First Post.md".into(),
            date: "01.01.20".into(),
            tags: vec!["x".into()],
            slug: None,
        },
        Article {
            filename: "Запуск своєї сторінки.md".into(),
            date: "21.09.25".into(),
            tags: vec![],
            slug: None,
        },
        Article {
            filename: "Renamed File.md".into(),
            date: "03.01.20".into(),
            tags: vec![],
            slug: Some("stable-slug".into()),
        },
    ])
}

#[test]
fn empty_fragment_routes_to_main() {
    assert_eq!(handle_location_change("", &catalog()), Route::Main);
}

#[test]
fn unknown_fragment_routes_to_main() {
    assert_eq!(handle_location_change("Missing-Post", &catalog()), Route::Main);
}

#[test]
fn fragment_matches_slug_case_insensitively() {
    assert_eq!(
        handle_location_change("my-first-post", &catalog()),
        Route::Article("My First Post.md".into())
    );
}

#[test]
fn undecodable_fragment_falls_back_to_main() {
    // %FF decodes to invalid UTF-8.
    assert_eq!(handle_location_change("%FF", &catalog()), Route::Main);
}

#[test]
fn encode_then_dispatch_round_trips() {
    let catalog = catalog();
    for article in catalog.iter() {
        let fragment = encode_fragment(article);
        assert_eq!(
            handle_location_change(&fragment, &catalog),
            Route::Article(article.filename.clone()),
            "round trip failed for {fragment}"
        );
    }
}

#[test]
fn cyrillic_slugs_are_percent_encoded() {
    let catalog = catalog();
    let article = catalog.get("Запуск своєї сторінки.md").unwrap();
    let fragment = encode_fragment(article);
    assert!(fragment.chars().all(|c| c.is_ascii()), "fragment: {fragment}");
    assert_eq!(
        handle_location_change(&fragment, &catalog),
        Route::Article("Запуск своєї сторінки.md".into())
    );
}

#[test]
fn explicit_slug_is_used_for_encoding_and_lookup() {
    let catalog = catalog();
    let article = catalog.get("Renamed File.md").unwrap();
    assert_eq!(encode_fragment(article), "stable-slug");
    assert_eq!(
        handle_location_change("STABLE-SLUG", &catalog),
        Route::Article("Renamed File.md".into())
    );
    // The derived slug is no longer routable once an explicit one exists.
    assert_eq!(handle_location_change("Renamed-File", &catalog), Route::Main);
}

#[test]
fn address_bar_navigate_pushes_history() {
    let mut bar = AddressBar::default();
    bar.navigate("first");
    bar.navigate("second");
    assert_eq!(bar.fragment(), "second");
    assert!(bar.can_go_back());

    assert_eq!(bar.back(), Some("first"));
    assert_eq!(bar.fragment(), "first");
    assert!(bar.can_go_forward());

    assert_eq!(bar.forward(), Some("second"));
    assert_eq!(bar.fragment(), "second");
    assert!(!bar.can_go_forward());
}

#[test]
fn address_bar_replace_leaves_history_untouched() {
    let mut bar = AddressBar::default();
    bar.navigate("article");
    bar.replace("");
    assert_eq!(bar.fragment(), "");
    // The single history entry is still the pre-navigate fragment.
    assert_eq!(bar.back(), Some(""));
    assert!(!bar.can_go_back());
}

#[test]
fn address_bar_navigating_to_current_fragment_is_a_no_op() {
    let mut bar = AddressBar::new("post");
    bar.navigate("post");
    assert!(!bar.can_go_back());
}

#[test]
fn address_bar_back_on_empty_history_is_none() {
    let mut bar = AddressBar::default();
    assert_eq!(bar.back(), None);
    assert_eq!(bar.forward(), None);
}
