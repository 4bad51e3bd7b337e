use rusty_book_catalog::adapters::mock::BookSearch as MockBookSearch;
use rusty_book_catalog::application::similar_books::{MAX_SIMILAR_BOOKS, fetch_similar_books};
use rusty_book_catalog::domain::{Book, BookId};
use rusty_book_catalog::ports::BookSearch;
use std::sync::Arc;

mod common;

// ============================================================================
// テスト用のヘルパー関数
// ============================================================================

fn book(title: &str, author: &str, publisher: Option<&str>) -> Book {
    Book {
        id: BookId::new(),
        title: title.to_string(),
        author: author.to_string(),
        publisher: publisher.map(|p| p.to_string()),
        publication_year: None,
        language: None,
        pages: None,
        price: None,
        image: None,
    }
}

fn as_port(mock: &Arc<MockBookSearch>) -> Arc<dyn BookSearch> {
    mock.clone()
}

// ============================================================================
// 類似書籍検索のテスト
// ============================================================================

#[tokio::test]
async fn test_uses_only_the_first_candidate_term() {
    let mock = Arc::new(MockBookSearch::new());

    // タイトルと著者の両方に結果を登録しても、使われるのはタイトルだけ
    mock.add_hits("Go in Action", vec![common::hit("Go in Practice")]);
    mock.add_hits("William Kennedy", vec![common::hit("An Unexpected Hit")]);

    let focal = book("Go in Action", "William Kennedy", Some("Manning"));
    let hits = fetch_similar_books(&as_port(&mock), &focal).await;

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Go in Practice");
    assert_eq!(mock.recorded_queries(), vec!["Go in Action"]);
}

#[tokio::test]
async fn test_caps_results_and_excludes_focal_title() {
    let mock = Arc::new(MockBookSearch::new());

    mock.add_hits(
        "Go in Action",
        vec![
            common::hit("Go in Action"),
            common::hit("Go in Practice"),
            common::hit("Go Web Programming"),
            common::hit("The Go Programming Language"),
            common::hit("Go Systems Programming"),
            common::hit("Learning Go"),
        ],
    );

    let focal = book("Go in Action", "William Kennedy", None);
    let hits = fetch_similar_books(&as_port(&mock), &focal).await;

    // 注目中の書籍自身は除かれ、最大件数に切り詰められる
    assert_eq!(hits.len(), MAX_SIMILAR_BOOKS);
    assert!(hits.iter().all(|h| h.title != "Go in Action"));
    assert_eq!(hits[0].title, "Go in Practice");
}

#[tokio::test]
async fn test_falls_back_once_when_primary_query_fails() {
    let mock = Arc::new(MockBookSearch::new());

    mock.fail_query("Go in Action");
    mock.add_hits(
        "programming",
        vec![
            // フォールバック経由でも注目中の書籍自身は除かれる
            common::hit("Go in Action"),
            common::hit("The Pragmatic Programmer"),
            common::hit("Code Complete"),
            common::hit("Clean Code"),
            common::hit("Refactoring"),
            common::hit("The Mythical Man-Month"),
        ],
    );

    let focal = book("Go in Action", "William Kennedy", None);
    let hits = fetch_similar_books(&as_port(&mock), &focal).await;

    assert_eq!(hits.len(), MAX_SIMILAR_BOOKS);
    assert!(hits.iter().all(|h| h.title != "Go in Action"));
    assert_eq!(
        mock.recorded_queries(),
        vec!["Go in Action", "programming"]
    );
}

#[tokio::test]
async fn test_empty_result_list_is_usable_without_fallback() {
    let mock = Arc::new(MockBookSearch::new());

    // 未登録のクエリは「結果0件の成功」。フォールバックは走らない
    let focal = book("An Obscure Title", "Unknown Author", None);
    let hits = fetch_similar_books(&as_port(&mock), &focal).await;

    assert!(hits.is_empty());
    assert_eq!(mock.recorded_queries(), vec!["An Obscure Title"]);
}

#[tokio::test]
async fn test_no_network_yields_empty_list_without_error() {
    let mock = Arc::new(MockBookSearch::new());

    // ネットワーク不通の想定：主検索もフォールバックも失敗する
    mock.fail_query("Go in Action");
    mock.fail_query("programming");

    let focal = book("Go in Action", "William Kennedy", None);
    let hits = fetch_similar_books(&as_port(&mock), &focal).await;

    assert!(hits.is_empty());
    assert_eq!(
        mock.recorded_queries(),
        vec!["Go in Action", "programming"]
    );
}

#[tokio::test]
async fn test_empty_title_falls_through_to_author_term() {
    let mock = Arc::new(MockBookSearch::new());

    mock.add_hits("William Kennedy", vec![common::hit("Go in Practice")]);

    // タイトルが空なら次の候補（著者）が先頭になる
    let focal = book("", "William Kennedy", None);
    let hits = fetch_similar_books(&as_port(&mock), &focal).await;

    assert_eq!(hits.len(), 1);
    assert_eq!(mock.recorded_queries(), vec!["William Kennedy"]);
}
