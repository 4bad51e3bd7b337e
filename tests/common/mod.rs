use rusty_book_catalog::ports::SearchHit;

/// テスト用の検索結果を作成
///
/// タイトル以外のフィールドはitbook.store風の値で埋める。
pub fn hit(title: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        subtitle: Some("A test subtitle".to_string()),
        image: Some(format!("https://itbook.store/img/books/{}.png", title.len())),
        url: Some(format!("https://itbook.store/books/{}", title.len())),
    }
}
