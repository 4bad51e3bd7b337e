use std::sync::Arc;

use crate::domain::Book;
use crate::ports::{BookSearch, SearchHit};

/// 類似書籍として返す最大件数
pub const MAX_SIMILAR_BOOKS: usize = 4;

/// 主検索が失敗したときに1回だけ再検索する固定語
const FALLBACK_QUERY: &str = "programming";

/// 検索語の候補の末尾に常に加える固定語
const FIXED_TERMS: [&str; 2] = ["programming", "javascript"];

/// 純粋関数：類似書籍検索の検索語候補を組み立てる
///
/// 順序は タイトル → 著者 → 出版社 → 固定語。空の語は除く。
/// 固定語があるため結果が空になることはない。
pub fn candidate_terms(book: &Book) -> Vec<String> {
    let mut terms = vec![book.title.clone(), book.author.clone()];
    if let Some(publisher) = &book.publisher {
        terms.push(publisher.clone());
    }
    terms.extend(FIXED_TERMS.iter().map(|term| term.to_string()));

    terms.retain(|term| !term.is_empty());
    terms
}

/// 類似書籍を検索する
///
/// ビジネスルール：
/// - 検索は候補の先頭の語でのみ実行する
/// - 失敗したら固定語で1回だけ再検索する
/// - 注目中の書籍と同タイトルの結果は除く
/// - 最大4件まで返す
///
/// ベストエフォートの付加機能であり、すべての失敗は握りつぶして
/// 空のリストに縮退する。エラーを呼び出し元に伝播しない。
pub async fn fetch_similar_books(book_search: &Arc<dyn BookSearch>, book: &Book) -> Vec<SearchHit> {
    // 1. 検索語の決定（候補の先頭）
    let terms = candidate_terms(book);
    let query = terms
        .first()
        .cloned()
        .unwrap_or_else(|| FALLBACK_QUERY.to_string());

    // 2. 主検索。失敗したら固定語で1回だけ再検索
    let hits = match book_search.search(&query).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!(
                query = %query,
                error = %e,
                "similar-books search failed, retrying with fallback query"
            );

            match book_search.search(FALLBACK_QUERY).await {
                Ok(hits) => hits,
                Err(e) => {
                    tracing::warn!(
                        query = FALLBACK_QUERY,
                        error = %e,
                        "similar-books fallback search failed, giving up"
                    );
                    return Vec::new();
                }
            }
        }
    };

    // 3. 注目中の書籍自身を除いて最大件数に切り詰める
    hits.into_iter()
        .filter(|hit| hit.title != book.title)
        .take(MAX_SIMILAR_BOOKS)
        .collect()
}
