use crate::ports::book_search::{BookSearch as BookSearchTrait, Result, SearchHit};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// BookSearchのモック実装
///
/// クエリごとに返す結果を登録でき、特定のクエリを失敗させられる。
/// 実行されたクエリを記録するため、フォールバックの挙動を検証できる。
pub struct BookSearch {
    hits_by_query: Mutex<HashMap<String, Vec<SearchHit>>>,
    failing_queries: Mutex<HashSet<String>>,
    recorded_queries: Mutex<Vec<String>>,
}

impl BookSearch {
    pub fn new() -> Self {
        Self {
            hits_by_query: Mutex::new(HashMap::new()),
            failing_queries: Mutex::new(HashSet::new()),
            recorded_queries: Mutex::new(Vec::new()),
        }
    }

    /// テスト用にクエリへの検索結果を登録
    pub fn add_hits(&self, query: &str, hits: Vec<SearchHit>) {
        self.hits_by_query
            .lock()
            .unwrap()
            .insert(query.to_string(), hits);
    }

    /// テスト用にクエリを失敗させる
    pub fn fail_query(&self, query: &str) {
        self.failing_queries
            .lock()
            .unwrap()
            .insert(query.to_string());
    }

    /// 実行されたクエリの記録（実行順）
    pub fn recorded_queries(&self) -> Vec<String> {
        self.recorded_queries.lock().unwrap().clone()
    }
}

impl Default for BookSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookSearchTrait for BookSearch {
    /// 登録された結果を返す。未登録のクエリは0件の成功
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.recorded_queries
            .lock()
            .unwrap()
            .push(query.to_string());

        if self.failing_queries.lock().unwrap().contains(query) {
            return Err(format!("mock search failure for query: {}", query).into());
        }

        let hits = self
            .hits_by_query
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        Ok(hits)
    }
}
