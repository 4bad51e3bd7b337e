use crate::ports::book_search::{BookSearch as BookSearchTrait, Result, SearchHit};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// itbook.store search API base URL
const ITBOOK_API_BASE: &str = "https://api.itbook.store/1.0";

/// HTTP request timeout
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// itbook.store implementation of BookSearch
///
/// Calls the public `GET /search/{query}` endpoint. The endpoint is
/// treated as unreliable: non-2xx statuses and responses without a
/// `books` array are reported as errors so the caller can fall back.
pub struct BookSearch {
    client: Client,
    base_url: String,
}

/// Search response body
///
/// The API reports "no results" in two different shapes: a `books`
/// array that is empty, or no `books` key at all. Only the latter is
/// an unusable response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    books: Option<Vec<BookRecord>>,
}

#[derive(Debug, Deserialize)]
struct BookRecord {
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl BookRecord {
    /// Convert an API record to the port's hit type
    ///
    /// The API sends empty strings rather than omitting fields; those
    /// are normalized to `None`.
    fn into_hit(self) -> SearchHit {
        SearchHit {
            title: self.title,
            subtitle: self.subtitle.filter(|s| !s.is_empty()),
            image: self.image.filter(|s| !s.is_empty()),
            url: self.url.filter(|s| !s.is_empty()),
        }
    }
}

impl BookSearch {
    /// Create a client against the public itbook.store API
    pub fn new() -> Result<Self> {
        Self::with_base_url(ITBOOK_API_BASE)
    }

    /// Create a client against a custom base URL
    ///
    /// Used to point at a stand-in server in tests and local setups.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("rusty-book-catalog/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &str) -> String {
        format!("{}/search/{}", self.base_url, urlencoding::encode(query))
    }

    /// Extract hits from a decoded search response
    ///
    /// A response without a `books` array is an error; an empty
    /// `books` array is a successful empty result.
    fn hits_from_response(response: SearchResponse) -> Result<Vec<SearchHit>> {
        let books = response
            .books
            .ok_or("search response has no books array")?;

        Ok(books.into_iter().map(BookRecord::into_hit).collect())
    }
}

#[async_trait]
impl BookSearchTrait for BookSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = self.search_url(query);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(format!("itbook.store returned {}", response.status()).into());
        }

        let body: SearchResponse = response.json().await?;
        Self::hits_from_response(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_percent_encodes_query() {
        let search = BookSearch::with_base_url("https://api.itbook.store/1.0").unwrap();

        assert_eq!(
            search.search_url("Go in Action"),
            "https://api.itbook.store/1.0/search/Go%20in%20Action"
        );
    }

    fn decode(body: &str) -> SearchResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_search_response_maps_records_to_hits() {
        let body = r#"{
            "error": "0",
            "total": "2",
            "books": [
               {
                  "title": "Go in Practice",
                  "subtitle": "Includes 70 Techniques",
                  "isbn13": "9781633430075",
                  "price": "$39.99",
                  "image": "https://itbook.store/img/books/9781633430075.png",
                  "url": "https://itbook.store/books/9781633430075"
               },
               {
                  "title": "Go Web Programming",
                  "subtitle": "",
                  "isbn13": "9781617292569",
                  "price": "$44.99",
                  "image": "https://itbook.store/img/books/9781617292569.png",
                  "url": "https://itbook.store/books/9781617292569"
               }
            ]
        }"#;

        let hits = BookSearch::hits_from_response(decode(body)).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Go in Practice");
        assert_eq!(hits[0].subtitle.as_deref(), Some("Includes 70 Techniques"));
        // 空文字列のフィールドはNoneに正規化される
        assert_eq!(hits[1].subtitle, None);
        assert_eq!(
            hits[1].url.as_deref(),
            Some("https://itbook.store/books/9781617292569")
        );
    }

    #[test]
    fn test_search_response_without_books_array_is_error() {
        let body = r#"{"error": "[search] Invalid request", "total": "0"}"#;

        assert!(BookSearch::hits_from_response(decode(body)).is_err());
    }

    #[test]
    fn test_search_response_with_empty_books_array_is_ok() {
        let body = r#"{"error": "0", "total": "0", "books": []}"#;

        let hits = BookSearch::hits_from_response(decode(body)).unwrap();
        assert!(hits.is_empty());
    }
}
