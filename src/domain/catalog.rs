use super::commands::AddBook;
use super::{Book, BookId};

/// 書籍カタログ
///
/// 書籍レコードを所有する追記専用のコレクション。挿入順を保持し、
/// 一覧・絞り込みは常にこの順序で返す。
#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// 書籍をカタログに追加する
    ///
    /// IDはカタログ側で採番し、呼び出し元に返す。
    pub fn add(&mut self, cmd: AddBook) -> BookId {
        let book = Book {
            id: BookId::new(),
            title: cmd.title,
            author: cmd.author,
            publisher: cmd.publisher,
            publication_year: cmd.publication_year,
            language: cmd.language,
            pages: cmd.pages,
            price: cmd.price,
            image: cmd.image,
        };
        let book_id = book.id;
        self.books.push(book);

        book_id
    }

    /// IDで書籍を取得する
    pub fn get(&self, book_id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == book_id)
    }

    /// IDの書籍が存在するか
    pub fn contains(&self, book_id: BookId) -> bool {
        self.get(book_id).is_some()
    }

    /// 全書籍（挿入順）
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    // ========================================================================
    // 著者フィルタ
    // ========================================================================

    /// カタログに登場する著者名の一覧
    ///
    /// 初出順で重複を除去する。空文字列の著者名は一覧に含めない。
    pub fn authors(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = Vec::new();
        for book in &self.books {
            if book.author.is_empty() {
                continue;
            }
            if !authors.contains(&book.author.as_str()) {
                authors.push(&book.author);
            }
        }

        authors
    }

    /// 著者名で書籍を絞り込む
    ///
    /// 著者名は完全一致。結果はカタログの挿入順を保った部分列になる。
    pub fn filter_by_author(&self, author: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| book.author == author)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_cmd(title: &str, author: &str) -> AddBook {
        AddBook {
            title: title.to_string(),
            author: author.to_string(),
            publisher: None,
            publication_year: None,
            language: None,
            pages: None,
            price: None,
            image: None,
        }
    }

    // TDD: Catalog::add() のテスト
    #[test]
    fn test_add_assigns_id_and_preserves_insertion_order() {
        let mut catalog = Catalog::new();

        let first = catalog.add(add_cmd("1984", "George Orwell"));
        let second = catalog.add(add_cmd("Animal Farm", "George Orwell"));

        assert_ne!(first, second);
        let titles: Vec<_> = catalog.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["1984", "Animal Farm"]);
    }

    #[test]
    fn test_get_returns_added_book() {
        let mut catalog = Catalog::new();

        let book_id = catalog.add(add_cmd("1984", "George Orwell"));

        let book = catalog.get(book_id).unwrap();
        assert_eq!(book.title, "1984");
        assert_eq!(book.author, "George Orwell");
        assert!(catalog.contains(book_id));
    }

    #[test]
    fn test_get_returns_none_for_unknown_id() {
        let catalog = Catalog::new();

        assert!(catalog.get(BookId::new()).is_none());
        assert!(!catalog.contains(BookId::new()));
    }

    // TDD: 著者フィルタのテスト
    #[test]
    fn test_authors_deduplicates_in_first_occurrence_order() {
        let mut catalog = Catalog::new();
        catalog.add(add_cmd("1984", "George Orwell"));
        catalog.add(add_cmd("Brave New World", "Aldous Huxley"));
        catalog.add(add_cmd("Animal Farm", "George Orwell"));

        assert_eq!(catalog.authors(), vec!["George Orwell", "Aldous Huxley"]);
    }

    #[test]
    fn test_authors_skips_empty_author_names() {
        let mut catalog = Catalog::new();
        catalog.add(add_cmd("Anonymous Pamphlet", ""));
        catalog.add(add_cmd("1984", "George Orwell"));

        assert_eq!(catalog.authors(), vec!["George Orwell"]);
    }

    #[test]
    fn test_filter_by_author_returns_ordered_subsequence() {
        let mut catalog = Catalog::new();
        catalog.add(add_cmd("1984", "George Orwell"));
        catalog.add(add_cmd("Brave New World", "Aldous Huxley"));
        catalog.add(add_cmd("Animal Farm", "George Orwell"));

        let filtered = catalog.filter_by_author("George Orwell");
        let titles: Vec<_> = filtered.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["1984", "Animal Farm"]);
    }

    #[test]
    fn test_filter_by_author_requires_exact_match() {
        let mut catalog = Catalog::new();
        catalog.add(add_cmd("1984", "George Orwell"));

        assert!(catalog.filter_by_author("george orwell").is_empty());
        assert!(catalog.filter_by_author("Orwell").is_empty());
    }
}
