//! The five book operations over a shared store.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::errors::{BookError, Operation};
use super::id::IdGenerator;
use super::models::{Book, BookPayload, BookSummary, ListQuery};
use super::store::BookStore;
use super::validation;

/// Fresh ids drawn per create before the id space counts as exhausted.
const MAX_ID_ATTEMPTS: usize = 16;

/// Cheap to clone; all clones share one store.
///
/// Reads take the read guard. Writes hold the write guard across the
/// lookup and the mutation so each operation applies atomically.
#[derive(Debug, Clone, Default)]
pub struct BookService {
    store: Arc<RwLock<BookStore>>,
    ids: IdGenerator,
}

impl BookService {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            store: Arc::new(RwLock::new(BookStore::new())),
            ids,
        }
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Validate and append a new book, returning its id.
    pub async fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        validation::validate(&payload).map_err(|r| BookError::rejected(Operation::Add, r))?;

        let mut store = self.store.write().await;

        let fresh = (0..MAX_ID_ATTEMPTS)
            .map(|_| self.ids.generate())
            .find(|candidate| {
                let taken = store.contains(candidate);
                if taken {
                    tracing::warn!(book_id = %candidate, "generated id collided; retrying");
                }
                !taken
            });
        let Some(id) = fresh else {
            tracing::error!(
                attempts = MAX_ID_ATTEMPTS,
                id_length = self.ids.length(),
                total = store.len(),
                "no free book id found"
            );
            return Err(BookError::InsertionFailed);
        };

        store.push(Book::from_payload(id.clone(), payload, now()));

        if !store.contains(&id) {
            tracing::error!(book_id = %id, "book missing right after insertion");
            return Err(BookError::InsertionFailed);
        }

        tracing::info!(book_id = %id, total = store.len(), "book added");
        Ok(id)
    }

    /// Summaries of the books matching the query's single active filter,
    /// in insertion order.
    pub async fn list(&self, query: &ListQuery) -> Vec<BookSummary> {
        let filter = query.filter();
        let store = self.store.read().await;
        let books: Vec<_> = store
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::summary_view)
            .collect();

        tracing::debug!(?filter, matched = books.len(), total = store.len(), "books listed");
        books
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        self.store
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or(BookError::NotFound(Operation::Get))
    }

    /// Replace the editable fields of an existing book.
    pub async fn update(&self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        validation::validate(&payload).map_err(|r| BookError::rejected(Operation::Update, r))?;

        let mut store = self.store.write().await;
        let book = store
            .position(id)
            .and_then(|index| store.get_mut(index))
            .ok_or(BookError::NotFound(Operation::Update))?;

        book.apply(payload, now());

        tracing::info!(book_id = %id, "book updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        let mut store = self.store.write().await;
        let index = store
            .position(id)
            .ok_or(BookError::NotFound(Operation::Delete))?;
        store.remove(index);

        tracing::info!(book_id = %id, total = store.len(), "book deleted");
        Ok(())
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, page_count: u32, read_page: u32) -> BookPayload {
        BookPayload {
            name: Some(name.to_string()),
            page_count,
            read_page,
            ..Default::default()
        }
    }

    fn query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> ListQuery {
        ListQuery {
            name: name.map(str::to_string),
            reading: reading.map(str::to_string),
            finished: finished.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = BookService::default();
        let input = BookPayload {
            name: Some("Go".to_string()),
            year: Some(2015),
            author: Some("Donovan".to_string()),
            summary: Some("The Go book".to_string()),
            publisher: Some("Addison-Wesley".to_string()),
            page_count: 100,
            read_page: 100,
            reading: true,
        };

        let id = service.create(input.clone()).await.unwrap();
        let book = service.get(&id).await.unwrap();

        assert_eq!(book.id, id);
        assert_eq!(book.name, "Go");
        assert_eq!(book.year, Some(2015));
        assert_eq!(book.author.as_deref(), Some("Donovan"));
        assert_eq!(book.summary.as_deref(), Some("The Go book"));
        assert_eq!(book.publisher.as_deref(), Some("Addison-Wesley"));
        assert_eq!((book.page_count, book.read_page), (100, 100));
        assert!(book.reading);
        assert!(book.finished);
        assert_eq!(book.inserted_at, book.updated_at);
    }

    #[tokio::test]
    async fn exhausted_id_space_fails_instead_of_spinning() {
        // One character leaves 64 possible ids.
        let service = BookService::new(IdGenerator::unchecked(1));

        let outcome = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            for _ in 0..1_000 {
                if let Err(err) = service.create(payload("crowded", 1, 1)).await {
                    return err;
                }
            }
            panic!("create kept succeeding past the id space");
        })
        .await
        .expect("create must give up instead of looping");

        assert_eq!(outcome, BookError::InsertionFailed);
        assert_eq!(outcome.to_string(), "Buku gagal ditambahkan");

        let books = service.list(&query(None, None, None)).await;
        assert!(books.len() <= 64);
        let ids: std::collections::HashSet<_> = books.iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids.len(), books.len());
    }

    #[tokio::test]
    async fn finished_reflects_page_equality_at_creation() {
        let service = BookService::default();
        let done = service.create(payload("done", 10, 10)).await.unwrap();
        let partial = service.create(payload("partial", 10, 3)).await.unwrap();

        assert!(service.get(&done).await.unwrap().finished);
        assert!(!service.get(&partial).await.unwrap().finished);
    }

    #[tokio::test]
    async fn rejections_leave_store_untouched() {
        let service = BookService::default();
        let id = service.create(payload("keep", 10, 5)).await.unwrap();

        assert_eq!(
            service.create(payload("", 10, 0)).await,
            Err(BookError::MissingName(Operation::Add))
        );
        assert_eq!(
            service.create(payload("X", 10, 20)).await,
            Err(BookError::PageOverflow(Operation::Add))
        );
        assert_eq!(
            service.update(&id, payload("X", 10, 20)).await,
            Err(BookError::PageOverflow(Operation::Update))
        );
        assert_eq!(
            service.update(&id, BookPayload::default()).await,
            Err(BookError::MissingName(Operation::Update))
        );

        assert_eq!(service.count().await, 1);
        let book = service.get(&id).await.unwrap();
        assert_eq!(book.name, "keep");
        assert_eq!(book.read_page, 5);
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let service = BookService::default();
        assert_eq!(
            service.update("nope", payload("", 1, 0)).await,
            Err(BookError::MissingName(Operation::Update))
        );
        assert_eq!(
            service.update("nope", payload("ok", 1, 0)).await,
            Err(BookError::NotFound(Operation::Update))
        );
    }

    #[tokio::test]
    async fn update_keeps_id_inserted_at_and_finished() {
        let service = BookService::default();
        let id = service.create(payload("draft", 10, 10)).await.unwrap();
        let before = service.get(&id).await.unwrap();
        assert!(before.finished);

        service
            .update(
                &id,
                BookPayload {
                    name: Some("final".to_string()),
                    publisher: Some("Dicoding".to_string()),
                    page_count: 200,
                    read_page: 20,
                    reading: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let after = service.get(&id).await.unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.inserted_at, before.inserted_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.name, "final");
        assert_eq!(after.publisher.as_deref(), Some("Dicoding"));
        assert_eq!((after.page_count, after.read_page), (200, 20));
        assert!(after.reading);
        // Not recomputed even though 20 != 200.
        assert!(after.finished);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let service = BookService::default();
        let id = service.create(payload("gone", 1, 0)).await.unwrap();

        assert_eq!(service.delete(&id).await, Ok(()));
        assert_eq!(
            service.delete(&id).await,
            Err(BookError::NotFound(Operation::Delete))
        );
        assert_eq!(
            service.get(&id).await,
            Err(BookError::NotFound(Operation::Get))
        );
    }

    #[tokio::test]
    async fn list_applies_only_the_highest_precedence_filter() {
        let service = BookService::default();
        let rust = service
            .create(BookPayload {
                reading: false,
                ..payload("Rust in Action", 10, 1)
            })
            .await
            .unwrap();
        let go = service
            .create(BookPayload {
                reading: true,
                ..payload("Learning Go", 10, 10)
            })
            .await
            .unwrap();

        let ids = |books: Vec<BookSummary>| books.into_iter().map(|b| b.id).collect::<Vec<_>>();

        // name wins even though reading=1 would select only `go`
        assert_eq!(
            ids(service.list(&query(Some("RUST"), Some("1"), None)).await),
            vec![rust.clone()]
        );
        assert_eq!(
            ids(service.list(&query(None, Some("1"), Some("0"))).await),
            vec![go.clone()]
        );
        assert_eq!(
            ids(service.list(&query(None, None, Some("0"))).await),
            vec![rust.clone()]
        );
        assert_eq!(
            ids(service.list(&ListQuery::default()).await),
            vec![rust, go]
        );
    }

    #[tokio::test]
    async fn list_projects_summary_fields() {
        let service = BookService::default();
        let id = service
            .create(BookPayload {
                publisher: Some("No Starch".to_string()),
                ..payload("Rust", 1, 0)
            })
            .await
            .unwrap();

        assert_eq!(
            service.list(&ListQuery::default()).await,
            vec![BookSummary {
                id,
                name: "Rust".to_string(),
                publisher: Some("No Starch".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let service = BookService::new(IdGenerator::new(8));
        let clone = service.clone();
        let id = clone.create(payload("shared", 1, 1)).await.unwrap();

        assert_eq!(id.len(), 8);
        assert!(service.get(&id).await.is_ok());
    }
}
