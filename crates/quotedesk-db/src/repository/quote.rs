//! # Quote Repository
//!
//! Persistence for the quote aggregate: the header row plus its lines.
//!
//! ## Units of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(new_quote)                                                      │
//! │    BEGIN                                                                │
//! │    ├── every referenced item exists?   no ──► ROLLBACK, FK violation    │
//! │    ├── INSERT quotes                   ──► id                           │
//! │    ├── INSERT quote_lines × n                                           │
//! │    COMMIT                                                               │
//! │                                                                         │
//! │  add_line(id, line)                                                     │
//! │    BEGIN                                                                │
//! │    ├── quote exists?                   no ──► ROLLBACK, NotFound        │
//! │    ├── item exists?                    no ──► ROLLBACK, FK violation    │
//! │    ├── INSERT quote_lines                                               │
//! │    COMMIT                                                               │
//! │                                                                         │
//! │  delete(id)                                                             │
//! │    BEGIN                                                                │
//! │    ├── DELETE quote_lines WHERE quote_id                                │
//! │    ├── DELETE quotes WHERE id                                           │
//! │    COMMIT                          (catalog items are never touched)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A detail read joins each line with the current catalog row, so the
//! returned quote reflects today's prices rather than the prices at the time
//! the line was added.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::item::item_exists;
use crate::error::{DbError, DbResult};
use quotedesk_core::{Item, ItemId, LineItem, NewLine, NewQuote, Quote, QuoteId};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct QuoteHeaderRow {
    id: QuoteId,
    recipient_name: String,
    created_at: DateTime<Utc>,
}

impl From<QuoteHeaderRow> for Quote {
    fn from(row: QuoteHeaderRow) -> Self {
        Quote::header(row.id, row.recipient_name, row.created_at)
    }
}

/// One quote line joined with its catalog item.
#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    item_id: ItemId,
    description: String,
    unit_price_cents: i64,
    quantity: i64,
}

impl From<LineRow> for LineItem {
    fn from(row: LineRow) -> Self {
        LineItem::new(
            Item::new(row.item_id, row.description, row.unit_price_cents),
            row.quantity,
        )
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for quotes and their lines.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.quotes();
///
/// let id = repo.create(&NewQuote::new("ACME Corp", Utc::now(), lines)?).await?;
/// repo.add_line(id, &NewLine::new(item_id, 2)?).await?;
///
/// let quote = repo.get_by_id(id).await?.expect("just created");
/// println!("{}", quote.subtotal());
/// ```
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        QuoteRepository { pool }
    }

    /// Creates a quote together with its initial lines.
    ///
    /// Atomic: if any line references a missing item, nothing is written
    /// and `DbError::ForeignKeyViolation` is returned.
    ///
    /// ## Returns
    /// The store-assigned id of the new quote.
    pub async fn create(&self, quote: &NewQuote) -> DbResult<QuoteId> {
        debug!(
            recipient = %quote.recipient_name(),
            lines = quote.lines().len(),
            "Creating quote"
        );

        let mut tx = self.pool.begin().await?;

        for item_id in quote.item_ids() {
            if !item_exists(&mut tx, item_id).await? {
                return Err(DbError::missing_reference("Item", item_id));
            }
        }

        let result = sqlx::query(
            r#"
            INSERT INTO quotes (recipient_name, created_at)
            VALUES (?1, ?2)
            "#,
        )
        .bind(quote.recipient_name())
        .bind(quote.created_at())
        .execute(&mut *tx)
        .await?;

        let id = QuoteId::new(result.last_insert_rowid());

        for line in quote.lines() {
            insert_line(&mut tx, id, line).await?;
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id = %id, lines = quote.lines().len(), "Quote created");
        Ok(id)
    }

    /// Attaches one more line to an existing quote.
    ///
    /// ## Errors
    /// - `DbError::NotFound` if the quote does not exist
    /// - `DbError::ForeignKeyViolation` if the item does not exist
    pub async fn add_line(&self, quote_id: QuoteId, line: &NewLine) -> DbResult<()> {
        debug!(
            quote_id = %quote_id,
            item_id = %line.item_id(),
            quantity = line.quantity(),
            "Adding quote line"
        );

        let mut tx = self.pool.begin().await?;

        if !quote_exists(&mut tx, quote_id).await? {
            return Err(DbError::not_found("Quote", quote_id));
        }

        if !item_exists(&mut tx, line.item_id()).await? {
            return Err(DbError::missing_reference("Item", line.item_id()));
        }

        insert_line(&mut tx, quote_id, line).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(())
    }

    /// Gets a quote with all of its lines.
    ///
    /// Header and lines are read on the same connection. Lines come back in
    /// the order they were added.
    pub async fn get_by_id(&self, id: QuoteId) -> DbResult<Option<Quote>> {
        let mut conn = self.pool.acquire().await?;

        let header = sqlx::query_as::<_, QuoteHeaderRow>(
            r#"
            SELECT id, recipient_name, created_at
            FROM quotes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT
                ql.item_id,
                i.description,
                i.unit_price_cents,
                ql.quantity
            FROM quote_lines ql
            INNER JOIN items i ON i.id = ql.item_id
            WHERE ql.quote_id = ?1
            ORDER BY ql.id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

        let mut quote = Quote::from(header);
        for row in lines {
            quote.push_line(LineItem::from(row));
        }

        Ok(Some(quote))
    }

    /// Lists every quote header, ordered by id.
    ///
    /// Lines are not loaded; each returned quote has an empty `lines` vector.
    pub async fn list(&self) -> DbResult<Vec<Quote>> {
        let rows = sqlx::query_as::<_, QuoteHeaderRow>(
            r#"
            SELECT id, recipient_name, created_at
            FROM quotes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    /// Deletes a quote and all of its lines.
    ///
    /// Deleting an id that does not exist is not an error. Catalog items
    /// referenced by the lines are left untouched.
    pub async fn delete(&self, id: QuoteId) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let lines = sqlx::query("DELETE FROM quote_lines WHERE quote_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let headers = sqlx::query("DELETE FROM quotes WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(id = %id, headers, lines, "Quote deleted");
        Ok(())
    }

    /// Returns whether the quote exists.
    pub async fn exists(&self, id: QuoteId) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        quote_exists(&mut conn, id).await
    }

    /// Counts stored quotes.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Connection Helpers
// =============================================================================

async fn quote_exists(conn: &mut SqliteConnection, id: QuoteId) -> DbResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes WHERE id = ?1")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count > 0)
}

async fn insert_line(conn: &mut SqliteConnection, quote_id: QuoteId, line: &NewLine) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO quote_lines (quote_id, item_id, quantity)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(quote_id)
    .bind(line.item_id())
    .bind(line.quantity())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use quotedesk_core::NewItem;

    struct Fixture {
        db: Database,
        mouse: Item,
        cable: Item,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mouse = db
            .items()
            .insert(&NewItem::new("Wireless mouse", 3500).unwrap())
            .await
            .unwrap();
        let cable = db
            .items()
            .insert(&NewItem::new("USB cable", 1000).unwrap())
            .await
            .unwrap();

        Fixture { db, mouse, cable }
    }

    fn line(item: &Item, quantity: i64) -> NewLine {
        NewLine::new(item.id, quantity).unwrap()
    }

    fn missing_item() -> ItemId {
        ItemId::new(9_999)
    }

    #[tokio::test]
    async fn test_create_and_read_back() {
        let f = fixture().await;
        let created_at = Utc::now();
        let new_quote = NewQuote::new(
            "ACME Corp",
            created_at,
            vec![line(&f.mouse, 2), line(&f.cable, 1)],
        )
        .unwrap();

        let id = f.db.quotes().create(&new_quote).await.unwrap();
        let quote = f.db.quotes().get_by_id(id).await.unwrap().unwrap();

        assert_eq!(quote.id, id);
        assert_eq!(quote.recipient_name, "ACME Corp");
        assert_eq!(quote.created_at, created_at);
        assert_eq!(quote.line_count(), 2);
        assert_eq!(quote.lines[0].item, f.mouse);
        assert_eq!(quote.lines[0].quantity, 2);
        assert_eq!(quote.lines[1].item, f.cable);

        assert_eq!(quote.subtotal().cents(), 8000);
        assert_eq!(quote.item_count(), 3);
        assert!((quote.total_with_tax() - 9680.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_create_without_lines() {
        let f = fixture().await;
        let id = f
            .db
            .quotes()
            .create(&NewQuote::new("Empty", Utc::now(), Vec::new()).unwrap())
            .await
            .unwrap();

        let quote = f.db.quotes().get_by_id(id).await.unwrap().unwrap();
        assert!(quote.is_empty());
        assert!(quote.subtotal().is_zero());
        assert_eq!(quote.total_with_tax(), 0.0);
    }

    #[tokio::test]
    async fn test_ids_are_distinct() {
        let f = fixture().await;
        let repo = f.db.quotes();

        let a = repo
            .create(&NewQuote::new("A", Utc::now(), Vec::new()).unwrap())
            .await
            .unwrap();
        let b = repo
            .create(&NewQuote::new("B", Utc::now(), Vec::new()).unwrap())
            .await
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_with_unknown_item_writes_nothing() {
        let f = fixture().await;
        let lines = vec![
            line(&f.mouse, 1),
            NewLine::new(missing_item(), 1).unwrap(),
        ];

        let err = f
            .db
            .quotes()
            .create(&NewQuote::new("ACME", Utc::now(), lines).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(f.db.quotes().count().await.unwrap(), 0);

        let orphan_lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quote_lines")
            .fetch_one(f.db.pool())
            .await
            .unwrap();
        assert_eq!(orphan_lines, 0);
    }

    #[tokio::test]
    async fn test_add_line_appends() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let id = repo
            .create(&NewQuote::new("ACME", Utc::now(), vec![line(&f.mouse, 2)]).unwrap())
            .await
            .unwrap();

        repo.add_line(id, &line(&f.cable, 4)).await.unwrap();

        let quote = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(quote.line_count(), 2);
        assert_eq!(quote.lines[1].item.id, f.cable.id);
        assert_eq!(quote.lines[1].quantity, 4);
        assert_eq!(quote.subtotal().cents(), 7000 + 4000);
        assert_eq!(quote.item_count(), 6);
    }

    #[tokio::test]
    async fn test_add_same_item_twice_keeps_two_lines() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let id = repo
            .create(&NewQuote::new("ACME", Utc::now(), Vec::new()).unwrap())
            .await
            .unwrap();

        repo.add_line(id, &line(&f.cable, 1)).await.unwrap();
        repo.add_line(id, &line(&f.cable, 1)).await.unwrap();

        let quote = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(quote.line_count(), 2);
        assert_eq!(quote.subtotal().cents(), 2000);
    }

    #[tokio::test]
    async fn test_add_line_to_missing_quote() {
        let f = fixture().await;

        let err = f
            .db
            .quotes()
            .add_line(QuoteId::new(42), &line(&f.mouse, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Quote"));
    }

    #[tokio::test]
    async fn test_add_line_with_unknown_item() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let id = repo
            .create(&NewQuote::new("ACME", Utc::now(), vec![line(&f.mouse, 1)]).unwrap())
            .await
            .unwrap();

        let err = repo
            .add_line(id, &NewLine::new(missing_item(), 1).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let quote = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(quote.line_count(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_quote_is_none() {
        let f = fixture().await;
        assert!(f.db.quotes().get_by_id(QuoteId::new(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_reflects_current_catalog_price() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let id = repo
            .create(&NewQuote::new("ACME", Utc::now(), vec![line(&f.mouse, 2)]).unwrap())
            .await
            .unwrap();

        sqlx::query("UPDATE items SET unit_price_cents = 4000 WHERE id = ?1")
            .bind(f.mouse.id)
            .execute(f.db.pool())
            .await
            .unwrap();

        let quote = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(quote.subtotal().cents(), 8000);
    }

    #[tokio::test]
    async fn test_oversized_stored_quantity_totals_without_overflow() {
        let f = fixture().await;
        let repo = f.db.quotes();

        assert!(NewLine::new(f.mouse.id, 10_000_000_000_000_000).is_err());

        let id = repo
            .create(&NewQuote::new("Bulk", Utc::now(), vec![line(&f.mouse, 1)]).unwrap())
            .await
            .unwrap();

        // rows written outside the validated commands
        sqlx::query("UPDATE quote_lines SET quantity = ?1 WHERE quote_id = ?2")
            .bind(10_000_000_000_000_000_i64)
            .bind(id)
            .execute(f.db.pool())
            .await
            .unwrap();

        let quote = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(quote.subtotal().cents(), i64::MAX);
        assert_eq!(quote.item_count(), 10_000_000_000_000_000);
    }

    #[tokio::test]
    async fn test_list_returns_headers_only() {
        let f = fixture().await;
        let repo = f.db.quotes();

        let first = repo
            .create(&NewQuote::new("First", Utc::now(), vec![line(&f.mouse, 1)]).unwrap())
            .await
            .unwrap();
        let second = repo
            .create(&NewQuote::new("Second", Utc::now(), Vec::new()).unwrap())
            .await
            .unwrap();

        let quotes = repo.list().await.unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].id, first);
        assert_eq!(quotes[0].recipient_name, "First");
        assert!(quotes[0].lines.is_empty());
        assert_eq!(quotes[1].id, second);
    }

    #[tokio::test]
    async fn test_delete_removes_quote_and_lines_but_not_items() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let id = repo
            .create(
                &NewQuote::new("ACME", Utc::now(), vec![line(&f.mouse, 1), line(&f.cable, 2)])
                    .unwrap(),
            )
            .await
            .unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert!(!repo.exists(id).await.unwrap());

        let remaining_lines: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM quote_lines WHERE quote_id = ?1")
                .bind(id)
                .fetch_one(f.db.pool())
                .await
                .unwrap();
        assert_eq!(remaining_lines, 0);

        assert!(f.db.items().exists(f.mouse.id).await.unwrap());
        assert!(f.db.items().exists(f.cable.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_leaves_other_quotes_alone() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let keep = repo
            .create(&NewQuote::new("Keep", Utc::now(), vec![line(&f.mouse, 1)]).unwrap())
            .await
            .unwrap();
        let gone = repo
            .create(&NewQuote::new("Drop", Utc::now(), vec![line(&f.mouse, 3)]).unwrap())
            .await
            .unwrap();

        repo.delete(gone).await.unwrap();

        let kept = repo.get_by_id(keep).await.unwrap().unwrap();
        assert_eq!(kept.line_count(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_quote_without_lines() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let id = repo
            .create(&NewQuote::new("Empty", Utc::now(), Vec::new()).unwrap())
            .await
            .unwrap();

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_incremental_lines_match_upfront_create() {
        let f = fixture().await;
        let repo = f.db.quotes();
        let created_at = Utc::now();
        let lines = vec![line(&f.mouse, 2), line(&f.cable, 1), line(&f.mouse, 5)];

        let upfront = repo
            .create(&NewQuote::new("ACME", created_at, lines.clone()).unwrap())
            .await
            .unwrap();

        let incremental = repo
            .create(&NewQuote::new("ACME", created_at, Vec::new()).unwrap())
            .await
            .unwrap();
        for l in &lines {
            repo.add_line(incremental, l).await.unwrap();
        }

        let a = repo.get_by_id(upfront).await.unwrap().unwrap();
        let b = repo.get_by_id(incremental).await.unwrap().unwrap();

        assert_eq!(a.recipient_name, b.recipient_name);
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.subtotal(), b.subtotal());
        assert_eq!(a.item_count(), b.item_count());
    }

    #[tokio::test]
    async fn test_delete_missing_quote_is_ok() {
        let f = fixture().await;
        f.db.quotes().delete(QuoteId::new(77)).await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_key_enforced_by_schema() {
        let f = fixture().await;
        let id = f
            .db
            .quotes()
            .create(&NewQuote::new("ACME", Utc::now(), Vec::new()).unwrap())
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO quote_lines (quote_id, item_id, quantity) VALUES (?1, ?2, 1)")
            .bind(id)
            .bind(missing_item())
            .execute(f.db.pool())
            .await
            .unwrap_err();

        assert!(matches!(DbError::from(err), DbError::ForeignKeyViolation { .. }));
    }
}
