//! # Item Repository
//!
//! Catalog access. Quotes only read items; the insert path exists for the
//! seed binary and for tests.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use quotedesk_core::{Item, ItemId, NewItem};

/// Repository for catalog items.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: ItemId) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, description, unit_price_cents
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Returns whether the item exists.
    pub async fn exists(&self, id: ItemId) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        item_exists(&mut conn, id).await
    }

    /// Lists the whole catalog ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, description, unit_price_cents
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a catalog item and returns it with its assigned id.
    pub async fn insert(&self, item: &NewItem) -> DbResult<Item> {
        debug!(description = %item.description(), price = item.unit_price_cents(), "Inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO items (description, unit_price_cents)
            VALUES (?1, ?2)
            "#,
        )
        .bind(item.description())
        .bind(item.unit_price_cents())
        .execute(&self.pool)
        .await?;

        Ok(Item::new(
            ItemId::new(result.last_insert_rowid()),
            item.description(),
            item.unit_price_cents(),
        ))
    }

    /// Counts catalog items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Existence check usable inside another repository's transaction.
pub(crate) async fn item_exists(conn: &mut SqliteConnection, id: ItemId) -> DbResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE id = ?1")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use quotedesk_core::{ItemId, NewItem};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let items = db.items();

        let mouse = items.insert(&NewItem::new("Wireless mouse", 3500).unwrap()).await.unwrap();
        let cable = items.insert(&NewItem::new("USB cable", 1000).unwrap()).await.unwrap();
        assert_ne!(mouse.id, cable.id);

        let found = items.get_by_id(mouse.id).await.unwrap().unwrap();
        assert_eq!(found, mouse);
        assert_eq!(found.unit_price_cents, 3500);

        assert!(items.get_by_id(ItemId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_list_and_count() {
        let db = test_db().await;
        let items = db.items();

        assert_eq!(items.count().await.unwrap(), 0);
        assert!(items.list().await.unwrap().is_empty());

        let a = items.insert(&NewItem::new("A", 100).unwrap()).await.unwrap();
        let b = items.insert(&NewItem::new("B", 0).unwrap()).await.unwrap();

        assert!(items.exists(a.id).await.unwrap());
        assert!(!items.exists(ItemId::new(a.id.get() + 100)).await.unwrap());
        assert_eq!(items.count().await.unwrap(), 2);
        assert_eq!(items.list().await.unwrap(), vec![a, b]);
    }
}
