use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use thiserror::Error;
use tracing::instrument;

use crate::models::{CreateItemInput, Item, UpdateItemInput};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no item found with id {id}")]
    NotFound { id: i64 },
    #[error("item {id} is missing required fields")]
    CorruptRecord { id: i64 },
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for items. The single owner of the `items` table.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Every stored row, complete or not.
    async fn list(&self) -> StoreResult<Vec<Item>>;

    /// `Ok(None)` when no row has `id`; `CorruptRecord` when the row exists
    /// but is incomplete.
    async fn find(&self, id: i64) -> StoreResult<Option<Item>>;

    /// Inserts a new unsold item and returns the stored row.
    async fn create(&self, input: CreateItemInput) -> StoreResult<Item>;

    /// Applies the supplied fields only. The returned item carries `id` and
    /// those fields; anything not supplied is `None`. The resulting row is not
    /// checked for completeness.
    async fn update(&self, id: i64, input: UpdateItemInput) -> StoreResult<Item>;

    async fn delete(&self, id: i64) -> StoreResult<()>;
}

pub struct SqlItemStore {
    pool: SqlitePool,
}

impl SqlItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for SqlItemStore {
    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price, sold
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: i64) -> StoreResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price, sold
            FROM items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match item {
            Some(item) if !item.is_complete() => {
                tracing::warn!(id, ?item, "corrupt item record");
                Err(StoreError::CorruptRecord { id })
            }
            item => Ok(item),
        }
    }

    #[instrument(skip(self))]
    async fn create(&self, input: CreateItemInput) -> StoreResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, price, sold)
            VALUES (?, ?, ?)
            RETURNING id, name, price, sold
            "#,
        )
        .bind(input.name)
        .bind(input.price)
        .bind(false)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = item.id, "item created");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i64, input: UpdateItemInput) -> StoreResult<Item> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE items SET ");
        {
            let mut set = query.separated(", ");
            if let Some(name) = &input.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(price) = input.price {
                set.push("price = ").push_bind_unseparated(price);
            }
            if let Some(sold) = input.sold {
                set.push("sold = ").push_bind_unseparated(sold);
            }
            // Nothing to change still has to hit the row to report a missing id.
            if input.is_empty() {
                set.push("id = id");
            }
        }
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        Ok(Item {
            id,
            name: input.name,
            price: input.price,
            sold: input.sold,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}
