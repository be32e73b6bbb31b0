use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Category shown as "current" when a view is not scoped to one.
pub async fn get_default_category(pool: &SqlitePool) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type FROM categories ORDER BY id LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, kind: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO categories (type) VALUES (?1)
        "#,
    )
    .bind(kind)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Inserts categories keeping their ids, replacing rows that already exist.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT INTO categories (id, type) VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(&category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{establish_in_memory, run_migrations};

    async fn pool() -> SqlitePool {
        let pool = establish_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn categories_come_back_ordered_by_id() {
        let pool = pool().await;
        import_categories(
            &pool,
            vec![
                Category { id: 3, kind: "Geography".into() },
                Category { id: 1, kind: "Science".into() },
            ],
        )
        .await
        .unwrap();
        create_category(&pool, "Sports").await.unwrap();

        let kinds: Vec<_> = get_all_categories(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.id, c.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (1, "Science".to_owned()),
                (3, "Geography".to_owned()),
                (4, "Sports".to_owned())
            ]
        );
    }

    #[tokio::test]
    async fn default_category_is_lowest_id() {
        let pool = pool().await;
        assert_eq!(get_default_category(&pool).await.unwrap(), None);

        create_category(&pool, "Science").await.unwrap();
        create_category(&pool, "Art").await.unwrap();
        let default = get_default_category(&pool).await.unwrap().unwrap();
        assert_eq!(default.kind, "Science");
    }

    #[tokio::test]
    async fn missing_category_is_none() {
        let pool = pool().await;
        assert_eq!(get_category(&pool, 42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn import_overwrites_existing_label() {
        let pool = pool().await;
        let id = create_category(&pool, "Scince").await.unwrap();
        import_categories(&pool, vec![Category { id, kind: "Science".into() }])
            .await
            .unwrap();
        assert_eq!(get_category(&pool, id).await.unwrap().unwrap().kind, "Science");
    }
}
