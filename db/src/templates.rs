use common::models::StoredTemplate;
use sqlx::sqlite::{SqliteConnection, SqlitePool};

use crate::generate_id;

pub struct InsertTemplateParams<'a> {
    pub recipe_title: &'a str,
    pub title: &'a str,
    pub slug: &'a str,
    pub replay_json: Option<&'a str>,
    pub template_json: &'a str,
}

async fn insert_on(
    conn: &mut SqliteConnection,
    params: &InsertTemplateParams<'_>,
) -> anyhow::Result<String> {
    let id = generate_id();
    sqlx::query(
        "INSERT INTO templates (id, recipe_title, title, slug, replay_json, template_json) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(params.recipe_title)
    .bind(params.title)
    .bind(params.slug)
    .bind(params.replay_json)
    .bind(params.template_json)
    .execute(conn)
    .await?;
    Ok(id)
}

pub async fn insert_template(
    pool: &SqlitePool,
    params: &InsertTemplateParams<'_>,
) -> anyhow::Result<String> {
    let mut conn = pool.acquire().await?;
    insert_on(&mut *conn, params).await
}

/// Replace every stored template of `recipe_title` with `templates` in one
/// transaction. Nothing is written if any insert fails.
pub async fn replace_templates(
    pool: &SqlitePool,
    recipe_title: &str,
    templates: &[InsertTemplateParams<'_>],
) -> anyhow::Result<Vec<String>> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM templates WHERE recipe_title = ?")
        .bind(recipe_title)
        .execute(&mut *tx)
        .await?;

    let mut ids = Vec::with_capacity(templates.len());
    for params in templates {
        ids.push(insert_on(&mut *tx, params).await?);
    }
    tx.commit().await?;
    Ok(ids)
}

pub async fn list_templates(
    pool: &SqlitePool,
    recipe_title: &str,
) -> anyhow::Result<Vec<StoredTemplate>> {
    Ok(sqlx::query_as::<_, StoredTemplate>(
        "SELECT id, recipe_title, title, slug, replay_json, template_json, created_at \
         FROM templates WHERE recipe_title = ? ORDER BY created_at ASC, rowid ASC",
    )
    .bind(recipe_title)
    .fetch_all(pool)
    .await?)
}

pub async fn get_template(pool: &SqlitePool, id: &str) -> anyhow::Result<Option<StoredTemplate>> {
    Ok(sqlx::query_as::<_, StoredTemplate>(
        "SELECT id, recipe_title, title, slug, replay_json, template_json, created_at \
         FROM templates WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

pub async fn count_templates(pool: &SqlitePool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM templates")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn clear_templates(pool: &SqlitePool, recipe_title: &str) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM templates WHERE recipe_title = ?")
        .bind(recipe_title)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
