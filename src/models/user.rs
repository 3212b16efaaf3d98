use uuid::Uuid;

/// Ensures a row exists for an externally-issued user id. Idempotent by
/// primary key; profile fields arrive later from the identity provider.
pub async fn ensure_user(db: &sqlx::PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}
