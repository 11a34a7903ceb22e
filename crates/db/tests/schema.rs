//! Integration tests for the schema initializer.

use sqlx::PgPool;

async fn table_exists(pool: &PgPool, table: &str) -> bool {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name::text = $1)",
    )
    .bind(table)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test]
async fn catalog_schema_creates_books_table(pool: PgPool) {
    assert!(!table_exists(&pool, "books").await);
    libris_db::schema::init_catalog_schema(&pool).await.unwrap();
    assert!(table_exists(&pool, "books").await);
    assert!(!table_exists(&pool, "users").await);
}

#[sqlx::test]
async fn user_schema_creates_users_table(pool: PgPool) {
    libris_db::schema::init_user_schema(&pool).await.unwrap();
    assert!(table_exists(&pool, "users").await);
    assert!(!table_exists(&pool, "books").await);
}

#[sqlx::test]
async fn schema_init_is_idempotent(pool: PgPool) {
    libris_db::schema::init_catalog_schema(&pool).await.unwrap();
    sqlx::query("INSERT INTO books (title, author) VALUES ('Dune', 'Herbert')")
        .execute(&pool)
        .await
        .unwrap();

    libris_db::schema::init_catalog_schema(&pool).await.unwrap();
    libris_db::schema::init_user_schema(&pool).await.unwrap();
    libris_db::schema::init_user_schema(&pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "re-running the initializer must not touch existing rows");
}

#[sqlx::test]
async fn unique_constraints_use_expected_names(pool: PgPool) {
    libris_db::schema::init_catalog_schema(&pool).await.unwrap();
    libris_db::schema::init_user_schema(&pool).await.unwrap();

    let mut names: Vec<String> = sqlx::query_scalar(
        "SELECT constraint_name::text FROM information_schema.table_constraints \
         WHERE constraint_type = 'UNIQUE' AND table_name IN ('books', 'users')",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    names.sort();

    assert_eq!(
        names,
        vec!["uq_books_isbn", "uq_users_email", "uq_users_username"]
    );
}

#[sqlx::test]
async fn health_check_succeeds(pool: PgPool) {
    libris_db::health_check(&pool).await.unwrap();
}
