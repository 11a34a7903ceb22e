//! Integration tests for `UserRepo` against a real database.

use libris_core::field_update::UpdateSet;
use libris_core::users::USER_FIELDS;
use libris_db::models::user::CreateUser;
use libris_db::repositories::UserRepo;
use libris_db::WriteOutcome;
use serde_json::{json, Value};
use sqlx::PgPool;

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        full_name: None,
    }
}

fn update_set(body: Value) -> UpdateSet {
    UpdateSet::from_json(USER_FIELDS, body.as_object().unwrap()).unwrap()
}

async fn setup(pool: &PgPool) {
    libris_db::schema::init_user_schema(pool).await.unwrap();
}

async fn insert(pool: &PgPool, input: &CreateUser) -> i64 {
    match UserRepo::create(pool, input).await.unwrap() {
        WriteOutcome::Applied(id) => id,
        other => panic!("expected insert to apply, got {other:?}"),
    }
}

async fn count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn create_sets_created_at(pool: PgPool) {
    setup(&pool).await;
    let before = chrono::Utc::now() - chrono::Duration::seconds(5);
    let id = insert(&pool, &new_user("ada", "ada@example.com")).await;

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.full_name, None);
    assert!(user.created_at >= before);
}

#[sqlx::test]
async fn duplicate_username_conflicts(pool: PgPool) {
    setup(&pool).await;
    insert(&pool, &new_user("a", "a@x.com")).await;

    let outcome = UserRepo::create(&pool, &new_user("a", "other@x.com"))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Conflict("Username already exists"));
    assert_eq!(count(&pool).await, 1);
}

#[sqlx::test]
async fn duplicate_email_conflicts(pool: PgPool) {
    setup(&pool).await;
    insert(&pool, &new_user("a", "a@x.com")).await;

    let outcome = UserRepo::create(&pool, &new_user("b", "a@x.com"))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Conflict("Email already exists"));
    assert_eq!(count(&pool).await, 1);
}

#[sqlx::test]
async fn update_leaves_other_columns_and_created_at(pool: PgPool) {
    setup(&pool).await;
    let id = insert(
        &pool,
        &CreateUser {
            full_name: Some("Ada Lovelace".into()),
            ..new_user("ada", "ada@example.com")
        },
    )
    .await;
    let before = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    let outcome = UserRepo::update(&pool, id, &update_set(json!({"email": "ada@new.org"})))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Applied(()));

    let after = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(after.email, "ada@new.org");
    assert_eq!(after.username, before.username);
    assert_eq!(after.full_name, before.full_name);
    assert_eq!(after.created_at, before.created_at);
}

#[sqlx::test]
async fn update_into_taken_email_rolls_back(pool: PgPool) {
    setup(&pool).await;
    insert(&pool, &new_user("a", "a@x.com")).await;
    let id = insert(&pool, &new_user("b", "b@x.com")).await;

    let outcome = UserRepo::update(
        &pool,
        id,
        &update_set(json!({"username": "b2", "email": "a@x.com"})),
    )
    .await
    .unwrap();
    assert_eq!(outcome, WriteOutcome::Conflict("Email already exists"));

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(user.username, "b");
    assert_eq!(user.email, "b@x.com");
}

#[sqlx::test]
async fn update_missing_user_is_not_found(pool: PgPool) {
    setup(&pool).await;
    let outcome = UserRepo::update(&pool, 31_337, &update_set(json!({"full_name": "X"})))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::NotFound);
}

#[sqlx::test]
async fn delete_reports_whether_a_row_matched(pool: PgPool) {
    setup(&pool).await;
    let id = insert(&pool, &new_user("a", "a@x.com")).await;

    assert!(UserRepo::delete(&pool, id).await.unwrap());
    assert!(!UserRepo::delete(&pool, id).await.unwrap());
    assert_eq!(count(&pool).await, 0);
}
