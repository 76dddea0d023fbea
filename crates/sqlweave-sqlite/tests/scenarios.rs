mod common;

use common::{create_test_pool, record, record_repo, user_repo, User};
use sqlweave_core::{Expr, Sorting, SqlValue};
use sqlweave_repo::{
    ExistingRowPolicy, IsolationLevel, Query, RepoError, RepositoryOptions,
};

fn all() -> Expr {
    Expr::and(vec![])
}

#[tokio::test]
async fn test_create_twice_reports_duplicate() {
    let pool = create_test_pool().await;
    let mut repo = user_repo(&pool, RepositoryOptions::default());
    let alice = User::new("alice@example.com", "Alice");

    assert_eq!(repo.create(None, "users", &alice).await.unwrap(), 1);
    let err = repo.create(None, "users", &alice).await.unwrap_err();

    assert!(matches!(err, RepoError::DuplicatedEntry));
    assert_eq!(repo.count(None, "users", &all()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_skip_policy() {
    let pool = create_test_pool().await;
    let options = RepositoryOptions::new().with_existing_row(ExistingRowPolicy::Skip);
    let mut repo = user_repo(&pool, options);
    let alice = User::new("alice@example.com", "Alice");

    assert_eq!(repo.create(None, "users", &alice).await.unwrap(), 1);
    assert_eq!(repo.create(None, "users", &alice).await.unwrap(), 0);
}

#[tokio::test]
async fn test_backend_unique_violation_is_normalized() {
    let pool = create_test_pool().await;
    let mut repo = user_repo(&pool, RepositoryOptions::default());
    repo.create(None, "users", &User::new("alice@example.com", "Alice"))
        .await
        .unwrap();

    // Keyed by name, so the update matches nothing and the insert hits the
    // unique email.
    let mut by_name = sqlweave_sqlite::repository(
        pool.clone(),
        sqlweave_repo::SerdeMapper::<User>::new(),
        |user: &User| Expr::eq("name", user.name.as_str()),
        RepositoryOptions::default(),
    );
    let err = by_name
        .save(None, "users", &User::new("alice@example.com", "Mallory"))
        .await
        .unwrap_err();

    assert!(err.is_duplicate());
}

#[tokio::test]
async fn test_save_inserts_then_updates() {
    let pool = create_test_pool().await;
    let mut repo = user_repo(&pool, RepositoryOptions::default());

    let mut bob = User::new("bob@example.com", "Bob");
    assert_eq!(repo.save(None, "users", &bob).await.unwrap(), 1);

    bob.name = String::from("Robert");
    assert_eq!(repo.save(None, "users", &bob).await.unwrap(), 1);

    let stored = repo
        .fetch_one(None, "users", &Expr::eq("email", "bob@example.com"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Robert");
    assert!(stored.id.is_some());
    assert_eq!(repo.count(None, "users", &all()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_and_delete_missing_row() {
    let pool = create_test_pool().await;
    let mut repo = user_repo(&pool, RepositoryOptions::default());
    let ghost = User::new("ghost@example.com", "Ghost");

    assert_eq!(repo.update(None, "users", &ghost).await.unwrap(), 0);
    assert_eq!(repo.delete(None, "users", &ghost).await.unwrap(), 0);

    repo.create(None, "users", &ghost).await.unwrap();
    assert_eq!(repo.delete(None, "users", &ghost).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_many_removes_matching_rows() {
    let pool = create_test_pool().await;
    let mut repo = record_repo(&pool, RepositoryOptions::default());
    for i in 0..10 {
        let email = format!("user{i}@example.com");
        repo.create(None, "users", &record(&email, "U", i % 2 == 0))
            .await
            .unwrap();
    }

    let inactive = Expr::eq("active", false);
    assert_eq!(repo.delete_many(None, "users", &inactive).await.unwrap(), 5);
    assert_eq!(repo.count(None, "users", &inactive).await.unwrap(), 0);
    assert_eq!(repo.count(None, "users", &all()).await.unwrap(), 5);
}

#[tokio::test]
async fn test_transactional_commit_and_rollback() {
    let pool = create_test_pool().await;
    let options = RepositoryOptions::new()
        .with_transactional(true)
        .with_isolation(IsolationLevel::Serializable);
    let mut repo = record_repo(&pool, options);

    assert_eq!(
        repo.create(None, "users", &record("a@example.com", "A", true))
            .await
            .unwrap(),
        1
    );

    let mut by_name = sqlweave_sqlite::repository(
        pool.clone(),
        sqlweave_repo::RecordMapper::default(),
        sqlweave_repo::KeyColumns::new(&["name"]),
        RepositoryOptions::new().with_transactional(true),
    );
    let err = by_name
        .save(None, "users", &record("a@example.com", "B", false))
        .await
        .unwrap_err();
    assert!(err.is_duplicate());
    assert!(!by_name.executor().in_transaction());

    assert_eq!(repo.count(None, "users", &all()).await.unwrap(), 1);
    let rows = repo
        .fetch_many(None, "users", &Query::new())
        .await
        .unwrap();
    assert_eq!(rows[0].get("name"), Some(&SqlValue::Text("A".into())));
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_fetch_many_sorts_and_pages() {
    let pool = create_test_pool().await;
    let mut repo = user_repo(&pool, RepositoryOptions::default());
    for name in ["a", "b", "c", "d"] {
        repo.create(None, "users", &User::new(&format!("{name}@example.com"), name))
            .await
            .unwrap();
    }

    let query = Query::new()
        .with_filter(Expr::ne("name", "a"))
        .with_sort(Sorting::parse("name DESC"))
        .with_limit(2)
        .with_offset(1);
    let names: Vec<String> = repo
        .fetch_many(None, "users", &query)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();

    assert_eq!(names, vec!["c", "b"]);
}
