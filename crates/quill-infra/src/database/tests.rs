use chrono::{Duration, Utc};
use quill_core::domain::PostChanges;
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use crate::database::entity::blog;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(title: &str, minutes_ago: i64, likes: i64) -> blog::Model {
    blog::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        content: "Content".to_owned(),
        category: None,
        likes,
        created_at: (Utc::now() - Duration::minutes(minutes_ago)).into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("Test Post", 0, 3);
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.like_count, 3);
    assert_eq!(post.display_category(), "Uncategorized");
}

#[tokio::test]
async fn test_list_maps_rows_in_query_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("newer", 1, 0), model("older", 5, 2)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let titles: Vec<_> = repo
        .list_newest_first()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();

    assert_eq!(titles, vec!["newer", "older"]);
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.delete(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_increment_likes_on_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<blog::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.increment_likes(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_update_returns_changed_row() {
    let mut row = model("New", 30, 4);
    row.category = Some("Tech".to_owned());
    let post_id = row.id;
    let created_at = row.created_at;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .update(
            post_id,
            PostChanges {
                title: Some("New".to_owned()),
                category: Some("Tech".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "New");
    assert_eq!(post.display_category(), "Tech");
    assert_eq!(post.like_count, 4);
    assert_eq!(post.created_at, created_at);
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<blog::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo
        .update(
            Uuid::new_v4(),
            PostChanges {
                title: Some("Ghost".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}
