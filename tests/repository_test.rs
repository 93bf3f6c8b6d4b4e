use std::sync::Arc;
use std::time::Duration;

use async_graphql::MaybeUndefined;
use course_catalog::config::AppConfig;
use course_catalog::db::{self, InMemoryCourseStore, SqliteCourseStore};
use course_catalog::models::{NewCourseRequest, Timestamp, UpdateCourseRequest};
use course_catalog::repository::{CourseRepository, Lookup};
use sqlx::sqlite::SqlitePoolOptions;

async fn sqlite_repo() -> CourseRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    CourseRepository::new(Arc::new(SqliteCourseStore::new(pool)))
}

fn memory_repo() -> CourseRepository {
    CourseRepository::new(Arc::new(InMemoryCourseStore::new()))
}

fn algorithms() -> NewCourseRequest {
    NewCourseRequest {
        name: "Algorithms".to_string(),
        description: Some("Intro".to_string()),
        review: 5,
        date_added: None,
        date_updated: None,
    }
}

fn named(name: &str) -> NewCourseRequest {
    NewCourseRequest {
        name: name.to_string(),
        description: None,
        review: 0,
        date_added: None,
        date_updated: None,
    }
}

async fn add_then_get(repo: CourseRepository) {
    let before = Timestamp::now();
    let created = repo.add_course(algorithms()).await.unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Algorithms");
    assert_eq!(created.description.as_deref(), Some("Intro"));
    assert_eq!(created.review, 5);
    assert_eq!(created.date_added, created.date_updated);
    assert!(created.date_added >= before);

    let fetched = repo.get_course_by_id(created.id).await.unwrap();
    assert_eq!(fetched, Lookup::Found(created));
}

async fn update_changes_only_supplied_fields(repo: CourseRepository) {
    let created = repo.add_course(algorithms()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let changes = UpdateCourseRequest {
        review: Some(9),
        ..Default::default()
    };
    let updated = repo
        .update_course(created.id, changes)
        .await
        .unwrap()
        .found()
        .expect("course should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.review, 9);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.date_added, created.date_added);
    assert!(updated.date_updated > created.date_updated);

    let stored = repo.get_course_by_id(created.id).await.unwrap().found().unwrap();
    assert_eq!(stored, updated);
}

async fn delete_then_get(repo: CourseRepository) {
    let created = repo.add_course(algorithms()).await.unwrap();

    let removed = repo.delete_course(created.id).await.unwrap();
    assert_eq!(removed, Lookup::Found(created.clone()));

    let fetched = repo.get_course_by_id(created.id).await.unwrap();
    assert_eq!(fetched, Lookup::NotFound);
}

async fn missing_ids_report_not_found(repo: CourseRepository) {
    assert_eq!(repo.get_course_by_id(999).await.unwrap(), Lookup::NotFound);
    assert_eq!(
        repo.update_course(999, UpdateCourseRequest::default()).await.unwrap(),
        Lookup::NotFound
    );
    assert_eq!(repo.delete_course(999).await.unwrap(), Lookup::NotFound);
}

async fn list_reflects_adds_and_deletes(repo: CourseRepository) {
    let mut ids = Vec::new();
    for name in ["Algorithms", "Compilers", "Databases", "Networks", "Graphics"] {
        ids.push(repo.add_course(named(name)).await.unwrap().id);
    }
    repo.delete_course(ids[1]).await.unwrap();
    repo.delete_course(ids[3]).await.unwrap();
    repo.update_course(
        ids[4],
        UpdateCourseRequest {
            name: Some("Computer Graphics".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let all = repo.get_all_courses().await.unwrap();
    let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Algorithms", "Databases", "Computer Graphics"]);
    let listed: Vec<_> = all.iter().map(|c| c.id).collect();
    assert_eq!(listed, [ids[0], ids[2], ids[4]]);
}

async fn ids_are_not_reused(repo: CourseRepository) {
    let first = repo.add_course(named("First")).await.unwrap();
    repo.delete_course(first.id).await.unwrap();
    let second = repo.add_course(named("Second")).await.unwrap();
    assert!(second.id > first.id);
}

async fn supplied_dates_are_kept(repo: CourseRepository) {
    let added: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
    let mut req = named("Archived");
    req.date_added = Some(added);

    let created = repo.add_course(req).await.unwrap();
    assert_eq!(created.date_added, added);
    assert_eq!(created.date_updated, added);

    let mut req = named("Backwards");
    req.date_added = Some("2024-06-01T00:00:00Z".parse().unwrap());
    req.date_updated = Some("2024-01-01T00:00:00Z".parse().unwrap());
    let created = repo.add_course(req).await.unwrap();
    assert!(created.date_updated >= created.date_added);
}

async fn null_description_clears_it(repo: CourseRepository) {
    let created = repo.add_course(algorithms()).await.unwrap();

    let changes = UpdateCourseRequest {
        description: MaybeUndefined::Null,
        ..Default::default()
    };
    let updated = repo.update_course(created.id, changes).await.unwrap().found().unwrap();
    assert_eq!(updated.description, None);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.review, created.review);

    let stored = repo.get_course_by_id(created.id).await.unwrap().found().unwrap();
    assert_eq!(stored.description, None);
}

async fn date_updated_strictly_advances(repo: CourseRepository) {
    let future: Timestamp = "2999-01-01T00:00:00Z".parse().unwrap();
    let mut req = named("Scheduled");
    req.date_updated = Some(future);
    let created = repo.add_course(req).await.unwrap();
    assert_eq!(created.date_updated, future);

    let first = repo
        .update_course(created.id, UpdateCourseRequest::default())
        .await
        .unwrap()
        .found()
        .unwrap();
    let second = repo
        .update_course(created.id, UpdateCourseRequest::default())
        .await
        .unwrap()
        .found()
        .unwrap();
    assert!(first.date_updated > created.date_updated);
    assert!(second.date_updated > first.date_updated);
}

#[tokio::test]
async fn memory_null_description_clears_it() {
    null_description_clears_it(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_null_description_clears_it() {
    null_description_clears_it(sqlite_repo().await).await;
}

#[tokio::test]
async fn memory_date_updated_strictly_advances() {
    date_updated_strictly_advances(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_date_updated_strictly_advances() {
    date_updated_strictly_advances(sqlite_repo().await).await;
}

#[tokio::test]
async fn connect_with_memory_url_shares_one_schema() {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 5,
        ..AppConfig::default()
    };
    let pool = db::connect(&config).await.expect("Failed to connect");
    let repo = CourseRepository::new(Arc::new(SqliteCourseStore::new(pool.clone())));
    repo.add_course(algorithms()).await.unwrap();

    let (a, b, c, d) = tokio::join!(
        repo.get_all_courses(),
        repo.get_all_courses(),
        repo.get_all_courses(),
        repo.get_all_courses(),
    );
    for listed in [a, b, c, d] {
        assert_eq!(listed.expect("schema should exist on every connection").len(), 1);
    }
    assert_eq!(pool.size(), 1);
}

#[tokio::test]
async fn memory_add_then_get() {
    add_then_get(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_add_then_get() {
    add_then_get(sqlite_repo().await).await;
}

#[tokio::test]
async fn memory_update_changes_only_supplied_fields() {
    update_changes_only_supplied_fields(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_update_changes_only_supplied_fields() {
    update_changes_only_supplied_fields(sqlite_repo().await).await;
}

#[tokio::test]
async fn memory_delete_then_get() {
    delete_then_get(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_delete_then_get() {
    delete_then_get(sqlite_repo().await).await;
}

#[tokio::test]
async fn memory_missing_ids_report_not_found() {
    missing_ids_report_not_found(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_missing_ids_report_not_found() {
    missing_ids_report_not_found(sqlite_repo().await).await;
}

#[tokio::test]
async fn memory_list_reflects_adds_and_deletes() {
    list_reflects_adds_and_deletes(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_list_reflects_adds_and_deletes() {
    list_reflects_adds_and_deletes(sqlite_repo().await).await;
}

#[tokio::test]
async fn memory_ids_are_not_reused() {
    ids_are_not_reused(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_ids_are_not_reused() {
    ids_are_not_reused(sqlite_repo().await).await;
}

#[tokio::test]
async fn memory_supplied_dates_are_kept() {
    supplied_dates_are_kept(memory_repo()).await;
}

#[tokio::test]
async fn sqlite_supplied_dates_are_kept() {
    supplied_dates_are_kept(sqlite_repo().await).await;
}

#[tokio::test]
async fn sqlite_ping() {
    sqlite_repo().await.ping().await.expect("ping should succeed");
}
