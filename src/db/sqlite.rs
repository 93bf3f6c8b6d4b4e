use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::CourseStore;
use crate::error::AppError;
use crate::models::{Course, CourseDraft};

/// [`CourseStore`] backed by the `courses` table.
#[derive(Clone)]
pub struct SqliteCourseStore {
    db: SqlitePool,
}

impl SqliteCourseStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseStore for SqliteCourseStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, name, description, review, date_added, date_updated FROM courses ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(courses)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, name, description, review, date_added, date_updated FROM courses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(course)
    }

    async fn insert(&self, draft: CourseDraft) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (name, description, review, date_added, date_updated)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, description, review, date_added, date_updated
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.review)
        .bind(draft.date_added)
        .bind(draft.date_updated)
        .fetch_one(&self.db)
        .await?;
        Ok(course)
    }

    async fn save(&self, course: &Course) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET name = ?1,
                description = ?2,
                review = ?3,
                date_updated = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&course.name)
        .bind(&course.description)
        .bind(course.review)
        .bind(course.date_updated)
        .bind(course.id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }

    async fn remove(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "DELETE FROM courses WHERE id = ? RETURNING id, name, description, review, date_added, date_updated",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(course)
    }
}
