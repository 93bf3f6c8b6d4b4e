use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::db::CourseStore;
use crate::error::AppError;
use crate::models::{Course, CourseDraft};

/// Process-local [`CourseStore`]. Ids start at 1 and are never reused,
/// matching the `AUTOINCREMENT` column of the SQLite table.
#[derive(Default)]
pub struct InMemoryCourseStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Course>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Course>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(&self, draft: CourseDraft) -> Result<Course, AppError> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let course = draft.into_course(inner.last_id);
        inner.rows.insert(course.id, course.clone());
        Ok(course)
    }

    async fn save(&self, course: &Course) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().await;
        match inner.rows.get_mut(&course.id) {
            Some(row) => {
                // date_added is immutable once stored
                let date_added = row.date_added;
                *row = course.clone();
                row.date_added = date_added;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: i64) -> Result<Option<Course>, AppError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.rows.remove(&id))
    }
}
