use std::sync::Arc;

use tracing::{debug, instrument};

use crate::db::CourseStore;
use crate::error::AppError;
use crate::models::{Course, CourseDraft, NewCourseRequest, Timestamp, UpdateCourseRequest};

/// Outcome of an id-keyed operation. A missing id is a normal result,
/// not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn or_not_found(self, id: i64) -> Result<T, AppError> {
        self.found().ok_or(AppError::CourseNotFound(id))
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// The only component allowed to talk to a [`CourseStore`]. REST handlers
/// and GraphQL resolvers both go through it.
#[derive(Clone)]
pub struct CourseRepository {
    store: Arc<dyn CourseStore>,
}

impl CourseRepository {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    #[instrument(skip(self))]
    pub async fn get_all_courses(&self) -> Result<Vec<Course>, AppError> {
        self.store.fetch_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_course_by_id(&self, id: i64) -> Result<Lookup<Course>, AppError> {
        Ok(self.store.fetch_by_id(id).await?.into())
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn add_course(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        let now = Timestamp::now();
        let date_added = req.date_added.unwrap_or(now);
        let date_updated = req.date_updated.unwrap_or(now).max(date_added);

        let course = self
            .store
            .insert(CourseDraft {
                name: req.name,
                description: req.description,
                review: req.review,
                date_added,
                date_updated,
            })
            .await?;
        debug!(id = course.id, "course added");
        Ok(course)
    }

    #[instrument(skip(self, changes))]
    pub async fn update_course(
        &self,
        id: i64,
        changes: UpdateCourseRequest,
    ) -> Result<Lookup<Course>, AppError> {
        let mut current = match self.store.fetch_by_id(id).await? {
            Some(c) => c,
            None => return Ok(Lookup::NotFound),
        };

        changes.apply_to(&mut current);
        current.date_updated = Timestamp::now_after(current.date_updated);

        if !self.store.save(&current).await? {
            // deleted between the read and the write
            return Ok(Lookup::NotFound);
        }
        debug!(id, "course updated");
        Ok(Lookup::Found(current))
    }

    #[instrument(skip(self))]
    pub async fn delete_course(&self, id: i64) -> Result<Lookup<Course>, AppError> {
        let removed: Lookup<Course> = self.store.remove(id).await?.into();
        if removed.is_found() {
            debug!(id, "course deleted");
        }
        Ok(removed)
    }
}
