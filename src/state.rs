use std::sync::Arc;

use crate::db::CourseStore;
use crate::graphql::{CourseSchema, build_schema};
use crate::repository::CourseRepository;

#[derive(Clone)]
pub struct AppState {
    pub courses: CourseRepository,
    pub schema: CourseSchema,
}

impl AppState {
    pub fn new(courses: CourseRepository) -> Self {
        let schema = build_schema(courses.clone());
        Self { courses, schema }
    }

    pub fn with_store(store: Arc<dyn CourseStore>) -> Self {
        Self::new(CourseRepository::new(store))
    }
}
