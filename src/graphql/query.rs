use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::models::Course;
use crate::repository::CourseRepository;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All courses in insertion order.
    async fn courses(&self, ctx: &Context<'_>) -> Result<Vec<Course>> {
        let repo = ctx.data::<CourseRepository>()?;
        repo.get_all_courses().await.map_err(|e| e.extend())
    }

    /// A single course, or null when the id is unknown.
    async fn course(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Course>> {
        let repo = ctx.data::<CourseRepository>()?;
        let found = repo.get_course_by_id(id).await.map_err(|e| e.extend())?;
        Ok(found.found())
    }
}
