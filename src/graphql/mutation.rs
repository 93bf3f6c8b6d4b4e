use async_graphql::{Context, ErrorExtensions, Object, Result, ServerError};

use crate::error::AppError;
use crate::models::{Course, NewCourseRequest, UpdateCourseRequest};
use crate::repository::{CourseRepository, Lookup};

pub struct MutationRoot;

/// Error entry for an unknown id. Recorded on the context so the field
/// resolves to null without discarding the rest of the response.
fn not_found(ctx: &Context<'_>, id: i64) -> ServerError {
    AppError::CourseNotFound(id)
        .extend()
        .into_server_error(ctx.item.pos)
}

#[Object]
impl MutationRoot {
    async fn create_course(&self, ctx: &Context<'_>, input: NewCourseRequest) -> Result<Course> {
        let repo = ctx.data::<CourseRepository>()?;
        input.validate().map_err(|e| e.extend())?;
        repo.add_course(input).await.map_err(|e| e.extend())
    }

    /// Overwrites the supplied fields. Unknown ids yield null and a
    /// `NOT_FOUND` error.
    async fn update_course(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let repo = ctx.data::<CourseRepository>()?;
        input.validate().map_err(|e| e.extend())?;
        match repo.update_course(id, input).await.map_err(|e| e.extend())? {
            Lookup::Found(course) => Ok(Some(course)),
            Lookup::NotFound => {
                ctx.add_error(not_found(ctx, id));
                Ok(None)
            }
        }
    }

    async fn delete_course(&self, ctx: &Context<'_>, id: i64) -> Result<Option<bool>> {
        let repo = ctx.data::<CourseRepository>()?;
        match repo.delete_course(id).await.map_err(|e| e.extend())? {
            Lookup::Found(_) => Ok(Some(true)),
            Lookup::NotFound => {
                ctx.add_error(not_found(ctx, id));
                Ok(None)
            }
        }
    }
}
