use async_graphql::{InputObject, MaybeUndefined, SimpleObject};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::Timestamp;

pub const MAX_NAME_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub review: i32,
    pub date_added: Timestamp,
    pub date_updated: Timestamp,
}

/// Body of `POST /api/courses` and input of `createCourse`.
#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "CourseInput")]
pub struct NewCourseRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    #[graphql(default)]
    pub review: i32,
    pub date_added: Option<Timestamp>,
    pub date_updated: Option<Timestamp>,
}

/// Body of `PUT /api/courses/{id}` and input of `updateCourse`.
/// Absent fields are left untouched; an explicit `null` description clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "CourseUpdateInput")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub description: MaybeUndefined<String>,
    pub review: Option<i32>,
}

/// A course ready to be persisted, still without its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub name: String,
    pub description: Option<String>,
    pub review: i32,
    pub date_added: Timestamp,
    pub date_updated: Timestamp,
}

impl CourseDraft {
    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            name: self.name,
            description: self.description,
            review: self.review,
            date_added: self.date_added,
            date_updated: self.date_updated,
        }
    }
}

impl NewCourseRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name)
    }
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }

    /// Overwrites the supplied fields of `course`.
    pub fn apply_to(self, course: &mut Course) {
        if let Some(name) = self.name {
            course.name = name;
        }
        match self.description {
            MaybeUndefined::Value(description) => course.description = Some(description),
            MaybeUndefined::Null => course.description = None,
            MaybeUndefined::Undefined => {}
        }
        if let Some(review) = self.review {
            course.review = review;
        }
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be blank".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}
