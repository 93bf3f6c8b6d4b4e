//! GraphQL surface over [`CourseRepository`].
//!
//! Mirrors the REST routes field for field: `courses`, `course(id)` and the
//! `createCourse` / `updateCourse` / `deleteCourse` mutations.

mod mutation;
mod query;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::repository::CourseRepository;
use crate::state::AppState;

pub const GRAPHQL_PATH: &str = "/graphql";

pub type CourseSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(repository: CourseRepository) -> CourseSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(repository)
        .finish()
}

/// Renders the schema as SDL for documentation tooling.
pub fn export_schema_sdl(schema: &CourseSchema) -> String {
    schema.sdl()
}

pub async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
