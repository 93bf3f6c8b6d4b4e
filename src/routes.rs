use axum::{Router, routing::{get, post}};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::graphql::{self, GRAPHQL_PATH};
use crate::state::AppState;

/// Full application router: REST under `/api`, GraphQL on `/graphql`.
/// GraphiQL is served on `GET /graphql` when `playground` is set.
pub fn router(state: AppState, playground: bool) -> Router {
    let graphql_route = if playground {
        get(graphql::graphiql).post(graphql::graphql_handler)
    } else {
        post(graphql::graphql_handler)
    };

    api::router()
        .route(GRAPHQL_PATH, graphql_route)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
