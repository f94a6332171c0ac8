pub mod movies;

use axum::{
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(get, path = "/", tag = "greeting", responses((status = 200, description = "Plain-text greeting", body = String)))]
pub async fn greet() -> &'static str {
    "Hello World!"
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: greeting, movie catalog, and the
/// metrics/OpenAPI endpoints.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(greet))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    // static segments win over `:id`, so /filmes/favoritos never reaches get_movie
    let catalog = Router::new()
        .route("/filmes", get(movies::list_movies).post(movies::create_movie))
        .route("/filmes/favoritos", get(movies::list_favorites))
        .route("/filmes/pesquisar", get(movies::search_movies))
        .route("/filmes/favoritos/:id", patch(movies::toggle_favorite))
        .route(
            "/filmes/:id",
            get(movies::get_movie)
                .patch(movies::toggle_favorite)
                .delete(movies::delete_movie),
        );

    public
        .merge(catalog)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
