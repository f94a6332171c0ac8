use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use models::{Movie, NewMovie};
use serde::{Deserialize, Serialize};
use service::{errors::ServiceError, movies::MOVIE_DELETED};
use tracing::debug;

use crate::errors::{ApiError, INVALID_BODY};
use crate::observability;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub titulo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub message: &'static str,
    pub filme: Movie,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn observe<T>(operation: &'static str, result: Result<T, ServiceError>) -> Result<T, ApiError> {
    let result = result.map_err(ApiError::from);
    observability::record(operation, &result);
    result
}

#[utoipa::path(get, path = "/filmes", tag = "filmes", responses((status = 200, description = "All movies", body = [crate::openapi::MovieDoc]), (status = 404, description = "No movies", body = crate::openapi::ErrorDoc)))]
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    observe("list", state.movies.list().await).map(Json)
}

#[utoipa::path(get, path = "/filmes/favoritos", tag = "filmes", responses((status = 200, description = "Favorite movies", body = [crate::openapi::MovieDoc]), (status = 404, description = "Backing file missing", body = crate::openapi::ErrorDoc)))]
pub async fn list_favorites(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    observe("favorites", state.movies.favorites().await).map(Json)
}

#[utoipa::path(
    get,
    path = "/filmes/pesquisar",
    tag = "filmes",
    params(("titulo" = String, Query, description = "Case-insensitive title substring")),
    responses(
        (status = 200, description = "Matching movies", body = [crate::openapi::MovieDoc]),
        (status = 400, description = "Missing titulo", body = crate::openapi::ErrorDoc),
        (status = 404, description = "No match", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search_movies(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let Query(params) = params.unwrap_or_else(|e| {
        debug!(error = %e, "unparsable search query");
        Query(SearchParams::default())
    });
    observe("search", state.movies.search(params.titulo.as_deref()).await).map(Json)
}

#[utoipa::path(get, path = "/filmes/{id}", tag = "filmes", params(("id" = u64, Path, description = "Movie id")), responses((status = 200, description = "Movie", body = crate::openapi::MovieDoc), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    observe("get", state.movies.get(&id).await).map(Json)
}

/// Served on both `PATCH /filmes/{id}` and `PATCH /filmes/favoritos/{id}`.
#[utoipa::path(patch, path = "/filmes/{id}", tag = "filmes", params(("id" = u64, Path, description = "Movie id")), responses((status = 200, description = "Favorite flag flipped", body = crate::openapi::ToggleResponseDoc), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let toggled = observe("toggle_favorite", state.movies.toggle_favorite(&id).await)?;
    Ok(Json(ToggleResponse { message: toggled.message(), filme: toggled.movie }))
}

#[utoipa::path(delete, path = "/filmes/{id}", tag = "filmes", params(("id" = u64, Path, description = "Movie id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)))]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    observe("delete", state.movies.delete(&id).await)?;
    Ok(Json(MessageResponse { message: MOVIE_DELETED }))
}

#[utoipa::path(post, path = "/filmes", tag = "filmes", request_body = crate::openapi::NewMovieDoc, responses((status = 201, description = "Created", body = crate::openapi::MovieDoc), (status = 400, description = "Missing titulo or genero", body = crate::openapi::ErrorDoc)))]
pub async fn create_movie(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let created = match decode_new_movie(&headers, &body) {
        Ok(input) => state.movies.create(input).await,
        Err(e) => Err(e),
    };
    let created = observe("create", created)?;
    Ok((StatusCode::CREATED, Json(created)))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// A body that is not declared as JSON, or is blank, carries no fields: it
/// decodes to an empty input so the required-field check answers. Only a
/// declared JSON body that fails to decode is an invalid body.
fn decode_new_movie(headers: &HeaderMap, body: &[u8]) -> Result<NewMovie, ServiceError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NewMovie::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "create body rejected");
        ServiceError::Validation(INVALID_BODY.into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers(value: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        h
    }

    #[test]
    fn undeclared_or_blank_body_decodes_empty() {
        let input = decode_new_movie(&HeaderMap::new(), br#"{"titulo":"Her","genero":"Drama"}"#).unwrap();
        assert_eq!(input, NewMovie::default());

        let input = decode_new_movie(&json_headers("application/json"), b" ").unwrap();
        assert_eq!(input, NewMovie::default());
    }

    #[test]
    fn declared_json_is_decoded_or_rejected() {
        let input = decode_new_movie(
            &json_headers("application/json; charset=utf-8"),
            br#"{"titulo":"Her","genero":"Drama"}"#,
        )
        .unwrap();
        assert_eq!(input.title.as_deref(), Some("Her"));

        let err = decode_new_movie(&json_headers("application/json"), b"{\"titulo\": 5}").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == INVALID_BODY));
    }
}
