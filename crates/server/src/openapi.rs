use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct MovieDoc { pub id: u64, pub titulo: String, pub genero: String, pub favorito: bool }

#[derive(ToSchema)]
pub struct NewMovieDoc { pub titulo: String, pub genero: String, pub favorito: Option<bool> }

#[derive(ToSchema)]
pub struct ToggleResponseDoc { pub message: String, pub filme: MovieDoc }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::greet,
        crate::routes::movies::list_movies,
        crate::routes::movies::list_favorites,
        crate::routes::movies::search_movies,
        crate::routes::movies::get_movie,
        crate::routes::movies::toggle_favorite,
        crate::routes::movies::delete_movie,
        crate::routes::movies::create_movie,
    ),
    components(
        schemas(
            MovieDoc,
            NewMovieDoc,
            ToggleResponseDoc,
            MessageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "greeting"),
        (name = "filmes")
    )
)]
pub struct ApiDoc;
