use std::sync::Arc;

use service::movies::MovieService;

/// Shared handler state. Holds no movie data: the catalog re-reads the
/// backing file on every request.
#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<MovieService>,
}

impl AppState {
    pub fn new(movies: MovieService) -> Self {
        Self { movies: Arc::new(movies) }
    }
}
