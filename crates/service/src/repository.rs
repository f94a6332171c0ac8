use async_trait::async_trait;
use models::Movie;

use crate::errors::ServiceError;
use crate::storage::json_array_store::JsonArrayStore;

/// Trait abstraction over where the movie collection lives.
///
/// `load` returns `None` for an absent store; `save` replaces the whole
/// collection.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn load(&self) -> Result<Option<Vec<Movie>>, ServiceError>;
    async fn save(&self, movies: &[Movie]) -> Result<(), ServiceError>;
}

#[async_trait]
impl MovieRepository for JsonArrayStore<Movie> {
    async fn load(&self) -> Result<Option<Vec<Movie>>, ServiceError> { JsonArrayStore::load(self).await }
    async fn save(&self, movies: &[Movie]) -> Result<(), ServiceError> { JsonArrayStore::save(self, movies).await }
}
