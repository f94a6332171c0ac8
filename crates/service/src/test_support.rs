#![cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;
use models::Movie;

use crate::errors::ServiceError;
use crate::repository::MovieRepository;

/// In-memory repository; `None` stands for a missing backing file.
pub struct MemoryRepository {
    inner: Mutex<Option<Vec<Movie>>>,
    fail_writes: bool,
}

impl MemoryRepository {
    pub fn new(movies: Option<Vec<Movie>>) -> Self {
        Self { inner: Mutex::new(movies), fail_writes: false }
    }

    pub fn failing(movies: Option<Vec<Movie>>) -> Self {
        Self { inner: Mutex::new(movies), fail_writes: true }
    }

    pub fn snapshot(&self) -> Option<Vec<Movie>> {
        self.inner.lock().expect("lock").clone()
    }
}

#[async_trait]
impl MovieRepository for MemoryRepository {
    async fn load(&self) -> Result<Option<Vec<Movie>>, ServiceError> {
        Ok(self.snapshot())
    }

    async fn save(&self, movies: &[Movie]) -> Result<(), ServiceError> {
        if self.fail_writes {
            return Err(ServiceError::Storage("write refused".into()));
        }
        *self.inner.lock().expect("lock") = Some(movies.to_vec());
        Ok(())
    }
}

pub fn movie(id: u64, title: &str, genre: &str, favorite: bool) -> Movie {
    Movie { id, title: title.into(), genre: genre.into(), favorite }
}
