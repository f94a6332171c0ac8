//! Catalog operations over the movie collection.
//!
//! Each call loads the collection from the repository, works on the local
//! copy and, for writes, saves the whole collection back before returning.

use std::sync::Arc;

use models::{Movie, NewMovie};
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::repository::MovieRepository;

pub const NO_MOVIES: &str = "Nenhum filme encontrado";
pub const STORE_MISSING: &str = "Arquivo de filmes não encontrado";
pub const NO_TITLE_MATCH: &str = "Nenhum filme encontrado com esse título";
pub const MOVIE_NOT_FOUND: &str = "Filme não encontrado";
pub const TITLE_PARAM_REQUIRED: &str = "Parâmetro 'titulo' é obrigatório";
pub const ADDED_TO_FAVORITES: &str = "Filme adicionado aos favoritos";
pub const REMOVED_FROM_FAVORITES: &str = "Filme removido dos favoritos";
pub const MOVIE_DELETED: &str = "Filme removido com sucesso";

/// Result of a favorite toggle: the record as persisted after the flip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub movie: Movie,
}

impl FavoriteToggle {
    pub fn message(&self) -> &'static str {
        if self.movie.favorite { ADDED_TO_FAVORITES } else { REMOVED_FROM_FAVORITES }
    }
}

#[derive(Clone)]
pub struct MovieService {
    repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(repo: Arc<dyn MovieRepository>) -> Self {
        Self { repo }
    }

    async fn load_existing(&self) -> Result<Vec<Movie>, ServiceError> {
        self.repo.load().await?.ok_or_else(|| ServiceError::not_found(STORE_MISSING))
    }

    /// Whole collection; an absent or empty collection is not found.
    pub async fn list(&self) -> Result<Vec<Movie>, ServiceError> {
        match self.repo.load().await? {
            Some(movies) if !movies.is_empty() => Ok(movies),
            _ => Err(ServiceError::not_found(NO_MOVIES)),
        }
    }

    /// Favorites only; may be empty as long as the store exists.
    pub async fn favorites(&self) -> Result<Vec<Movie>, ServiceError> {
        let movies = self.load_existing().await?;
        Ok(movies.into_iter().filter(|m| m.favorite).collect())
    }

    /// Case-insensitive title substring search. The query is checked before
    /// the collection is loaded.
    pub async fn search(&self, title: Option<&str>) -> Result<Vec<Movie>, ServiceError> {
        let needle = match title {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ServiceError::Validation(TITLE_PARAM_REQUIRED.into())),
        };

        let movies = match self.repo.load().await? {
            Some(movies) if !movies.is_empty() => movies,
            _ => return Err(ServiceError::not_found(NO_MOVIES)),
        };

        let found: Vec<Movie> = movies.into_iter().filter(|m| m.title_contains(needle)).collect();
        if found.is_empty() {
            return Err(ServiceError::not_found(NO_TITLE_MATCH));
        }
        info!(query = %needle, matches = found.len(), "movies found");
        Ok(found)
    }

    /// First record whose id matches. The store is checked before the id is
    /// interpreted; an id without an integer prefix matches nothing.
    pub async fn get(&self, raw_id: &str) -> Result<Movie, ServiceError> {
        let movies = self.load_existing().await?;
        let idx = position(&movies, raw_id)?;
        Ok(movies[idx].clone())
    }

    pub async fn toggle_favorite(&self, raw_id: &str) -> Result<FavoriteToggle, ServiceError> {
        let mut movies = self.load_existing().await?;
        let idx = position(&movies, raw_id)?;
        let favorite = movies[idx].toggle_favorite();
        self.repo.save(&movies).await?;
        info!(id = movies[idx].id, favorite, "favorite toggled");
        Ok(FavoriteToggle { movie: movies.swap_remove(idx) })
    }

    /// Remove the first matching record and return it.
    pub async fn delete(&self, raw_id: &str) -> Result<Movie, ServiceError> {
        let mut movies = self.load_existing().await?;
        let idx = position(&movies, raw_id)?;
        let removed = movies.remove(idx);
        self.repo.save(&movies).await?;
        info!(id = removed.id, remaining = movies.len(), "movie deleted");
        Ok(removed)
    }

    /// Validate, assign `id = len + 1` and append. Ids are not reused-safe:
    /// after a delete the next create can collide with an existing id.
    pub async fn create(&self, input: NewMovie) -> Result<Movie, ServiceError> {
        input.validate()?;
        // An absent store counts as empty here, and the save below writes the
        // file. Startup never creates it; the first create does.
        let mut movies = self.repo.load().await?.unwrap_or_default();
        let movie = input.into_movie(movies.len() as u64 + 1)?;
        movies.push(movie.clone());
        self.repo.save(&movies).await?;
        info!(id = movie.id, title = %movie.title, "movie created");
        Ok(movie)
    }
}

/// Integer prefix of a path id: leading whitespace and an optional `+` are
/// skipped, then digits are read up to the first non-digit (`"1abc"` and
/// `"1.0"` are both 1). No digits, or a negative sign, yields `None`.
fn parse_id(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

fn position(movies: &[Movie], raw_id: &str) -> Result<usize, ServiceError> {
    let id = parse_id(raw_id);
    if id.is_none() {
        debug!(%raw_id, "id has no integer prefix");
    }
    id.and_then(|id| movies.iter().position(|m| m.id == id))
        .ok_or_else(|| ServiceError::not_found(MOVIE_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movie, MemoryRepository};

    fn service_with(movies: Option<Vec<Movie>>) -> (MovieService, Arc<MemoryRepository>) {
        let repo = Arc::new(MemoryRepository::new(movies));
        (MovieService::new(repo.clone()), repo)
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, "Matrix", "Sci-Fi", false),
            movie(2, "Action Movie", "Ação", true),
            movie(3, "Cidade de Deus", "Drama", false),
        ]
    }

    fn not_found_msg(err: ServiceError) -> String {
        match err {
            ServiceError::NotFound(msg) => msg,
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_rejects_missing_and_empty_store() {
        let (svc, _) = service_with(None);
        assert_eq!(not_found_msg(svc.list().await.unwrap_err()), NO_MOVIES);

        let (svc, _) = service_with(Some(vec![]));
        assert_eq!(not_found_msg(svc.list().await.unwrap_err()), NO_MOVIES);

        let (svc, _) = service_with(Some(catalog()));
        assert_eq!(svc.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn favorites_is_the_flagged_subset() {
        let (svc, _) = service_with(Some(catalog()));
        let favs = svc.favorites().await.unwrap();
        assert_eq!(favs.len(), 1);
        assert!(favs.iter().all(|m| m.favorite));

        let (svc, _) = service_with(Some(vec![]));
        assert!(svc.favorites().await.unwrap().is_empty());

        let (svc, _) = service_with(None);
        assert_eq!(not_found_msg(svc.favorites().await.unwrap_err()), STORE_MISSING);
    }

    #[tokio::test]
    async fn search_validates_query_before_store() {
        let (svc, _) = service_with(None);
        assert!(matches!(svc.search(None).await, Err(ServiceError::Validation(m)) if m == TITLE_PARAM_REQUIRED));
        assert!(matches!(svc.search(Some("")).await, Err(ServiceError::Validation(_))));
        assert_eq!(not_found_msg(svc.search(Some("x")).await.unwrap_err()), NO_MOVIES);

        let (svc, _) = service_with(Some(vec![]));
        assert_eq!(not_found_msg(svc.search(Some("Matrix")).await.unwrap_err()), NO_MOVIES);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let (svc, _) = service_with(Some(catalog()));
        let found = svc.search(Some("ACT")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Action Movie");

        assert_eq!(not_found_msg(svc.search(Some("Titanic")).await.unwrap_err()), NO_TITLE_MATCH);
    }

    #[tokio::test]
    async fn get_checks_store_then_id() {
        let (svc, _) = service_with(None);
        assert_eq!(not_found_msg(svc.get("abc").await.unwrap_err()), STORE_MISSING);

        let (svc, _) = service_with(Some(catalog()));
        assert_eq!(svc.get("3").await.unwrap().title, "Cidade de Deus");
        assert_eq!(not_found_msg(svc.get("99").await.unwrap_err()), MOVIE_NOT_FOUND);
        assert_eq!(not_found_msg(svc.get("abc").await.unwrap_err()), MOVIE_NOT_FOUND);
    }

    #[tokio::test]
    async fn writes_need_an_existing_store() {
        let (svc, repo) = service_with(None);
        assert_eq!(not_found_msg(svc.toggle_favorite("1").await.unwrap_err()), STORE_MISSING);
        assert_eq!(not_found_msg(svc.delete("1").await.unwrap_err()), STORE_MISSING);
        assert!(repo.snapshot().is_none());

        let (svc, _) = service_with(Some(vec![]));
        assert_eq!(not_found_msg(svc.toggle_favorite("1").await.unwrap_err()), MOVIE_NOT_FOUND);
        assert_eq!(not_found_msg(svc.delete("1").await.unwrap_err()), MOVIE_NOT_FOUND);
    }

    #[test]
    fn ids_parse_like_an_integer_prefix() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("1abc"), Some(1));
        assert_eq!(parse_id("1.0"), Some(1));
        assert_eq!(parse_id("  +7"), Some(7));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id(""), None);
    }

    #[tokio::test]
    async fn toggle_persists_and_reports_new_state() {
        let (svc, repo) = service_with(Some(catalog()));

        let first = svc.toggle_favorite("1").await.unwrap();
        assert!(first.movie.favorite);
        assert_eq!(first.message(), ADDED_TO_FAVORITES);
        assert!(repo.snapshot().unwrap()[0].favorite);

        let second = svc.toggle_favorite("1").await.unwrap();
        assert!(!second.movie.favorite);
        assert_eq!(second.message(), REMOVED_FROM_FAVORITES);
        // order is untouched by the toggle
        assert_eq!(repo.snapshot().unwrap(), catalog());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let (svc, repo) = service_with(Some(catalog()));
        let removed = svc.delete("2").await.unwrap();
        assert_eq!(removed.id, 2);

        let left = repo.snapshot().unwrap();
        assert_eq!(left.len(), 2);
        assert_eq!(left[0].id, 1);
        assert_eq!(left[1].id, 3);
        assert_eq!(not_found_msg(svc.get("2").await.unwrap_err()), MOVIE_NOT_FOUND);
        assert_eq!(not_found_msg(svc.delete("2").await.unwrap_err()), MOVIE_NOT_FOUND);
    }

    #[tokio::test]
    async fn create_assigns_length_plus_one() {
        let (svc, repo) = service_with(Some(catalog()));
        let input = NewMovie { title: Some("Her".into()), genre: Some("Drama".into()), favorite: None };
        let created = svc.create(input).await.unwrap();
        assert_eq!(created.id, 4);
        assert!(!created.favorite);
        assert_eq!(repo.snapshot().unwrap().last(), Some(&created));

        // after a delete the next id collides with the last record
        svc.delete("1").await.unwrap();
        let input = NewMovie { title: Some("Up".into()), genre: Some("Animação".into()), favorite: Some(true) };
        let again = svc.create(input).await.unwrap();
        assert_eq!(again.id, 4);
        assert!(again.favorite);
    }

    #[tokio::test]
    async fn create_validates_before_touching_store() {
        let repo = Arc::new(MemoryRepository::failing(None));
        let svc = MovieService::new(repo.clone());
        let input = NewMovie { title: None, genre: Some("Drama".into()), favorite: None };
        assert!(matches!(svc.create(input).await, Err(ServiceError::Model(_))));
        assert!(repo.snapshot().is_none());
    }

    #[tokio::test]
    async fn create_on_missing_store_starts_at_one() {
        let (svc, repo) = service_with(None);
        let input = NewMovie { title: Some("Her".into()), genre: Some("Drama".into()), favorite: None };
        assert_eq!(svc.create(input).await.unwrap().id, 1);
        assert_eq!(repo.snapshot().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_write_surfaces_storage_error() {
        let repo = Arc::new(MemoryRepository::failing(Some(catalog())));
        let svc = MovieService::new(repo.clone());
        assert!(matches!(svc.toggle_favorite("1").await, Err(ServiceError::Storage(_))));
        assert_eq!(repo.snapshot().unwrap(), catalog());
    }
}
